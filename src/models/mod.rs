pub mod player;
pub mod response;
pub mod schema;
