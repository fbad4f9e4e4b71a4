pub mod database;
pub mod resolver;
pub mod setup;
pub mod tables;
