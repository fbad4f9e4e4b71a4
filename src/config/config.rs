use dotenv::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn init() -> Config {
        dotenv().ok();
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let server_host =
            std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = std::env::var("SERVER_PORT").unwrap_or_else(|_| String::new());

        let server_port = if server_port.is_empty() {
            8080 // Default port if environment variable is not set
        } else {
            server_port
                .parse::<u16>()
                .expect("Failed to parse SERVER_PORT as u16")
        };

        Config {
            database_url,
            server_host,
            server_port,
        }
    }
}
