pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 4000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.sqlite?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 5;
pub const DEFAULT_DB_MIN_IDLE: i64 = 1;
