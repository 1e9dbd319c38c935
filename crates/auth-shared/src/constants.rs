//! Application-wide constants

pub const DEFAULT_BASE_DURATION_SECS: u64 = 86_400;
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const DEFAULT_REDIS_MAX_CONNECTIONS: u32 = 16;
pub const DEFAULT_REDIS_CONNECT_TIMEOUT_MS: u64 = 3000;
