use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub mail: MailConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".into()),
            port: std::env::var("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".into())
                .parse()?,
            username: std::env::var("DATABASE_USERNAME").unwrap_or_else(|_| "app".into()),
            password: std::env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "passwd".into()),
            database: std::env::var("DATABASE_NAME").unwrap_or_else(|_| "bookings".into()),
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".into()),
            port: std::env::var("REDIS_PORT")
                .unwrap_or_else(|_| "6379".into())
                .parse()?,
        };
        let mail = MailConfig {
            gateway_url: std::env::var("MAIL_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:1025/send".into()),
            owner_address: std::env::var("MAIL_OWNER_ADDRESS")
                .unwrap_or_else(|_| "owner@fort-smythe.com".into()),
        };
        let session = SessionConfig {
            // seconds; sessions idle longer than this are dropped by the store
            ttl: std::env::var("SESSION_TTL")
                .unwrap_or_else(|_| "86400".into())
                .parse()?,
        };
        Ok(Self {
            database,
            redis,
            mail,
            session,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct MailConfig {
    pub gateway_url: String,
    pub owner_address: String,
}

pub struct SessionConfig {
    pub ttl: u64,
}
