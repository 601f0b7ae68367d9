use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,

    /// Exposes the unauthenticated `/api/debug/all` dump.
    pub debug_routes: bool,

    // Demo data: wipe and seed this user at startup
    pub seed_user_id: Option<String>,
    pub seed_user_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://activities.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_ttl_secs: env::var("JWT_TTL_SECS")
                .unwrap_or_else(|_| "300".into()) // 5 minutes
                .parse()
                .expect("JWT_TTL_SECS must be a number"),

            debug_routes: env::var("DEBUG_ROUTES")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),

            seed_user_id: env::var("SEED_USER_ID").ok().filter(|s| !s.is_empty()),
            seed_user_name: env::var("SEED_USER_NAME").unwrap_or_else(|_| "Demo".into()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// In-memory configuration for tests.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: "test-secret-do-not-use".into(),
            jwt_ttl_secs: 300,
            debug_routes: true,
            seed_user_id: None,
            seed_user_name: "Demo".into(),
        }
    }
}
