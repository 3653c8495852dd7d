use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with_profile(None)
    }

    /// Same as `from_env`, with a profile name that wins over `PROFILE`.
    pub fn from_env_with_profile(profile: Option<String>) -> Self {
        let profile = profile
            .or_else(|| env::var("PROFILE").ok())
            .unwrap_or_else(|| "default".to_string());

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            if profile == "default" {
                "sqlite://books_manager.db?mode=rwc".to_string()
            } else {
                format!("sqlite://books_manager_{}.db?mode=rwc", profile)
            }
        });

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            profile,
        }
    }
}
