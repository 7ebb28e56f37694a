use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub security: SecurityConfig,
    pub store: StoreConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub admin_username: String,
    /// Lowercase hex sha256 digest of the admin password.
    pub admin_password_sha256: String,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "file" or "memory"
    pub backend: String,
    pub schema_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Upper bound on each awaited I/O call (credential verification, store access).
    pub io_timeout_secs: u64,
    pub enable_request_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("ADMIN_USERNAME") {
            self.security.admin_username = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_SHA256") {
            self.security.admin_password_sha256 = v.to_lowercase();
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Store overrides
        if let Ok(v) = env::var("SCHEMA_STORE_BACKEND") {
            self.store.backend = v;
        }
        if let Ok(v) = env::var("SCHEMA_STORE_PATH") {
            self.store.schema_path = v;
        }

        // Gateway overrides
        if let Ok(v) = env::var("GATEWAY_IO_TIMEOUT_SECS") {
            self.gateway.io_timeout_secs = v.parse().unwrap_or(self.gateway.io_timeout_secs);
        }
        if let Ok(v) = env::var("GATEWAY_ENABLE_REQUEST_LOGGING") {
            self.gateway.enable_request_logging =
                v.parse().unwrap_or(self.gateway.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            security: SecurityConfig {
                jwt_secret: "dev-only-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                admin_username: "admin".to_string(),
                // sha256("password")
                admin_password_sha256:
                    "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
                        .to_string(),
                enable_cors: true,
            },
            store: StoreConfig {
                backend: "file".to_string(),
                schema_path: "data/schema.json".to_string(),
            },
            gateway: GatewayConfig {
                io_timeout_secs: 30,
                enable_request_logging: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                admin_username: String::new(),
                admin_password_sha256: String::new(),
                enable_cors: true,
            },
            store: StoreConfig {
                backend: "file".to_string(),
                schema_path: "/var/lib/static-press/schema.json".to_string(),
            },
            gateway: GatewayConfig {
                io_timeout_secs: 15,
                enable_request_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                admin_username: String::new(),
                admin_password_sha256: String::new(),
                enable_cors: true,
            },
            store: StoreConfig {
                backend: "file".to_string(),
                schema_path: "/var/lib/static-press/schema.json".to_string(),
            },
            gateway: GatewayConfig {
                io_timeout_secs: 10,
                enable_request_logging: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
