//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use scribe_core::domain::{DEFAULT_LIMIT, DEFAULT_MAX_LIMIT};
use scribe_core::{AccessPolicy, ManagerConfig};
use scribe_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseSettings>,
    pub posts: ManagerConfig,
    pub jwt: JwtConfig,
}

/// Connection settings for the PostgreSQL post store.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseSettings {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_var("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            posts: Self::manager_config(),
            jwt: Self::jwt_config(),
        }
    }

    /// Pagination bounds and access policy for the post manager.
    fn manager_config() -> ManagerConfig {
        let max_limit: u64 = parse_var("POSTS_MAX_LIMIT", DEFAULT_MAX_LIMIT).max(1);
        let default_limit: u64 = parse_var("POSTS_DEFAULT_LIMIT", DEFAULT_LIMIT).clamp(1, max_limit);

        let access_policy = match env::var("POSTS_ACCESS_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!("Ignoring POSTS_ACCESS_POLICY: {}. Using 'open'.", e);
                AccessPolicy::Open
            }),
            Err(_) => AccessPolicy::Open,
        };

        ManagerConfig {
            default_limit,
            max_limit,
            access_policy,
        }
    }

    /// Bearer token settings from `JWT_SECRET`, `JWT_ISSUER` and
    /// `JWT_EXPIRATION_HOURS`.
    fn jwt_config() -> JwtConfig {
        let defaults = JwtConfig::default();

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                if env::var("RUST_ENV").is_ok_and(|v| v == "production" || v == "prod") {
                    tracing::error!("JWT_SECRET is not set; production tokens use the development secret");
                } else {
                    tracing::warn!("JWT_SECRET is not set; using the development secret");
                }
                defaults.secret
            }
        };

        JwtConfig {
            secret,
            expiration_hours: parse_var("JWT_EXPIRATION_HOURS", defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
