//! Menu server configuration

use crate::BoxError;

/// Longest accepted QR token validity window (one year)
pub const MAX_QR_TOKEN_TTL_HOURS: i64 = 8760;

/// Menu server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for staff authentication
    pub jwt_secret: String,
    /// HMAC secret for table QR tokens
    pub qr_token_secret: String,
    /// Validity window of a QR token, in hours
    pub qr_token_ttl_hours: i64,
    /// Optional seed account created at startup
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub restaurant_id: i64,
}

impl Config {
    /// Require a secret: must be set and non-empty in non-development environments.
    fn require_secret(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &str,
        environment: &str,
    ) -> Result<String, BoxError> {
        let val = match lookup(name) {
            Some(v) => v,
            None => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let qr_token_ttl_hours = match lookup("QR_TOKEN_TTL_HOURS") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|h| (1..=MAX_QR_TOKEN_TTL_HOURS).contains(h))
                .ok_or_else(|| {
                    format!(
                        "QR_TOKEN_TTL_HOURS must be between 1 and {MAX_QR_TOKEN_TTL_HOURS}, got {v}"
                    )
                })?,
            None => 24,
        };

        let bootstrap_admin = match (
            lookup("BOOTSTRAP_ADMIN_EMAIL").filter(|s| !s.is_empty()),
            lookup("BOOTSTRAP_ADMIN_PASSWORD").filter(|s| !s.is_empty()),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password,
                restaurant_id: lookup("BOOTSTRAP_RESTAURANT_ID")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or("DATABASE_URL must be set")?,
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret(&lookup, "JWT_SECRET", &environment)?,
            qr_token_secret: Self::require_secret(&lookup, "QR_TOKEN_SECRET", &environment)?,
            qr_token_ttl_hours,
            bootstrap_admin,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.qr_token_ttl_hours, 24);
        assert_eq!(config.jwt_secret, "dev-JWT_SECRET-not-for-production");
        assert_eq!(config.qr_token_secret, "dev-QR_TOKEN_SECRET-not-for-production");
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_production_requires_secrets() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "s1"),
        ]));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("QR_TOKEN_SECRET"));
    }

    #[test]
    fn test_production_rejects_empty_secret() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("ENVIRONMENT", "staging"),
            ("JWT_SECRET", ""),
            ("QR_TOKEN_SECRET", "s2"),
        ]));
        assert!(result.unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn test_missing_database_url() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_invalid_ttl() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("QR_TOKEN_TTL_HOURS", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let max = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("QR_TOKEN_TTL_HOURS", "8760"),
        ]))
        .unwrap();
        assert_eq!(max.qr_token_ttl_hours, MAX_QR_TOKEN_TTL_HOURS);

        let huge = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("QR_TOKEN_TTL_HOURS", "9223372036854775807"),
        ]));
        assert!(huge.unwrap_err().to_string().contains("between 1 and 8760"));
    }

    #[test]
    fn test_bootstrap_admin() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("BOOTSTRAP_ADMIN_EMAIL", "owner@bistro.test"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "hunter22"),
            ("BOOTSTRAP_RESTAURANT_ID", "42"),
        ]))
        .unwrap();
        let admin = config.bootstrap_admin.unwrap();
        assert_eq!(admin.email, "owner@bistro.test");
        assert_eq!(admin.restaurant_id, 42);
    }
}
