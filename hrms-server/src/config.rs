use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use hrms_auth::AuthOptions;
use hrms_core::{HrConfig, HrConfigSnapshot};

/// Read `.env` (when present) and the process environment into an [`HrConfig`].
pub fn load() -> HrConfig {
    dotenvy::dotenv().ok();
    from_vars(std::env::vars())
}

/// Build the configuration from explicit variables.
///
/// Plain variables (`PORT`, `JWT_SECRET`, ...) are read first, then any
/// `HRMS__SECTION__KEY` variable overrides `section.key`.
pub fn from_vars<I>(vars: I) -> HrConfig
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: HashMap<String, String> = vars.into_iter().collect();
    let mut config = HrConfig::new();

    configure_http(&mut config, &vars);
    configure_db(&mut config, &vars);
    configure_auth(&mut config, &vars);

    config.merge_env("HRMS", vars);
    config
}

fn copy_var(config: &mut HrConfig, vars: &HashMap<String, String>, var: &str, key: &str, default: Option<&str>) {
    match vars.get(var).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(value) => config.set(key, value),
        None => {
            if let Some(default) = default {
                config.set_default(key, default);
            }
        }
    }
}

/// HTTP server settings
fn configure_http(config: &mut HrConfig, vars: &HashMap<String, String>) {
    copy_var(config, vars, "HOST", "http.host", Some("0.0.0.0"));
    copy_var(config, vars, "PORT", "http.port", Some("4000"));
}

/// Database settings
fn configure_db(config: &mut HrConfig, vars: &HashMap<String, String>) {
    copy_var(config, vars, "DATABASE_URL", "db.url", Some("sqlite://hrms.db"));
    copy_var(config, vars, "DB_MAX_CONNECTIONS", "db.max_connections", Some("8"));
}

/// Token and password settings. The secret has no default.
fn configure_auth(config: &mut HrConfig, vars: &HashMap<String, String>) {
    copy_var(config, vars, "JWT_SECRET", "auth.jwt.secret", None);
    copy_var(config, vars, "JWT_EXPIRES_IN_HOURS", "auth.jwt.expires_in_hours", Some("8"));
    copy_var(config, vars, "BCRYPT_COST", "auth.bcrypt.cost", Some("10"));
}

/// Typed view of the configuration used at bootstrap.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub auth: AuthOptions,
}

impl AppSettings {
    pub fn from_config(config: &HrConfigSnapshot) -> Result<Self> {
        let port = config
            .get_u16("http.port")
            .ok_or_else(|| anyhow!("http.port must be a port number"))?;
        let db_max_connections = config
            .get_u32("db.max_connections")
            .ok_or_else(|| anyhow!("db.max_connections must be a positive integer"))?;
        let expires_in_hours = config
            .get_i64("auth.jwt.expires_in_hours")
            .filter(|h| *h > 0)
            .ok_or_else(|| anyhow!("auth.jwt.expires_in_hours must be a positive integer"))?;
        let cost = config
            .get_u32("auth.bcrypt.cost")
            .ok_or_else(|| anyhow!("auth.bcrypt.cost must be an integer"))?;
        let secret = config
            .get_string("auth.jwt.secret")
            .ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;

        let mut auth = AuthOptions::with_secret(secret);
        auth.jwt.expires_in = Duration::from_secs(expires_in_hours as u64 * 3600);
        auth.password.cost = cost;
        auth.validate().map_err(anyhow::Error::msg)?;

        Ok(Self {
            host: config
                .get_string("http.host")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: config
                .get_string("db.url")
                .unwrap_or_else(|| "sqlite://hrms.db".to_string()),
            db_max_connections,
            auth,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = from_vars(vars(&[("JWT_SECRET", "s3cret")]));
        let settings = AppSettings::from_config(&config.snapshot()).unwrap();
        assert_eq!(settings.addr(), "0.0.0.0:4000");
        assert_eq!(settings.database_url, "sqlite://hrms.db");
        assert_eq!(settings.db_max_connections, 8);
        assert_eq!(settings.auth.jwt.expires_in, Duration::from_secs(8 * 3600));
        assert_eq!(settings.auth.password.cost, 10);
    }

    #[test]
    fn missing_secret_is_a_bootstrap_error() {
        let config = from_vars(vars(&[("PORT", "5000")]));
        let err = AppSettings::from_config(&config.snapshot()).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn plain_variables_and_prefixed_overrides() {
        let config = from_vars(vars(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "5000"),
            ("JWT_EXPIRES_IN_HOURS", "1"),
            ("HRMS__DB__MAX_CONNECTIONS", "2"),
        ]));
        let settings = AppSettings::from_config(&config.snapshot()).unwrap();
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.db_max_connections, 2);
        assert_eq!(settings.auth.jwt.expires_in, Duration::from_secs(3600));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let config = from_vars(vars(&[("JWT_SECRET", "s3cret"), ("BCRYPT_COST", "99")]));
        assert!(AppSettings::from_config(&config.snapshot()).is_err());
    }
}
