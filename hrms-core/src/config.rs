//! # HRMS Configuration
//!
//! A minimal string key/value store. Bootstrap code fills it (from the
//! environment, a file, or test fixtures) and hands a read-only
//! [`HrConfigSnapshot`] to whatever needs settings.
//!
//! ## Setting and reading values
//! ```rust
//! use hrms_core::HrConfig;
//! let mut config = HrConfig::new();
//!
//! config.set("http.port", "4000");
//! config.set("auth.jwt.expires_in_hours", "8");
//!
//! let snap = config.snapshot();
//! assert_eq!(snap.get_u16("http.port"), Some(4000));
//! assert_eq!(snap.get_i64("auth.jwt.expires_in_hours"), Some(8));
//! ```
//!
//! ## Environment overrides
//! [`HrConfig::merge_env`] maps `PREFIX__A__B` to `a.b`, so
//! `HRMS__HTTP__PORT=8080` overrides `http.port`.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct HrConfig {
    values: HashMap<String, String>,
}

impl HrConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Set a key only when it has no value yet.
    pub fn set_default<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Apply `PREFIX__SECTION__KEY=value` pairs as `section.key`.
    ///
    /// Keys are lowercased, so `HRMS__DB__MAX_CONNECTIONS` lands on
    /// `db.max_connections`.
    pub fn merge_env<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped
                    .trim_start_matches("__")
                    .to_lowercase()
                    .replace("__", ".");
                if !normalized.is_empty() {
                    self.set(normalized, value);
                }
            }
        }
    }

    pub fn snapshot(&self) -> HrConfigSnapshot {
        HrConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HrConfigSnapshot {
    map: HashMap<String, String>,
}

impl HrConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.trim().parse::<u16>().ok())
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse::<u32>().ok())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse::<i64>().ok())
    }
}
