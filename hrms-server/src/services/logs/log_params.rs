use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 500;

/// Query string of `GET /logs`.
///
/// `limit` stays a string so that garbage falls back to the default
/// instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogParams {
    pub limit: Option<String>,
    pub action: Option<String>,
}

impl LogParams {
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map(|n| n.min(MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}
