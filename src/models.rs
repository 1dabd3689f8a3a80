use serde::{Deserialize, Serialize};

/// One row of the `urls` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct UrlMapping {
    pub short_key: String,
    pub original_url: String,
}

impl UrlMapping {
    pub fn new(short_key: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            original_url: original_url.into(),
        }
    }
}
