//! Serving-token queue shown next to the menu.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many tokens the history keeps, current one included.
pub const TOKEN_HISTORY_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServingToken {
    pub number: u32,
    pub updated_at: DateTime<Utc>,
}

/// The most recently called tokens, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenHistory {
    tokens: Vec<ServingToken>,
}

impl TokenHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call a new token. Older entries beyond the history length drop off.
    pub fn serve(&mut self, number: u32, at: DateTime<Utc>) -> &ServingToken {
        self.tokens.insert(
            0,
            ServingToken {
                number,
                updated_at: at,
            },
        );
        self.tokens.truncate(TOKEN_HISTORY_LEN);
        &self.tokens[0]
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// The token being served now.
    pub fn current(&self) -> Option<&ServingToken> {
        self.tokens.first()
    }

    /// Previously called tokens, newest first, excluding the current one.
    pub fn recent(&self) -> &[ServingToken] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
