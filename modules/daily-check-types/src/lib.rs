//! Shared types for the daily check service and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Domain Types
// =====================================================

/// One member's ratings for a single calendar day.
///
/// `day` is the canonical `YYYY-MM-DD` key of the record inside the member's
/// namespace. `day_readable` is derived from it on every read and is never
/// authoritative. Every field defaults when absent, so a partial JSON body
/// such as `{"sleep":3}` decodes with the other ratings at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRecord {
    pub day: String,
    pub day_readable: String,
    pub sleep: i64,
    pub energy: i64,
    pub intellect: i64,
    pub serenity: i64,
    pub family: i64,
    pub social: i64,
    pub work: i64,
}

impl DayRecord {
    /// A zero-valued record stamped with the given day and label.
    pub fn blank(day: impl Into<String>, day_readable: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            day_readable: day_readable.into(),
            ..Default::default()
        }
    }
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
