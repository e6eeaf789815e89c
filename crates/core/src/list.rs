//! List tracking domain model and provider contracts.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ListError;

/// Canonical tracking states for one list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    Planning,
    Current,
    Completed,
    Dropped,
    Repeating,
}

impl ListStatus {
    pub const ALL: [ListStatus; 5] = [
        ListStatus::Planning,
        ListStatus::Current,
        ListStatus::Completed,
        ListStatus::Dropped,
        ListStatus::Repeating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListStatus::Planning => "planning",
            ListStatus::Current => "current",
            ListStatus::Completed => "completed",
            ListStatus::Dropped => "dropped",
            ListStatus::Repeating => "repeating",
        }
    }

    /// Parse a user/wire supplied token. Unknown tokens are absence, not errors;
    /// string inputs are validated here at the boundary, never inside the core.
    pub fn parse(value: &str) -> Option<ListStatus> {
        ListStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live adapter bound to one remote list record.
///
/// Getters are local reads of the entry's mirrored state. Setters validate
/// first (`ListError::InvalidValue`, no I/O on rejection), then commit the
/// entry's full desired state to the remote service in a single update call
/// and refresh the mirror on success. Entries are single-writer; concurrent
/// mutation requires external serialization.
#[async_trait]
pub trait ListEntry: Send + Sync {
    fn id(&self) -> u64;
    fn title(&self) -> &str;
    fn status(&self) -> Option<ListStatus>;
    /// Rating on the 0-100 scale; 0 means unrated.
    fn user_rating(&self) -> i32;
    fn progress(&self) -> i32;
    fn repeats(&self) -> i32;
    fn started_at(&self) -> Option<NaiveDate>;
    fn finished_at(&self) -> Option<NaiveDate>;
    fn tags(&self) -> &[String];
    fn comments(&self) -> Option<&str>;

    async fn set_status(&mut self, status: ListStatus) -> Result<(), ListError>;
    async fn set_user_rating(&mut self, rating: i32) -> Result<(), ListError>;
    async fn set_progress(&mut self, progress: i32) -> Result<(), ListError>;
    async fn set_repeats(&mut self, repeats: i32) -> Result<(), ListError>;
    /// Persists only the calendar date component of the timestamp.
    async fn set_started_at(&mut self, at: DateTime<Utc>) -> Result<(), ListError>;
    async fn set_finished_at(&mut self, at: DateTime<Utc>) -> Result<(), ListError>;
    async fn set_tags(&mut self, tags: Vec<String>) -> Result<(), ListError>;
    async fn set_comments(&mut self, comments: Option<String>) -> Result<(), ListError>;
}

/// List-level operations a tracking provider exposes to the caller.
#[async_trait]
pub trait ListProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch one remote record and wrap it in a live entry adapter.
    async fn entry(&self, id: u64) -> Result<Box<dyn ListEntry>, ListError>;

    /// Capture the full remote list as a portable text snapshot.
    async fn backup_list(&self) -> Result<String, ListError>;

    /// Replay a snapshot through the remote update API, in snapshot order.
    /// Additive/overwriting only; a mid-sequence failure leaves earlier
    /// records applied and surfaces the triggering error.
    async fn restore_list(&self, snapshot: &str) -> Result<(), ListError>;
}

#[cfg(test)]
mod tests {
    use super::ListStatus;

    #[test]
    fn list_status_serialization_matches_wire_contract() {
        let actual = ListStatus::ALL
            .iter()
            .map(|status| serde_json::to_string(status).expect("serialize list status"))
            .collect::<Vec<_>>();

        let expected = vec![
            "\"planning\"",
            "\"current\"",
            "\"completed\"",
            "\"dropped\"",
            "\"repeating\"",
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn parse_round_trips_every_status() {
        for status in ListStatus::ALL {
            assert_eq!(ListStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert_eq!(ListStatus::parse("rewatching"), None);
        assert_eq!(ListStatus::parse("PLANNING"), None);
        assert_eq!(ListStatus::parse(""), None);
    }
}
