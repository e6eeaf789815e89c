//! Wire data model for the MyAnimeList v2 API.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// List statuses native to the remote service. The rewatching flag is carried
/// separately on the list record, orthogonal to the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalListStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl MalListStatus {
    pub const ALL: [MalListStatus; 5] = [
        MalListStatus::Watching,
        MalListStatus::Completed,
        MalListStatus::OnHold,
        MalListStatus::Dropped,
        MalListStatus::PlanToWatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MalListStatus::Watching => "watching",
            MalListStatus::Completed => "completed",
            MalListStatus::OnHold => "on_hold",
            MalListStatus::Dropped => "dropped",
            MalListStatus::PlanToWatch => "plan_to_watch",
        }
    }

    /// Parse a wire token. Unknown tokens are absence, never an error, so new
    /// service-side statuses degrade to "no status" instead of failing a fetch.
    pub fn from_wire(value: &str) -> Option<MalListStatus> {
        MalListStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }
}

impl fmt::Display for MalListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tolerant status field deserializer routing through [`MalListStatus::from_wire`].
pub(crate) fn status_from_wire<'de, D>(deserializer: D) -> Result<Option<MalListStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(MalListStatus::from_wire))
}

/// Per-entry list record as returned by the API.
///
/// Defaults tolerate omitted fields; the service only includes what the entry
/// actually carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MyListStatus {
    #[serde(default, deserialize_with = "status_from_wire")]
    pub status: Option<MalListStatus>,
    /// Native 0-10 score; 0 means unrated.
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub num_episodes_watched: u32,
    #[serde(default)]
    pub is_rewatching: bool,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    #[serde(default)]
    pub num_times_rewatched: u32,
    pub priority: Option<u8>,
    pub rewatch_value: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub comments: Option<String>,
}

/// One remote catalogue record, optionally carrying the caller's list state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: u64,
    pub title: String,
    pub num_episodes: Option<u32>,
    pub media_type: Option<String>,
    pub my_list_status: Option<MyListStatus>,
}

/// The account that owns the tracked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub time_zone: Option<String>,
}

/// Paginated list envelope: `{data: [{node, list_status}], paging}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimePage {
    #[serde(default)]
    pub data: Vec<AnimePageEntry>,
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimePageEntry {
    pub node: Anime,
    pub list_status: Option<MyListStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Whole-record update payload for `update_anime_status`.
///
/// The remote update contract is whole-record, so every call carries the full
/// desired state of the entry; `None` fields are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateListStatus {
    pub status: Option<MalListStatus>,
    pub score: Option<u8>,
    pub num_watched_episodes: Option<u32>,
    pub is_rewatching: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub num_times_rewatched: Option<u32>,
    pub priority: Option<u8>,
    pub rewatch_value: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub comments: Option<String>,
}

impl UpdateListStatus {
    /// Build the full desired-state payload from an entry mirror.
    pub fn from_list(list: &MyListStatus) -> Self {
        Self {
            status: list.status,
            score: Some(list.score),
            num_watched_episodes: Some(list.num_episodes_watched),
            is_rewatching: Some(list.is_rewatching),
            start_date: list.start_date,
            finish_date: list.finish_date,
            num_times_rewatched: Some(list.num_times_rewatched),
            priority: list.priority,
            rewatch_value: list.rewatch_value,
            tags: Some(list.tags.clone()),
            comments: list.comments.clone(),
        }
    }

    /// Flatten into form fields for the update endpoint. Dates are rendered
    /// `YYYY-MM-DD` and tags comma-joined, per the service's form encoding.
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(score) = self.score {
            params.push(("score", score.to_string()));
        }
        if let Some(progress) = self.num_watched_episodes {
            params.push(("num_watched_episodes", progress.to_string()));
        }
        if let Some(rewatching) = self.is_rewatching {
            params.push(("is_rewatching", rewatching.to_string()));
        }
        if let Some(date) = self.start_date {
            params.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.finish_date {
            params.push(("finish_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(repeats) = self.num_times_rewatched {
            params.push(("num_times_rewatched", repeats.to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.to_string()));
        }
        if let Some(value) = self.rewatch_value {
            params.push(("rewatch_value", value.to_string()));
        }
        if let Some(ref tags) = self.tags {
            params.push(("tags", tags.join(",")));
        }
        if let Some(ref comments) = self.comments {
            params.push(("comments", comments.clone()));
        }
        params
    }
}
