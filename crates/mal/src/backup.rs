//! Portable backup and restore of the caller's complete remote list.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::client::MalApi;
use crate::error::Result;
use crate::models::{status_from_wire, Anime, MalListStatus, MyListStatus, UpdateListStatus};

/// Page size used when draining the remote list.
const BACKUP_PAGE_LIMIT: u32 = 100;

/// One snapshot row, carrying the service's native values so a restore can
/// replay them without translation loss.
///
/// Optional fields serialize as explicit `null`; absence is always
/// representable and survives the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "status_from_wire")]
    pub status: Option<MalListStatus>,
    pub progress: u32,
    pub score: u8,
    pub repeats: u32,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub comments: Option<String>,
}

impl BackupRecord {
    fn from_parts(node: &Anime, list: &MyListStatus) -> Self {
        Self {
            id: node.id,
            title: node.title.clone(),
            status: list.status,
            progress: list.num_episodes_watched,
            score: list.score,
            repeats: list.num_times_rewatched,
            start_date: list.start_date,
            finish_date: list.finish_date,
            tags: list.tags.clone(),
            comments: list.comments.clone(),
        }
    }

    /// Rebuild the whole-record update payload replayed during restore.
    pub fn to_update(&self) -> UpdateListStatus {
        UpdateListStatus {
            status: self.status,
            score: Some(self.score),
            num_watched_episodes: Some(self.progress),
            is_rewatching: None,
            start_date: self.start_date,
            finish_date: self.finish_date,
            num_times_rewatched: Some(self.repeats),
            priority: None,
            rewatch_value: None,
            tags: Some(self.tags.clone()),
            comments: self.comments.clone(),
        }
    }
}

/// Render a snapshot as portable JSON text.
pub fn snapshot_to_text(records: &[BackupRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse snapshot text back into records, preserving order.
pub fn snapshot_from_text(text: &str) -> Result<Vec<BackupRecord>> {
    Ok(serde_json::from_str(text)?)
}

/// Drain the user's complete list, one page at a time, in list order. Entries
/// the service returns without list state snapshot as unset rows.
pub async fn backup(api: &dyn MalApi, username: &str) -> Result<Vec<BackupRecord>> {
    let mut records = Vec::new();
    let mut offset = 0u32;

    loop {
        let page = api
            .get_user_anime_list(username, None, BACKUP_PAGE_LIMIT, offset)
            .await?;
        let fetched = page.data.len() as u32;

        for entry in &page.data {
            let list = entry
                .list_status
                .clone()
                .or_else(|| entry.node.my_list_status.clone())
                .unwrap_or_default();
            records.push(BackupRecord::from_parts(&entry.node, &list));
        }

        if fetched < BACKUP_PAGE_LIMIT {
            break;
        }
        offset += fetched;
    }

    debug!("backed up {} list entries", records.len());
    Ok(records)
}

/// Replay a snapshot, one update per record, strictly sequential and in
/// snapshot order. Entries missing remotely are created by the service's
/// upsert contract; nothing is ever deleted. Stops at the first failure and
/// surfaces it; earlier records stay applied.
pub async fn restore(api: &dyn MalApi, records: &[BackupRecord]) -> Result<()> {
    for record in records {
        let update = record.to_update();
        api.update_anime_status(record.id, &update).await?;
    }

    debug!("restored {} list entries", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, title: &str) -> BackupRecord {
        BackupRecord {
            id,
            title: title.to_string(),
            status: Some(MalListStatus::Watching),
            progress: 3,
            score: 7,
            repeats: 0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            finish_date: None,
            tags: vec!["action".to_string()],
            comments: None,
        }
    }

    #[test]
    fn absent_fields_serialize_as_explicit_null() {
        let text = snapshot_to_text(&[record(1, "Alpha")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let row = &value[0];
        assert_eq!(row["status"], "watching");
        assert_eq!(row["start_date"], "2024-01-01");
        assert!(row["finish_date"].is_null());
        assert!(row["comments"].is_null());
        assert!(row.as_object().unwrap().contains_key("comments"));
    }

    #[test]
    fn snapshot_round_trip_preserves_order_and_values() {
        let records = vec![record(2, "Beta"), record(1, "Alpha")];
        let text = snapshot_to_text(&records).unwrap();
        let parsed = snapshot_from_text(&text).unwrap();
        assert_eq!(parsed, records);
        assert_eq!(parsed[0].id, 2);
    }

    #[test]
    fn unknown_snapshot_status_parses_as_absent() {
        let text = r#"[{
            "id": 9,
            "title": "Gamma",
            "status": "simulcasting",
            "progress": 0,
            "score": 0,
            "repeats": 0,
            "start_date": null,
            "finish_date": null,
            "tags": [],
            "comments": null
        }]"#;
        let parsed = snapshot_from_text(text).unwrap();
        assert_eq!(parsed[0].status, None);
    }

    #[test]
    fn malformed_snapshot_is_a_json_error() {
        assert!(snapshot_from_text("not json").is_err());
    }

    #[test]
    fn to_update_carries_every_stored_field() {
        let update = record(1, "Alpha").to_update();
        assert_eq!(update.status, Some(MalListStatus::Watching));
        assert_eq!(update.score, Some(7));
        assert_eq!(update.num_watched_episodes, Some(3));
        assert_eq!(update.num_times_rewatched, Some(0));
        assert_eq!(update.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(update.finish_date, None);
        assert_eq!(update.tags.as_deref(), Some(&["action".to_string()][..]));
        // comments is always present on the payload, even when absent.
        assert_eq!(update.comments, None);
        assert_eq!(update.is_rewatching, None);
    }
}
