//! Live entry adapter bound to one remote list record.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use anisync_core::{ListEntry, ListError, ListStatus};

use crate::client::MalApi;
use crate::models::{Anime, MyListStatus, UpdateListStatus};
use crate::status::{list_status_to_mal, mal_status_to_list, rating_to_score, score_to_rating};

/// Live view of one entry on the caller's remote list.
///
/// The adapter mirrors the record's list state locally so a single-field write
/// can still issue the service's whole-record update. Commits are optimistic:
/// after a successful update the mirror is overwritten with the desired state,
/// without a confirming re-fetch. One writer per entry; concurrent mutation
/// needs external serialization.
pub struct MalListEntry {
    api: Arc<dyn MalApi>,
    anime_id: u64,
    title: String,
    num_episodes: Option<u32>,
    list: MyListStatus,
}

impl MalListEntry {
    /// Bind an adapter to a fetched remote record.
    pub fn new(api: Arc<dyn MalApi>, anime: Anime) -> Self {
        Self {
            api,
            anime_id: anime.id,
            title: anime.title,
            num_episodes: anime.num_episodes,
            list: anime.my_list_status.unwrap_or_default(),
        }
    }

    /// Total episode count of the record, when the service knows it. Progress
    /// writes are not checked against it; the service enforces its own ceiling.
    pub fn total_episodes(&self) -> Option<u32> {
        self.num_episodes
    }

    /// Current mirrored list state, in service-native form.
    pub fn list_state(&self) -> &MyListStatus {
        &self.list
    }

    /// Push the full desired state, then adopt it as the new mirror.
    async fn commit(&mut self, next: MyListStatus) -> Result<(), ListError> {
        let update = UpdateListStatus::from_list(&next);
        self.api.update_anime_status(self.anime_id, &update).await?;
        self.list = next;
        Ok(())
    }
}

#[async_trait]
impl ListEntry for MalListEntry {
    fn id(&self) -> u64 {
        self.anime_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> Option<ListStatus> {
        let status = self.list.status?;
        if self.list.is_rewatching && mal_status_to_list(status) == ListStatus::Current {
            return Some(ListStatus::Repeating);
        }
        Some(mal_status_to_list(status))
    }

    fn user_rating(&self) -> i32 {
        score_to_rating(self.list.score)
    }

    fn progress(&self) -> i32 {
        self.list.num_episodes_watched as i32
    }

    fn repeats(&self) -> i32 {
        self.list.num_times_rewatched as i32
    }

    fn started_at(&self) -> Option<NaiveDate> {
        self.list.start_date
    }

    fn finished_at(&self) -> Option<NaiveDate> {
        self.list.finish_date
    }

    fn tags(&self) -> &[String] {
        &self.list.tags
    }

    fn comments(&self) -> Option<&str> {
        self.list.comments.as_deref()
    }

    async fn set_status(&mut self, status: ListStatus) -> Result<(), ListError> {
        let (status, rewatching) = list_status_to_mal(Some(status));
        let mut next = self.list.clone();
        next.status = status;
        next.is_rewatching = rewatching;
        self.commit(next).await
    }

    async fn set_user_rating(&mut self, rating: i32) -> Result<(), ListError> {
        if !(0..=100).contains(&rating) {
            return Err(ListError::invalid_value(
                "user_rating",
                format!("{} is outside 0-100", rating),
            ));
        }
        let mut next = self.list.clone();
        next.score = rating_to_score(rating);
        self.commit(next).await
    }

    async fn set_progress(&mut self, progress: i32) -> Result<(), ListError> {
        if progress < 0 {
            return Err(ListError::invalid_value(
                "progress",
                format!("{} is negative", progress),
            ));
        }
        let mut next = self.list.clone();
        next.num_episodes_watched = progress as u32;
        self.commit(next).await
    }

    async fn set_repeats(&mut self, repeats: i32) -> Result<(), ListError> {
        if repeats < 0 {
            return Err(ListError::invalid_value(
                "repeats",
                format!("{} is negative", repeats),
            ));
        }
        let mut next = self.list.clone();
        next.num_times_rewatched = repeats as u32;
        self.commit(next).await
    }

    async fn set_started_at(&mut self, at: DateTime<Utc>) -> Result<(), ListError> {
        let mut next = self.list.clone();
        next.start_date = Some(at.date_naive());
        self.commit(next).await
    }

    async fn set_finished_at(&mut self, at: DateTime<Utc>) -> Result<(), ListError> {
        let mut next = self.list.clone();
        next.finish_date = Some(at.date_naive());
        self.commit(next).await
    }

    async fn set_tags(&mut self, tags: Vec<String>) -> Result<(), ListError> {
        let mut next = self.list.clone();
        next.tags = tags;
        self.commit(next).await
    }

    async fn set_comments(&mut self, comments: Option<String>) -> Result<(), ListError> {
        let mut next = self.list.clone();
        next.comments = comments;
        self.commit(next).await
    }
}
