//! MyAnimeList list provider.
//!
//! Translates the provider-agnostic list model into the service's native
//! statuses and 0-10 score scale, exposes a validating live entry adapter,
//! and supports portable backup/restore of a user's complete list.

pub mod backup;
pub mod client;
pub mod entry;
pub mod error;
pub mod models;
pub mod provider;
pub mod status;

pub use backup::BackupRecord;
pub use client::{HttpMalClient, MalApi};
pub use entry::MalListEntry;
pub use error::MalError;
pub use models::{
    Anime, AnimePage, AnimePageEntry, MalListStatus, MyListStatus, Paging, UpdateListStatus, User,
};
pub use provider::{MalConfig, MalListProvider};
