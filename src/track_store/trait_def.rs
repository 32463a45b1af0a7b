//! TrackStore trait definition.
//!
//! Abstracts the persistence backend so the repository can run against
//! the production SQLite store or an in-memory stand-in in tests.

use super::models::Track;
use anyhow::Result;

pub trait TrackStore: Send + Sync {
    /// Persists a new track. The caller assigns the identifier.
    fn insert_track(&self, track: &Track) -> Result<()>;

    /// Fetches a single track by id.
    fn get_track(&self, id: &str) -> Result<Option<Track>>;

    /// Returns every track, newest `created_at` first. Ties are broken
    /// by insertion order, newest first.
    fn list_tracks(&self) -> Result<Vec<Track>>;

    /// Overwrites the full row for `track.id`. Returns false when the
    /// id has no matching record.
    fn update_track(&self, track: &Track) -> Result<bool>;

    /// Deletes by id. Returns false when the id has no matching record.
    fn delete_track(&self, id: &str) -> Result<bool>;

    /// Number of stored tracks.
    fn tracks_count(&self) -> usize;
}
