//! Track repository: the CRUD contract on top of the store.
//!
//! Translates admin/public requests into store operations, applying
//! validation, sanitization, projection and ordering. Listings are
//! cached per process and every successful mutation invalidates the
//! cache, so reads after a write always reflect the change.

use super::models::{DraftTrack, PublicTrack, Track, TrackPatch};
use super::trait_def::TrackStore;
use super::validation::{
    validate_cover_image, validate_draft, validate_source_url, ValidationError,
};
use anyhow::Result;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Track not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct TrackRepository {
    store: Arc<dyn TrackStore>,
    admin_listing_cache: Mutex<Option<Vec<Track>>>,
    public_listing_cache: Mutex<Option<Vec<PublicTrack>>>,
}

impl TrackRepository {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        TrackRepository {
            store,
            admin_listing_cache: Mutex::new(None),
            public_listing_cache: Mutex::new(None),
        }
    }

    /// Full listing for the admin dashboard, newest first.
    pub fn list(&self) -> Result<Vec<Track>, RepositoryError> {
        let mut cache = self.admin_listing_cache.lock().unwrap();
        if let Some(tracks) = cache.as_ref() {
            return Ok(tracks.clone());
        }
        let tracks = self.store.list_tracks()?;
        *cache = Some(tracks.clone());
        Ok(tracks)
    }

    /// Allow-listed projection for anonymous consumers: featured tracks
    /// first, then newest first.
    pub fn list_public(&self) -> Result<Vec<PublicTrack>, RepositoryError> {
        let mut cache = self.public_listing_cache.lock().unwrap();
        if let Some(tracks) = cache.as_ref() {
            return Ok(tracks.clone());
        }
        // The store already returns newest-first; a stable sort on the
        // featured flag preserves that order within each group.
        let mut tracks = self.store.list_tracks()?;
        tracks.sort_by_key(|track| !track.featured);
        let projected: Vec<PublicTrack> = tracks.iter().map(PublicTrack::from).collect();
        *cache = Some(projected.clone());
        Ok(projected)
    }

    /// Creates a track from an admin draft and returns the new id.
    /// Two tracks may share identical titles, no duplicate detection
    /// is performed.
    pub fn create(&self, draft: DraftTrack) -> Result<String, RepositoryError> {
        let sanitized = DraftTrack {
            title: draft.title.trim().to_string(),
            artist: draft.artist.trim().to_string(),
            source_url: draft.source_url.trim().to_string(),
            genre: draft.genre.trim().to_string(),
            release_date: draft.release_date.trim().to_string(),
            description: draft.description.trim().to_string(),
            featured: draft.featured,
            cover_image: draft.cover_image,
        };
        validate_draft(&sanitized)?;

        let track = Track {
            id: Uuid::new_v4().to_string(),
            title: sanitized.title,
            artist: sanitized.artist,
            source_url: sanitized.source_url,
            genre: sanitized.genre,
            release_date: sanitized.release_date,
            description: sanitized.description,
            featured: sanitized.featured,
            cover_image: sanitized.cover_image,
            created_at: Utc::now().timestamp(),
            updated_at: None,
        };
        self.store.insert_track(&track)?;
        self.invalidate_listings();
        info!("Created track {} ({})", track.id, track.title);
        Ok(track.id)
    }

    /// Applies a presence-based partial update: only supplied fields
    /// change. A supplied-but-empty required field is ignored rather
    /// than emptying the record; a supplied empty description or cover
    /// is applied.
    pub fn update(&self, id: &str, patch: TrackPatch) -> Result<(), RepositoryError> {
        if id.is_empty() {
            return Err(ValidationError::MissingId.into());
        }
        let mut track = self
            .store
            .get_track(id)?
            .ok_or(RepositoryError::NotFound)?;

        apply_required_field(&mut track.title, patch.title);
        apply_required_field(&mut track.artist, patch.artist);
        apply_required_field(&mut track.genre, patch.genre);
        apply_required_field(&mut track.release_date, patch.release_date);

        if let Some(source_url) = patch.source_url {
            let source_url = source_url.trim().to_string();
            if !source_url.is_empty() {
                validate_source_url(&source_url)?;
                track.source_url = source_url;
            }
        }
        if let Some(description) = patch.description {
            track.description = description.trim().to_string();
        }
        if let Some(featured) = patch.featured {
            track.featured = featured;
        }
        if let Some(cover_image) = patch.cover_image {
            validate_cover_image(&cover_image)?;
            track.cover_image = cover_image;
        }

        track.updated_at = Some(Utc::now().timestamp());
        if !self.store.update_track(&track)? {
            // The row vanished between the read and the write.
            return Err(RepositoryError::NotFound);
        }
        self.invalidate_listings();
        info!("Updated track {}", track.id);
        Ok(())
    }

    /// Deletes immediately and unrecoverably.
    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        if id.is_empty() {
            return Err(ValidationError::MissingId.into());
        }
        if !self.store.delete_track(id)? {
            return Err(RepositoryError::NotFound);
        }
        self.invalidate_listings();
        info!("Deleted track {}", id);
        Ok(())
    }

    pub fn tracks_count(&self) -> usize {
        self.store.tracks_count()
    }

    fn invalidate_listings(&self) {
        *self.admin_listing_cache.lock().unwrap() = None;
        *self.public_listing_cache.lock().unwrap() = None;
    }
}

fn apply_required_field(target: &mut String, supplied: Option<String>) {
    if let Some(value) = supplied {
        let value = value.trim().to_string();
        if !value.is_empty() {
            *target = value;
        }
    }
}
