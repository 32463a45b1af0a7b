//! Track models for the portfolio store.

use serde::{Deserialize, Serialize};

/// The single persisted content entity: one song/video listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    /// Opaque unique identifier, assigned by the store on creation.
    pub id: String,
    pub title: String,
    pub artist: String,
    /// URL of the externally hosted video; always yields a resolvable
    /// video identifier for any persisted track.
    pub source_url: String,
    pub genre: String,
    /// ISO date string.
    pub release_date: String,
    /// Free text, never null; defaults to empty.
    pub description: String,
    /// Promoted placement in the public feed.
    pub featured: bool,
    /// Optional inline-encoded image overriding the derived preview
    /// thumbnail. Empty string when absent.
    pub cover_image: String,
    /// Unix timestamp (seconds), set once at creation.
    pub created_at: i64,
    /// Unix timestamp of the last mutation, absent until first update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Allow-listed projection served to anonymous consumers. Fields are
/// enumerated explicitly rather than derived by exclusion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub source_url: String,
    pub genre: String,
    pub release_date: String,
    pub description: String,
    pub featured: bool,
    pub cover_image: String,
    pub created_at: i64,
}

impl From<&Track> for PublicTrack {
    fn from(track: &Track) -> Self {
        PublicTrack {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            source_url: track.source_url.clone(),
            genre: track.genre.clone(),
            release_date: track.release_date.clone(),
            description: track.description.clone(),
            featured: track.featured,
            cover_image: track.cover_image.clone(),
            created_at: track.created_at,
        }
    }
}

/// Admin form state for creating a track. All fields default to their
/// empty value, so a fresh form and a partially filled submission share
/// the same shape; validation decides whether it becomes a Track.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftTrack {
    pub title: String,
    pub artist: String,
    pub source_url: String,
    pub genre: String,
    pub release_date: String,
    pub description: String,
    pub featured: bool,
    pub cover_image: String,
}

impl DraftTrack {
    /// An empty form.
    pub fn reset() -> Self {
        DraftTrack::default()
    }

    /// A form prefilled from an existing track, for editing.
    pub fn from_existing(track: &Track) -> Self {
        DraftTrack {
            title: track.title.clone(),
            artist: track.artist.clone(),
            source_url: track.source_url.clone(),
            genre: track.genre.clone(),
            release_date: track.release_date.clone(),
            description: track.description.clone(),
            featured: track.featured,
            cover_image: track.cover_image.clone(),
        }
    }
}

/// Presence-based partial update: absent fields leave the record
/// untouched, supplied fields are applied after sanitization.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub source_url: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub featured: Option<bool>,
    pub cover_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Track {
        Track {
            id: "id-1".to_string(),
            title: "Night Drive".to_string(),
            artist: "Test Artist".to_string(),
            source_url: "https://youtu.be/abc12345678".to_string(),
            genre: "synthwave".to_string(),
            release_date: "2024-03-01".to_string(),
            description: "b-side".to_string(),
            featured: true,
            cover_image: String::new(),
            created_at: 1700000000,
            updated_at: Some(1700000500),
        }
    }

    #[test]
    fn public_projection_drops_updated_at() {
        let json = serde_json::to_value(PublicTrack::from(&sample_track())).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("created_at"));
        assert!(!object.contains_key("updated_at"));
    }

    #[test]
    fn draft_from_existing_round_trips_fields() {
        let track = sample_track();
        let draft = DraftTrack::from_existing(&track);
        assert_eq!(draft.title, track.title);
        assert_eq!(draft.featured, track.featured);
        assert_eq!(draft.source_url, track.source_url);
    }

    #[test]
    fn draft_reset_is_empty() {
        let draft = DraftTrack::reset();
        assert!(draft.title.is_empty());
        assert!(!draft.featured);
    }

    #[test]
    fn patch_deserializes_with_absent_fields() {
        let patch: TrackPatch = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.description.is_none());
        assert!(patch.featured.is_none());
    }
}
