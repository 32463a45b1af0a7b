//! Validation and sanitization of track writes.
//!
//! Writes are validated before any store access: a rejected request has
//! no side effect. Missing required fields are collected and reported
//! together so the caller sees the complete list in one round trip.

use super::models::DraftTrack;
use crate::media::extract_video_id;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Largest accepted decoded cover image (2 MiB).
pub const MAX_COVER_IMAGE_BYTES: usize = 2 * 1024 * 1024;

pub const REQUIRED_FIELDS: [&str; 5] =
    ["title", "artist", "source_url", "genre", "release_date"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("source_url does not contain a resolvable video identifier")]
    UnresolvableSourceUrl,
    #[error("Cover image must be an inline-encoded data URL")]
    CoverImageNotInline,
    #[error("Cover image does not decode to an image")]
    CoverImageNotImage,
    #[error("Cover image is {size} bytes, limit is {MAX_COVER_IMAGE_BYTES}")]
    CoverImageTooLarge { size: usize },
    #[error("Track id is required")]
    MissingId,
}

/// Validates a creation draft. Field values are expected to be trimmed
/// already; empty-after-trim counts as missing.
pub fn validate_draft(draft: &DraftTrack) -> Result<(), ValidationError> {
    let values = [
        &draft.title,
        &draft.artist,
        &draft.source_url,
        &draft.genre,
        &draft.release_date,
    ];
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    validate_source_url(&draft.source_url)?;
    validate_cover_image(&draft.cover_image)
}

/// The source URL must yield a video identifier, otherwise the public
/// page could never resolve a preview for the track.
pub fn validate_source_url(source_url: &str) -> Result<(), ValidationError> {
    match extract_video_id(source_url) {
        Some(_) => Ok(()),
        None => Err(ValidationError::UnresolvableSourceUrl),
    }
}

/// A cover image, when present, is an inline `data:` URL whose payload
/// decodes to at most [`MAX_COVER_IMAGE_BYTES`] of a sniffable image
/// format. The declared MIME type is not trusted, the decoded bytes are.
pub fn validate_cover_image(cover_image: &str) -> Result<(), ValidationError> {
    if cover_image.is_empty() {
        return Ok(());
    }

    let payload = cover_image
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or(ValidationError::CoverImageNotInline)?;

    let decoded = BASE64
        .decode(payload)
        .map_err(|_| ValidationError::CoverImageNotInline)?;

    if decoded.len() > MAX_COVER_IMAGE_BYTES {
        return Err(ValidationError::CoverImageTooLarge {
            size: decoded.len(),
        });
    }

    match infer::get(&decoded) {
        Some(kind) if kind.mime_type().starts_with("image/") => Ok(()),
        _ => Err(ValidationError::CoverImageNotImage),
    }
}
