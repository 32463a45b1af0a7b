mod models;
mod repository;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use models::{DraftTrack, PublicTrack, Track, TrackPatch};
pub use repository::{RepositoryError, TrackRepository};
pub use store::SqliteTrackStore;
pub use trait_def::TrackStore;
pub use validation::{ValidationError, MAX_COVER_IMAGE_BYTES};
