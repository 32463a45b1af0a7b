//! SQLite-backed track store.

use super::models::Track;
use super::schema::open_schema;
use super::trait_def::TrackStore;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

pub struct SqliteTrackStore {
    conn: Mutex<Connection>,
}

impl SqliteTrackStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let mut conn = Connection::open(path).context("Failed to open track database")?;
        if is_new_db {
            info!("Creating new track database at {:?}", path);
        }
        open_schema(&mut conn, is_new_db)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_track(row: &rusqlite::Row) -> rusqlite::Result<Track> {
        Ok(Track {
            id: row.get("id")?,
            title: row.get("title")?,
            artist: row.get("artist")?,
            source_url: row.get("source_url")?,
            genre: row.get("genre")?,
            release_date: row.get("release_date")?,
            description: row.get("description")?,
            featured: row.get::<_, i64>("featured")? != 0,
            cover_image: row.get("cover_image")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

impl TrackStore for SqliteTrackStore {
    fn insert_track(&self, track: &Track) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tracks (id, title, artist, source_url, genre, release_date,
                                 description, featured, cover_image, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                track.id,
                track.title,
                track.artist,
                track.source_url,
                track.genre,
                track.release_date,
                track.description,
                track.featured as i64,
                track.cover_image,
                track.created_at,
                track.updated_at,
            ],
        )
        .context("Failed to insert track")?;
        Ok(())
    }

    fn get_track(&self, id: &str) -> Result<Option<Track>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT * FROM tracks WHERE id = ?1",
            params![id],
            Self::row_to_track,
        )
        .optional()
        .context("Failed to query track")
    }

    fn list_tracks(&self) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT * FROM tracks ORDER BY created_at DESC, rowid DESC")?;
        let tracks = stmt
            .query_map(params![], Self::row_to_track)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list tracks")?;
        Ok(tracks)
    }

    fn update_track(&self, track: &Track) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute(
                "UPDATE tracks SET title = ?2, artist = ?3, source_url = ?4, genre = ?5,
                                   release_date = ?6, description = ?7, featured = ?8,
                                   cover_image = ?9, updated_at = ?10
                 WHERE id = ?1",
                params![
                    track.id,
                    track.title,
                    track.artist,
                    track.source_url,
                    track.genre,
                    track.release_date,
                    track.description,
                    track.featured as i64,
                    track.cover_image,
                    track.updated_at,
                ],
            )
            .context("Failed to update track")?;
        Ok(changed > 0)
    }

    fn delete_track(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn
            .execute("DELETE FROM tracks WHERE id = ?1", params![id])
            .context("Failed to delete track")?;
        Ok(deleted > 0)
    }

    fn tracks_count(&self) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM tracks", [], |row| {
            row.get::<_, i64>(0)
        })
        .unwrap_or(0) as usize
    }
}
