//! Versioned SQLite schema for the track store.
//!
//! A fresh database is created with the latest schema; an existing one
//! has its `PRAGMA user_version` checked, its table shape validated
//! against the expected columns, and pending migrations applied in
//! order inside a transaction.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use tracing::info;

pub struct VersionedSchema {
    pub version: usize,
    /// Statements creating the schema at this version from scratch.
    pub create_sql: &'static [&'static str],
    /// Expected `(table, columns)` shape, for validating an existing db.
    pub expected_tables: &'static [(&'static str, &'static [&'static str])],
    /// Migration from the previous version, if any.
    pub migration: Option<fn(&Connection) -> Result<()>>,
}

pub const TRACKS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    create_sql: &[
        "CREATE TABLE tracks (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            source_url TEXT NOT NULL,
            genre TEXT NOT NULL,
            release_date TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            featured INTEGER NOT NULL DEFAULT 0,
            cover_image TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL,
            updated_at INTEGER
        );",
        "CREATE INDEX idx_tracks_created_at ON tracks(created_at);",
        "CREATE INDEX idx_tracks_featured ON tracks(featured);",
    ],
    expected_tables: &[(
        "tracks",
        &[
            "id",
            "title",
            "artist",
            "source_url",
            "genre",
            "release_date",
            "description",
            "featured",
            "cover_image",
            "created_at",
            "updated_at",
        ],
    )],
    migration: None,
}];

impl VersionedSchema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        for statement in self.create_sql {
            conn.execute(statement, params![])?;
        }
        conn.execute(
            &format!("PRAGMA user_version = {}", self.version),
            params![],
        )?;
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        for (table, expected_columns) in self.expected_tables {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table))?;
            let actual_columns: Vec<String> = stmt
                .query_map(params![], |row| row.get::<_, String>(1))?
                .collect::<rusqlite::Result<_>>()?;

            if actual_columns.len() != expected_columns.len() {
                bail!(
                    "Table {} has columns [{}], expected [{}]",
                    table,
                    actual_columns.join(", "),
                    expected_columns.join(", ")
                );
            }
            for (actual, expected) in actual_columns.iter().zip(expected_columns.iter()) {
                if actual != expected {
                    bail!(
                        "Table {} column mismatch: expected {}, got {}",
                        table,
                        expected,
                        actual
                    );
                }
            }
        }
        Ok(())
    }
}

/// Opens the schema on a connection: creates it on a fresh database,
/// otherwise validates and migrates.
pub fn open_schema(conn: &mut Connection, is_new_db: bool) -> Result<()> {
    let latest = TRACKS_VERSIONED_SCHEMAS.last().unwrap();

    if is_new_db {
        latest.create(conn)?;
        return Ok(());
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if db_version < 1 {
        bail!("Track database version {} is invalid (expected >= 1)", db_version);
    }

    let version_index = TRACKS_VERSIONED_SCHEMAS
        .iter()
        .position(|s| s.version == db_version as usize)
        .with_context(|| format!("Unknown track database version {}", db_version))?;
    TRACKS_VERSIONED_SCHEMAS[version_index]
        .validate(conn)
        .with_context(|| format!("Schema validation failed for version {}", db_version))?;

    if (db_version as usize) < latest.version {
        info!(
            "Migrating track database from version {} to {}",
            db_version, latest.version
        );
        let tx = conn.transaction()?;
        for schema in TRACKS_VERSIONED_SCHEMAS
            .iter()
            .filter(|s| s.version > db_version as usize)
        {
            if let Some(migration) = schema.migration {
                migration(&tx)
                    .with_context(|| format!("Failed migration to version {}", schema.version))?;
            }
        }
        tx.execute(
            &format!("PRAGMA user_version = {}", latest.version),
            params![],
        )?;
        tx.commit()?;
    }

    Ok(())
}
