//! SQLite database layer for the cafe API
//!
//! Uses rusqlite with idempotent schema setup on open. Every query and
//! mutation against the `cafe` table lives here; handlers never see SQL.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{ApiError, ApiResult};
use crate::models::{Cafe, NewCafe};

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ApiResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.setup_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ApiResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.setup_schema()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Apply the schema (IF NOT EXISTS, safe across reopens)
    fn setup_schema(&self) -> ApiResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(INDEXES)?;
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn list_cafes(&self) -> ApiResult<Vec<Cafe>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!("SELECT {} FROM cafe ORDER BY id", COLUMNS))?;

        let cafes = stmt
            .query_map([], cafe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cafes)
    }

    pub fn get_cafe(&self, id: i64) -> ApiResult<Option<Cafe>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!("SELECT {} FROM cafe WHERE id = ?", COLUMNS))?;

        let cafe = stmt.query_row([id], cafe_from_row).optional()?;
        Ok(cafe)
    }

    /// All cafes whose location equals `location` exactly (case-sensitive)
    pub fn find_by_location(&self, location: &str) -> ApiResult<Vec<Cafe>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM cafe WHERE location = ? ORDER BY id",
            COLUMNS
        ))?;

        let cafes = stmt
            .query_map([location], cafe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cafes)
    }

    pub fn name_exists(&self, name: &str) -> ApiResult<bool> {
        let conn = self.conn.lock().unwrap();
        let exists = conn
            .query_row("SELECT 1 FROM cafe WHERE name = ?", [name], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert a new cafe, returning the stored record with its assigned id
    pub fn insert_cafe(&self, req: &NewCafe) -> ApiResult<Cafe> {
        // Surface duplicates as a structured conflict instead of a raw
        // constraint violation
        if self.name_exists(&req.name)? {
            return Err(ApiError::Conflict(format!(
                "A cafe named '{}' is already listed",
                req.name
            )));
        }

        let coffee_price = req.coffee_price().map(str::to_owned);

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO cafe
                (name, map_url, img_url, location, seats,
                 has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                req.name,
                req.map_url,
                req.img_url,
                req.location,
                req.seats,
                req.has_toilet,
                req.has_wifi,
                req.has_sockets,
                req.can_take_calls,
                coffee_price,
            ],
        )?;

        let id = conn.last_insert_rowid();

        Ok(Cafe {
            id,
            name: req.name.clone(),
            map_url: req.map_url.clone(),
            img_url: req.img_url.clone(),
            location: req.location.clone(),
            seats: req.seats.clone(),
            has_toilet: req.has_toilet,
            has_wifi: req.has_wifi,
            has_sockets: req.has_sockets,
            can_take_calls: req.can_take_calls,
            coffee_price,
        })
    }

    /// Set the coffee price for a cafe. Returns false if no row has that id.
    pub fn update_price(&self, id: i64, new_price: &str) -> ApiResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn.execute(
            "UPDATE cafe SET coffee_price = ? WHERE id = ?",
            params![new_price, id],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a cafe. Returns false if no row has that id.
    pub fn delete_cafe(&self, id: i64) -> ApiResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn.execute("DELETE FROM cafe WHERE id = ?", params![id])?;
        Ok(rows_affected > 0)
    }
}

// ============================================================================
// Schema
// ============================================================================

const COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
                       has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cafe (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    map_url TEXT NOT NULL,
    img_url TEXT NOT NULL,
    location TEXT NOT NULL,
    seats TEXT NOT NULL,
    has_toilet INTEGER NOT NULL,
    has_wifi INTEGER NOT NULL,
    has_sockets INTEGER NOT NULL,
    can_take_calls INTEGER NOT NULL,
    coffee_price TEXT
);
"#;

const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_cafe_location ON cafe(location);
"#;

// ============================================================================
// Helpers
// ============================================================================

fn cafe_from_row(row: &Row<'_>) -> rusqlite::Result<Cafe> {
    Ok(Cafe {
        id: row.get(0)?,
        name: row.get(1)?,
        map_url: row.get(2)?,
        img_url: row.get(3)?,
        location: row.get(4)?,
        seats: row.get(5)?,
        has_toilet: row.get(6)?,
        has_wifi: row.get(7)?,
        has_sockets: row.get(8)?,
        can_take_calls: row.get(9)?,
        coffee_price: row.get(10)?,
    })
}
