//! Vehicle Storage
//! Vehicle directory backed by SQLite

use crate::db;
use crate::vehicles::models::{Vehicle, VehicleFilter};
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    brand TEXT NOT NULL,
    year INTEGER NOT NULL
);
"#;

/// CRUD and filtered listing over stored vehicles.
///
/// Preconditions (field validation, id checks) are the caller's job;
/// `update` and `delete` report whether a record was affected.
pub trait VehicleDirectory: Send + Sync {
    fn create(&self, vehicle: &Vehicle) -> Result<Vehicle>;
    /// `page` is accepted but does not slice the result.
    fn list(&self, page: i64, filter: &VehicleFilter) -> Result<Vec<Vehicle>>;
    fn get(&self, id: i64) -> Result<Option<Vehicle>>;
    fn update(&self, vehicle: &Vehicle) -> Result<bool>;
    fn delete(&self, id: i64) -> Result<bool>;
}

/// Vehicle storage with SQLite backend
pub struct VehicleStore {
    db_path: String,
}

impl VehicleStore {
    pub fn new(db_path: &str) -> Result<Self> {
        db::init_schema(db_path, SCHEMA_SQL).context("Failed to initialize vehicles")?;
        Ok(Self {
            db_path: db_path.to_string(),
        })
    }
}

fn vehicle_from_row(row: &Row<'_>) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get(0)?,
        name: row.get(1)?,
        brand: row.get(2)?,
        year: row.get(3)?,
    })
}

impl VehicleDirectory for VehicleStore {
    fn create(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let conn = db::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO vehicles (name, brand, year) VALUES (?1, ?2, ?3)",
            params![vehicle.name, vehicle.brand, vehicle.year],
        )
        .context("Failed to insert vehicle")?;

        let created = Vehicle {
            id: conn.last_insert_rowid(),
            ..vehicle.clone()
        };
        info!("🚗 Created vehicle {} ({} {})", created.id, created.brand, created.name);
        Ok(created)
    }

    fn list(&self, page: i64, filter: &VehicleFilter) -> Result<Vec<Vehicle>> {
        let conn = db::open(&self.db_path)?;
        let mut stmt = conn.prepare("SELECT id, name, brand, year FROM vehicles ORDER BY id")?;

        // Filtering happens here rather than in SQL so that case folding
        // covers non-ASCII names too.
        let vehicles = stmt
            .query_map([], vehicle_from_row)?
            .filter(|row| row.as_ref().map_or(true, |v| filter.matches(v)))
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list vehicles")?;

        debug!("Listed {} vehicles (page {}, {:?})", vehicles.len(), page, filter);
        Ok(vehicles)
    }

    fn get(&self, id: i64) -> Result<Option<Vehicle>> {
        let conn = db::open(&self.db_path)?;
        conn.query_row(
            "SELECT id, name, brand, year FROM vehicles WHERE id = ?1",
            params![id],
            vehicle_from_row,
        )
        .optional()
        .context("Failed to load vehicle")
    }

    fn update(&self, vehicle: &Vehicle) -> Result<bool> {
        let conn = db::open(&self.db_path)?;
        let rows_affected = conn
            .execute(
                "UPDATE vehicles SET name = ?1, brand = ?2, year = ?3 WHERE id = ?4",
                params![vehicle.name, vehicle.brand, vehicle.year, vehicle.id],
            )
            .context("Failed to update vehicle")?;
        Ok(rows_affected > 0)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let conn = db::open(&self.db_path)?;
        let rows_affected = conn
            .execute("DELETE FROM vehicles WHERE id = ?1", params![id])
            .context("Failed to delete vehicle")?;

        if rows_affected > 0 {
            info!("🗑️  Deleted vehicle {}", id);
        }
        Ok(rows_affected > 0)
    }
}
