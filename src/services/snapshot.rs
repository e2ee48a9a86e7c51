//! Snapshot Mirror - Local JSON Copies of the Collections
//!
//! Each collection is written as a pretty JSON array to
//! `<dir>/<collection key>.json`. A missing file falls back to seed data.
//! This is a convenience mirror only: no locking and no durability promises.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::domain::seed;
use crate::error::Result;
use crate::eventing::Collection;
use crate::helpers::{ensure_dir, get_or_create_data_dir, remove_if_exists, write_atomic};
use crate::state::roster::check_occupancy;
use crate::state::{RosterSnapshot, RosterStore};

/// Directory holding the collection files
#[derive(Debug, Clone)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `dir` if given, else the platform data directory
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        let root = match dir {
            Some(dir) => ensure_dir(dir)?,
            None => get_or_create_data_dir()?,
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.key()))
    }

    fn load_collection<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<Vec<T>>> {
        let path = self.path_of(collection);
        if !path.exists() {
            debug!(path = ?path, "No snapshot, using seed data");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save_collection<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;
        write_atomic(&self.path_of(collection), content.as_bytes())
    }

    /// Load all collections, using seed data for any missing file
    pub fn load(&self) -> Result<RosterSnapshot> {
        let snapshot = RosterSnapshot {
            employees: self
                .load_collection(Collection::Employees)?
                .unwrap_or_else(seed::employees),
            rooms: self
                .load_collection(Collection::Rooms)?
                .unwrap_or_else(seed::rooms),
            maintenance_records: self
                .load_collection(Collection::MaintenanceRecords)?
                .unwrap_or_else(seed::maintenance_records),
        };
        check_occupancy(&snapshot.employees, &snapshot.rooms)?;
        info!(
            dir = ?self.root,
            employees = snapshot.employees.len(),
            rooms = snapshot.rooms.len(),
            records = snapshot.maintenance_records.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Write one collection from the store
    pub fn save(&self, store: &RosterStore, collection: Collection) -> Result<()> {
        match collection {
            Collection::Employees => self.save_collection(collection, store.employees()),
            Collection::Rooms => self.save_collection(collection, store.rooms()),
            Collection::MaintenanceRecords => {
                self.save_collection(collection, store.maintenance_records())
            }
        }?;
        debug!(collection = collection.key(), "Snapshot written");
        Ok(())
    }

    /// Write every collection
    pub fn save_all(&self, store: &RosterStore) -> Result<()> {
        for collection in Collection::all() {
            self.save(store, *collection)?;
        }
        Ok(())
    }

    /// Delete all collection files so the next load starts from seed data
    pub fn clear(&self) -> Result<()> {
        for collection in Collection::all() {
            remove_if_exists(&self.path_of(*collection))?;
        }
        Ok(())
    }
}
