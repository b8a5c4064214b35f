//! Shared database handle with an all-or-nothing transaction scope.

use crate::models::TournamentError;
use crate::store::Tables;
use std::sync::RwLock;

/// All tournament state behind one lock. Shared across request handlers.
#[derive(Debug, Default)]
pub struct Database {
    tables: RwLock<Tables>,
}

impl Database {
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Run a read-only closure against the current tables.
    pub fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, TournamentError> {
        let guard = self.tables.read().map_err(|_| TournamentError::StorePoisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` against a staged copy of the tables and commit it only if `f`
    /// returns `Ok`. The write lock is held throughout, so transactions are
    /// serialized against each other and against readers.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, TournamentError>,
    ) -> Result<T, TournamentError> {
        let mut guard = self.tables.write().map_err(|_| TournamentError::StorePoisoned)?;
        let mut staged = guard.clone();
        match f(&mut staged) {
            Ok(out) => {
                *guard = staged;
                Ok(out)
            }
            Err(e) => {
                log::warn!("Transaction rolled back: {}", e);
                Err(e)
            }
        }
    }
}
