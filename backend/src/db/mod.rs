//! SQLite access. Each operation opens its own connection on the configured file.

pub mod bast;
pub mod checklist;
pub mod personnel;
pub mod station;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

const BOOTSTRAP_DDL: &str = include_str!("schema.sql");

/// Records shown per page in the paginated listings.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Creates missing tables. Safe to run on every start.
    pub fn bootstrap(&self) -> rusqlite::Result<()> {
        self.connect()?.execute_batch(BOOTSTRAP_DDL)
    }
}

/// Number of pages needed for `total` rows, never less than one.
pub fn num_pages(total: u64) -> u32 {
    let pages = total.div_ceil(PAGE_SIZE as u64) as u32;
    pages.max(1)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(num_pages(0), 1);
        assert_eq!(num_pages(10), 1);
        assert_eq!(num_pages(11), 2);
    }
}
