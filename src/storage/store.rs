//! Store handle and scoped sessions
//!
//! A [`Store`] only remembers where the database lives. Every interaction
//! acquires its own [`Session`] (one SQLite connection) and the connection
//! is closed when the session is dropped, so no connection outlives the
//! request or console view that opened it.

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};

use super::error::StorageResult;
use super::schema;
use super::types::{Employee, SeedOutcome};

/// Handle to the attendance database file
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open (or create) the database at `path` and run the schema/seed initializer.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };

        let mut session = store.session()?;
        session.conn.pragma_update(None, "journal_mode", "WAL")?;
        session.conn.pragma_update(None, "synchronous", "NORMAL")?;

        match session.initialize()? {
            SeedOutcome::Seeded(count) => {
                tracing::info!(path = ?store.path, count, "Created attendance database")
            }
            SeedOutcome::AlreadyPopulated(count) => {
                tracing::info!(path = ?store.path, employees = count, "Opened attendance database")
            }
        }

        Ok(store)
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a session. The connection is released when it is dropped.
    pub fn session(&self) -> StorageResult<Session> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Session { conn })
    }

    /// Run `f` against a fresh session on the blocking thread pool.
    ///
    /// rusqlite is synchronous, so async callers go through here instead of
    /// holding a connection across `.await` points.
    pub async fn run<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&mut Session) -> StorageResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut session = store.session()?;
            f(&mut session)
        })
        .await?
    }
}

/// One open connection, scoped to a single interaction
pub struct Session {
    pub(crate) conn: Connection,
}

impl Session {
    /// Ensure the tables exist and seed the default roster when empty
    pub fn initialize(&mut self) -> StorageResult<SeedOutcome> {
        schema::initialize(&mut self.conn)
    }

    /// Full roster in id order
    pub fn employees(&self) -> StorageResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, salary FROM employees ORDER BY id")?;

        let employees = stmt
            .query_map([], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    /// Look up a single employee
    pub fn employee(&self, id: i64) -> StorageResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                "SELECT id, name, salary FROM employees WHERE id = ?1",
                [id],
                employee_from_row,
            )
            .optional()?;

        Ok(employee)
    }

    /// Number of employees on the roster
    pub fn employee_count(&self) -> StorageResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Cheap round trip used by readiness checks
    pub fn ping(&self) -> StorageResult<()> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        salary: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::SEED_EMPLOYEES;
    use crate::storage::testing::test_store;
    use tempfile::tempdir;

    #[test]
    fn test_open_seeds_roster() {
        let (store, _dir) = test_store();
        let session = store.session().unwrap();

        let employees = session.employees().unwrap();
        assert_eq!(employees.len(), 10);
        assert_eq!(employees[0].name, "Alice");
        assert_eq!(employees[9].name, "Jane");

        let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());

        for (employee, (name, salary)) in employees.iter().zip(SEED_EMPLOYEES.iter()) {
            assert_eq!(&employee.name, name);
            assert_eq!(employee.salary, *salary);
        }
    }

    #[test]
    fn test_reopen_does_not_reseed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.db");

        Store::open(&path).unwrap();
        let store = Store::open(&path).unwrap();

        assert_eq!(store.session().unwrap().employee_count().unwrap(), 10);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("database.db");

        let store = Store::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_employee_lookup() {
        let (store, _dir) = test_store();
        let session = store.session().unwrap();

        let charlie = session.employee(3).unwrap().unwrap();
        assert_eq!(charlie.name, "Charlie");
        assert_eq!(charlie.salary, 32000.0);

        assert!(session.employee(9999).unwrap().is_none());
    }

    #[test]
    fn test_ping() {
        let (store, _dir) = test_store();
        assert!(store.session().unwrap().ping().is_ok());
    }

    #[tokio::test]
    async fn test_run_on_blocking_pool() {
        let (store, _dir) = test_store();

        let count = store.run(|session| session.employee_count()).await.unwrap();
        assert_eq!(count, 10);
    }
}
