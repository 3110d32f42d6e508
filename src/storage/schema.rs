//! Schema and seed data
//!
//! Creates the `employees` and `attendance` tables and seeds the default
//! roster the first time the database is opened.

use rusqlite::{params, Connection};

use super::error::StorageResult;
use super::types::SeedOutcome;

/// Default roster inserted into an empty `employees` table, in id order
pub const SEED_EMPLOYEES: [(&str, f64); 10] = [
    ("Alice", 30000.0),
    ("Bob", 28000.0),
    ("Charlie", 32000.0),
    ("David", 31000.0),
    ("Eva", 29500.0),
    ("Frank", 27000.0),
    ("Grace", 33000.0),
    ("Hannah", 28500.0),
    ("Ian", 27500.0),
    ("Jane", 29000.0),
];

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        salary REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        emp_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        status TEXT NOT NULL,
        FOREIGN KEY(emp_id) REFERENCES employees(id)
    );
";

/// Ensure both tables exist and seed the roster if it is empty.
///
/// Safe to call on every start: a non-empty roster is left untouched.
pub fn initialize(conn: &mut Connection) -> StorageResult<SeedOutcome> {
    let tx = conn.transaction()?;

    tx.execute_batch(CREATE_TABLES)?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;

    if existing > 0 {
        tx.commit()?;
        return Ok(SeedOutcome::AlreadyPopulated(existing as usize));
    }

    {
        let mut stmt = tx.prepare("INSERT INTO employees (name, salary) VALUES (?1, ?2)")?;
        for (name, salary) in SEED_EMPLOYEES.iter() {
            stmt.execute(params![name, salary])?;
        }
    }

    tx.commit()?;

    tracing::info!(count = SEED_EMPLOYEES.len(), "Seeded default employees");
    Ok(SeedOutcome::Seeded(SEED_EMPLOYEES.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_seeds_empty_database() {
        let mut conn = Connection::open_in_memory().unwrap();

        let outcome = initialize(&mut conn).unwrap();
        assert_eq!(outcome, SeedOutcome::Seeded(10));

        let rows: Vec<(i64, String, f64)> = conn
            .prepare("SELECT id, name, salary FROM employees ORDER BY id")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 10);
        for (i, (id, name, salary)) in rows.iter().enumerate() {
            assert_eq!(*id, i as i64 + 1);
            assert_eq!(name, SEED_EMPLOYEES[i].0);
            assert_eq!(*salary, SEED_EMPLOYEES[i].1);
        }
    }

    #[test]
    fn test_initialize_twice_does_not_duplicate() {
        let mut conn = Connection::open_in_memory().unwrap();

        initialize(&mut conn).unwrap();
        let outcome = initialize(&mut conn).unwrap();
        assert_eq!(outcome, SeedOutcome::AlreadyPopulated(10));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 10);
    }

    #[test]
    fn test_initialize_keeps_existing_roster() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();
        conn.execute(
            "INSERT INTO employees (name, salary) VALUES ('Zoe', 41000)",
            [],
        )
        .unwrap();

        let outcome = initialize(&mut conn).unwrap();
        assert_eq!(outcome, SeedOutcome::AlreadyPopulated(1));
    }
}
