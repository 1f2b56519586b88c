//! SQLite account store

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::future::Future;
use std::sync::{Arc, Mutex};

use super::models::Account;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database connection unavailable")]
    Unavailable,
}

/// Read access to accounts keyed by email.
pub trait AccountStore: Send + Sync + 'static {
    /// First account whose email equals `email`, if any.
    fn find_account_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;
}

/// Database connection wrapper
#[derive(Clone, Debug)]
pub struct SqliteAccountStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAccountStore {
    /// Open an existing account database; fails if the file is missing
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an account database, creating an empty file if needed
    pub fn open_or_create(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create in-memory database with the schema in place (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the `users` table if it does not exist yet
    pub fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Unavailable)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
            "#,
        )?;
        Ok(())
    }

    /// Insert a new account
    pub fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Unavailable)?;
        conn.execute(
            "INSERT INTO users (id, name, email, password, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.id,
                account.name,
                account.email,
                account.password_hash,
                account.created_at,
            ],
        )?;
        Ok(())
    }

    fn query_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<Account>> {
        conn.query_row(
            "SELECT id, name, email, password, created_at
             FROM users WHERE email = ?1 LIMIT 1",
            params![email],
            |row| {
                Ok(Account {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    password_hash: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
        .optional()
    }
}

impl AccountStore for SqliteAccountStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let conn = Arc::clone(&self.conn);
        let email = email.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<Account>, StoreError> {
            let conn = conn.lock().map_err(|_| StoreError::Unavailable)?;
            Ok(Self::query_by_email(&conn, &email)?)
        })
        .await
        .map_err(|_| StoreError::Unavailable)?
    }
}
