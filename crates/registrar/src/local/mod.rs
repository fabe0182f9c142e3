/// Local key/value store used as the fallback data source
mod types;

pub use types::{hash_password, LocalUser};

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::academic::CourseRegistration;
use crate::error::{PortalError, Result};

const SCHEMA_SQL: &str = include_str!("../../../../sql/init_local_store.sql");

/// Key holding the JSON array of cached users.
pub const USERS_KEY: &str = "portal_users";
/// Key holding the JSON array of cached course registrations.
pub const REGISTRATIONS_KEY: &str = "portal_registrations";

pub struct LocalStore {
    db: Mutex<Connection>,
}

impl LocalStore {
    /// Opens (or creates) the store at `db_path` and initializes the schema
    pub fn open(db_path: &str) -> Result<Self> {
        Self::from_connection(Connection::open(db_path)?)
    }

    /// Creates a store that lives only as long as this value
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| PortalError::LocalStore {
            message: "local store lock poisoned".to_string(),
        })
    }

    /// Gets the raw value stored under `key`
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        read_item(&*self.lock()?, key)
    }

    /// Stores `value` under `key`, replacing any previous value
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        write_item(&*self.lock()?, key, value)
    }

    /// Gets and decodes the JSON value stored under `key`
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        read_json(&*self.lock()?, key)
    }

    /// Encodes `value` as JSON and stores it under `key`
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        write_json(&*self.lock()?, key, value)
    }

    /// Gets all cached users
    pub fn users(&self) -> Result<Vec<LocalUser>> {
        Ok(read_json(&*self.lock()?, USERS_KEY)?.unwrap_or_default())
    }

    /// Finds a cached user by email (case-insensitive)
    pub fn find_user(&self, email: &str) -> Result<Option<LocalUser>> {
        Ok(self
            .users()?
            .into_iter()
            .find(|u| u.profile.email.eq_ignore_ascii_case(email)))
    }

    /// Inserts a user, replacing any cached user with the same email
    pub fn upsert_user(&self, user: LocalUser) -> Result<()> {
        let db = self.lock()?;
        let mut users: Vec<LocalUser> = read_json(&db, USERS_KEY)?.unwrap_or_default();
        users.retain(|u| !u.profile.email.eq_ignore_ascii_case(&user.profile.email));
        users.push(user);
        write_json(&db, USERS_KEY, &users)
    }

    /// Inserts a user unless one with the same email is already cached.
    ///
    /// The check and the write happen under one lock.
    pub fn insert_user_if_absent(&self, user: LocalUser) -> Result<()> {
        let db = self.lock()?;
        let mut users: Vec<LocalUser> = read_json(&db, USERS_KEY)?.unwrap_or_default();
        if users
            .iter()
            .any(|u| u.profile.email.eq_ignore_ascii_case(&user.profile.email))
        {
            return Err(PortalError::UserAlreadyExists {
                email: user.profile.email,
            });
        }
        users.push(user);
        write_json(&db, USERS_KEY, &users)
    }

    /// Gets cached registrations belonging to `student_id`
    pub fn registrations_for(&self, student_id: &str) -> Result<Vec<CourseRegistration>> {
        let all: Vec<CourseRegistration> =
            read_json(&*self.lock()?, REGISTRATIONS_KEY)?.unwrap_or_default();
        Ok(all
            .into_iter()
            .filter(|r| r.student_id.as_deref() == Some(student_id))
            .collect())
    }

    /// Replaces the cached registrations of `student_id`, leaving other
    /// students' entries untouched
    pub fn replace_registrations(
        &self,
        student_id: &str,
        registrations: &[CourseRegistration],
    ) -> Result<()> {
        let db = self.lock()?;
        let mut all: Vec<CourseRegistration> =
            read_json(&db, REGISTRATIONS_KEY)?.unwrap_or_default();
        all.retain(|r| r.student_id.as_deref() != Some(student_id));
        all.extend(registrations.iter().cloned().map(|mut r| {
            r.student_id = Some(student_id.to_string());
            r
        }));
        write_json(&db, REGISTRATIONS_KEY, &all)
    }
}

fn read_item(db: &Connection, key: &str) -> Result<Option<String>> {
    let value = db
        .query_row(
            "SELECT item_value FROM local_items WHERE item_key = ?",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn write_item(db: &Connection, key: &str, value: &str) -> Result<()> {
    db.execute(
        "INSERT INTO local_items (item_key, item_value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(item_key) DO UPDATE SET
            item_value = excluded.item_value,
            updated_at = excluded.updated_at",
        (key, value),
    )?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(db: &Connection, key: &str) -> Result<Option<T>> {
    match read_item(db, key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn write_json<T: Serialize>(db: &Connection, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    write_item(db, key, &raw)
}
