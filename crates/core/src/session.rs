//! Local profile accounts and the persisted session.
//!
//! Profiles are name + email rows in the same database as the tasks; the
//! singleton `session` row remembers who was signed in last. No credentials
//! are stored — this is a single-machine tool, and the task store only ever
//! sees a user id.

use chrono::{DateTime, Utc};
use rusqlite::{named_params, OptionalExtension};
use serde::Serialize;

use crate::database::Database;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Current-user state, loaded once at startup and updated by the
/// sign-up/log-in/log-out operations.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    /// Load the persisted session, if any.
    pub fn initialize(db: &Database) -> StoreResult<Self> {
        Ok(Self {
            current: db.session_user()?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// The signed-in user, or the error the store operations report when
    /// nobody is.
    pub fn require_user(&self) -> StoreResult<&User> {
        self.current.as_ref().ok_or(StoreError::NoSession)
    }

    /// Register a new profile and sign it in. Emails are unique.
    pub fn sign_up(&mut self, db: &Database, name: &str, email: &str) -> StoreResult<User> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(StoreError::Validation(String::from("Name is required")));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(StoreError::Validation(String::from(
                "A valid email is required",
            )));
        }
        if db.find_user_by_email(&email)?.is_some() {
            return Err(StoreError::Validation(format!(
                "A profile already exists for {email}"
            )));
        }

        let user = db.insert_user(name, &email)?;
        db.save_session(Some(user.id))?;
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Sign an existing profile in.
    pub fn log_in(&mut self, db: &Database, email: &str) -> StoreResult<User> {
        let email = email.trim().to_lowercase();
        let user = db
            .find_user_by_email(&email)?
            .ok_or(StoreError::UnknownProfile(email))?;
        db.save_session(Some(user.id))?;
        self.current = Some(user.clone());
        Ok(user)
    }

    pub fn log_out(&mut self, db: &Database) -> StoreResult<()> {
        db.save_session(None)?;
        self.current = None;
        Ok(())
    }
}

impl Database {
    pub(crate) fn insert_user(&self, name: &str, email: &str) -> StoreResult<User> {
        self.conn.execute(
            "INSERT INTO users (name, email, created_at) VALUES (:name, :email, :created)",
            named_params![
                ":name": name,
                ":email": email,
                ":created": Utc::now().to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.find_user_by_email(email)?
            .ok_or(StoreError::NotFound(id))
    }

    pub(crate) fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, email, created_at FROM users WHERE email = ? LIMIT 1",
                [email],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        Ok(user.map(|(id, name, email, created_at)| User {
            id,
            name,
            email,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }))
    }

    pub(crate) fn save_session(&self, user_id: Option<i64>) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO session (id, user_id) VALUES (1, :user) \
             ON CONFLICT(id) DO UPDATE SET user_id = :user",
            named_params![":user": user_id],
        )?;
        Ok(())
    }

    pub(crate) fn session_user(&self) -> StoreResult<Option<User>> {
        let email = self
            .conn
            .query_row(
                "SELECT u.email FROM session s JOIN users u ON u.id = s.user_id \
                 WHERE s.id = 1 LIMIT 1",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match email {
            Some(email) => self.find_user_by_email(&email),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_db() -> (Database, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let db = Database::initialize(&config).expect("init db");
        (db, dir)
    }

    #[test]
    fn fresh_database_has_no_session() {
        let (db, _dir) = temp_db();
        let session = Session::initialize(&db).expect("session");
        assert!(!session.is_authenticated());
        assert!(matches!(
            session.require_user(),
            Err(StoreError::NoSession)
        ));
    }

    #[test]
    fn sign_up_signs_in_and_persists() {
        let (db, _dir) = temp_db();
        let mut session = Session::initialize(&db).expect("session");
        let user = session
            .sign_up(&db, "Ada", "Ada@Example.com")
            .expect("sign up");

        assert_eq!(user.email, "ada@example.com");
        assert!(session.is_authenticated());

        // A fresh Session over the same database sees the persisted login.
        let reloaded = Session::initialize(&db).expect("reload");
        assert_eq!(reloaded.current_user().map(|u| u.id), Some(user.id));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (db, _dir) = temp_db();
        let mut session = Session::initialize(&db).expect("session");
        session.sign_up(&db, "Ada", "ada@example.com").expect("ok");

        let err = session.sign_up(&db, "Imposter", "ada@example.com");
        assert!(matches!(err, Err(StoreError::Validation(_))));
    }

    #[test]
    fn log_in_requires_a_known_profile() {
        let (db, _dir) = temp_db();
        let mut session = Session::initialize(&db).expect("session");
        assert!(matches!(
            session.log_in(&db, "ghost@example.com"),
            Err(StoreError::UnknownProfile(_))
        ));

        session.sign_up(&db, "Ada", "ada@example.com").expect("ok");
        session.log_out(&db).expect("log out");
        assert!(!session.is_authenticated());

        let user = session.log_in(&db, "ADA@example.com").expect("log in");
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn log_out_clears_the_persisted_session() {
        let (db, _dir) = temp_db();
        let mut session = Session::initialize(&db).expect("session");
        session.sign_up(&db, "Ada", "ada@example.com").expect("ok");
        session.log_out(&db).expect("log out");

        let reloaded = Session::initialize(&db).expect("reload");
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn blank_profile_fields_are_rejected() {
        let (db, _dir) = temp_db();
        let mut session = Session::initialize(&db).expect("session");
        assert!(matches!(
            session.sign_up(&db, "  ", "ada@example.com"),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            session.sign_up(&db, "Ada", "not-an-email"),
            Err(StoreError::Validation(_))
        ));
    }
}
