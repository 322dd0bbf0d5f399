//! SQLite-backed task store.
//!
//! Timestamps are stored as RFC 3339 text. The `overdue` flag is computed at
//! read time (due date in the past and status not done) so every snapshot the
//! store hands out already carries it; nothing downstream rederives it.
//! Unparseable stored dates degrade instead of failing the load: an optional
//! date becomes `None`, a required one falls back to the Unix epoch.

use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::{named_params, Connection, Row};

use crate::config::AppConfig;
use crate::error::{StoreError, StoreResult};
use crate::model::{Priority, Status, Task, TaskRequest};

pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> anyhow::Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations().context("Failed to apply migrations")?;
        Ok(db)
    }

    /// Authoritative snapshot for one user, newest first.
    pub fn list(&self, user_id: i64) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, due_date, priority, status, category, \
             created_at, updated_at \
             FROM tasks WHERE user_id = ? ORDER BY created_at DESC",
        )?;
        let now = Utc::now();
        let mut rows = stmt.query([user_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(map_task(row, now)?);
        }
        Ok(tasks)
    }

    pub fn list_by_status(&self, user_id: i64, status: Status) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, due_date, priority, status, category, \
             created_at, updated_at \
             FROM tasks WHERE user_id = :user AND status = :status \
             ORDER BY created_at DESC",
        )?;
        let now = Utc::now();
        let mut rows = stmt.query(named_params![
            ":user": user_id,
            ":status": status.as_str(),
        ])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(map_task(row, now)?);
        }
        Ok(tasks)
    }

    /// Tasks whose due date has passed and that are not done, soonest first.
    pub fn list_overdue(&self, user_id: i64) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, due_date, priority, status, category, \
             created_at, updated_at \
             FROM tasks WHERE user_id = :user AND due_date IS NOT NULL \
             AND due_date < :now AND status <> 'done' \
             ORDER BY due_date ASC",
        )?;
        let now = Utc::now();
        let mut rows = stmt.query(named_params![
            ":user": user_id,
            ":now": now.to_rfc3339(),
        ])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(map_task(row, now)?);
        }
        Ok(tasks)
    }

    pub fn fetch_task(&self, user_id: i64, id: i64) -> StoreResult<Task> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, due_date, priority, status, category, \
             created_at, updated_at \
             FROM tasks WHERE id = :id AND user_id = :user LIMIT 1",
        )?;
        let mut rows = stmt.query(named_params![":id": id, ":user": user_id])?;
        match rows.next()? {
            Some(row) => map_task(row, Utc::now()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    pub fn create(&self, user_id: i64, request: &TaskRequest) -> StoreResult<Task> {
        validate_title(&request.title)?;

        let now = Utc::now().to_rfc3339();
        let status = request.status.unwrap_or(Status::Todo);
        self.conn.execute(
            "INSERT INTO tasks (user_id, title, description, due_date, priority, status, \
             category, created_at, updated_at) \
             VALUES (:user, :title, :description, :due, :priority, :status, :category, \
             :created, :updated)",
            named_params![
                ":user": user_id,
                ":title": request.title.trim(),
                ":description": request.description.as_deref(),
                ":due": request.due_date.map(|dt| dt.to_rfc3339()),
                ":priority": request.priority.as_str(),
                ":status": status.as_str(),
                ":category": request.category.as_deref(),
                ":created": now,
                ":updated": now,
            ],
        )?;

        self.fetch_task(user_id, self.conn.last_insert_rowid())
    }

    /// Overwrite a task's details. The status is applied only when the
    /// request carries one; a missing status keeps the existing column.
    pub fn update(&self, user_id: i64, id: i64, request: &TaskRequest) -> StoreResult<Task> {
        validate_title(&request.title)?;

        let existing = self.fetch_task(user_id, id)?;
        let status = request.status.unwrap_or(existing.status);
        self.conn.execute(
            "UPDATE tasks SET \
                title = :title, \
                description = :description, \
                due_date = :due, \
                priority = :priority, \
                status = :status, \
                category = :category, \
                updated_at = :updated \
             WHERE id = :id AND user_id = :user",
            named_params![
                ":title": request.title.trim(),
                ":description": request.description.as_deref(),
                ":due": request.due_date.map(|dt| dt.to_rfc3339()),
                ":priority": request.priority.as_str(),
                ":status": status.as_str(),
                ":category": request.category.as_deref(),
                ":updated": Utc::now().to_rfc3339(),
                ":id": id,
                ":user": user_id,
            ],
        )?;

        self.fetch_task(user_id, id)
    }

    pub fn update_status(&self, user_id: i64, id: i64, status: Status) -> StoreResult<Task> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = :status, updated_at = :updated \
             WHERE id = :id AND user_id = :user",
            named_params![
                ":status": status.as_str(),
                ":updated": Utc::now().to_rfc3339(),
                ":id": id,
                ":user": user_id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        self.fetch_task(user_id, id)
    }

    pub fn delete(&self, user_id: i64, id: i64) -> StoreResult<()> {
        let affected = self.conn.execute(
            "DELETE FROM tasks WHERE id = :id AND user_id = :user",
            named_params![":id": id, ":user": user_id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn apply_migrations(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                user_id INTEGER REFERENCES users(id)
             );
             CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                title TEXT NOT NULL,
                description TEXT,
                due_date TEXT,
                priority TEXT NOT NULL DEFAULT 'medium',
                status TEXT NOT NULL DEFAULT 'todo',
                category TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);
             CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
             CREATE INDEX IF NOT EXISTS idx_tasks_due ON tasks(due_date);
            ",
        )?;
        Ok(())
    }
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation(String::from("Title is required")));
    }
    Ok(())
}

fn map_task(row: &Row<'_>, now: DateTime<Utc>) -> StoreResult<Task> {
    let due_date = parse_datetime(row.get::<_, Option<String>>(3)?);
    let status = parse_status(&row.get::<_, String>(5)?);
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date,
        priority: parse_priority(&row.get::<_, String>(4)?),
        status,
        category: row.get(6)?,
        created_at: parse_datetime_or_epoch(row.get::<_, String>(7)?),
        updated_at: parse_datetime_or_epoch(row.get::<_, String>(8)?),
        overdue: due_date.map(|due| due < now).unwrap_or(false) && status != Status::Done,
    })
}

fn parse_datetime(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_datetime_or_epoch(raw: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}

// Unknown enum text degrades to the default, same policy as the dates.
fn parse_status(raw: &str) -> Status {
    raw.parse().unwrap_or(Status::Todo)
}

fn parse_priority(raw: &str) -> Priority {
    raw.parse().unwrap_or(Priority::Medium)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_db() -> (Database, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        let db = Database::initialize(&config).expect("init db");
        (db, dir)
    }

    fn signed_up(db: &Database) -> i64 {
        let mut session = Session::initialize(db).expect("session");
        session
            .sign_up(db, "Ada", "ada@example.com")
            .expect("sign up")
            .id
    }

    fn request(title: &str) -> TaskRequest {
        TaskRequest {
            title: title.to_string(),
            ..TaskRequest::default()
        }
    }

    #[test]
    fn create_defaults_status_to_todo_and_roundtrips() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);

        let mut req = request("Buy milk");
        req.description = Some(String::from("two liters"));
        req.priority = Priority::High;
        req.category = Some(String::from("errands"));

        let task = db.create(user, &req).expect("create");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category.as_deref(), Some("errands"));

        let listed = db.list(user).expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], task);
    }

    #[test]
    fn blank_title_is_rejected() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);
        let err = db.create(user, &request("   ")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn list_is_newest_first() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);
        // created_at has second precision; force distinct timestamps.
        let first = db.create(user, &request("first")).expect("create");
        db.conn
            .execute(
                "UPDATE tasks SET created_at = :ts WHERE id = :id",
                named_params![
                    ":ts": (Utc::now() - Duration::hours(1)).to_rfc3339(),
                    ":id": first.id,
                ],
            )
            .expect("age first task");
        db.create(user, &request("second")).expect("create");

        let titles: Vec<String> = db
            .list(user)
            .expect("list")
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn update_keeps_status_when_request_has_none() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);
        let task = db.create(user, &request("draft")).expect("create");
        db.update_status(user, task.id, Status::InProgress)
            .expect("status");

        let updated = db
            .update(user, task.id, &request("draft, revised"))
            .expect("update");
        assert_eq!(updated.title, "draft, revised");
        assert_eq!(updated.status, Status::InProgress);

        let mut done = request("draft, finished");
        done.status = Some(Status::Done);
        let finished = db.update(user, task.id, &done).expect("update");
        assert_eq!(finished.status, Status::Done);
    }

    #[test]
    fn overdue_is_computed_at_read_time() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);

        let mut past = request("late");
        past.due_date = Some(Utc::now() - Duration::days(2));
        let late = db.create(user, &past).expect("create");
        assert!(late.overdue);

        // Done tasks are never overdue, no matter the date.
        let closed = db
            .update_status(user, late.id, Status::Done)
            .expect("status");
        assert!(!closed.overdue);

        let mut future = request("on time");
        future.due_date = Some(Utc::now() + Duration::days(2));
        assert!(!db.create(user, &future).expect("create").overdue);
    }

    #[test]
    fn list_overdue_orders_soonest_first() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);

        for (title, days_ago) in [("older", 5), ("newer", 1)] {
            let mut req = request(title);
            req.due_date = Some(Utc::now() - Duration::days(days_ago));
            db.create(user, &req).expect("create");
        }
        let mut undated = request("undated");
        undated.due_date = None;
        db.create(user, &undated).expect("create");

        let titles: Vec<String> = db
            .list_overdue(user)
            .expect("overdue")
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["older", "newer"]);
    }

    #[test]
    fn foreign_tasks_are_invisible() {
        let (db, _dir) = temp_db();
        let owner = signed_up(&db);
        let task = db.create(owner, &request("mine")).expect("create");

        let mut session = Session::initialize(&db).expect("session");
        let other = session
            .sign_up(&db, "Brin", "brin@example.com")
            .expect("sign up")
            .id;

        assert!(db.list(other).expect("list").is_empty());
        assert!(matches!(
            db.fetch_task(other, task.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            db.update(other, task.id, &request("stolen")),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            db.delete(other, task.id),
            Err(StoreError::NotFound(_))
        ));

        // Untouched for the owner.
        assert_eq!(db.fetch_task(owner, task.id).expect("fetch").title, "mine");
    }

    #[test]
    fn corrupt_stored_dates_degrade_instead_of_failing() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);
        let task = db.create(user, &request("tampered")).expect("create");

        db.conn
            .execute(
                "UPDATE tasks SET due_date = 'not-a-date', created_at = 'garbage' WHERE id = :id",
                named_params![":id": task.id],
            )
            .expect("tamper");

        let reread = db.fetch_task(user, task.id).expect("fetch survives");
        assert_eq!(reread.due_date, None);
        assert!(!reread.overdue);
        assert_eq!(reread.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn delete_removes_the_row() {
        let (db, _dir) = temp_db();
        let user = signed_up(&db);
        let task = db.create(user, &request("gone soon")).expect("create");

        db.delete(user, task.id).expect("delete");
        assert!(matches!(
            db.fetch_task(user, task.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            db.delete(user, task.id),
            Err(StoreError::NotFound(_))
        ));
    }
}
