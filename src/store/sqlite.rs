use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

use super::schema::SCHEMA;
use super::{Store, TaskFilter};
use crate::error::{Error, Result};
use crate::types::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

const TOKEN_COLUMNS: &str = "SELECT t.id, t.token, t.description, t.role, p.name, p.repository_uri, p.version, t.date_issued, t.date_revoked
     FROM tokens t LEFT JOIN pipelines p ON p.id = t.pipeline_id";

const TASK_COLUMNS: &str = "SELECT t.id, p.name, p.repository_uri, p.version, t.task_input_id, t.task_input, t.status, t.created_at, t.updated_at
     FROM tasks t JOIN pipelines p ON p.id = t.pipeline_id";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Role::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown role '{s}'").into()))
    }
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TaskStatus::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown task status '{s}'").into()))
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// A revocation date that cannot be read must not be treated as "not revoked".
fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn token_from_row(row: &Row<'_>) -> rusqlite::Result<Token> {
    let pipeline = match row.get::<_, Option<String>>(4)? {
        Some(name) => Some(Pipeline {
            name,
            uri: row.get(5)?,
            version: row.get(6)?,
        }),
        None => None,
    };

    Ok(Token {
        id: row.get(0)?,
        token: row.get(1)?,
        description: row.get(2)?,
        role: row.get(3)?,
        pipeline,
        date_issued: parse_datetime(&row.get::<_, String>(7)?),
        date_revoked: row
            .get::<_, Option<String>>(8)?
            .map(|s| parse_date(8, &s))
            .transpose()?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let task_input = serde_json::from_str(&row.get::<_, String>(5)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: row.get(0)?,
        pipeline: Pipeline {
            name: row.get(1)?,
            uri: row.get(2)?,
            version: row.get(3)?,
        },
        task_input_id: row.get(4)?,
        task_input,
        status: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
        updated_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

fn pipeline_id(conn: &Connection, pipeline: &Pipeline) -> Result<Option<String>> {
    conn.query_row(
        "SELECT id FROM pipelines WHERE name = ?1 AND version = ?2",
        params![pipeline.name, pipeline.version],
        |row| row.get(0),
    )
    .optional()
    .map_err(Error::from)
}

fn task_by_id(conn: &Connection, id: &str) -> Result<Option<Task>> {
    conn.query_row(
        &format!("{TASK_COLUMNS} WHERE t.id = ?1"),
        params![id],
        task_from_row,
    )
    .optional()
    .map_err(Error::from)
}

fn insert_event(
    conn: &Connection,
    task_id: &str,
    token_id: &str,
    status: TaskStatus,
    change: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO events (task_id, token_id, status, change, time) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            task_id,
            token_id,
            status,
            change,
            format_datetime(&Utc::now())
        ],
    )?;
    Ok(())
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Pipeline operations

    fn create_pipeline(&self, pipeline: &Pipeline) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO pipelines (id, name, repository_uri, version, date_created)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Uuid::new_v4().to_string(),
                pipeline.name,
                pipeline.uri,
                pipeline.version,
                format_datetime(&Utc::now()),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => Err(Error::AlreadyExists),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_pipeline(&self, name: &str, version: &str) -> Result<Option<Pipeline>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT name, repository_uri, version FROM pipelines WHERE name = ?1 AND version = ?2",
            params![name, version],
            |row| {
                Ok(Pipeline {
                    name: row.get(0)?,
                    uri: row.get(1)?,
                    version: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn find_pipelines(&self, name: &str, version: Option<&str>) -> Result<Vec<Pipeline>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name, repository_uri, version FROM pipelines
             WHERE name = ?1 AND (?2 IS NULL OR version = ?2) ORDER BY version",
        )?;

        let rows = stmt.query_map(params![name, version], |row| {
            Ok(Pipeline {
                name: row.get(0)?,
                uri: row.get(1)?,
                version: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_pipelines(&self, uri: Option<&str>) -> Result<Vec<Pipeline>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name, repository_uri, version FROM pipelines
             WHERE (?1 IS NULL OR repository_uri = ?1) ORDER BY name, version",
        )?;

        let rows = stmt.query_map(params![uri], |row| {
            Ok(Pipeline {
                name: row.get(0)?,
                uri: row.get(1)?,
                version: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Token operations

    fn create_token(&self, token: &Token) -> Result<()> {
        if token.role == Role::PowerUser && token.pipeline.is_some() {
            return Err(Error::BadRequest(
                "power_user tokens cannot be scoped to a pipeline".to_string(),
            ));
        }

        let conn = self.conn();
        let pipeline_id = match &token.pipeline {
            Some(pipeline) => Some(pipeline_id(&conn, pipeline)?.ok_or(Error::NotFound)?),
            None => None,
        };

        let result = conn.execute(
            "INSERT INTO tokens (id, token, description, role, pipeline_id, date_issued, date_revoked)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                token.id,
                token.token,
                token.description,
                token.role,
                pipeline_id,
                format_datetime(&token.date_issued),
                token
                    .date_revoked
                    .map(|d| d.format(DATE_FORMAT).to_string()),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => Err(Error::AlreadyExists),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_token(&self, value: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            &format!("{TOKEN_COLUMNS} WHERE t.token = ?1"),
            params![value],
            token_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_token_by_id(&self, id: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            &format!("{TOKEN_COLUMNS} WHERE t.id = ?1"),
            params![id],
            token_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_tokens(&self) -> Result<Vec<Token>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{TOKEN_COLUMNS} ORDER BY t.date_issued, t.id"))?;

        let rows = stmt.query_map([], token_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn revoke_token(&self, id: &str, date: NaiveDate) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE tokens SET date_revoked = ?1 WHERE id = ?2 AND date_revoked IS NULL",
            params![date.format(DATE_FORMAT).to_string(), id],
        )?;
        Ok(rows > 0)
    }

    fn has_power_user_token(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM tokens WHERE role = ?1",
            params![Role::PowerUser],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // Task operations

    fn create_task(&self, task: &Task, token_id: &str) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let pipeline_id = pipeline_id(&tx, &task.pipeline)?.ok_or(Error::NotFound)?;

        let result = tx.execute(
            "INSERT INTO tasks (id, pipeline_id, task_input_id, task_input, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                task.id,
                pipeline_id,
                task.task_input_id,
                task.task_input.to_string(),
                task.status,
                format_datetime(&task.created_at),
                format_datetime(&task.updated_at),
            ],
        );

        match result {
            Ok(_) => {}
            Err(e) if is_constraint_violation(&e) => return Err(Error::AlreadyExists),
            Err(e) => return Err(Error::from(e)),
        }

        insert_event(&tx, &task.id, token_id, task.status, "Created")?;
        tx.commit()?;
        Ok(())
    }

    fn get_task(&self, pipeline: &Pipeline, task_input_id: &str) -> Result<Option<Task>> {
        let conn = self.conn();
        conn.query_row(
            &format!("{TASK_COLUMNS} WHERE p.name = ?1 AND p.version = ?2 AND t.task_input_id = ?3"),
            params![pipeline.name, pipeline.version, task_input_id],
            task_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "{TASK_COLUMNS}
             WHERE (?1 IS NULL OR p.name = ?1)
               AND (?2 IS NULL OR p.version = ?2)
               AND (?3 IS NULL OR t.status = ?3)
             ORDER BY t.created_at, t.rowid"
        ))?;

        let rows = stmt.query_map(
            params![filter.pipeline_name, filter.pipeline_version, filter.status],
            task_from_row,
        )?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn claim_tasks(&self, pipeline: &Pipeline, limit: u32, token_id: &str) -> Result<Vec<Task>> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let pipeline_id = pipeline_id(&tx, pipeline)?.ok_or(Error::NotFound)?;

        let ids = {
            let mut stmt = tx.prepare(
                "SELECT id FROM tasks WHERE pipeline_id = ?1 AND status = ?2
                 ORDER BY created_at, rowid LIMIT ?3",
            )?;
            let rows = stmt.query_map(
                params![pipeline_id, TaskStatus::Pending, limit],
                |row| row.get::<_, String>(0),
            )?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };

        let now = format_datetime(&Utc::now());
        let mut claimed = Vec::with_capacity(ids.len());
        for id in &ids {
            let rows = tx.execute(
                "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
                params![TaskStatus::Claimed, now, id, TaskStatus::Pending],
            )?;
            if rows == 0 {
                continue;
            }
            insert_event(&tx, id, token_id, TaskStatus::Claimed, "Claimed")?;
            if let Some(task) = task_by_id(&tx, id)? {
                claimed.push(task);
            }
        }

        tx.commit()?;
        Ok(claimed)
    }

    fn update_task_status(
        &self,
        task: &Task,
        status: TaskStatus,
        token_id: &str,
    ) -> Result<Task> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
            params![
                status,
                format_datetime(&Utc::now()),
                task.id,
                task.status
            ],
        )?;

        if rows == 0 {
            // Changed underneath us, or gone.
            let current = task_by_id(&tx, &task.id)?.ok_or(Error::NotFound)?;
            return Err(Error::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        insert_event(
            &tx,
            &task.id,
            token_id,
            status,
            &format!("Status changed from {} to {}", task.status, status),
        )?;

        let updated = task_by_id(&tx, &task.id)?.ok_or(Error::NotFound)?;
        tx.commit()?;
        Ok(updated)
    }

    fn list_task_events(&self, task_id: &str) -> Result<Vec<Event>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT task_id, token_id, status, change, time FROM events
             WHERE task_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![task_id], |row| {
            Ok(Event {
                task_id: row.get(0)?,
                token_id: row.get(1)?,
                status: row.get(2)?,
                change: row.get(3)?,
                time: parse_datetime(&row.get::<_, String>(4)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteStore) {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        (temp, store)
    }

    fn ptest_one() -> Pipeline {
        Pipeline {
            name: "ptest one".to_string(),
            uri: "https://github.com/wtsi-npg/ptest".to_string(),
            version: "0.3.14".to_string(),
        }
    }

    fn new_token(value: &str, role: Role, pipeline: Option<Pipeline>) -> Token {
        Token {
            id: Uuid::new_v4().to_string(),
            token: value.to_string(),
            description: "test token".to_string(),
            role,
            pipeline,
            date_issued: Utc::now(),
            date_revoked: None,
        }
    }

    fn new_task(pipeline: &Pipeline, input: serde_json::Value) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4().to_string(),
            pipeline: pipeline.clone(),
            task_input_id: task_input_id(&input),
            task_input: input,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_initialize_creates_tables() {
        let (_temp, store) = setup();

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"pipelines".to_string()));
        assert!(tables.contains(&"tokens".to_string()));
        assert!(tables.contains(&"tasks".to_string()));
        assert!(tables.contains(&"events".to_string()));
    }

    #[test]
    fn test_pipeline_natural_key_is_unique() {
        let (_temp, store) = setup();
        store.create_pipeline(&ptest_one()).unwrap();

        let mut other_uri = ptest_one();
        other_uri.uri = "https://elsewhere.example".to_string();
        assert!(matches!(
            store.create_pipeline(&other_uri),
            Err(Error::AlreadyExists)
        ));

        let mut next = ptest_one();
        next.version = "0.3.15".to_string();
        store.create_pipeline(&next).unwrap();

        assert_eq!(store.find_pipelines("ptest one", None).unwrap().len(), 2);
        assert_eq!(
            store.find_pipelines("ptest one", Some("0.3.15")).unwrap(),
            vec![next]
        );
        assert!(store.find_pipelines("nope", None).unwrap().is_empty());
    }

    #[test]
    fn test_token_lookup_joins_pipeline() {
        let (_temp, store) = setup();
        store.create_pipeline(&ptest_one()).unwrap();

        let value = "0123456789abcdef0123456789abcdef";
        let token = new_token(value, Role::RegularUser, Some(ptest_one()));
        store.create_token(&token).unwrap();

        let fetched = store.get_token(value).unwrap().unwrap();
        assert_eq!(fetched.id, token.id);
        assert_eq!(fetched.role, Role::RegularUser);
        assert_eq!(fetched.pipeline, Some(ptest_one()));

        // Stored verbatim, matched exactly
        assert!(store.get_token(&value.to_uppercase()).unwrap().is_none());
    }

    #[test]
    fn test_power_user_token_cannot_be_scoped() {
        let (_temp, store) = setup();
        store.create_pipeline(&ptest_one()).unwrap();

        let token = new_token(
            "0123456789abcdef0123456789abcdef",
            Role::PowerUser,
            Some(ptest_one()),
        );
        assert!(matches!(
            store.create_token(&token),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn test_token_for_unknown_pipeline() {
        let (_temp, store) = setup();
        let token = new_token(
            "0123456789abcdef0123456789abcdef",
            Role::RegularUser,
            Some(ptest_one()),
        );
        assert!(matches!(store.create_token(&token), Err(Error::NotFound)));
    }

    #[test]
    fn test_revocation_is_monotonic() {
        let (_temp, store) = setup();
        let token = new_token("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", Role::PowerUser, None);
        store.create_token(&token).unwrap();
        assert!(store.has_power_user_token().unwrap());

        let first = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

        assert!(store.revoke_token(&token.id, first).unwrap());
        assert!(!store.revoke_token(&token.id, later).unwrap());

        let fetched = store.get_token_by_id(&token.id).unwrap().unwrap();
        assert_eq!(fetched.date_revoked, Some(first));
    }

    #[test]
    fn test_claim_is_oldest_first_and_exclusive() {
        let (_temp, store) = setup();
        store.create_pipeline(&ptest_one()).unwrap();
        let token = new_token("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", Role::PowerUser, None);
        store.create_token(&token).unwrap();

        for i in 0..3 {
            store
                .create_task(&new_task(&ptest_one(), json!({ "run": i })), &token.id)
                .unwrap();
        }

        let first = store.claim_tasks(&ptest_one(), 2, &token.id).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].task_input, json!({ "run": 0 }));
        assert!(first.iter().all(|t| t.status == TaskStatus::Claimed));

        let second = store.claim_tasks(&ptest_one(), 2, &token.id).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].task_input, json!({ "run": 2 }));

        assert!(store.claim_tasks(&ptest_one(), 2, &token.id).unwrap().is_empty());

        let events = store.list_task_events(&first[0].id).unwrap();
        let changes: Vec<_> = events.iter().map(|e| e.change.as_str()).collect();
        assert_eq!(changes, vec!["Created", "Claimed"]);
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let (_temp, store) = setup();
        store.create_pipeline(&ptest_one()).unwrap();
        let token = new_token("cccccccccccccccccccccccccccccccc", Role::PowerUser, None);
        store.create_token(&token).unwrap();

        store
            .create_task(&new_task(&ptest_one(), json!({ "run": 1 })), &token.id)
            .unwrap();
        assert!(matches!(
            store.create_task(&new_task(&ptest_one(), json!({ "run": 1 })), &token.id),
            Err(Error::AlreadyExists)
        ));
    }

    #[test]
    fn test_stale_status_update_is_rejected() {
        let (_temp, store) = setup();
        store.create_pipeline(&ptest_one()).unwrap();
        let token = new_token("dddddddddddddddddddddddddddddddd", Role::PowerUser, None);
        store.create_token(&token).unwrap();

        let task = new_task(&ptest_one(), json!({ "run": 1 }));
        store.create_task(&task, &token.id).unwrap();
        store.claim_tasks(&ptest_one(), 1, &token.id).unwrap();

        // `task` still believes it is PENDING
        let result = store.update_task_status(&task, TaskStatus::Cancelled, &token.id);
        assert!(matches!(
            result,
            Err(Error::InvalidTransition {
                from: TaskStatus::Claimed,
                to: TaskStatus::Cancelled
            })
        ));

        let current = store
            .get_task(&ptest_one(), &task.task_input_id)
            .unwrap()
            .unwrap();
        let running = store
            .update_task_status(&current, TaskStatus::Running, &token.id)
            .unwrap();
        assert_eq!(running.status, TaskStatus::Running);

        let events = store.list_task_events(&task.id).unwrap();
        let changes: Vec<_> = events
            .iter()
            .map(|e| (e.change.as_str(), e.status))
            .collect();
        assert_eq!(
            changes,
            vec![
                ("Created", TaskStatus::Pending),
                ("Claimed", TaskStatus::Claimed),
                ("Status changed from CLAIMED to RUNNING", TaskStatus::Running),
            ]
        );

        let filter = TaskFilter {
            status: Some(TaskStatus::Running),
            ..TaskFilter::default()
        };
        assert_eq!(store.list_tasks(&filter).unwrap().len(), 1);
    }
}
