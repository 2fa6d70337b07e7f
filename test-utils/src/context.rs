use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, Database, DatabaseConnection,
};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Inactivity window of sessions handed out by `TestContext::session`.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// In-memory SQLite database plus an optional session living in the same database.
///
/// Everything is created on first use. Dropping the context drops the database.
#[derive(Default)]
pub struct TestContext {
    pub db: Option<DatabaseConnection>,
    pub session: Option<Session>,
    store: Option<SqliteStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects to a fresh `sqlite::memory:` database on first call.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        self.db
            .as_ref()
            .ok_or_else(|| uninitialized("database"))
    }

    /// Runs the CREATE TABLE statements collected by `TestBuilder`, in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Runs the CREATE INDEX statements collected by `TestBuilder`.
    pub async fn with_indexes(&mut self, stmts: Vec<IndexCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Session store backed by the test database, with its table migrated.
    ///
    /// Router tests hand this store to a `SessionManagerLayer` so that cookies issued by
    /// `/api/auth/register` resolve against the same database the handlers use.
    pub async fn session_store(&mut self) -> Result<SqliteStore, TestError> {
        if let Some(store) = &self.store {
            return Ok(store.clone());
        }

        let pool = self.database().await?.get_sqlite_connection_pool().clone();
        let store = SqliteStore::new(pool);
        store
            .migrate()
            .await
            .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

        self.store = Some(store.clone());

        Ok(store)
    }

    /// A fresh, unauthenticated session for driving `AuthGuard` directly.
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let store = self.session_store().await?;
            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS))),
            ));
        }

        self.session
            .as_ref()
            .ok_or_else(|| uninitialized("session"))
    }

    /// Both handles at once, for tests that seed rows and then sign a user in.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(uninitialized("test context")),
        }
    }
}

fn uninitialized(what: &str) -> TestError {
    sea_orm::DbErr::Custom(format!("{} not initialized", what)).into()
}
