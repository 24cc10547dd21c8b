//! Game session repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::store::SessionStore;
use crate::models::{RewardStatus, Session, SessionRow};
use crate::utils::errors::{GiftError, Result};

const SESSION_COLUMNS: &str =
    "session_id, completed_games, reward_status, version, created_at, updated_at, reward_confirmed_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count stored sessions
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM game_sessions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find(&self, session_id: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {} FROM game_sessions WHERE session_id = $1",
            SESSION_COLUMNS
        ))
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Session::try_from).transpose()
    }

    async fn create_if_absent(&self, session_id: &str) -> Result<Session> {
        let fresh = Session::new(session_id);

        let inserted = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            INSERT INTO game_sessions (session_id, completed_games, reward_status, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (session_id) DO NOTHING
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(&fresh.session_id)
        .bind(Vec::<String>::new())
        .bind(fresh.reward_status.as_str())
        .bind(fresh.version)
        .bind(fresh.created_at)
        .bind(fresh.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(row) => {
                tracing::debug!(session_id = session_id, "Session created");
                Session::try_from(row)
            }
            // Lost the race to a concurrent insert; read back the winner
            None => self
                .find(session_id)
                .await?
                .ok_or_else(|| GiftError::SessionNotFound { session_id: session_id.to_string() }),
        }
    }

    async fn save(&self, session: &Session) -> Result<Session> {
        let completed: Vec<String> = session
            .completed_games
            .iter()
            .map(|g| g.as_str().to_string())
            .collect();

        let row = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            UPDATE game_sessions
            SET completed_games = $2,
                reward_status = $3,
                updated_at = $4,
                reward_confirmed_at = $5,
                version = version + 1
            WHERE session_id = $1 AND version = $6
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(&session.session_id)
        .bind(completed)
        .bind(session.reward_status.as_str())
        .bind(session.updated_at)
        .bind(session.confirmed_at)
        .bind(session.version)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Session::try_from(row),
            None => Err(GiftError::StaleVersion {
                session_id: session.session_id.clone(),
                expected: session.version,
            }),
        }
    }

    async fn list_by_status(&self, status: RewardStatus) -> Result<Vec<Session>> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {} FROM game_sessions WHERE reward_status = $1 ORDER BY updated_at ASC",
            SESSION_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Session::try_from).collect()
    }
}
