//! PostgreSQL team repository implementation

use std::fmt::Write as _;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use tracing::{debug, warn};

use crate::domain::team::{Team, TeamMember, TeamRepository};
use crate::domain::{DomainError, RequestContext};
use crate::infrastructure::storage::{StorageErrorKind, classify};

const INSERT_TEAM_SQL: &str = r#"
    INSERT INTO teams (name, created_at, updated_at)
    VALUES ($1, $2, $3)
    RETURNING id
"#;

const INSERT_MEMBERS_PREFIX: &str =
    "INSERT INTO users (id, username, team_id, is_active, created_at, updated_at) VALUES ";

const FETCH_TEAM_SQL: &str = r#"
    SELECT t.name AS team_name, u.id AS user_id, u.username, u.is_active
    FROM teams t
    LEFT JOIN users u ON u.team_id = t.id
    WHERE t.name = $1
"#;

/// Columns bound per member row in the multi-row insert
const MEMBER_COLUMNS: usize = 6;

/// PostgreSQL accepts at most 65535 bind parameters per statement
const MAX_BIND_PARAMS: usize = u16::MAX as usize;

/// Largest team that fits into a single member insert
pub const MAX_MEMBERS_PER_TEAM: usize = MAX_BIND_PARAMS / MEMBER_COLUMNS;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `work` inside a single transaction.
    ///
    /// Commits when `work` succeeds. Any error from `work`, and cancellation of
    /// `ctx`, rolls the transaction back before returning. A failed rollback is
    /// logged and the triggering error is returned.
    pub async fn in_transaction<T, F>(&self, ctx: &RequestContext, work: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DomainError>> + Send,
    {
        let mut tx = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(DomainError::cancelled()),
            begun = self.pool.begin() => begun.map_err(|e| {
                DomainError::infrastructure(format!("Failed to begin transaction: {}", e))
            })?,
        };

        let outcome = tokio::select! {
            biased;
            _ = ctx.cancelled() => Err(DomainError::cancelled()),
            result = work(&mut *tx) => result,
        };

        match outcome {
            Ok(value) => {
                tx.commit().await.map_err(|e| {
                    DomainError::infrastructure(format!("Failed to commit transaction: {}", e))
                })?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        request_id = %ctx.request_id(),
                        error = %rollback_err,
                        cause = %err,
                        "Failed to roll back transaction"
                    );
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn register_team(&self, ctx: &RequestContext, team: &Team) -> Result<(), DomainError> {
        if team.members().len() > MAX_MEMBERS_PER_TEAM {
            return Err(DomainError::validation(format!(
                "a team can have at most {} members",
                MAX_MEMBERS_PER_TEAM
            )));
        }

        let owned = team.clone();
        let now = Utc::now();

        self.in_transaction(ctx, move |conn| {
            Box::pin(async move {
                let team_id = insert_team(conn, owned.team_name(), now).await?;
                insert_members(conn, team_id, owned.members(), now).await
            })
        })
        .await?;

        debug!(
            request_id = %ctx.request_id(),
            team_name = %team.team_name(),
            members = team.members().len(),
            "Team committed"
        );

        Ok(())
    }

    async fn fetch_team(
        &self,
        ctx: &RequestContext,
        team_name: &str,
    ) -> Result<Team, DomainError> {
        let rows = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(DomainError::cancelled()),
            fetched = sqlx::query(FETCH_TEAM_SQL).bind(team_name).fetch_all(&self.pool) => {
                fetched.map_err(|e| DomainError::infrastructure(format!("Failed to fetch team: {}", e)))?
            }
        };

        let rows = rows
            .iter()
            .map(decode_member_row)
            .collect::<Result<Vec<_>, _>>()?;

        fold_team(rows)
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_name)))
    }
}

async fn insert_team(
    conn: &mut PgConnection,
    team_name: &str,
    now: DateTime<Utc>,
) -> Result<i64, DomainError> {
    sqlx::query_scalar::<_, i64>(INSERT_TEAM_SQL)
        .bind(team_name)
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await
        .map_err(|e| match classify(&e) {
            StorageErrorKind::UniqueViolation => DomainError::team_exists(team_name),
            StorageErrorKind::Other => {
                DomainError::infrastructure(format!("Failed to insert team: {}", e))
            }
        })
}

async fn insert_members(
    conn: &mut PgConnection,
    team_id: i64,
    members: &[TeamMember],
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    if members.is_empty() {
        return Ok(());
    }

    let sql = build_members_insert(members.len());
    let mut query = sqlx::query(&sql);

    for member in members {
        query = query
            .bind(member.user_id.as_str())
            .bind(member.username.as_str())
            .bind(team_id)
            .bind(member.is_active)
            .bind(now)
            .bind(now);
    }

    query.execute(conn).await.map_err(|e| match classify(&e) {
        StorageErrorKind::UniqueViolation => DomainError::MemberExists,
        StorageErrorKind::Other => {
            DomainError::infrastructure(format!("Failed to insert team members: {}", e))
        }
    })?;

    Ok(())
}

/// Render the multi-row member insert for `rows` members.
///
/// Placeholder for column `c` of row `r` is `$(r * MEMBER_COLUMNS + c + 1)`.
fn build_members_insert(rows: usize) -> String {
    let mut sql = String::with_capacity(INSERT_MEMBERS_PREFIX.len() + rows * 40);
    sql.push_str(INSERT_MEMBERS_PREFIX);

    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }

        sql.push('(');
        for column in 0..MEMBER_COLUMNS {
            if column > 0 {
                sql.push_str(", ");
            }
            let _ = write!(sql, "${}", row * MEMBER_COLUMNS + column + 1);
        }
        sql.push(')');
    }

    sql
}

/// One row of the team/member outer join; member columns are null when the
/// team has no matching member row
#[derive(Debug, Clone, PartialEq, Eq)]
struct TeamMemberRow {
    team_name: String,
    user_id: Option<String>,
    username: Option<String>,
    is_active: Option<bool>,
}

impl TeamMemberRow {
    fn into_member(self) -> Option<TeamMember> {
        match (self.user_id, self.username, self.is_active) {
            (Some(user_id), Some(username), Some(is_active)) => Some(TeamMember {
                user_id,
                username,
                is_active,
            }),
            _ => None,
        }
    }
}

fn decode_member_row(row: &PgRow) -> Result<TeamMemberRow, DomainError> {
    let decode_err = |e: sqlx::Error| DomainError::infrastructure(format!("Failed to decode team row: {}", e));

    Ok(TeamMemberRow {
        team_name: row.try_get("team_name").map_err(decode_err)?,
        user_id: row.try_get("user_id").map_err(decode_err)?,
        username: row.try_get("username").map_err(decode_err)?,
        is_active: row.try_get("is_active").map_err(decode_err)?,
    })
}

/// Fold joined rows into a team aggregate.
///
/// The first row names the team; rows without a member are skipped. Returns
/// `None` when there are no rows or no row carries a member.
fn fold_team(rows: Vec<TeamMemberRow>) -> Option<Team> {
    let mut rows = rows.into_iter();
    let first = rows.next()?;
    let mut team = Team::new(first.team_name.clone(), Vec::new());

    for row in std::iter::once(first).chain(rows) {
        if let Some(member) = row.into_member() {
            team.push_member(member);
        }
    }

    team.has_members().then_some(team)
}
