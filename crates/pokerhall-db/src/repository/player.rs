//! # Player Repository
//!
//! The Identity Store: player records, keyed by id, with a unique fiscal
//! code index.
//!
//! Players are never deleted. The only mutations after registration are role
//! changes and capital adjustments.

use chrono::Utc;
use pokerhall_core::{NewPlayer, Player, Role};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::generate_id;
use crate::error::{DbError, DbResult};

const PLAYER_COLUMNS: &str = r#"
    id, name, surname, age, capital, fiscal_code, role, password_hash, created_at
"#;

/// Repository for player database operations.
#[derive(Debug, Clone)]
pub struct PlayerRepository {
    pool: SqlitePool,
}

impl PlayerRepository {
    /// Creates a new PlayerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PlayerRepository { pool }
    }

    /// Registers a new player.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the fiscal code is already registered;
    ///   the existing player is left untouched
    pub async fn register(&self, new_player: &NewPlayer) -> DbResult<Player> {
        let player = Player {
            id: generate_id(),
            name: new_player.name.clone(),
            surname: new_player.surname.clone(),
            age: new_player.age,
            capital: new_player.capital,
            fiscal_code: new_player.fiscal_code.clone(),
            role: new_player.role,
            password_hash: new_player.password_hash.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %player.id, fiscal_code = %player.fiscal_code, "Registering player");

        let result = sqlx::query(
            r#"
            INSERT INTO players (
                id, name, surname, age, capital,
                fiscal_code, role, password_hash, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&player.id)
        .bind(&player.name)
        .bind(&player.surname)
        .bind(player.age)
        .bind(player.capital)
        .bind(&player.fiscal_code)
        .bind(player.role)
        .bind(&player.password_hash)
        .bind(player.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                info!(id = %player.id, role = %player.role, "Player registered");
                Ok(player)
            }
            Err(e) => {
                let err = DbError::from(e);
                if err.is_unique_violation_on("players.fiscal_code") {
                    Err(DbError::duplicate("fiscal_code", &player.fiscal_code))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Gets a player by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    /// Gets a player by ID, failing with `NotFound` when absent.
    pub async fn get(&self, id: &str) -> DbResult<Player> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Player", id))
    }

    /// Gets a player by fiscal code.
    ///
    /// `code` must already be normalized (see
    /// `pokerhall_core::validation::normalize_fiscal_code`).
    pub async fn find_by_fiscal_code(&self, code: &str) -> DbResult<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE fiscal_code = ?1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    /// Lists all players, by surname then name.
    pub async fn list(&self) -> DbResult<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY surname, name, rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(players)
    }

    /// Changes a player's role.
    pub async fn set_role(&self, id: &str, role: Role) -> DbResult<Player> {
        let result = sqlx::query("UPDATE players SET role = ?2 WHERE id = ?1")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Player", id));
        }

        info!(id = %id, role = %role, "Player role changed");
        self.get(id).await
    }

    /// Adds `delta` (possibly negative) to a player's capital.
    ///
    /// Done in one UPDATE so concurrent adjustments never overwrite each other.
    pub async fn adjust_capital(&self, id: &str, delta: f64) -> DbResult<Player> {
        let result = sqlx::query("UPDATE players SET capital = capital + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Player", id));
        }

        debug!(id = %id, delta, "Player capital adjusted");
        self.get(id).await
    }

    /// Counts registered players (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
