//! Board persistence in the `boards` table.
//!
//! Grids are stored as JSONB in their wire form, so a row read back is
//! decoded through the same shape checks as an HTTP upload.

use chrono::{DateTime, Utc};
use conway_types::{BoardId, BoardRecord, Grid};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `boards` table.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: PgPool,
}

impl PostgresBoardStore {
    /// Create a store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return a reference to the underlying [`PgPool`].
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetch a board by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::Serialization`] / [`DbError::CorruptRecord`] if the row
    /// cannot be decoded.
    pub async fn load(&self, id: BoardId) -> Result<Option<BoardRecord>, DbError> {
        let row = sqlx::query_as::<_, BoardRow>(
            r"SELECT id, grid, generation, created_at, updated_at
              FROM boards
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BoardRecord::try_from).transpose()
    }

    /// Insert a board, or overwrite its grid and generation if it exists.
    ///
    /// `created_at` is kept from the first insert.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn save(&self, record: &BoardRecord) -> Result<(), DbError> {
        let grid = serde_json::to_value(&record.grid)?;
        let generation = to_column(record.generation)?;

        sqlx::query(
            r"INSERT INTO boards (id, grid, generation, created_at, updated_at)
              VALUES ($1, $2, $3, $4, $5)
              ON CONFLICT (id) DO UPDATE SET
                grid = EXCLUDED.grid,
                generation = EXCLUDED.generation,
                updated_at = EXCLUDED.updated_at",
        )
        .bind(record.id.into_inner())
        .bind(grid)
        .bind(generation)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(board_id = %record.id, generation = record.generation, "Saved board");
        Ok(())
    }

    /// Overwrite a board's grid and generation only if the stored
    /// generation still equals `expected`.
    ///
    /// Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the update fails.
    pub async fn update(&self, record: &BoardRecord, expected: u64) -> Result<bool, DbError> {
        let grid = serde_json::to_value(&record.grid)?;
        let generation = to_column(record.generation)?;
        let expected = to_column(expected)?;

        let result = sqlx::query(
            r"UPDATE boards
              SET grid = $2, generation = $3, updated_at = $4
              WHERE id = $1 AND generation = $5",
        )
        .bind(record.id.into_inner())
        .bind(grid)
        .bind(generation)
        .bind(record.updated_at)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        let applied = result.rows_affected() == 1;
        tracing::debug!(
            board_id = %record.id,
            generation = record.generation,
            applied,
            "Conditional board update"
        );
        Ok(applied)
    }
}

fn to_column(generation: u64) -> Result<i64, DbError> {
    i64::try_from(generation)
        .map_err(|e| DbError::CorruptRecord(format!("generation {generation} out of range: {e}")))
}

/// A row from the `boards` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardRow {
    /// Board identifier.
    pub id: Uuid,
    /// Grid in wire form.
    pub grid: serde_json::Value,
    /// Generation counter.
    pub generation: i64,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BoardRow> for BoardRecord {
    type Error = DbError;

    fn try_from(row: BoardRow) -> Result<Self, Self::Error> {
        let grid: Grid = serde_json::from_value(row.grid)?;
        let generation = u64::try_from(row.generation).map_err(|e| {
            DbError::CorruptRecord(format!(
                "board {} has generation {}: {e}",
                row.id, row.generation
            ))
        })?;

        Ok(Self {
            id: BoardId::from(row.id),
            grid,
            generation,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(grid: serde_json::Value, generation: i64) -> BoardRow {
        let now = Utc::now();
        BoardRow {
            id: Uuid::now_v7(),
            grid,
            generation,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_decodes_into_record() {
        let record =
            BoardRecord::try_from(row(serde_json::json!([[true, false], [false, true]]), 4))
                .unwrap();
        assert_eq!(record.generation, 4);
        assert_eq!(record.grid.population(), 2);
    }

    #[test]
    fn ragged_stored_grid_is_a_serialization_error() {
        let err = BoardRecord::try_from(row(serde_json::json!([[true], [true, false]]), 0))
            .unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }

    #[test]
    fn negative_generation_is_corrupt() {
        let err = BoardRecord::try_from(row(serde_json::json!([[true]]), -1)).unwrap_err();
        assert!(matches!(err, DbError::CorruptRecord(_)));
    }
}
