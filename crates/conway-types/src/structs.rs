//! Board records and the JSON views served over HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::Grid;
use crate::ids::BoardId;

/// A stored board: the grid plus how many generations it has undergone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Board identifier.
    pub id: BoardId,
    /// Current cell states.
    pub grid: Grid,
    /// Number of transitions applied since upload.
    pub generation: u64,
    /// When the board was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the board was last written.
    pub updated_at: DateTime<Utc>,
}

impl BoardRecord {
    /// Create a fresh record at generation 0 with a new id.
    pub fn new(grid: Grid) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            grid,
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the grid with one that is `steps` generations later.
    #[must_use]
    pub fn advanced(self, grid: Grid, steps: usize) -> Self {
        let steps = u64::try_from(steps).unwrap_or(u64::MAX);
        Self {
            grid,
            generation: self.generation.saturating_add(steps),
            updated_at: Utc::now(),
            ..self
        }
    }
}

/// Response body for `POST /boards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UploadResponse {
    /// Identifier of the stored board.
    pub id: BoardId,
}

/// A stored board as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BoardView {
    /// Board identifier.
    pub id: BoardId,
    /// Generation counter.
    pub generation: u64,
    /// Number of rows.
    pub width: usize,
    /// Number of columns.
    pub height: usize,
    /// Live cell count.
    pub population: usize,
    /// Cell states, `grid[x][y]`.
    #[ts(type = "Array<Array<boolean>>")]
    pub grid: Grid,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

impl From<BoardRecord> for BoardView {
    fn from(record: BoardRecord) -> Self {
        Self {
            id: record.id,
            generation: record.generation,
            width: record.grid.width(),
            height: record.grid.height(),
            population: record.grid.population(),
            grid: record.grid,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response body for a read-only projection N generations ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GenerationsView {
    /// Board identifier.
    pub id: BoardId,
    /// How many generations were applied to the stored grid.
    pub generations: usize,
    /// The projected grid.
    #[ts(type = "Array<Array<boolean>>")]
    pub grid: Grid,
}

/// Response body for a successful run to stability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FinalStateView {
    /// Board identifier.
    pub id: BoardId,
    /// Generation counter after the stable grid was stored.
    pub generation: u64,
    /// Steps taken to reach the stable grid.
    pub attempts: usize,
    /// The stable grid.
    #[ts(type = "Array<Array<boolean>>")]
    pub grid: Grid,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_at_generation_zero() {
        let record = BoardRecord::new(Grid::new(2, 2));
        assert_eq!(record.generation, 0);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn advanced_keeps_identity_and_adds_steps() {
        let record = BoardRecord::new(Grid::new(2, 2));
        let id = record.id;
        let next: Grid = "##\n##".parse().unwrap();

        let advanced = record.advanced(next.clone(), 3);
        assert_eq!(advanced.id, id);
        assert_eq!(advanced.generation, 3);
        assert_eq!(advanced.grid, next);
    }

    #[test]
    fn board_view_reports_dimensions_and_population() {
        let grid: Grid = "#..\n.#.".parse().unwrap();
        let view = BoardView::from(BoardRecord::new(grid));
        assert_eq!((view.width, view.height, view.population), (2, 3, 2));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["grid"][1][1], true);
    }
}
