//! Board service: orchestrates storage around the simulation core.
//!
//! Every operation follows the same shape: load the board (or fail with
//! [`ServiceError::NotFound`]), hand the grid to `conway_core`, and save
//! the result when the operation changes the stored board. Logging lives
//! here so the core stays free of side effects.
//!
//! Writes that advance a board are conditional on the generation that was
//! loaded. A write that loses a race reloads and recomputes, so concurrent
//! transitions on one board are never lost. Multi-step simulation runs on
//! tokio's blocking pool.

use conway_core::config::LimitsConfig;
use conway_core::{InvalidBoardError, StabilityError, engine, validate};
use conway_db::{BoardRepository, DbError};
use conway_types::{BoardId, BoardRecord, Grid};
use tokio::task::{self, JoinError};
use tracing::{debug, info, warn};

/// Load-compute-write rounds tried before giving up on a contended board.
pub const MAX_WRITE_ATTEMPTS: usize = 16;

/// Errors surfaced by [`BoardService`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No board is stored under the id.
    #[error("board with id {0} not found")]
    NotFound(BoardId),

    /// The uploaded board was rejected.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] InvalidBoardError),

    /// The board did not settle within the attempt budget.
    #[error(transparent)]
    Unstable(#[from] StabilityError),

    /// The request asked for more work than the service allows.
    #[error("{what} of {requested} exceeds the limit of {limit}")]
    LimitExceeded {
        /// Which parameter was too large.
        what: &'static str,
        /// The requested value.
        requested: usize,
        /// The configured ceiling.
        limit: usize,
    },

    /// Every write attempt lost to a concurrent update of the same board.
    #[error("board {id} is being updated concurrently; gave up after {attempts} attempts")]
    Contended {
        /// The contested board.
        id: BoardId,
        /// Write attempts made.
        attempts: usize,
    },

    /// The simulation task panicked or was cancelled.
    #[error("simulation task failed: {0}")]
    Worker(#[from] JoinError),

    /// The repository failed.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

/// A stored still life and how many steps it took to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalState {
    /// The record as saved, with the generation counter advanced.
    pub record: BoardRecord,
    /// Steps taken to reach the stable grid.
    pub attempts: usize,
}

/// Board operations over a [`BoardRepository`].
#[derive(Debug, Clone)]
pub struct BoardService {
    repository: BoardRepository,
    limits: LimitsConfig,
}

impl BoardService {
    /// Create a service over `repository` with per-request `limits`.
    pub const fn new(repository: BoardRepository, limits: LimitsConfig) -> Self {
        Self { repository, limits }
    }

    /// Validate and store a new board at generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidBoard`] if validation fails (nothing
    /// is stored) or [`ServiceError::Storage`] if the save fails.
    pub async fn upload(&self, grid: Grid) -> Result<BoardId, ServiceError> {
        info!(
            width = grid.width(),
            height = grid.height(),
            "Uploading a new board"
        );

        if let Err(e) = validate(&grid) {
            warn!(error = %e, "Invalid board state during upload");
            return Err(e.into());
        }

        let record = BoardRecord::new(grid);
        self.repository.save(&record).await?;

        info!(board_id = %record.id, "Board uploaded");
        Ok(record.id)
    }

    /// Read a stored board.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] or [`ServiceError::Storage`].
    pub async fn get(&self, id: BoardId) -> Result<BoardRecord, ServiceError> {
        self.load(id).await
    }

    /// Advance a stored board by one generation and save it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`], [`ServiceError::Contended`] or
    /// [`ServiceError::Storage`].
    pub async fn next_state(&self, id: BoardId) -> Result<BoardRecord, ServiceError> {
        for _ in 0..MAX_WRITE_ATTEMPTS {
            let record = self.load(id).await?;
            let expected = record.generation;
            let next = engine::step(&record.grid);
            let record = record.advanced(next, 1);

            if self.write(&record, expected).await? {
                info!(board_id = %id, generation = record.generation, "Board advanced one generation");
                return Ok(record);
            }
        }

        Err(self.contended(id))
    }

    /// Project a stored board `generations` steps ahead without saving.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::LimitExceeded`] if `generations` is above the
    /// configured ceiling, otherwise [`ServiceError::NotFound`],
    /// [`ServiceError::Worker`] or [`ServiceError::Storage`].
    pub async fn state_after(&self, id: BoardId, generations: usize) -> Result<Grid, ServiceError> {
        check_limit("generations", generations, self.limits.max_generations)?;
        let record = self.load(id).await?;

        let start = record.grid;
        let grid = task::spawn_blocking(move || engine::advance(&start, generations)).await?;
        info!(board_id = %id, generations, "Projected board state");
        Ok(grid)
    }

    /// Run a stored board until it stops changing, then save the stable grid.
    ///
    /// The generation counter grows by the number of steps taken. On
    /// failure the stored board is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unstable`] if no still life is reached within
    /// `max_attempts` steps, [`ServiceError::LimitExceeded`] if
    /// `max_attempts` is above the configured ceiling, otherwise
    /// [`ServiceError::NotFound`], [`ServiceError::Contended`],
    /// [`ServiceError::Worker`] or [`ServiceError::Storage`].
    pub async fn final_state(
        &self,
        id: BoardId,
        max_attempts: usize,
    ) -> Result<FinalState, ServiceError> {
        check_limit("max_attempts", max_attempts, self.limits.max_attempts)?;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let record = self.load(id).await?;
            let expected = record.generation;

            info!(board_id = %id, max_attempts, "Searching for final state");
            let start = record.grid.clone();
            let outcome = task::spawn_blocking(move || {
                engine::advance_until_stable(&start, max_attempts, id)
            })
            .await?;
            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(board_id = %id, max_attempts, "Unable to find a final state");
                    return Err(e.into());
                }
            };

            let attempts = outcome.attempts;
            let record = record.advanced(outcome.grid, attempts);
            if self.write(&record, expected).await? {
                info!(
                    board_id = %id,
                    attempts,
                    generation = record.generation,
                    "Final state found"
                );
                return Ok(FinalState { record, attempts });
            }
        }

        Err(self.contended(id))
    }

    async fn load(&self, id: BoardId) -> Result<BoardRecord, ServiceError> {
        match self.repository.load(id).await? {
            Some(record) => {
                debug!(board_id = %id, generation = record.generation, "Board loaded");
                Ok(record)
            }
            None => {
                warn!(board_id = %id, "Board not found");
                Err(ServiceError::NotFound(id))
            }
        }
    }

    /// Save `record` if the board is still at `expected`. `Ok(false)` means
    /// another writer got there first.
    async fn write(&self, record: &BoardRecord, expected: u64) -> Result<bool, ServiceError> {
        match self.repository.update(record, expected).await {
            Ok(()) => Ok(true),
            Err(DbError::Conflict { .. }) => {
                debug!(board_id = %record.id, expected, "Board changed during update, retrying");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn contended(&self, id: BoardId) -> ServiceError {
        warn!(
            board_id = %id,
            backend = self.repository.backend_name(),
            attempts = MAX_WRITE_ATTEMPTS,
            "Giving up on contended board"
        );
        ServiceError::Contended {
            id,
            attempts: MAX_WRITE_ATTEMPTS,
        }
    }
}

const fn check_limit(what: &'static str, requested: usize, limit: usize) -> Result<(), ServiceError> {
    if requested > limit {
        return Err(ServiceError::LimitExceeded {
            what,
            requested,
            limit,
        });
    }
    Ok(())
}
