use crate::run::RunState;
use schema::{SkillId, SpeciesId};
use std::fmt;

/// Main error type for the pocket-rogue engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error at the external data boundary (catalogs, config files)
    Data(DataError),
    /// Error related to the turn orchestrator's phase guards
    Turn(TurnError),
    /// Error related to the run progression state machine
    Run(RunError),
}

/// Errors at the catalog/data-file boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The referenced skill was not found in the catalog
    SkillNotFound(SkillId),
    /// The referenced species was not found in the statline table
    SpeciesNotFound(SpeciesId),
    /// A data file could not be read or parsed
    LoadFailed(String),
}

/// Errors raised by turn-orchestrator phase guards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// A choice was submitted while the battle was not awaiting one
    NotAwaitingChoice,
    /// The submitted skill slot index is out of bounds
    InvalidSlot(usize),
    /// The submitted skill slot is empty
    EmptySlot(usize),
    /// An operation requires a battle in progress
    NoBattleInProgress,
}

/// Errors raised by the run progression controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The operation is not valid in the current run state
    InvalidStateTransition {
        from: RunState,
        operation: &'static str,
    },
    /// No encounter could be drawn for the current biome/stage
    NoEncounterAvailable,
    /// The single-use reward lock was already consumed
    RewardAlreadyCommitted,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Data(err) => write!(f, "Data error: {}", err),
            EngineError::Turn(err) => write!(f, "Turn error: {}", err),
            EngineError::Run(err) => write!(f, "Run error: {}", err),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::SkillNotFound(id) => write!(f, "Skill not found: {:?}", id),
            DataError::SpeciesNotFound(id) => write!(f, "Species not found: {:?}", id),
            DataError::LoadFailed(details) => write!(f, "Data load failed: {}", details),
        }
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::NotAwaitingChoice => write!(f, "Battle is not awaiting a player choice"),
            TurnError::InvalidSlot(slot) => write!(f, "Invalid skill slot: {}", slot),
            TurnError::EmptySlot(slot) => write!(f, "Skill slot {} is empty", slot),
            TurnError::NoBattleInProgress => write!(f, "No battle in progress"),
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InvalidStateTransition { from, operation } => {
                write!(f, "Operation '{}' rejected in state {:?}", operation, from)
            }
            RunError::NoEncounterAvailable => {
                write!(f, "Encounter pool is empty; no battle can be prepared")
            }
            RunError::RewardAlreadyCommitted => {
                write!(f, "Reward was already committed for this interstitial")
            }
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for DataError {}
impl std::error::Error for TurnError {}
impl std::error::Error for RunError {}

impl From<DataError> for EngineError {
    fn from(err: DataError) -> Self {
        EngineError::Data(err)
    }
}

impl From<TurnError> for EngineError {
    fn from(err: TurnError) -> Self {
        EngineError::Turn(err)
    }
}

impl From<RunError> for EngineError {
    fn from(err: RunError) -> Self {
        EngineError::Run(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using TurnError
pub type TurnResult<T> = Result<T, TurnError>;

/// Type alias for Results using RunError
pub type RunResult<T> = Result<T, RunError>;
