//! Core engine for a single-vs-single, turn-based roguelike: battlers and
//! their stat math, a skill executor, a suspend/resume turn orchestrator
//! paced by an acknowledgment-gated log channel, and a run controller that
//! strings battles, interstitials and biome transitions into one run.
//!
//! The crate is deliberately host-agnostic. It owns no rendering, input or
//! scheduling; a host drives `TurnSystem::resume` after every player input
//! or log acknowledgment and reads narration back out of `LogChannel`.
//! All randomness flows through the `BattleRng` oracle so battles replay
//! deterministically under test.

pub mod battle;
pub mod battler;
pub mod catalog;
pub mod errors;
pub mod events;
pub mod log;
pub mod rng;
pub mod run;

pub use battle::executor::SkillExecutor;
pub use battle::state::{Actor, BattleOutcome, TurnPhase};
pub use battle::stats::{effective_stat, stage_multiplier};
pub use battle::turn::{exp_bounty, BattleEndedCallback, TurnSystem};
pub use battler::{Battler, BattlerSnapshot, SKILL_SLOTS};
pub use catalog::{SkillCatalog, StatlineTable};
pub use errors::{
    DataError, DataResult, EngineError, EngineResult, RunError, RunResult, TurnError, TurnResult,
};
pub use events::{EventHub, SubscriptionId};
pub use log::{LogChannel, LogEntry, LogKind};
pub use rng::{BattleRng, ScriptedRng, SystemRng};
pub use run::encounter::{Encounter, EncounterEntry, EncounterPool, RunConfig};
pub use run::{RunManager, RunState, STAGES_PER_BIOME};
