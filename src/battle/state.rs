use serde::{Deserialize, Serialize};

use crate::battler::BattlerSnapshot;

/// Which side of the battle an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Enemy,
}

impl Actor {
    pub fn opponent(self) -> Self {
        match self {
            Actor::Player => Actor::Enemy,
            Actor::Enemy => Actor::Player,
        }
    }
}

/// Where the turn machine is suspended. The host drives it forward with
/// `TurnSystem::resume` after every input or log acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingChoice,
    Resolving,
    EndTurnEffects,
    BattleOver,
}

/// Final result of a battle, with both combatants frozen at the moment of
/// settlement (exp already granted on a win).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub player_won: bool,
    pub player: BattlerSnapshot,
    pub enemy: BattlerSnapshot,
}
