use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// How a skill resolves: contact damage, special damage, or pure effects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    Physical,
    Special,
    Status,
}

/// The five modifiable battle stats. Max HP is not stageable and lives
/// outside this enum.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BattleStat {
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl BattleStat {
    pub const COUNT: usize = 5;

    /// Stable index into per-stat arrays (base values, stages).
    pub fn index(self) -> usize {
        match self {
            BattleStat::Attack => 0,
            BattleStat::Defense => 1,
            BattleStat::SpAttack => 2,
            BattleStat::SpDefense => 3,
            BattleStat::Speed => 4,
        }
    }
}

impl fmt::Display for BattleStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            BattleStat::Attack => "Attack",
            BattleStat::Defense => "Defense",
            BattleStat::SpAttack => "Sp. Attack",
            BattleStat::SpDefense => "Sp. Defense",
            BattleStat::Speed => "Speed",
        };
        write!(f, "{}", display_name)
    }
}

/// Persistent status ailments. A combatant carries at most one at a time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusAilment {
    #[default]
    None,
    Poison,
    Burn,
}

impl fmt::Display for StatusAilment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusAilment::None => "none",
            StatusAilment::Poison => "poison",
            StatusAilment::Burn => "burn",
        };
        write!(f, "{}", display_name)
    }
}
