use crate::battle_types::{BattleStat, SkillCategory, StatusAilment};
use serde::{Deserialize, Serialize};

/// Catalog key for a skill definition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillId(pub u32);

/// Optional status-ailment rider on a skill.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEffect {
    pub ailment: StatusAilment,
    pub chance_percent: i32,
}

/// Optional stat-stage rider on a skill. Applied to the defender.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEffect {
    pub stat: BattleStat,
    pub delta: i32,
    pub chance_percent: i32,
}

/// Immutable skill definition as authored in the data files. Raw fields are
/// public for serde; consumers should prefer the clamping accessors, which
/// mirror the guarantees of the data pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SkillDefinition {
    pub name: String,
    pub category: SkillCategory,
    pub power: i32,
    pub accuracy: i32,
    pub pp: i32,
    pub status_effect: Option<StatusEffect>,
    pub stage_effect: Option<StageEffect>,
}

impl SkillDefinition {
    pub fn power(&self) -> i32 {
        self.power.max(0)
    }

    pub fn accuracy(&self) -> i32 {
        self.accuracy.clamp(1, 100)
    }

    pub fn pp(&self) -> i32 {
        self.pp.max(0)
    }

    pub fn status_effect(&self) -> Option<StatusEffect> {
        self.status_effect.map(|e| StatusEffect {
            ailment: e.ailment,
            chance_percent: e.chance_percent.clamp(0, 100),
        })
    }

    pub fn stage_effect(&self) -> Option<StageEffect> {
        self.stage_effect.map(|e| StageEffect {
            stat: e.stat,
            delta: e.delta.clamp(-6, 6),
            chance_percent: e.chance_percent.clamp(0, 100),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_skill() -> SkillDefinition {
        SkillDefinition {
            name: "Test Strike".to_string(),
            category: SkillCategory::Physical,
            power: -5,
            accuracy: 0,
            pp: -1,
            status_effect: Some(StatusEffect {
                ailment: StatusAilment::Poison,
                chance_percent: 150,
            }),
            stage_effect: Some(StageEffect {
                stat: BattleStat::Speed,
                delta: -9,
                chance_percent: -10,
            }),
        }
    }

    #[test]
    fn accessors_clamp_authored_values() {
        let skill = raw_skill();
        assert_eq!(skill.power(), 0);
        assert_eq!(skill.accuracy(), 1);
        assert_eq!(skill.pp(), 0);
        assert_eq!(skill.status_effect().unwrap().chance_percent, 100);
        let stage = skill.stage_effect().unwrap();
        assert_eq!(stage.delta, -6);
        assert_eq!(stage.chance_percent, 0);
    }
}
