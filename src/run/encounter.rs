//! Stage-driven encounter generation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use schema::{SkillId, SpeciesId};

use crate::battler::{Battler, SKILL_SLOTS};
use crate::catalog::StatlineTable;
use crate::errors::{DataError, DataResult};
use crate::rng::BattleRng;

/// One candidate enemy in a pool: which species shows up, how far its level
/// sits from the stage baseline, and the skills it brings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub species: SpeciesId,
    #[serde(default)]
    pub level_offset: i32,
    #[serde(default)]
    pub skills: [Option<SkillId>; SKILL_SLOTS],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterPool {
    pub entries: Vec<EncounterEntry>,
}

impl EncounterPool {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pick(&self, rng: &mut dyn BattleRng) -> Option<&EncounterEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.pick(self.entries.len(), "encounter pick");
        self.entries.get(index)
    }
}

/// Run difficulty and pool configuration, loadable from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub start_gold: i32,
    pub base_battle_level: i32,
    pub level_step_per_stage: i32,
    #[serde(default)]
    pub early_pool: EncounterPool,
    #[serde(default)]
    pub mid_pool: EncounterPool,
    #[serde(default)]
    pub late_pool: EncounterPool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_gold: 0,
            base_battle_level: 5,
            level_step_per_stage: 1,
            early_pool: EncounterPool::default(),
            mid_pool: EncounterPool::default(),
            late_pool: EncounterPool::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> DataResult<Self> {
        let text =
            fs::read_to_string(path).map_err(|e| DataError::LoadFailed(e.to_string()))?;
        ron::from_str(&text).map_err(|e| DataError::LoadFailed(e.to_string()))
    }

    /// Early pool through stage 3, mid pool through stage 7, late pool
    /// beyond. An empty tier falls back down the early/mid/late chain.
    pub fn pool_for(&self, _biome: i32, stage: i32) -> &EncounterPool {
        if stage <= 3 && !self.early_pool.is_empty() {
            return &self.early_pool;
        }
        if stage <= 7 && !self.mid_pool.is_empty() {
            return &self.mid_pool;
        }
        if !self.late_pool.is_empty() {
            return &self.late_pool;
        }
        if !self.early_pool.is_empty() {
            &self.early_pool
        } else {
            &self.mid_pool
        }
    }
}

/// A fully resolved battle setup for one stage. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub species: SpeciesId,
    pub level: i32,
    pub skills: [Option<SkillId>; SKILL_SLOTS],
}

impl Encounter {
    /// Materialize the enemy combatant. A species missing from the table
    /// degrades to the synthetic-default battler rather than blocking the
    /// run.
    pub fn spawn(&self, table: &StatlineTable) -> Battler {
        let entry = table.get(self.species);
        if entry.is_none() {
            warn!(species = self.species.0, "statline missing, using synthetic defaults");
        }
        let mut battler = Battler::new(entry, self.level);
        battler.set_skills(self.skills);
        battler
    }
}

pub fn generate(
    config: &RunConfig,
    biome: i32,
    stage: i32,
    rng: &mut dyn BattleRng,
) -> Option<Encounter> {
    let entry = config.pool_for(biome, stage).pick(rng)?;
    let level = config.base_battle_level
        + (stage - 1) * config.level_step_per_stage
        + entry.level_offset;
    Some(Encounter {
        species: entry.species,
        level: level.max(1),
        skills: entry.skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use pretty_assertions::assert_eq;

    fn entry(species: u32, offset: i32) -> EncounterEntry {
        EncounterEntry {
            species: SpeciesId(species),
            level_offset: offset,
            skills: [Some(SkillId(1)), None, None, None],
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            start_gold: 0,
            base_battle_level: 5,
            level_step_per_stage: 1,
            early_pool: EncounterPool {
                entries: vec![entry(1, 0), entry(2, 1)],
            },
            mid_pool: EncounterPool {
                entries: vec![entry(3, 0)],
            },
            late_pool: EncounterPool {
                entries: vec![entry(4, 2)],
            },
        }
    }

    #[test]
    fn pool_tiers_split_at_three_and_seven() {
        let config = config();
        assert_eq!(config.pool_for(1, 1), &config.early_pool);
        assert_eq!(config.pool_for(1, 3), &config.early_pool);
        assert_eq!(config.pool_for(1, 4), &config.mid_pool);
        assert_eq!(config.pool_for(1, 7), &config.mid_pool);
        assert_eq!(config.pool_for(1, 8), &config.late_pool);
    }

    #[test]
    fn empty_tier_falls_back_down_the_chain() {
        let mut config = config();
        config.mid_pool.entries.clear();
        assert_eq!(config.pool_for(1, 5), &config.late_pool);

        config.late_pool.entries.clear();
        assert_eq!(config.pool_for(1, 5), &config.early_pool);
        assert_eq!(config.pool_for(1, 9), &config.early_pool);
    }

    #[test]
    fn generated_level_scales_with_stage_and_offset() {
        let config = config();
        // Entry index 1 (offset +1) at stage 3: 5 + 2*1 + 1 = 8.
        let mut rng = ScriptedRng::new(vec![1]);
        let encounter = generate(&config, 1, 3, &mut rng).unwrap();
        assert_eq!(encounter.species, SpeciesId(2));
        assert_eq!(encounter.level, 8);
    }

    #[test]
    fn generated_level_never_drops_below_one() {
        let mut config = config();
        config.base_battle_level = 1;
        config.early_pool.entries[0].level_offset = -10;
        let mut rng = ScriptedRng::new(vec![0]);
        let encounter = generate(&config, 1, 1, &mut rng).unwrap();
        assert_eq!(encounter.level, 1);
    }

    #[test]
    fn generation_from_an_empty_pool_yields_nothing() {
        let config = RunConfig::default();
        let mut rng = ScriptedRng::new(vec![]);
        assert_eq!(generate(&config, 1, 1, &mut rng), None);
    }

    #[test]
    fn spawn_uses_the_statline_table_with_a_fallback() {
        use schema::{SpeciesEntry, Statline};

        let mut table = StatlineTable::new();
        table.insert(
            SpeciesId(7),
            SpeciesEntry {
                name: "Gloom Rat".to_string(),
                statline: Statline {
                    hp: 18,
                    attack: 7,
                    defense: 6,
                    sp_attack: 4,
                    sp_defense: 5,
                    speed: 9,
                },
            },
        );

        let encounter = Encounter {
            species: SpeciesId(7),
            level: 4,
            skills: [Some(SkillId(2)), None, None, None],
        };
        let enemy = encounter.spawn(&table);
        assert_eq!(enemy.name(), "Gloom Rat");
        assert_eq!(enemy.max_hp(), 26); // 18 + 2*4
        assert_eq!(enemy.skill(0), Some(SkillId(2)));

        let unknown = Encounter {
            species: SpeciesId(99),
            level: 4,
            skills: [None; 4],
        };
        let enemy = unknown.spawn(&table);
        assert_eq!(enemy.name(), "Unknown");
        assert_eq!(enemy.max_hp(), 18); // synthetic 10 + 2*4
    }

    #[test]
    fn config_parses_from_ron() {
        let text = r#"(
            start_gold: 50,
            base_battle_level: 5,
            level_step_per_stage: 1,
            early_pool: (entries: [(species: SpeciesId(1), level_offset: 0, skills: (Some(SkillId(1)), None, None, None))]),
        )"#;
        let config: RunConfig = ron::from_str(text).unwrap();
        assert_eq!(config.start_gold, 50);
        assert_eq!(config.early_pool.len(), 1);
        assert_eq!(
            config.early_pool.entries[0].skills,
            [Some(SkillId(1)), None, None, None]
        );
        assert!(config.late_pool.is_empty());
    }
}
