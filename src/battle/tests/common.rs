//! Shared fixtures for the battle scenario tests.

use schema::{
    BattleStat, SkillCategory, SkillDefinition, SkillId, SpeciesEntry, StageEffect, Statline,
    StatusAilment, StatusEffect,
};

use crate::battler::{Battler, SKILL_SLOTS};
use crate::catalog::SkillCatalog;
use crate::errors::EngineResult;
use crate::log::LogChannel;
use crate::rng::BattleRng;
use crate::battle::turn::TurnSystem;

pub const TACKLE: SkillId = SkillId(1);
pub const MEGA_STRIKE: SkillId = SkillId(2);
pub const TOXIN: SkillId = SkillId(3);
pub const IDLE_POSE: SkillId = SkillId(4);

pub fn test_catalog() -> SkillCatalog {
    let mut catalog = SkillCatalog::new();
    catalog.insert(
        TACKLE,
        SkillDefinition {
            name: "Tackle".to_string(),
            category: SkillCategory::Physical,
            power: 40,
            accuracy: 100,
            pp: 35,
            status_effect: None,
            stage_effect: None,
        },
    );
    catalog.insert(
        MEGA_STRIKE,
        SkillDefinition {
            name: "Mega Strike".to_string(),
            category: SkillCategory::Physical,
            power: 120,
            accuracy: 100,
            pp: 5,
            status_effect: None,
            stage_effect: None,
        },
    );
    catalog.insert(
        TOXIN,
        SkillDefinition {
            name: "Toxin".to_string(),
            category: SkillCategory::Status,
            power: 0,
            accuracy: 100,
            pp: 10,
            status_effect: Some(StatusEffect {
                ailment: StatusAilment::Poison,
                chance_percent: 100,
            }),
            stage_effect: None,
        },
    );
    // A status skill whose rider can never trigger; every use narrates
    // "nothing happened", which keeps multi-turn scripts deterministic.
    catalog.insert(
        IDLE_POSE,
        SkillDefinition {
            name: "Idle Pose".to_string(),
            category: SkillCategory::Status,
            power: 0,
            accuracy: 100,
            pp: 40,
            status_effect: None,
            stage_effect: Some(StageEffect {
                stat: BattleStat::Attack,
                delta: -1,
                chance_percent: 0,
            }),
        },
    );
    catalog
}

pub struct TestBattlerBuilder {
    name: String,
    level: i32,
    statline: Statline,
    skills: [Option<SkillId>; SKILL_SLOTS],
}

impl TestBattlerBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 5,
            statline: Statline {
                hp: 20,
                attack: 6,
                defense: 6,
                sp_attack: 6,
                sp_defense: 6,
                speed: 10,
            },
            skills: [Some(TACKLE), None, None, None],
        }
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Base HP stat; the battler's max HP comes out as `hp + 2 * level`,
    /// floored at 1.
    pub fn base_hp(mut self, hp: i32) -> Self {
        self.statline.hp = hp;
        self
    }

    pub fn speed(mut self, speed: i32) -> Self {
        self.statline.speed = speed;
        self
    }

    pub fn skills(mut self, skills: [Option<SkillId>; SKILL_SLOTS]) -> Self {
        self.skills = skills;
        self
    }

    pub fn build(self) -> Battler {
        let entry = SpeciesEntry {
            name: self.name,
            statline: self.statline,
        };
        let mut battler = Battler::new(Some(&entry), self.level);
        battler.set_skills(self.skills);
        battler
    }
}

/// Acknowledges blocking lines one by one, resuming the turn machine after
/// each, until the channel goes idle. Returns the lines in display order.
pub fn drive_until_idle(
    turn: &mut TurnSystem,
    catalog: &SkillCatalog,
    log: &mut LogChannel,
    rng: &mut dyn BattleRng,
) -> EngineResult<Vec<String>> {
    let mut lines = Vec::new();
    while log.is_busy() {
        if let Some(current) = log.current() {
            lines.push(current.to_string());
        }
        log.acknowledge();
        turn.resume(catalog, log, rng)?;
    }
    Ok(lines)
}
