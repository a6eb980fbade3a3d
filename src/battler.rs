use crate::battle::stats::effective_stat;
use schema::{BattleStat, SkillId, SpeciesEntry, StatusAilment};
use serde::{Deserialize, Serialize};

const STAGE_MIN: i32 = -6;
const STAGE_MAX: i32 = 6;
pub const SKILL_SLOTS: usize = 4;

/// A runtime battle participant: mutable HP, stat stages, status ailment,
/// experience, and up to four skill slots.
///
/// A `Battler` is created fresh per battle from an external statline and
/// owned exclusively by the battle session. Missing statlines fall back to
/// synthetic defaults so a battle can always proceed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    name: String,
    level: i32,
    max_hp: i32,
    hp: i32,
    exp: i32,
    exp_to_next: i32,
    base: [i32; BattleStat::COUNT],
    stages: [i32; BattleStat::COUNT],
    status: StatusAilment,
    skills: [Option<SkillId>; SKILL_SLOTS],
}

/// Immutable copy of a battler's vitals, carried by the battle-ended event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlerSnapshot {
    pub name: String,
    pub level: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub exp: i32,
    pub exp_to_next: i32,
    pub status: StatusAilment,
}

impl Battler {
    /// Build a battler from a statline-table entry. `None` substitutes the
    /// synthetic defaults (`hp = 10 + 2*level`, other stats `5 + level`).
    pub fn new(entry: Option<&SpeciesEntry>, level: i32) -> Self {
        let level = level.max(1);

        let (name, max_hp, base) = match entry {
            Some(entry) => {
                let s = entry.statline;
                (
                    entry.name.clone(),
                    (s.hp + level * 2).max(1),
                    [
                        (s.attack + level).max(1),
                        (s.defense + level).max(1),
                        (s.sp_attack + level).max(1),
                        (s.sp_defense + level).max(1),
                        (s.speed + level).max(1),
                    ],
                )
            }
            None => (
                "Unknown".to_string(),
                10 + level * 2,
                [5 + level; BattleStat::COUNT],
            ),
        };

        Self {
            name,
            level,
            max_hp,
            hp: max_hp,
            exp: 0,
            exp_to_next: Self::compute_exp_to_next(level),
            base,
            stages: [0; BattleStat::COUNT],
            status: StatusAilment::None,
            skills: [None; SKILL_SLOTS],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn exp(&self) -> i32 {
        self.exp
    }

    pub fn exp_to_next(&self) -> i32 {
        self.exp_to_next
    }

    pub fn status(&self) -> StatusAilment {
        self.status
    }

    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }

    pub fn skill(&self, slot: usize) -> Option<SkillId> {
        self.skills.get(slot).copied().flatten()
    }

    pub fn set_skills(&mut self, skills: [Option<SkillId>; SKILL_SLOTS]) {
        self.skills = skills;
    }

    pub fn stage(&self, stat: BattleStat) -> i32 {
        self.stages[stat.index()]
    }

    /// Current stat with its stage applied, never below 1.
    pub fn stat(&self, stat: BattleStat) -> i32 {
        effective_stat(self.base[stat.index()], self.stages[stat.index()])
    }

    /// Reduce HP, clamped to 0. Non-positive amounts are ignored.
    pub fn apply_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.set_hp(self.hp - amount);
    }

    /// Restore HP, clamped to max. Non-positive amounts are ignored.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.set_hp(self.hp + amount);
    }

    /// Shift a stat stage, clamping the cumulative rank to [-6, 6].
    /// Returns the delta actually applied (0 when already at the cap),
    /// which callers use to decide between "rose/fell" and "no effect".
    pub fn apply_stage_delta(&mut self, stat: BattleStat, delta: i32) -> i32 {
        if delta == 0 {
            return 0;
        }

        let i = stat.index();
        let before = self.stages[i];
        self.stages[i] = (before + delta).clamp(STAGE_MIN, STAGE_MAX);
        self.stages[i] - before
    }

    /// Apply a status ailment. Succeeds only when no ailment is present and
    /// the ailment is not `None`; ailments are mutually exclusive.
    pub fn apply_status(&mut self, ailment: StatusAilment) -> bool {
        if ailment == StatusAilment::None {
            return false;
        }
        if self.status != StatusAilment::None {
            return false;
        }

        self.status = ailment;
        true
    }

    pub fn clear_status(&mut self) {
        self.status = StatusAilment::None;
    }

    /// Grant experience, levelling up as many times as the grant covers.
    /// Returns the number of levels gained. Non-positive amounts are ignored.
    pub fn gain_exp(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }

        self.exp += amount;

        let mut levels = 0;
        while self.exp_to_next > 0 && self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.level_up_once();
            levels += 1;
        }
        levels
    }

    /// End-of-turn damage-over-time for the current ailment.
    pub fn end_turn_dot(&self) -> i32 {
        match self.status {
            StatusAilment::Poison => (self.max_hp / 8).max(1),
            StatusAilment::Burn => (self.max_hp / 16).max(1),
            StatusAilment::None => 0,
        }
    }

    pub fn snapshot(&self) -> BattlerSnapshot {
        BattlerSnapshot {
            name: self.name.clone(),
            level: self.level,
            hp: self.hp,
            max_hp: self.max_hp,
            exp: self.exp,
            exp_to_next: self.exp_to_next,
            status: self.status,
        }
    }

    fn set_hp(&mut self, value: i32) {
        self.hp = value.clamp(0, self.max_hp.max(1));
    }

    fn level_up_once(&mut self) {
        self.level = (self.level + 1).max(1);

        self.max_hp = (self.max_hp + 2).max(1);
        self.hp = (self.hp + 2).min(self.max_hp);

        for base in &mut self.base {
            *base = (*base + 1).max(1);
        }

        self.exp_to_next = Self::compute_exp_to_next(self.level);
    }

    fn compute_exp_to_next(level: i32) -> i32 {
        10 + level.max(1) * 5
    }
}
