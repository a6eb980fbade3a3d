use crate::battle::texts;
use crate::battler::Battler;
use crate::log::{LogChannel, LogEntry};
use crate::rng::BattleRng;
use schema::{BattleStat, SkillCategory, SkillDefinition, StatusAilment};

/// Resolves one skill use between two combatants, narrating every outcome
/// into the log channel. All randomness goes through the injected oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillExecutor;

impl SkillExecutor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        attacker: &Battler,
        defender: &mut Battler,
        skill: &SkillDefinition,
        log: &mut LogChannel,
        rng: &mut dyn BattleRng,
    ) {
        if attacker.is_fainted() {
            log.push(LogEntry::blocking(texts::cannot_act(attacker.name())));
            return;
        }

        log.push(LogEntry::blocking(texts::used_skill(
            attacker.name(),
            &skill.name,
        )));

        // Raw accuracy on purpose: authored data clamps to 1..=100, but a
        // zero slipping through must read as never-hit.
        if !roll(rng, skill.accuracy, "accuracy") {
            log.push(LogEntry::blocking(texts::missed()));
            return;
        }

        if skill.category == SkillCategory::Status {
            self.resolve_status_skill(defender, skill, log, rng);
            return;
        }

        let damage = compute_damage(attacker, defender, skill, rng);
        defender.apply_damage(damage);
        log.push(LogEntry::blocking(texts::took_damage(
            defender.name(),
            damage,
        )));

        if defender.is_fainted() {
            log.push(LogEntry::blocking(texts::fainted(defender.name())));
            return;
        }

        self.apply_secondary_effects(defender, skill, log, rng);
    }

    /// Pure-effect skills: each rider rolls independently. A status roll
    /// that passes but cannot apply still narrates ("no effect"); only a
    /// turn where nothing was even attempted narrates "nothing happened".
    fn resolve_status_skill(
        &self,
        defender: &mut Battler,
        skill: &SkillDefinition,
        log: &mut LogChannel,
        rng: &mut dyn BattleRng,
    ) {
        let mut any = false;

        if let Some(stage) = skill.stage_effect() {
            if stage.delta != 0 && roll(rng, stage.chance_percent, "stage chance") {
                let applied = defender.apply_stage_delta(stage.stat, stage.delta);
                if applied != 0 {
                    any = true;
                    log.push(LogEntry::blocking(texts::stage_changed(
                        defender.name(),
                        stage.stat,
                        applied,
                    )));
                }
            }
        }

        if let Some(status) = skill.status_effect() {
            if status.ailment != StatusAilment::None
                && roll(rng, status.chance_percent, "status chance")
            {
                any = true;
                if defender.apply_status(status.ailment) {
                    log.push(LogEntry::blocking(texts::status_applied(
                        defender.name(),
                        status.ailment,
                    )));
                } else {
                    log.push(LogEntry::blocking(texts::no_effect()));
                }
            }
        }

        if !any {
            log.push(LogEntry::blocking(texts::nothing_happened()));
        }
    }

    /// Secondary riders on a damaging skill. Unlike a pure status skill, a
    /// failed status application here is silent.
    fn apply_secondary_effects(
        &self,
        defender: &mut Battler,
        skill: &SkillDefinition,
        log: &mut LogChannel,
        rng: &mut dyn BattleRng,
    ) {
        if let Some(stage) = skill.stage_effect() {
            if stage.delta != 0 && roll(rng, stage.chance_percent, "secondary stage chance") {
                let applied = defender.apply_stage_delta(stage.stat, stage.delta);
                if applied != 0 {
                    log.push(LogEntry::blocking(texts::stage_changed(
                        defender.name(),
                        stage.stat,
                        applied,
                    )));
                }
            }
        }

        if let Some(status) = skill.status_effect() {
            if status.ailment != StatusAilment::None
                && roll(rng, status.chance_percent, "secondary status chance")
                && defender.apply_status(status.ailment)
            {
                log.push(LogEntry::blocking(texts::status_applied(
                    defender.name(),
                    status.ailment,
                )));
            }
        }
    }
}

/// Damage formula, integer-truncating at every division step:
/// `a = (2*level)/5 + 2`
/// `base = ((a * power * atk) / max(1, def)) / 50 + 2`
/// `damage = max(1, round(base * variance))` with variance in [0.85, 1.01).
fn compute_damage(
    attacker: &Battler,
    defender: &Battler,
    skill: &SkillDefinition,
    rng: &mut dyn BattleRng,
) -> i32 {
    let level = attacker.level().max(1);
    let power = skill.power().max(1);

    let (atk, def) = match skill.category {
        SkillCategory::Special => (
            attacker.stat(BattleStat::SpAttack),
            defender.stat(BattleStat::SpDefense),
        ),
        _ => (
            attacker.stat(BattleStat::Attack),
            defender.stat(BattleStat::Defense),
        ),
    };

    let a = (2 * level) / 5 + 2;
    let base = ((a * power * atk) / def.max(1)) / 50 + 2;

    let variance = rng.variance("damage variance");
    ((base as f32 * variance).round() as i32).max(1)
}

/// Percent chance check: clamped chance <= 0 never passes, >= 100 always
/// passes, otherwise a 1..=100 draw must land at or under the chance.
fn roll(rng: &mut dyn BattleRng, chance_percent: i32, reason: &str) -> bool {
    let c = chance_percent.clamp(0, 100);
    if c <= 0 {
        return false;
    }
    if c >= 100 {
        return true;
    }
    rng.percent(reason) <= c
}
