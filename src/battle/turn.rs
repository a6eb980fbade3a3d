use std::collections::VecDeque;

use schema::BattleStat;

use crate::battle::executor::SkillExecutor;
use crate::battle::state::{Actor, BattleOutcome, TurnPhase};
use crate::battle::texts;
use crate::battler::{Battler, SKILL_SLOTS};
use crate::catalog::SkillCatalog;
use crate::errors::{EngineResult, TurnError};
use crate::log::{LogChannel, LogEntry};
use crate::rng::BattleRng;

/// Fired exactly once per battle, at settlement. Cancelled battles
/// (`abort`, or a `begin_battle` over an in-flight one) never fire it.
pub type BattleEndedCallback = Box<dyn FnOnce(&BattleOutcome)>;

/// Exp granted to the player for defeating an enemy of the given level.
pub fn exp_bounty(enemy_level: i32) -> i32 {
    10 + 2 * enemy_level.max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Attack(Actor),
    EndTurnDot(Actor),
    FinishTurn,
}

struct ActiveBattle {
    player: Battler,
    enemy: Battler,
    player_slot: usize,
    enemy_slot: usize,
    steps: VecDeque<Step>,
}

/// Turn-by-turn battle orchestrator. The original control flow suspended on
/// every narration; here the machine simply stops advancing while the log
/// channel is busy and the host calls `resume` again after each acknowledge.
#[derive(Default)]
pub struct TurnSystem {
    phase: TurnPhase,
    executor: SkillExecutor,
    active: Option<ActiveBattle>,
    outcome: Option<BattleOutcome>,
    on_ended: Option<BattleEndedCallback>,
}

impl TurnSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn player(&self) -> Option<&Battler> {
        self.active.as_ref().map(|a| &a.player)
    }

    pub fn enemy(&self) -> Option<&Battler> {
        self.active.as_ref().map(|a| &a.enemy)
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// Starts a fresh battle, replacing any battle still in flight. The
    /// replaced battle's completion callback is dropped unfired.
    pub fn begin_battle(
        &mut self,
        player: Battler,
        enemy: Battler,
        on_ended: Option<BattleEndedCallback>,
        log: &mut LogChannel,
    ) {
        self.on_ended = on_ended;
        self.outcome = None;

        log.push(LogEntry::blocking(texts::wild_appeared(enemy.name())));
        log.push(LogEntry::blocking(texts::go_player(player.name())));
        log.push(LogEntry::prompt(texts::prompt_what_will_do(player.name())));

        self.active = Some(ActiveBattle {
            player,
            enemy,
            player_slot: 0,
            enemy_slot: 0,
            steps: VecDeque::new(),
        });
        self.phase = TurnPhase::AwaitingChoice;
    }

    /// Accepts the player's skill slot for this turn, picks the enemy's
    /// response, fixes the action order and starts resolving.
    pub fn submit_player_choice(
        &mut self,
        slot: usize,
        catalog: &SkillCatalog,
        log: &mut LogChannel,
        rng: &mut dyn BattleRng,
    ) -> EngineResult<()> {
        if self.phase != TurnPhase::AwaitingChoice {
            return Err(TurnError::NotAwaitingChoice.into());
        }
        let active = self
            .active
            .as_mut()
            .ok_or(TurnError::NoBattleInProgress)?;
        if slot >= SKILL_SLOTS {
            return Err(TurnError::InvalidSlot(slot).into());
        }
        if active.player.skill(slot).is_none() {
            return Err(TurnError::EmptySlot(slot).into());
        }

        active.player_slot = slot;
        active.enemy_slot = choose_enemy_slot(&active.enemy, catalog);

        let player_speed = active.player.stat(BattleStat::Speed);
        let enemy_speed = active.enemy.stat(BattleStat::Speed);
        let first = if player_speed > enemy_speed {
            Actor::Player
        } else if enemy_speed > player_speed {
            Actor::Enemy
        } else if rng.percent("speed tie") <= 50 {
            Actor::Player
        } else {
            Actor::Enemy
        };
        let second = first.opponent();

        active.steps = VecDeque::from([
            Step::Attack(first),
            Step::Attack(second),
            Step::EndTurnDot(first),
            Step::EndTurnDot(second),
            Step::FinishTurn,
        ]);
        self.phase = TurnPhase::Resolving;
        self.resume(catalog, log, rng)
    }

    /// Single host entry point: runs resolution steps until the log channel
    /// has something that needs acknowledging, a new choice is wanted, or
    /// the battle is over.
    pub fn resume(
        &mut self,
        catalog: &SkillCatalog,
        log: &mut LogChannel,
        rng: &mut dyn BattleRng,
    ) -> EngineResult<()> {
        let executor = self.executor;
        loop {
            if log.is_busy() {
                return Ok(());
            }
            if !matches!(self.phase, TurnPhase::Resolving | TurnPhase::EndTurnEffects) {
                return Ok(());
            }
            let Some(active) = self.active.as_mut() else {
                self.phase = TurnPhase::Idle;
                return Ok(());
            };
            let Some(step) = active.steps.pop_front() else {
                self.phase = TurnPhase::AwaitingChoice;
                return Ok(());
            };

            match step {
                Step::Attack(actor) => {
                    let slot = match actor {
                        Actor::Player => active.player_slot,
                        Actor::Enemy => active.enemy_slot,
                    };
                    let (attacker, defender) = match actor {
                        Actor::Player => (&active.player, &mut active.enemy),
                        Actor::Enemy => (&active.enemy, &mut active.player),
                    };
                    match attacker.skill(slot) {
                        Some(id) => {
                            let skill = catalog.lookup(id)?;
                            executor.execute(attacker, defender, skill, log, rng);
                        }
                        None => {
                            log.push(LogEntry::blocking(texts::no_usable_skill(
                                attacker.name(),
                            )));
                        }
                    }
                    if active.player.is_fainted() || active.enemy.is_fainted() {
                        active.steps.clear();
                        self.conclude(log);
                    }
                }
                Step::EndTurnDot(actor) => {
                    self.phase = TurnPhase::EndTurnEffects;
                    let target = match actor {
                        Actor::Player => &mut active.player,
                        Actor::Enemy => &mut active.enemy,
                    };
                    let ailment = target.status();
                    let dot = target.end_turn_dot();
                    if dot > 0 {
                        target.apply_damage(dot);
                        log.push(LogEntry::blocking(texts::hurt_by_status(
                            target.name(),
                            ailment,
                            dot,
                        )));
                        if target.is_fainted() {
                            log.push(LogEntry::blocking(texts::fainted(target.name())));
                            active.steps.clear();
                            self.conclude(log);
                        }
                    }
                }
                Step::FinishTurn => {
                    log.push(LogEntry::prompt(texts::prompt_what_will_do(
                        active.player.name(),
                    )));
                    self.phase = TurnPhase::AwaitingChoice;
                }
            }
        }
    }

    /// Tears down the battle without firing the completion callback.
    pub fn abort(&mut self) {
        self.active = None;
        self.on_ended = None;
        self.outcome = None;
        self.phase = TurnPhase::Idle;
    }

    fn conclude(&mut self, log: &mut LogChannel) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let player_won = active.enemy.is_fainted() && !active.player.is_fainted();

        if player_won {
            log.push(LogEntry::blocking(texts::battle_won()));
            let bounty = exp_bounty(active.enemy.level());
            let levels_gained = active.player.gain_exp(bounty);
            log.push(LogEntry::blocking(texts::gained_exp(
                active.player.name(),
                bounty,
            )));
            let final_level = active.player.level();
            for level in (final_level - levels_gained + 1)..=final_level {
                log.push(LogEntry::blocking(texts::level_up(
                    active.player.name(),
                    level,
                )));
            }
        } else {
            log.push(LogEntry::blocking(texts::battle_lost()));
        }

        let outcome = BattleOutcome {
            player_won,
            player: active.player.snapshot(),
            enemy: active.enemy.snapshot(),
        };
        self.phase = TurnPhase::BattleOver;
        if let Some(callback) = self.on_ended.take() {
            callback(&outcome);
        }
        self.outcome = Some(outcome);
    }
}

/// Enemy slot choice: the highest-power non-empty slot, lowest index on a
/// tie; with nothing usable it falls back to slot 0 and the attack step
/// narrates the empty swing.
fn choose_enemy_slot(enemy: &Battler, catalog: &SkillCatalog) -> usize {
    let mut best_slot = 0;
    let mut best_power = -1;
    for slot in 0..SKILL_SLOTS {
        if let Some(id) = enemy.skill(slot) {
            if let Ok(skill) = catalog.lookup(id) {
                let power = skill.power();
                if power > best_power {
                    best_power = power;
                    best_slot = slot;
                }
            }
        }
    }
    best_slot
}
