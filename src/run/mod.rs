//! Roguelike run progression: a strict state machine that strings battles,
//! interstitials and biome transitions together.

pub mod encounter;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{RunError, RunResult};
use crate::events::{EventHub, SubscriptionId};
use crate::rng::BattleRng;

use encounter::{generate, Encounter, RunConfig};

pub const STAGES_PER_BIOME: i32 = 10;

/// Where the run currently stands. Every operation on `RunManager` checks
/// this before mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    None,
    InBattle,
    InShopOrReward,
    BiomeTransition,
    GameOver,
}

/// Drives one run from start to game over. Owned by the host and passed
/// around explicitly; outside observers attach through the event hubs.
pub struct RunManager {
    config: RunConfig,
    state: RunState,
    biome: i32,
    stage: i32,
    gold: i32,
    reward_committed: bool,
    current_encounter: Option<Encounter>,
    state_changed: EventHub<RunState>,
    encounter_ready: EventHub<Encounter>,
}

impl RunManager {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            state: RunState::None,
            biome: 1,
            stage: 1,
            gold: 0,
            reward_committed: false,
            current_encounter: None,
            state_changed: EventHub::new(),
            encounter_ready: EventHub::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn biome(&self) -> i32 {
        self.biome
    }

    pub fn stage(&self) -> i32 {
        self.stage
    }

    pub fn gold(&self) -> i32 {
        self.gold
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn current_encounter(&self) -> Option<&Encounter> {
        self.current_encounter.as_ref()
    }

    /// Resets progress and economy, then prepares the first battle.
    pub fn start_new_run(&mut self, rng: &mut dyn BattleRng) -> RunResult<()> {
        self.biome = 1;
        self.stage = 1;
        self.gold = self.config.start_gold;
        self.reward_committed = false;
        self.current_encounter = None;
        info!(gold = self.gold, "starting new run");
        self.prepare_next_battle(rng)
    }

    /// Generates the encounter for the current (biome, stage) and enters
    /// InBattle. An empty pool leaves the run untouched.
    pub fn prepare_next_battle(&mut self, rng: &mut dyn BattleRng) -> RunResult<()> {
        let Some(encounter) = generate(&self.config, self.biome, self.stage, rng) else {
            warn!(
                biome = self.biome,
                stage = self.stage,
                "no encounter available for stage"
            );
            return Err(RunError::NoEncounterAvailable);
        };
        debug!(
            biome = self.biome,
            stage = self.stage,
            species = encounter.species.0,
            level = encounter.level,
            "encounter prepared"
        );
        let event = encounter.clone();
        self.current_encounter = Some(encounter);
        self.set_state(RunState::InBattle);
        self.encounter_ready.emit(&event);
        Ok(())
    }

    /// Settles the finished battle. A loss ends the run; a win advances the
    /// stage and routes to the interstitial, or straight into the next
    /// biome's first battle when the cleared stage closed out a biome.
    pub fn report_battle_ended(
        &mut self,
        player_won: bool,
        rng: &mut dyn BattleRng,
    ) -> RunResult<()> {
        if self.state != RunState::InBattle {
            warn!(from = ?self.state, "report_battle_ended rejected outside a battle");
            return Err(RunError::InvalidStateTransition {
                from: self.state,
                operation: "report_battle_ended",
            });
        }
        self.current_encounter = None;

        if !player_won {
            info!(biome = self.biome, stage = self.stage, "run over");
            self.set_state(RunState::GameOver);
            return Ok(());
        }

        let cleared = self.stage;
        self.stage += 1;
        if cleared % STAGES_PER_BIOME == 0 {
            self.biome += 1;
            info!(biome = self.biome, "biome cleared, moving on");
            self.set_state(RunState::BiomeTransition);
            self.prepare_next_battle(rng)
        } else {
            self.reward_committed = false;
            self.set_state(RunState::InShopOrReward);
            Ok(())
        }
    }

    /// Consumes the interstitial's single reward pick and moves on.
    pub fn commit_reward_and_continue(&mut self, rng: &mut dyn BattleRng) -> RunResult<()> {
        self.commit_interstitial("commit_reward_and_continue", rng)
    }

    /// Leaves the shop and moves on. Shares the one-shot lock with the
    /// reward pick.
    pub fn commit_shop_and_continue(&mut self, rng: &mut dyn BattleRng) -> RunResult<()> {
        self.commit_interstitial("commit_shop_and_continue", rng)
    }

    pub fn add_gold(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.gold += amount;
        debug!(amount, total = self.gold, "gold earned");
    }

    /// Non-positive amounts are trivially affordable; insufficient funds
    /// refuse without mutating.
    pub fn try_spend_gold(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return true;
        }
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        debug!(amount, total = self.gold, "gold spent");
        true
    }

    pub fn subscribe_state_changed(
        &mut self,
        listener: impl FnMut(&RunState) + 'static,
    ) -> SubscriptionId {
        self.state_changed.subscribe(listener)
    }

    pub fn unsubscribe_state_changed(&mut self, id: SubscriptionId) -> bool {
        self.state_changed.unsubscribe(id)
    }

    pub fn subscribe_encounter_ready(
        &mut self,
        listener: impl FnMut(&Encounter) + 'static,
    ) -> SubscriptionId {
        self.encounter_ready.subscribe(listener)
    }

    pub fn unsubscribe_encounter_ready(&mut self, id: SubscriptionId) -> bool {
        self.encounter_ready.unsubscribe(id)
    }

    fn commit_interstitial(
        &mut self,
        operation: &'static str,
        rng: &mut dyn BattleRng,
    ) -> RunResult<()> {
        if self.state != RunState::InShopOrReward {
            warn!(from = ?self.state, operation, "interstitial commit rejected outside the interstitial");
            return Err(RunError::InvalidStateTransition {
                from: self.state,
                operation,
            });
        }
        if self.reward_committed {
            warn!(operation, "interstitial commit rejected, reward lock already spent");
            return Err(RunError::RewardAlreadyCommitted);
        }
        self.reward_committed = true;
        self.prepare_next_battle(rng)
    }

    fn set_state(&mut self, next: RunState) {
        if self.state == next {
            return;
        }
        info!(from = ?self.state, to = ?next, "run state");
        self.state = next;
        self.state_changed.emit(&next);
    }
}
