use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{resources::RaceSettings, utils::RaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeState {
    Running,
    Frozen,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    /// No checkpoint reached within the step timeout window
    Timeout,
    /// Hit a non-agent body
    Collision,
    /// Episode step budget exhausted
    MaxSteps,
}

/// Signal handed to the external training loop each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EpisodeStatus {
    Continue,
    Terminate {
        reason: TerminationReason,
        /// Penalty applied by the termination itself
        reward_delta: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Total reward accrued on this tick, termination penalty included
    pub reward: f64,
    pub status: EpisodeStatus,
}

impl Default for StepOutcome {
    fn default() -> Self {
        Self {
            reward: 0.0,
            status: EpisodeStatus::Continue,
        }
    }
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, EpisodeStatus::Terminate { .. })
    }
}

/// Timed crash sequence used outside training.
///
/// Deadlines are agent step counts, checked once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionPhase {
    /// Aircraft hidden, explosion effect visible
    Burning { until: u32 },
    /// Aircraft visible again at its last checkpoint, still frozen
    Recovering { until: u32 },
}

/// Transition taken by [`EpisodeComponent::advance_explosion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionStep {
    /// Effect finished: show the aircraft and move it back to the course
    Reposition,
    /// Recovery finished: the agent is flying again
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResponse {
    Ignored,
    Terminated,
    Exploded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct TickLedger {
    reward: f64,
    termination: Option<(TerminationReason, f64)>,
}

/// Per-agent episode bookkeeping
#[derive(Component, Debug, Clone, PartialEq)]
pub struct EpisodeComponent {
    pub state: EpisodeState,
    /// Episodes started, including the current one
    pub episode: u32,
    pub step_count: u32,
    /// Step at which the episode times out without a new checkpoint
    pub next_timeout: u32,
    pub cumulative_reward: f64,
    pub explosion: Option<ExplosionPhase>,
    ledger: TickLedger,
}

impl Default for EpisodeComponent {
    fn default() -> Self {
        Self {
            state: EpisodeState::Terminated,
            episode: 0,
            step_count: 0,
            next_timeout: 0,
            cumulative_reward: 0.0,
            explosion: None,
            ledger: TickLedger::default(),
        }
    }
}

impl EpisodeComponent {
    /// Start a fresh episode. Cancels any pending explosion sequence.
    pub fn begin_episode(&mut self, settings: &RaceSettings) {
        self.state = EpisodeState::Running;
        self.episode += 1;
        self.step_count = 0;
        self.next_timeout = settings.step_timeout;
        self.cumulative_reward = 0.0;
        self.explosion = None;
        self.ledger = TickLedger::default();
    }

    pub fn is_running(&self) -> bool {
        self.state == EpisodeState::Running
    }

    pub fn is_frozen(&self) -> bool {
        self.state == EpisodeState::Frozen
    }

    pub fn is_terminated(&self) -> bool {
        self.state == EpisodeState::Terminated
    }

    /// Count the step and apply the per-step training rules
    pub fn begin_tick(&mut self, settings: &RaceSettings) {
        self.ledger = TickLedger::default();
        if self.is_terminated() {
            return;
        }
        self.step_count += 1;

        if !settings.training_mode || !self.is_running() {
            return;
        }

        if settings.max_steps > 0 {
            self.add_reward(-1.0 / settings.max_steps as f64);
        }

        if self.step_count >= self.next_timeout {
            self.terminate(TerminationReason::Timeout, settings.rewards.timeout_penalty);
        } else if settings.max_steps > 0 && self.step_count >= settings.max_steps {
            self.terminate(TerminationReason::MaxSteps, 0.0);
        }
    }

    pub fn add_reward(&mut self, delta: f64) {
        self.ledger.reward += delta;
        self.cumulative_reward += delta;
    }

    /// End the episode; later terminations on the same episode are ignored
    pub fn terminate(&mut self, reason: TerminationReason, reward_delta: f64) {
        if self.is_terminated() {
            return;
        }
        self.add_reward(reward_delta);
        self.state = EpisodeState::Terminated;
        self.explosion = None;
        self.ledger.termination = Some((reason, reward_delta));
    }

    /// Reward progress and extend the timeout window (training only)
    pub fn on_checkpoint(&mut self, settings: &RaceSettings) {
        if !settings.training_mode || !self.is_running() {
            return;
        }
        self.add_reward(settings.rewards.checkpoint_reward);
        self.next_timeout = self.step_count + settings.step_timeout;
    }

    /// React to hitting a non-agent body
    pub fn on_collision(&mut self, settings: &RaceSettings) -> CollisionResponse {
        if !self.is_running() {
            return CollisionResponse::Ignored;
        }
        if settings.training_mode {
            self.terminate(
                TerminationReason::Collision,
                settings.rewards.collision_penalty,
            );
            return CollisionResponse::Terminated;
        }

        self.state = EpisodeState::Frozen;
        self.explosion = Some(ExplosionPhase::Burning {
            until: self.step_count + settings.explosion_ticks,
        });
        CollisionResponse::Exploded
    }

    /// Advance a pending explosion sequence whose deadline has passed
    pub fn advance_explosion(&mut self, settings: &RaceSettings) -> Option<ExplosionStep> {
        match self.explosion? {
            ExplosionPhase::Burning { until } if self.step_count >= until => {
                self.explosion = Some(ExplosionPhase::Recovering {
                    until: self.step_count + settings.recover_ticks,
                });
                Some(ExplosionStep::Reposition)
            }
            ExplosionPhase::Recovering { until } if self.step_count >= until => {
                self.explosion = None;
                if self.is_frozen() {
                    self.state = EpisodeState::Running;
                }
                Some(ExplosionStep::Recovered)
            }
            _ => None,
        }
    }

    /// Stop the agent from flying. Only valid outside training.
    pub fn freeze(&mut self, settings: &RaceSettings) -> Result<(), RaceError> {
        if settings.training_mode {
            return Err(RaceError::FreezeInTraining);
        }
        if self.is_running() {
            self.state = EpisodeState::Frozen;
        }
        Ok(())
    }

    /// Resume flying. Only valid outside training.
    ///
    /// An agent frozen by an explosion stays frozen until the sequence ends.
    pub fn thaw(&mut self, settings: &RaceSettings) -> Result<(), RaceError> {
        if settings.training_mode {
            return Err(RaceError::FreezeInTraining);
        }
        if self.is_frozen() && self.explosion.is_none() {
            self.state = EpisodeState::Running;
        }
        Ok(())
    }

    /// Why the episode ended, if it ended on the current tick
    pub fn termination(&self) -> Option<TerminationReason> {
        self.ledger.termination.map(|(reason, _)| reason)
    }

    /// Outcome of the current tick
    pub fn outcome(&self) -> StepOutcome {
        let status = match self.ledger.termination {
            Some((reason, reward_delta)) => EpisodeStatus::Terminate {
                reason,
                reward_delta,
            },
            None => EpisodeStatus::Continue,
        };
        StepOutcome {
            reward: self.ledger.reward,
            status,
        }
    }
}

/// Outcome reported for the agent's latest tick
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LastOutcome(pub StepOutcome);
