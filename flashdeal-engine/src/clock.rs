//! Tick-based progress clock driving the walk-to-unlock simulation.
//!
//! The clock is a three-state machine (`Idle`, `Running`, `Complete`) with a
//! single transition function. Hosts decide how ticks are scheduled; the
//! clock itself never touches a timer, so tests can drive it with explicit
//! elapsed-time deltas.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::constants::{LOG_TARGET_CLOCK, PROGRESS_MAX};
use crate::numbers::clamp_progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// Not advancing; `start` will begin the walk.
    #[default]
    Idle,
    /// Advancing once per tick period.
    Running,
    /// Progress reached the bound. Terminal.
    Complete,
}

impl ClockPhase {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }
}

/// Result of applying a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was not running; nothing changed.
    Idle,
    /// Progress moved forward and the clock keeps running.
    Advanced,
    /// Progress hit the bound on this tick and the clock stopped.
    Completed,
}

/// Snapshot of the clock. Copyable so view layers can hold it in state cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    pub progress: f64,
    pub phase: ClockPhase,
    /// Elapsed milliseconds not yet converted into a tick.
    #[serde(default)]
    pub carry_ms: u32,
}

impl ClockState {
    /// Idle clock at `progress`, or complete when already at the bound.
    #[must_use]
    pub fn at(progress: f64) -> Self {
        let progress = clamp_progress(progress);
        let phase = if progress >= PROGRESS_MAX {
            ClockPhase::Complete
        } else {
            ClockPhase::Idle
        };
        Self {
            progress,
            phase,
            carry_ms: 0,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == ClockPhase::Complete
    }

    /// Copy with progress clamped and the phase consistent with it: complete
    /// exactly at the bound, never complete below it. Carry only survives a
    /// running state.
    #[must_use]
    pub fn normalized(self) -> Self {
        let progress = clamp_progress(self.progress);
        let phase = match self.phase {
            _ if progress >= PROGRESS_MAX => ClockPhase::Complete,
            ClockPhase::Complete => ClockPhase::Idle,
            phase => phase,
        };
        let carry_ms = if phase == ClockPhase::Running {
            self.carry_ms
        } else {
            0
        };
        Self {
            progress,
            phase,
            carry_ms,
        }
    }

    /// Running copy of this state, or `self` unchanged when running or complete.
    #[must_use]
    pub fn started(self) -> Self {
        if self.phase == ClockPhase::Idle && self.progress < PROGRESS_MAX {
            Self {
                phase: ClockPhase::Running,
                ..self
            }
        } else {
            self
        }
    }

    /// Idle copy of a running state; other phases are returned as-is.
    #[must_use]
    pub fn paused(self) -> Self {
        if self.phase == ClockPhase::Running {
            Self {
                phase: ClockPhase::Idle,
                carry_ms: 0,
                ..self
            }
        } else {
            self
        }
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::at(SimulationConfig::default_initial_progress())
    }
}

/// Apply one fixed-period tick.
#[must_use]
pub fn step(state: ClockState, increment: f64) -> (ClockState, TickOutcome) {
    if state.phase != ClockPhase::Running {
        return (state, TickOutcome::Idle);
    }
    let next = clamp_progress(state.progress) + increment.max(0.0);
    if next >= PROGRESS_MAX {
        let done = ClockState {
            progress: PROGRESS_MAX,
            phase: ClockPhase::Complete,
            carry_ms: 0,
        };
        return (done, TickOutcome::Completed);
    }
    let advanced = ClockState {
        progress: clamp_progress(next),
        ..state
    };
    (advanced, TickOutcome::Advanced)
}

/// Advance by `dt_ms` of elapsed time, applying one tick per whole period.
#[must_use]
pub fn advance(state: ClockState, cfg: &SimulationConfig, dt_ms: u32) -> ClockState {
    if state.phase != ClockPhase::Running {
        return ClockState { carry_ms: 0, ..state };
    }
    let period = cfg.tick_period_ms.max(1);
    let total = state.carry_ms.saturating_add(dt_ms);
    let ticks = total / period;
    let mut current = state;
    for _ in 0..ticks {
        let (next, outcome) = step(current, cfg.increment);
        current = next;
        if outcome == TickOutcome::Completed {
            return current;
        }
    }
    ClockState {
        carry_ms: total % period,
        ..current
    }
}

/// Stateful wrapper owning the single mutable progress value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressClock {
    state: ClockState,
    config: SimulationConfig,
}

impl ProgressClock {
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            state: ClockState::at(config.clamped_initial_progress()),
            config: config.clone(),
        }
    }

    /// Rebuild a clock around an existing state, re-clamping progress and
    /// reconciling the phase with it.
    #[must_use]
    pub fn from_state(state: ClockState, config: &SimulationConfig) -> Self {
        Self {
            state: state.normalized(),
            config: config.clone(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> ClockState {
        self.state
    }

    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.state.progress
    }

    #[must_use]
    pub const fn phase(&self) -> ClockPhase {
        self.state.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[must_use]
    pub const fn tick_period_ms(&self) -> u32 {
        self.config.tick_period_ms
    }

    /// Begin advancing. Returns `false` when already running or complete.
    pub fn start(&mut self) -> bool {
        let next = self.state.started();
        let changed = next != self.state;
        if changed {
            log::debug!(target: LOG_TARGET_CLOCK, "walk started at {:.1}%", next.progress);
        }
        self.state = next;
        changed
    }

    /// Stop advancing without losing progress. Returns `false` unless running.
    pub fn pause(&mut self) -> bool {
        let next = self.state.paused();
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Return to the configured initial progress.
    pub fn reset(&mut self) {
        self.state = ClockState::at(self.config.clamped_initial_progress());
    }

    pub fn tick(&mut self) -> TickOutcome {
        let (next, outcome) = step(self.state, self.config.increment);
        self.state = next;
        if outcome == TickOutcome::Completed {
            log::debug!(target: LOG_TARGET_CLOCK, "walk complete, reward unlocked");
        }
        outcome
    }

    pub fn advance(&mut self, dt_ms: u32) -> ClockState {
        let was_complete = self.state.is_complete();
        self.state = advance(self.state, &self.config, dt_ms);
        if !was_complete && self.state.is_complete() {
            log::debug!(target: LOG_TARGET_CLOCK, "walk complete, reward unlocked");
        }
        self.state
    }
}

impl Default for ProgressClock {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}
