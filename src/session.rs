//! Host-facing session controller
//!
//! Owns the simulation state, the fixed-step accumulator and the input that
//! arrives between frames. The host drives it with `run_frame` from its redraw
//! callback; a `LoopToken` ties each scheduled loop to one session generation
//! so a reset or tear-down stops the old loop instead of leaking it.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameEvent, GamePhase, SimulationState, Snapshot, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Identifies the loop started by one `start`/`reset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopToken {
    generation: u64,
}

/// What the host loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another frame
    Continue,
    /// Stop scheduling (game over, cancelled, or superseded)
    Stop,
}

/// Session instance holding all simulation state
pub struct Session {
    state: SimulationState,
    input: TickInput,
    accumulator: f32,
    generation: u64,
    running: bool,
    /// Events from the most recent `advance`
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::from_state(SimulationState::new(Tuning::default(), seed))
    }

    /// Create an idle session with validated tuning
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_state(SimulationState::new(tuning, seed)))
    }

    fn from_state(state: SimulationState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            generation: 0,
            running: false,
            events: Vec::new(),
        }
    }

    /// Enter Playing and hand out the token for the new loop
    pub fn start(&mut self) -> LoopToken {
        if self.state.phase != GamePhase::Idle {
            return self.reset(self.state.seed.wrapping_add(1));
        }
        self.generation += 1;
        self.running = true;
        self.state.start();
        LoopToken {
            generation: self.generation,
        }
    }

    /// Discard everything and start over
    ///
    /// Invalidates every earlier `LoopToken`, which cancels the previous loop
    /// together with its spawn and difficulty clocks. Calling it repeatedly is
    /// harmless: each call leaves the same fresh state behind.
    pub fn reset(&mut self, seed: u64) -> LoopToken {
        self.generation += 1;
        self.running = true;
        self.state.reset(seed);
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.events.clear();
        LoopToken {
            generation: self.generation,
        }
    }

    /// Tear down: stop advancing and invalidate the current loop
    pub fn cancel(&mut self) {
        if self.running {
            log::info!("Session loop cancelled");
        }
        self.generation += 1;
        self.running = false;
        self.input = TickInput::default();
    }

    /// Whether the token belongs to the live loop
    pub fn is_current(&self, token: LoopToken) -> bool {
        self.running && token.generation == self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record the latest pointer sample (field coordinates)
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.input.pointer = Some(Vec2::new(x, y));
    }

    /// Queue one fire trigger for the next tick
    pub fn trigger_fire(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        self.input.fire_triggers = self.input.fire_triggers.saturating_add(1);
    }

    /// Field dimensions changed (window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Run as many fixed ticks as `dt` seconds cover. Returns the tick count.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.events.clear();
        if !self.running || self.state.phase == GamePhase::Idle {
            return 0;
        }

        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            // Pointer position persists between ticks; triggers are one-shot
            self.input.pointer = input.pointer;
            let events = tick(&mut self.state, &input, SIM_DT);
            self.events.extend(events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.state.is_game_over() {
                self.accumulator = 0.0;
                break;
            }
        }
        substeps
    }

    /// Per-frame entry for the host loop
    ///
    /// A stale token does nothing and asks the loop to stop. Otherwise the
    /// simulation advances and the loop continues until the game is over.
    pub fn run_frame(&mut self, token: LoopToken, dt: f32) -> LoopControl {
        if !self.is_current(token) {
            return LoopControl::Stop;
        }
        self.advance(dt);
        if self.state.is_game_over() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Immutable view for the rendering layer
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Events produced by the most recent `advance`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}
