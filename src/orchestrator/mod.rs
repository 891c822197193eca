//! The orchestrator: wires the pure engine to wall-clock concerns.
//!
//! The engine knows nothing about time or controllers. The orchestrator owns
//! the authoritative `GameState`, feeds actions through the engine, fans the
//! resulting events out to subscribers, and schedules the two timed behaviors
//! the game needs: the AI's "thinking" delay and the human turn timeout.
//!
//! ## Timing model
//!
//! Time is injected, never read. `dispatch` and `tick` both take a `now`
//! instant, so tests drive the clock directly. At most one timer is armed at
//! a time; arming a new one replaces the old. Every armed timer carries a
//! guard capturing the floor, seat, and phase it was scheduled for, and the
//! guard is re-checked against the live state when the timer fires - a timer
//! made stale by an intervening action (a recall rewinding the floor, a
//! reset) is dropped silently.
//!
//! ## Faults
//!
//! A `Fault` event halts the orchestrator: timers are cleared and further
//! actions are refused until `ResetGame` or `StartGame` arrives.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::ai::{decide, intent_to_action, AiContext, Strategy};
use crate::core::{ControllerKind, GamePhase, GameRng, GameState, Seat};
use crate::engine::{Action, Engine, Event};

/// Receives every event the engine emits, in order.
pub trait EventSink {
    fn on_event(&mut self, event: &Event);
}

/// Timer tuning for the orchestrator.
#[derive(Clone, Copy, Debug)]
pub struct OrchestratorConfig {
    /// How long a human may hold the turn before an automatic pass.
    pub turn_timeout: Duration,
    /// Artificial delay before the AI acts, so moves read as deliberate.
    pub ai_delay: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            turn_timeout: Duration::from_secs(45),
            ai_delay: Duration::from_millis(900),
        }
    }
}

/// What an armed timer will do when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScheduledKind {
    AiMove,
    TurnTimeout,
}

/// Snapshot of the position a timer was armed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScheduleGuard {
    floor: u8,
    seat: Seat,
    phase: GamePhase,
}

impl ScheduleGuard {
    fn capture(state: &GameState, seat: Seat) -> Self {
        Self {
            floor: state.current_floor,
            seat,
            phase: state.phase,
        }
    }

    /// True if the live state still matches the position this guard captured.
    fn still_valid(&self, state: &GameState) -> bool {
        state.phase == self.phase
            && state.current_floor == self.floor
            && state.turn == self.seat
    }
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: Instant,
    guard: ScheduleGuard,
    kind: ScheduledKind,
}

/// Drives a single game session.
pub struct Orchestrator {
    engine: Engine,
    state: GameState,
    config: OrchestratorConfig,
    strategy: Box<dyn Strategy>,
    rng: GameRng,
    sinks: Vec<Box<dyn EventSink>>,
    pending: Option<Scheduled>,
    halted: bool,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        engine: Engine,
        config: OrchestratorConfig,
        strategy: Box<dyn Strategy>,
        rng: GameRng,
    ) -> Self {
        Self {
            engine,
            state: GameState::title(),
            config,
            strategy,
            rng,
            sinks: Vec::new(),
            pending: None,
            halted: false,
        }
    }

    /// Register an event subscriber. Subscribers see events in emission order.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// The authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whether a fault has stopped the session.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[cfg(test)]
    fn pending_kind(&self) -> Option<ScheduledKind> {
        self.pending.map(|s| s.kind)
    }

    /// Run one action through the engine and react to its events.
    pub fn dispatch(&mut self, action: Action, now: Instant) {
        if self.halted && !matches!(action, Action::StartGame { .. } | Action::ResetGame) {
            warn!(action = action.kind(), "refused: session is halted");
            return;
        }

        debug!(action = action.kind(), "dispatch");
        let previous = self.pending.take();
        let outcome = self.engine.handle_action(&self.state, &action);
        self.state = outcome.state;

        // A rejected action leaves the state untouched, so whatever timer
        // was armed is still the right one. Anything else invalidates it;
        // the event reaction below re-arms as needed.
        if outcome
            .events
            .iter()
            .all(|e| matches!(e, Event::Rejected { .. }))
        {
            self.pending = previous;
        }

        for event in &outcome.events {
            self.react(event, now);
            for sink in &mut self.sinks {
                sink.on_event(event);
            }
        }
    }

    /// Advance the clock. Fires the armed timer if it is due and its guard
    /// still matches the live state.
    pub fn tick(&mut self, now: Instant) {
        let Some(scheduled) = self.pending else {
            return;
        };
        if now < scheduled.due {
            return;
        }
        self.pending = None;

        if !scheduled.guard.still_valid(&self.state) {
            debug!(kind = ?scheduled.kind, "dropping stale timer");
            return;
        }

        match scheduled.kind {
            ScheduledKind::AiMove => {
                let seat = scheduled.guard.seat;
                let ctx = AiContext::new(&self.engine, &self.state, seat);
                // Each decision runs on its own rng branch, so what one
                // decision draws never shifts the next one's sequence.
                let mut branch = self.rng.fork();
                let intent = decide(&ctx, self.strategy.as_ref(), &mut branch);
                let action = intent_to_action(&intent, seat);
                info!(seat = ?seat, action = action.kind(), "ai move");
                self.dispatch(action, now);
            }
            ScheduledKind::TurnTimeout => {
                let seat = scheduled.guard.seat;
                info!(seat = ?seat, "turn timeout, passing");
                self.dispatch(Action::PassProposal { seat }, now);
            }
        }
    }

    fn react(&mut self, event: &Event, now: Instant) {
        match event {
            Event::TurnStarted { seat, floor } => {
                let holder = self.state.player(*seat);
                let (kind, delay) = match holder.controller {
                    ControllerKind::Ai => (ScheduledKind::AiMove, self.config.ai_delay),
                    ControllerKind::Human => (ScheduledKind::TurnTimeout, self.config.turn_timeout),
                };
                debug!(seat = ?seat, floor, kind = ?kind, "arming timer");
                self.pending = Some(Scheduled {
                    due: now + delay,
                    guard: ScheduleGuard::capture(&self.state, *seat),
                    kind,
                });
            }
            Event::GameOver {
                reason,
                winner,
                final_score,
            } => {
                info!(?reason, ?winner, final_score, "game over");
                self.pending = None;
            }
            Event::GameReset => {
                self.pending = None;
                self.halted = false;
            }
            Event::Fault { detail } => {
                warn!(detail = %detail, "engine fault, halting session");
                self.pending = None;
                self.halted = true;
            }
            Event::Rejected { code, reason } => {
                debug!(code, reason = %reason, "action rejected");
            }
            _ => {}
        }
    }
}
