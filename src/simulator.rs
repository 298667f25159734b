//! This module defines the `Simulator` trait shared by the three stepping
//! engines, plus a factory that picks the right engine for an automaton's
//! kind tag so callers can hold a single polymorphic handle.

use crate::dfa::DfaSimulator;
use crate::pda::PdaSimulator;
use crate::turing::TuringSimulator;
use crate::types::{Automaton, AutomatonKind, SimulationError, SimulationState};

/// The shared contract of the stepping engines.
///
/// A caller constructs an engine bound to one automaton, calls `start` once,
/// then calls `step` repeatedly until the returned state reports `finished`.
/// Each `step` advances exactly one computation step and is atomic: it either
/// fully applies a transition and appends a history snapshot, or fully
/// terminates the run. The engines impose no step budget of their own;
/// guarding against non-halting machines is the caller's job (see [`run`]).
///
/// [`run`]: Simulator::run
pub trait Simulator {
    /// Begins a fresh run over `input`, discarding any previous run.
    ///
    /// Fails with [`SimulationError::NoInitialState`] if the bound automaton
    /// has no state marked initial, in which case no run is created.
    fn start(&mut self, input: &str) -> Result<&SimulationState, SimulationError>;

    /// Advances the active run by one computation step.
    ///
    /// Fails with [`SimulationError::Inactive`] if called before `start` or
    /// after the run finished; a failed call leaves the prior run untouched.
    fn step(&mut self) -> Result<&SimulationState, SimulationError>;

    /// Read-only view of the current run, if one exists.
    fn state(&self) -> Option<&SimulationState>;

    /// Discards the current run, returning the engine to its pre-`start`
    /// condition.
    fn reset(&mut self);

    /// Steps the active run until it finishes or `max_steps` steps have been
    /// taken, whichever comes first.
    ///
    /// The budget is supplied by the caller because a Turing machine with no
    /// final state and no dead transition never halts on its own.
    fn run(&mut self, max_steps: usize) -> Result<&SimulationState, SimulationError> {
        for _ in 0..max_steps {
            match self.state() {
                Some(state) if !state.finished => {}
                _ => break,
            }
            self.step()?;
        }

        self.state().ok_or(SimulationError::Inactive)
    }
}

/// Constructs the stepping engine matching the automaton's kind tag.
pub fn simulator_for(automaton: Automaton) -> Box<dyn Simulator> {
    match automaton.kind {
        AutomatonKind::Dfa => Box::new(DfaSimulator::new(automaton)),
        AutomatonKind::Pda => Box::new(PdaSimulator::new(automaton)),
        AutomatonKind::Turing => Box::new(TuringSimulator::new(automaton)),
    }
}
