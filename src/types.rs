//! This module defines the core data structures shared by the three simulation
//! engines: the automaton description (states plus a tagged union of
//! transitions), the mutable per-run simulation state with its append-only
//! history, and the error type surfaced by `start`/`step`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The symbol seeded at the bottom of a pushdown automaton's stack by `start`.
pub const STACK_BOTTOM_SYMBOL: char = 'Z';
/// The tape-filler cell used by the Turing engine outside the written region.
pub const BLANK_SYMBOL: char = '_';

/// Discriminates which transition variant an automaton's rules may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomatonKind {
    Dfa,
    Pda,
    Turing,
}

/// One node of the automaton graph.
///
/// The `label` is cosmetic display text and is never consulted by the engines;
/// matching is always by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Unique identifier, referenced by transition endpoints.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Whether this is the state a run begins in. At most one state per
    /// automaton should carry this flag; the engines pick the first.
    pub is_initial: bool,
    /// Whether halting in this state counts as acceptance.
    pub is_final: bool,
}

/// A single transition rule, tagged by automaton kind.
///
/// For the PDA variant, `None` plays the role of the empty-symbol marker ε:
/// an ε `input` consumes nothing, an ε `pop` matches any stack top, and an ε
/// `push` pushes nothing. `push` may hold several characters, which are pushed
/// as individual cells with the first character ending up on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Dfa {
        from: String,
        to: String,
        symbol: char,
    },
    Pda {
        from: String,
        to: String,
        input: Option<char>,
        pop: Option<char>,
        push: Option<String>,
    },
    Turing {
        from: String,
        to: String,
        read: char,
        write: char,
        direction: Direction,
    },
}

impl Transition {
    /// The id of the state this transition leaves from.
    pub fn from(&self) -> &str {
        match self {
            Transition::Dfa { from, .. }
            | Transition::Pda { from, .. }
            | Transition::Turing { from, .. } => from,
        }
    }

    /// The id of the state this transition enters.
    pub fn to(&self) -> &str {
        match self {
            Transition::Dfa { to, .. }
            | Transition::Pda { to, .. }
            | Transition::Turing { to, .. } => to,
        }
    }
}

/// The direction a Turing machine head moves after a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Stay,
}

/// A complete automaton description: states, transitions, and the kind tag
/// fixing which transition variant is meaningful.
///
/// An automaton is read-only for the duration of a simulation run; the engines
/// never mutate it. `alphabet` is advisory metadata for editing front-ends and
/// is never consulted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automaton {
    pub name: String,
    pub kind: AutomatonKind,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
    pub alphabet: Vec<char>,
}

impl Automaton {
    /// Returns the first state marked initial, if any.
    pub fn initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_initial)
    }

    /// Looks up a state by id.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    /// Whether the state with the given id is marked final. Unknown ids are
    /// not final.
    pub fn is_final(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.is_final)
    }
}

/// One in-progress (or finished) simulation run.
///
/// Created by `start`, mutated in place by each `step`, and frozen once
/// `finished` turns true. `stack` is populated only for PDA runs, `tape` and
/// `tape_position` only for Turing runs. `position` is the cursor into `input`
/// for DFA/PDA runs; the Turing engine tracks it but never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub current_state: String,
    /// The original input, immutable for the run.
    pub input: String,
    pub position: usize,
    pub stack: Option<Vec<char>>,
    pub tape: Option<Vec<char>>,
    pub tape_position: Option<usize>,
    /// `None` while the run is still in progress.
    pub accepted: Option<bool>,
    pub finished: bool,
    /// Append-only, one snapshot per `start`/`step` call.
    pub history: Vec<StepSnapshot>,
}

/// An immutable record of simulation progress captured at each `start`/`step`
/// call, enabling replay.
///
/// `stack` and `tape` are independent copies taken at snapshot time, never
/// aliases into the live run. `transition` is absent for the initial snapshot
/// and for the terminal step that only evaluates the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub state: String,
    pub position: usize,
    pub stack: Option<Vec<char>>,
    pub tape: Option<Vec<char>>,
    pub tape_position: Option<usize>,
    pub transition: Option<Transition>,
}

impl StepSnapshot {
    /// Captures the run's current progress, deep-copying stack and tape so the
    /// snapshot stays valid as the live run keeps mutating them.
    pub fn capture(state: &SimulationState, transition: Option<Transition>) -> Self {
        Self {
            state: state.current_state.clone(),
            position: state.position,
            stack: state.stack.clone(),
            tape: state.tape.clone(),
            tape_position: state.tape_position,
            transition,
        }
    }
}

/// Errors surfaced by the simulation engines.
///
/// Both variants are local, synchronous failures with no partial state
/// mutation: a failed `start` leaves no run behind, a failed `step` leaves
/// the prior run untouched. An input the machine merely rejects is not an
/// error; it ends the run with `accepted = Some(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The automaton has no state marked initial.
    #[error("automaton has no initial state")]
    NoInitialState,
    /// `step` was called before `start`, or after the run finished.
    #[error("simulation is not active or has already finished")]
    Inactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let stay_json = serde_json::to_string(&Direction::Stay).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(stay_json, "\"Stay\"");

        let back: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(back, Direction::Left);
    }

    #[test]
    fn test_transition_endpoints() {
        let t = Transition::Pda {
            from: "q0".to_string(),
            to: "q1".to_string(),
            input: Some('('),
            pop: None,
            push: Some("X".to_string()),
        };

        assert_eq!(t.from(), "q0");
        assert_eq!(t.to(), "q1");
    }

    #[test]
    fn test_transition_round_trip() {
        let t = Transition::Turing {
            from: "scan".to_string(),
            to: "carry".to_string(),
            read: '1',
            write: '0',
            direction: Direction::Left,
        };

        let json = serde_json::to_string(&t).unwrap();
        let back: Transition = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn test_initial_state_lookup() {
        let automaton = Automaton {
            name: "lookup".to_string(),
            kind: AutomatonKind::Dfa,
            states: vec![
                State {
                    id: "q0".to_string(),
                    label: "q0".to_string(),
                    is_initial: false,
                    is_final: false,
                },
                State {
                    id: "q1".to_string(),
                    label: "q1".to_string(),
                    is_initial: true,
                    is_final: true,
                },
            ],
            transitions: Vec::new(),
            alphabet: Vec::new(),
        };

        assert_eq!(automaton.initial_state().unwrap().id, "q1");
        assert!(automaton.is_final("q1"));
        assert!(!automaton.is_final("q0"));
        assert!(!automaton.is_final("missing"));
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", SimulationError::NoInitialState);
        assert!(msg.contains("no initial state"));

        let msg = format!("{}", SimulationError::Inactive);
        assert!(msg.contains("not active"));
    }
}
