//! This module implements the deterministic finite automaton engine: one
//! input symbol consumed per step, first matching transition wins, acceptance
//! decided by the current state's final flag once the input is exhausted.

use crate::simulator::Simulator;
use crate::types::{
    Automaton, SimulationError, SimulationState, StepSnapshot, Transition,
};

/// Step-wise DFA interpreter over one automaton.
///
/// A missing transition rejects immediately, even with input left to consume.
/// The end-of-input acceptance check runs lazily on the step after the last
/// symbol, except that a step which consumes the final symbol performs the
/// check before returning, so the verdict lands in the same step.
pub struct DfaSimulator {
    automaton: Automaton,
    symbols: Vec<char>,
    state: Option<SimulationState>,
}

impl DfaSimulator {
    pub fn new(automaton: Automaton) -> Self {
        Self {
            automaton,
            symbols: Vec::new(),
            state: None,
        }
    }

    /// The automaton this engine is bound to.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

impl Simulator for DfaSimulator {
    fn start(&mut self, input: &str) -> Result<&SimulationState, SimulationError> {
        let initial = self
            .automaton
            .initial_state()
            .ok_or(SimulationError::NoInitialState)?;

        self.symbols = input.chars().collect();

        let mut state = SimulationState {
            current_state: initial.id.clone(),
            input: input.to_string(),
            position: 0,
            stack: None,
            tape: None,
            tape_position: None,
            accepted: None,
            finished: false,
            history: Vec::new(),
        };
        let snapshot = StepSnapshot::capture(&state, None);
        state.history.push(snapshot);

        Ok(self.state.insert(state))
    }

    fn step(&mut self) -> Result<&SimulationState, SimulationError> {
        let state = match self.state.as_mut() {
            Some(state) if !state.finished => state,
            _ => return Err(SimulationError::Inactive),
        };

        // Lazy end-of-input check: only reachable as a standalone step when
        // the input was empty to begin with, since a consuming step that
        // exhausts the input settles the verdict itself below.
        if state.position >= self.symbols.len() {
            state.accepted = Some(self.automaton.is_final(&state.current_state));
            state.finished = true;
            let snapshot = StepSnapshot::capture(state, None);
            state.history.push(snapshot);
            return Ok(state);
        }

        let symbol = self.symbols[state.position];
        let transition = self
            .automaton
            .transitions
            .iter()
            .find(|t| match t {
                Transition::Dfa { from, symbol: s, .. } => {
                    *from == state.current_state && *s == symbol
                }
                _ => false,
            })
            .cloned();

        let transition = match transition {
            Some(t) => t,
            None => {
                state.accepted = Some(false);
                state.finished = true;
                let snapshot = StepSnapshot::capture(state, None);
                state.history.push(snapshot);
                return Ok(state);
            }
        };

        state.current_state = transition.to().to_string();
        state.position += 1;

        let snapshot = StepSnapshot::capture(state, Some(transition));
        state.history.push(snapshot);

        if state.position >= self.symbols.len() {
            state.accepted = Some(self.automaton.is_final(&state.current_state));
            state.finished = true;
        }

        Ok(state)
    }

    fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    fn reset(&mut self) {
        self.state = None;
        self.symbols.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AutomatonKind, State};

    fn state(id: &str, is_initial: bool, is_final: bool) -> State {
        State {
            id: id.to_string(),
            label: id.to_string(),
            is_initial,
            is_final,
        }
    }

    fn dfa_transition(from: &str, to: &str, symbol: char) -> Transition {
        Transition::Dfa {
            from: from.to_string(),
            to: to.to_string(),
            symbol,
        }
    }

    /// q0 --a--> q1, with q1 final.
    fn two_state_dfa() -> Automaton {
        Automaton {
            name: "single-a".to_string(),
            kind: AutomatonKind::Dfa,
            states: vec![state("q0", true, false), state("q1", false, true)],
            transitions: vec![dfa_transition("q0", "q1", 'a')],
            alphabet: vec!['a'],
        }
    }

    #[test]
    fn test_start_locates_initial_state() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        let state = sim.start("a").unwrap();

        assert_eq!(state.current_state, "q0");
        assert_eq!(state.position, 0);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.accepted, None);
        assert!(!state.finished);
    }

    #[test]
    fn test_start_without_initial_state_fails() {
        let mut automaton = two_state_dfa();
        automaton.states[0].is_initial = false;

        let mut sim = DfaSimulator::new(automaton);
        assert_eq!(sim.start("a"), Err(SimulationError::NoInitialState));
        assert!(sim.state().is_none());
    }

    #[test]
    fn test_accepts_in_the_step_that_consumes_the_last_symbol() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("a").unwrap();

        let state = sim.step().unwrap();
        assert_eq!(state.current_state, "q1");
        assert_eq!(state.accepted, Some(true));
        assert!(state.finished);
    }

    #[test]
    fn test_empty_input_decided_on_first_step() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("").unwrap();

        // q0 is not final, so the immediate end-of-input check rejects.
        let state = sim.step().unwrap();
        assert_eq!(state.accepted, Some(false));
        assert!(state.finished);
        assert_eq!(state.current_state, "q0");
    }

    #[test]
    fn test_empty_input_accepted_when_initial_is_final() {
        let mut automaton = two_state_dfa();
        automaton.states[0].is_final = true;

        let mut sim = DfaSimulator::new(automaton);
        sim.start("").unwrap();

        let state = sim.step().unwrap();
        assert_eq!(state.accepted, Some(true));
    }

    #[test]
    fn test_missing_transition_rejects_with_input_remaining() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("ba").unwrap();

        let state = sim.step().unwrap();
        assert_eq!(state.accepted, Some(false));
        assert!(state.finished);
        // The rejecting step consumed nothing.
        assert_eq!(state.position, 0);
    }

    #[test]
    fn test_first_matching_transition_wins() {
        let mut automaton = two_state_dfa();
        automaton.states.push(state("q2", false, false));
        automaton
            .transitions
            .push(dfa_transition("q0", "q2", 'a'));

        let mut sim = DfaSimulator::new(automaton);
        sim.start("a").unwrap();

        let state = sim.step().unwrap();
        assert_eq!(state.current_state, "q1");
    }

    #[test]
    fn test_step_count_bounded_by_input_length_plus_one() {
        // Self-loop that never rejects.
        let automaton = Automaton {
            name: "loop".to_string(),
            kind: AutomatonKind::Dfa,
            states: vec![state("q0", true, false)],
            transitions: vec![dfa_transition("q0", "q0", 'a')],
            alphabet: vec!['a'],
        };

        let input = "aaaa";
        let mut sim = DfaSimulator::new(automaton);
        sim.start(input).unwrap();

        let mut steps = 0;
        while !sim.state().unwrap().finished {
            sim.step().unwrap();
            steps += 1;
        }

        assert!(steps <= input.len() + 1);
        assert_eq!(sim.state().unwrap().accepted, Some(false));
    }

    #[test]
    fn test_step_after_finished_fails_and_preserves_history() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("a").unwrap();
        sim.step().unwrap();

        let history_before = sim.state().unwrap().history.clone();
        assert_eq!(sim.step(), Err(SimulationError::Inactive));
        assert_eq!(sim.state().unwrap().history, history_before);
    }

    #[test]
    fn test_step_before_start_fails() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        assert_eq!(sim.step(), Err(SimulationError::Inactive));
    }

    #[test]
    fn test_history_length_tracks_calls() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("a").unwrap();
        assert_eq!(sim.state().unwrap().history.len(), 1);

        sim.step().unwrap();
        assert_eq!(sim.state().unwrap().history.len(), 2);

        // Terminal-only step on empty input also snapshots.
        sim.start("").unwrap();
        sim.step().unwrap();
        assert_eq!(sim.state().unwrap().history.len(), 2);
    }

    #[test]
    fn test_history_records_transitions_taken() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("a").unwrap();
        sim.step().unwrap();

        let history = &sim.state().unwrap().history;
        assert!(history[0].transition.is_none());
        assert_eq!(
            history[1].transition,
            Some(dfa_transition("q0", "q1", 'a'))
        );
    }

    #[test]
    fn test_reset_discards_run() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("a").unwrap();
        sim.reset();

        assert!(sim.state().is_none());
        assert_eq!(sim.step(), Err(SimulationError::Inactive));
    }

    #[test]
    fn test_restart_replaces_run() {
        let mut sim = DfaSimulator::new(two_state_dfa());
        sim.start("a").unwrap();
        sim.step().unwrap();

        let state = sim.start("a").unwrap();
        assert!(!state.finished);
        assert_eq!(state.history.len(), 1);
    }
}
