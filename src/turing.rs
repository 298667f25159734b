//! This module implements the Turing machine engine: a single tape growing
//! transparently in both directions, write-then-move transitions, and
//! immediate acceptance on entering a final state.

use crate::simulator::Simulator;
use crate::types::{
    Automaton, Direction, SimulationError, SimulationState, StepSnapshot, Transition, BLANK_SYMBOL,
};

/// Step-wise Turing machine interpreter over one automaton.
///
/// Halting happens two ways only: no transition matches the cell under the
/// head (verdict = the current state's final flag), or a transition enters a
/// final state (verdict = accepted, unconditionally). A machine with no final
/// state and no dead transition never halts; that is a property of the
/// modeled machine, and callers guard against it with the `run` budget.
pub struct TuringSimulator {
    automaton: Automaton,
    state: Option<SimulationState>,
}

impl TuringSimulator {
    pub fn new(automaton: Automaton) -> Self {
        Self {
            automaton,
            state: None,
        }
    }

    /// The automaton this engine is bound to.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }
}

impl Simulator for TuringSimulator {
    fn start(&mut self, input: &str) -> Result<&SimulationState, SimulationError> {
        let initial = self
            .automaton
            .initial_state()
            .ok_or(SimulationError::NoInitialState)?;

        let mut tape: Vec<char> = input.chars().collect();
        if tape.is_empty() {
            tape.push(BLANK_SYMBOL);
        }

        let mut state = SimulationState {
            current_state: initial.id.clone(),
            input: input.to_string(),
            position: 0,
            stack: None,
            tape: Some(tape),
            tape_position: Some(0),
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
        let position = match state.tape_position {
            Some(position) if state.tape.is_some() => position,
            _ => return Err(SimulationError::Inactive),
        };

        let symbol = match state.tape.as_mut() {
            Some(tape) => {
                // The growth logic below keeps the head in bounds, but read
                // defensively through the blank default anyway.
                if position >= tape.len() {
                    tape.resize(position + 1, BLANK_SYMBOL);
                }
                tape[position]
            }
            None => return Err(SimulationError::Inactive),
        };

        let matched = self.automaton.transitions.iter().find_map(|t| match t {
            Transition::Turing {
                from,
                to,
                read,
                write,
                direction,
            } if *from == state.current_state && *read == symbol => {
                Some((to.clone(), *write, *direction, t.clone()))
            }
            _ => None,
        });

        let (to, write, direction, transition) = match matched {
            Some(m) => m,
            None => {
                // Unlike the DFA, a dead transition is not rejection by
                // default: the verdict is the current state's final flag.
                state.accepted = Some(self.automaton.is_final(&state.current_state));
                state.finished = true;
                let snapshot = StepSnapshot::capture(state, None);
                state.history.push(snapshot);
                return Ok(state);
            }
        };

        if let Some(tape) = state.tape.as_mut() {
            tape[position] = write;

            let new_position = match direction {
                Direction::Left => {
                    if position == 0 {
                        // Grow leftward: absolute indices in past snapshots
                        // stay meaningful only relative to their own tape copy.
                        tape.insert(0, BLANK_SYMBOL);
                        0
                    } else {
                        position - 1
                    }
                }
                Direction::Right => {
                    let next = position + 1;
                    if next >= tape.len() {
                        tape.push(BLANK_SYMBOL);
                    }
                    next
                }
                Direction::Stay => position,
            };
            state.tape_position = Some(new_position);
        }

        state.current_state = to;

        let snapshot = StepSnapshot::capture(state, Some(transition));
        state.history.push(snapshot);

        if self.automaton.is_final(&state.current_state) {
            state.accepted = Some(true);
            state.finished = true;
        }

        Ok(state)
    }

    fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    fn reset(&mut self) {
        self.state = None;
    }
}
