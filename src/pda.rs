//! This module implements the pushdown automaton engine: input cursor plus a
//! stack seeded with a bottom marker, ε-transitions that consume no input, and
//! a disjunctive final-state-or-empty-stack acceptance rule.

use crate::simulator::Simulator;
use crate::types::{
    Automaton, SimulationError, SimulationState, StepSnapshot, Transition, STACK_BOTTOM_SYMBOL,
};

/// A transition that fired against the current state, input symbol, and stack
/// top, with its PDA payload pulled out for the apply phase.
struct Candidate<'a> {
    input: Option<char>,
    pop: Option<char>,
    push: Option<&'a str>,
    to: &'a str,
    transition: &'a Transition,
}

/// Step-wise PDA interpreter over one automaton.
///
/// Transition choice is a single-path greedy heuristic: among the transitions
/// whose input and pop symbols fit, one that consumes the real current symbol
/// beats one using ε-input, first in transition order either way. Only that
/// one path is ever explored — there is no backtracking across choice points,
/// so this engine can reject strings a true nondeterministic PDA would accept.
/// That divergence is deliberate and must survive any refactor.
///
/// A run ends when no transition fits; it is accepted when the current state
/// is final *or* the stack is empty, provided all input was consumed. The two
/// classical acceptance modes are combined disjunctively on purpose.
pub struct PdaSimulator {
    automaton: Automaton,
    symbols: Vec<char>,
    state: Option<SimulationState>,
}

impl PdaSimulator {
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

impl Simulator for PdaSimulator {
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
            stack: Some(vec![STACK_BOTTOM_SYMBOL]),
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

        // ε stands in for the input symbol once the cursor runs off the end:
        // the machine may keep taking ε-transitions after the input is gone.
        let current = if state.position < self.symbols.len() {
            Some(self.symbols[state.position])
        } else {
            None
        };
        let top = state.stack.as_ref().and_then(|stack| stack.last().copied());

        let candidates: Vec<Candidate> = self
            .automaton
            .transitions
            .iter()
            .filter_map(|t| match t {
                Transition::Pda {
                    from,
                    to,
                    input,
                    pop,
                    push,
                } if *from == state.current_state
                    && (*input == current || input.is_none())
                    && (*pop == top || pop.is_none()) =>
                {
                    Some(Candidate {
                        input: *input,
                        pop: *pop,
                        push: push.as_deref(),
                        to: to.as_str(),
                        transition: t,
                    })
                }
                _ => None,
            })
            .collect();

        // Greedy tie-break: a real-symbol match wins over ε-input.
        let chosen = candidates
            .iter()
            .find(|c| c.input.is_some() && c.input == current)
            .or_else(|| candidates.iter().find(|c| c.input.is_none()));

        let chosen = match chosen {
            Some(c) => c,
            None => {
                let input_consumed = state.position >= self.symbols.len();
                let stack_empty = state.stack.as_ref().is_none_or(|stack| stack.is_empty());
                let is_final = self.automaton.is_final(&state.current_state);

                state.accepted = Some((is_final || stack_empty) && input_consumed);
                state.finished = true;
                let snapshot = StepSnapshot::capture(state, None);
                state.history.push(snapshot);
                return Ok(state);
            }
        };

        if chosen.pop.is_some() {
            if let Some(stack) = state.stack.as_mut() {
                stack.pop();
            }
        }

        if let Some(push) = chosen.push {
            let stack = state.stack.get_or_insert_with(Vec::new);
            // Reversed so the first character of the push string lands on top.
            for symbol in push.chars().rev() {
                stack.push(symbol);
            }
        }

        state.current_state = chosen.to.to_string();

        // ε-input transitions leave the cursor where it is.
        if chosen.input.is_some() {
            state.position += 1;
        }

        let transition = chosen.transition.clone();
        let snapshot = StepSnapshot::capture(state, Some(transition));
        state.history.push(snapshot);

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
