//! This module provides optional eager validation of an automaton's structure
//! before simulation. The engines themselves never call it: a dangling
//! transition endpoint simply finds no match during stepping, which the
//! rejection paths already handle. Editing front-ends that prefer failing
//! fast can run `analyze` on a freshly built automaton instead.

use crate::types::{Automaton, AutomatonKind, Transition};
use std::collections::HashSet;
use thiserror::Error;

/// Structural problems `analyze` can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No state carries the initial marking.
    #[error("no state is marked initial")]
    NoInitialState,
    /// More than one state carries the initial marking; the engines would
    /// silently pick the first, so flag it here.
    #[error("multiple states are marked initial: {0:?}")]
    MultipleInitialStates(Vec<String>),
    /// Two or more states share an id.
    #[error("duplicate state ids: {0:?}")]
    DuplicateStateIds(Vec<String>),
    /// Transitions whose variant disagrees with the automaton's kind tag,
    /// by index into the transition list.
    #[error("transitions {0:?} do not match the automaton kind")]
    MismatchedTransitions(Vec<usize>),
    /// Transition endpoints referencing ids with no corresponding state.
    #[error("transitions reference undefined states: {0:?}")]
    UndefinedEndpoints(Vec<String>),
    /// States that no transition path from the initial state can reach.
    #[error("unreachable states: {0:?}")]
    UnreachableStates(Vec<String>),
}

/// Validates an automaton's structure, returning the first problem found.
///
/// Checks run in order from cheapest to most involved: duplicate ids, the
/// initial marking, transition variant agreement, endpoint references, and
/// reachability from the initial state.
pub fn analyze(automaton: &Automaton) -> Result<(), AnalysisError> {
    [
        check_duplicate_ids,
        check_initial_marking,
        check_transition_kinds,
        check_endpoints,
        check_unreachable_states,
    ]
    .iter()
    .find_map(|check| check(automaton).err())
    .map_or(Ok(()), Err)
}

fn check_duplicate_ids(automaton: &Automaton) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = automaton
        .states
        .iter()
        .filter(|s| !seen.insert(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect();

    if !duplicates.is_empty() {
        duplicates.sort();
        duplicates.dedup();
        return Err(AnalysisError::DuplicateStateIds(duplicates));
    }

    Ok(())
}

fn check_initial_marking(automaton: &Automaton) -> Result<(), AnalysisError> {
    let initial: Vec<String> = automaton
        .states
        .iter()
        .filter(|s| s.is_initial)
        .map(|s| s.id.clone())
        .collect();

    match initial.len() {
        0 => Err(AnalysisError::NoInitialState),
        1 => Ok(()),
        _ => Err(AnalysisError::MultipleInitialStates(initial)),
    }
}

fn check_transition_kinds(automaton: &Automaton) -> Result<(), AnalysisError> {
    let mismatched: Vec<usize> = automaton
        .transitions
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            !matches!(
                (automaton.kind, t),
                (AutomatonKind::Dfa, Transition::Dfa { .. })
                    | (AutomatonKind::Pda, Transition::Pda { .. })
                    | (AutomatonKind::Turing, Transition::Turing { .. })
            )
        })
        .map(|(i, _)| i)
        .collect();

    if !mismatched.is_empty() {
        return Err(AnalysisError::MismatchedTransitions(mismatched));
    }

    Ok(())
}

fn check_endpoints(automaton: &Automaton) -> Result<(), AnalysisError> {
    let known: HashSet<&str> = automaton.states.iter().map(|s| s.id.as_str()).collect();

    let mut undefined: Vec<String> = automaton
        .transitions
        .iter()
        .flat_map(|t| [t.from(), t.to()])
        .filter(|id| !known.contains(id))
        .map(str::to_string)
        .collect();

    if !undefined.is_empty() {
        undefined.sort();
        undefined.dedup();
        return Err(AnalysisError::UndefinedEndpoints(undefined));
    }

    Ok(())
}

fn check_unreachable_states(automaton: &Automaton) -> Result<(), AnalysisError> {
    let initial = match automaton.initial_state() {
        Some(state) => state.id.clone(),
        // The initial-marking check reports this case.
        None => return Ok(()),
    };

    let mut visited = HashSet::new();
    let mut queue = vec![initial];

    while let Some(id) = queue.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }

        for t in &automaton.transitions {
            if t.from() == id && !visited.contains(t.to()) {
                queue.push(t.to().to_string());
            }
        }
    }

    let mut unreachable: Vec<String> = automaton
        .states
        .iter()
        .filter(|s| !visited.contains(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort();
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}
