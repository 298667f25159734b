//! This module ships a small catalog of ready-made automata, one per machine
//! kind, so front-ends have something to load before the user builds their
//! own. The definitions are constructed in code; there is no text format to
//! parse.

use crate::types::{Automaton, AutomatonKind, Direction, State, Transition, BLANK_SYMBOL};

lazy_static::lazy_static! {
    static ref MACHINES: Vec<Automaton> = vec![
        ends_with_b(),
        balanced_parentheses(),
        binary_increment(),
    ];
}

/// All built-in machines, in catalog order.
pub fn all() -> &'static [Automaton] {
    &MACHINES
}

/// The number of built-in machines.
pub fn count() -> usize {
    MACHINES.len()
}

/// Looks up a built-in machine by its exact name.
pub fn by_name(name: &str) -> Option<&'static Automaton> {
    MACHINES.iter().find(|m| m.name == name)
}

/// The names of all built-in machines, in catalog order.
pub fn names() -> Vec<&'static str> {
    MACHINES.iter().map(|m| m.name.as_str()).collect()
}

/// Case-insensitive substring search over machine names.
pub fn search(query: &str) -> Vec<&'static Automaton> {
    let query = query.to_lowercase();
    MACHINES
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&query))
        .collect()
}

fn state(id: &str, label: &str, is_initial: bool, is_final: bool) -> State {
    State {
        id: id.to_string(),
        label: label.to_string(),
        is_initial,
        is_final,
    }
}

/// DFA over {a, b} accepting every string that ends with 'b'.
fn ends_with_b() -> Automaton {
    let dfa = |from: &str, to: &str, symbol: char| Transition::Dfa {
        from: from.to_string(),
        to: to.to_string(),
        symbol,
    };

    Automaton {
        name: "Ends With b".to_string(),
        kind: AutomatonKind::Dfa,
        states: vec![
            state("s0", "seen a", true, false),
            state("s1", "seen b", false, true),
        ],
        transitions: vec![
            dfa("s0", "s0", 'a'),
            dfa("s0", "s1", 'b'),
            dfa("s1", "s0", 'a'),
            dfa("s1", "s1", 'b'),
        ],
        alphabet: vec!['a', 'b'],
    }
}

/// PDA accepting balanced parentheses: push X on '(', pop X on ')'. The
/// single state is both initial and final, so acceptance falls out of the
/// final-state half of the disjunctive rule once the input is consumed.
fn balanced_parentheses() -> Automaton {
    Automaton {
        name: "Balanced Parentheses".to_string(),
        kind: AutomatonKind::Pda,
        states: vec![state("q0", "loop", true, true)],
        transitions: vec![
            Transition::Pda {
                from: "q0".to_string(),
                to: "q0".to_string(),
                input: Some('('),
                pop: None,
                push: Some("X".to_string()),
            },
            Transition::Pda {
                from: "q0".to_string(),
                to: "q0".to_string(),
                input: Some(')'),
                pop: Some('X'),
                push: None,
            },
        ],
        alphabet: vec!['(', ')'],
    }
}

/// Turing machine adding one to a binary number: scan right to the end, then
/// walk left flipping 1s to 0s until a 0 (or the left edge) absorbs the carry.
fn binary_increment() -> Automaton {
    let tm = |from: &str, to: &str, read: char, write: char, direction: Direction| {
        Transition::Turing {
            from: from.to_string(),
            to: to.to_string(),
            read,
            write,
            direction,
        }
    };

    Automaton {
        name: "Binary Increment".to_string(),
        kind: AutomatonKind::Turing,
        states: vec![
            state("scan", "scan right", true, false),
            state("carry", "add carry", false, false),
            state("done", "done", false, true),
        ],
        transitions: vec![
            tm("scan", "scan", '0', '0', Direction::Right),
            tm("scan", "scan", '1', '1', Direction::Right),
            tm("scan", "carry", BLANK_SYMBOL, BLANK_SYMBOL, Direction::Left),
            tm("carry", "carry", '1', '0', Direction::Left),
            tm("carry", "done", '0', '1', Direction::Stay),
            tm("carry", "done", BLANK_SYMBOL, '1', Direction::Stay),
        ],
        alphabet: vec!['0', '1'],
    }
}
