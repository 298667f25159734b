//! This crate provides the execution core of an automata workbench: three
//! step-wise interpreters — deterministic finite automata, pushdown automata,
//! and Turing machines — over a shared automaton description. Each engine
//! advances one computation step per call and records an append-only history
//! of snapshots for replay and inspection.
//!
//! Rendering, editing, transport, and persistence of automata are external
//! collaborators; this crate only consumes a structurally-valid [`Automaton`]
//! value and never performs I/O.

pub mod analyzer;
pub mod dfa;
pub mod machines;
pub mod pda;
pub mod simulator;
pub mod turing;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `DfaSimulator` struct from the dfa module.
pub use dfa::DfaSimulator;
/// Re-exports the `PdaSimulator` struct from the pda module.
pub use pda::PdaSimulator;
/// Re-exports the `Simulator` trait and engine factory from the simulator module.
pub use simulator::{simulator_for, Simulator};
/// Re-exports the `TuringSimulator` struct from the turing module.
pub use turing::TuringSimulator;
/// Re-exports the automaton and simulation data model from the types module.
pub use types::{
    Automaton, AutomatonKind, Direction, SimulationError, SimulationState, State, StepSnapshot,
    Transition, BLANK_SYMBOL, STACK_BOTTOM_SYMBOL,
};
