//! This crate provides the core of a nondeterministic Turing Machine simulator.
//! It explores every computation of a machine on an input breadth-first, one transition per
//! generation, within a step budget, and reconstructs the shortest accepting computation
//! when there is one.

pub mod analyzer;
pub mod configuration;
pub mod explorer;
pub mod machine;
pub mod path;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports configuration types from the configuration module.
pub use configuration::{ConfigId, Configuration, Expansion, History};
/// Re-exports the scheduler and its results from the explorer module.
pub use explorer::{Explorer, Report, Run, Stats};
/// Re-exports the machine description and its builder from the machine module.
pub use machine::{Machine, MachineBuilder};
/// Re-exports the `reconstruct` function from the path module.
pub use path::reconstruct;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports `Rule` and `TransitionTable` from the table module.
pub use table::{Rule, TransitionTable};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared types from the types module.
pub use types::{
    Mode, Move, NtmError, Outcome, State, Step, Symbol, BLANK, DEFAULT_STEP_BUDGET,
};
