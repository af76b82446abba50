//! Backtracking search for the graph coloring problem.

/// depth-first assign/undo search with trace collection
pub mod backtracking;

/// step log, solve results and trace replay
pub mod trace;

/// stopping criteria (step and time ceilings)
pub mod stopping;
