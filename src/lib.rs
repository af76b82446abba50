//! Backtracking graph coloring with a complete search trace

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// node & color types, colorings and checker
pub mod color;

/// graph description given to the solver
pub mod graph;

/// adjacency structure built once per solve
pub mod adjacency;

/// read DIMACS formats
pub mod dimacs;

/// solver and input errors
pub mod error;

/// helper and utility methods for executables
pub mod util;

/// backtracking search, trace and stopping criteria
pub mod search;
