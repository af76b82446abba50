//! Error types for the coloring solver and its command-line collaborator.

use thiserror::Error;

use crate::color::NodeId;

/// Errors raised by the coloring solver itself.
///
/// "No valid coloring" is not an error: it is reported through
/// [`SolveResult::success`](crate::search::trace::SolveResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// an edge references a node outside the declared node set
    #[error("invalid edge {edge:?}: node {node} is not in the node set")]
    InvalidEdge {
        /// offending endpoint
        node: NodeId,
        /// edge as given in the input
        edge: (NodeId, NodeId),
    },
}

/// Errors raised while reading and validating a problem before it reaches the solver.
#[derive(Error, Debug)]
pub enum InputError {
    /// file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON instance or result could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// DIMACS file is malformed
    #[error("malformed DIMACS file: {0}")]
    Dimacs(String),

    /// command line parameter could not be parsed
    #[error("invalid value for --{name}: {value}")]
    InvalidParameter {
        /// parameter name
        name: String,
        /// value given
        value: String,
    },

    /// instance format unknown
    #[error("instance type unknown {0}")]
    UnknownInstanceType(String),

    /// graph has no node
    #[error("graph must have at least one node")]
    NoNodes,

    /// palette is empty
    #[error("number of colors must be at least 1")]
    NoColors,

    /// a node identifier appears twice in the node list
    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),

    /// error reported by the solver
    #[error(transparent)]
    Solver(#[from] SolverError),
}

impl InputError {
    /// Creates an invalid parameter error.
    pub fn parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        InputError::InvalidParameter {
            name: name.into(),
            value: value.into(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_edge_names_endpoint() {
        let e = SolverError::InvalidEdge { node: 3, edge: (1, 3) };
        assert_eq!(e.to_string(), "invalid edge (1, 3): node 3 is not in the node set");
    }

    #[test]
    fn test_solver_error_is_transparent() {
        let e: InputError = SolverError::InvalidEdge { node: 7, edge: (7, 2) }.into();
        assert_eq!(e.to_string(), "invalid edge (7, 2): node 7 is not in the node set");
        assert!(matches!(e, InputError::Solver(SolverError::InvalidEdge { node: 7, .. })));
    }
}
