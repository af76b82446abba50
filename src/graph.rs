/*
Implements:
 - the graph description handed to the solver (nodes, edges, palette size)
 - validation performed before calling the solver
 - readers for JSON and DIMACS instances
 - a seeded random graph generator
*/
use std::collections::HashSet;
use std::fs;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use crate::color::NodeId;
use crate::dimacs;
use crate::error::InputError;

/** graph coloring problem: the node order is the search order */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// node identifiers (distinct, in search order)
    pub nodes: Vec<NodeId>,
    /// undirected edges
    pub edges: Vec<(NodeId, NodeId)>,
    /// number of colors available
    pub num_colors: usize,
}

impl GraphDescription {
    /** creates a graph description */
    pub fn new(nodes:Vec<NodeId>, edges:Vec<(NodeId,NodeId)>, num_colors:usize) -> Self {
        Self { nodes, edges, num_colors }
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.nodes.len() }

    /// number of edges (as given, duplicates included)
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// same graph with another palette size
    pub fn with_colors(mut self, num_colors:usize) -> Self {
        self.num_colors = num_colors;
        self
    }

    /**
    rejects inputs the solver is not meant to receive:
    no node, no color, or a node declared twice.
    Edge endpoints are checked by the solver itself.
    */
    pub fn validate(&self) -> Result<(), InputError> {
        if self.num_colors < 1 {
            return Err(InputError::NoColors);
        }
        if self.nodes.is_empty() {
            return Err(InputError::NoNodes);
        }
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for u in &self.nodes {
            if !seen.insert(*u) {
                return Err(InputError::DuplicateNode(*u));
            }
        }
        Ok(())
    }

    /// reads a JSON description `{"nodes": [...], "edges": [[u,v], ...], "num_colors": k}`
    pub fn from_json_str(s:&str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(s)?)
    }

    /// reads a JSON description from a file
    pub fn from_json_file(filename:&str) -> Result<Self, InputError> {
        let s = fs::read_to_string(filename)?;
        Self::from_json_str(&s)
    }

    /** creates a description from a DIMACS file. DIMACS files carry no palette,
    so the number of colors is given by the caller. Nodes are 1..=n in order. */
    pub fn from_dimacs_file(filename:&str, num_colors:usize) -> Result<Self, InputError> {
        let (n, _, edges) = dimacs::read_from_file(filename)?;
        Ok(Self::from_dimacs(n, edges, num_colors))
    }

    /// creates a description from parsed DIMACS content (n, edge list with 1-based ids)
    pub fn from_dimacs(n:usize, edges:Vec<(usize,usize)>, num_colors:usize) -> Self {
        let nodes = (1..=n as NodeId).collect();
        let edges = edges.into_iter()
            .map(|(a,b)| (a as NodeId, b as NodeId))
            .collect();
        Self { nodes, edges, num_colors }
    }
}


/**
random graph G(n,p) with nodes 0..n. Each pair {i,j} is an edge with probability p.
The same seed always produces the same graph.

# Panics
if `p` is not in [0, 1].
*/
pub fn random_graph(n:usize, p:f64, num_colors:usize, seed:u64) -> GraphDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes:Vec<NodeId> = (0..n as NodeId).collect();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i+1)..n {
            if rng.gen_bool(p) {
                edges.push((i as NodeId, j as NodeId));
            }
        }
    }
    GraphDescription { nodes, edges, num_colors }
}
