use std::collections::HashMap;

use crate::color::NodeId;
use crate::error::SolverError;

/**
Adjacency structure of a graph, read-only once built.
Vertices are addressed by their position in the node list (the search order).
*/
#[derive(Debug, Clone)]
pub struct Adjacency {
    /// nodes[i]: identifier of the vertex at position i
    nodes: Vec<NodeId>,
    /// index[u]: position of node u
    index: HashMap<NodeId, usize>,
    /// adj_list[i]: positions adjacent to i (sorted, without duplicates)
    adj_list: Vec<Vec<usize>>,
    /// nb distinct edges
    m: usize,
}

impl Adjacency {
    /**
    builds the adjacency from the node list and the edge list. Every node gets an entry
    (possibly empty). Each edge is inserted in both directions, duplicates collapse.

    Fails with `InvalidEdge` if an endpoint is not in the node list.
    Node identifiers are expected to be distinct; a repeated identifier refers to its first position.
    */
    pub fn build(nodes:&[NodeId], edges:&[(NodeId,NodeId)]) -> Result<Self, SolverError> {
        let n = nodes.len();
        let mut index = HashMap::with_capacity(n);
        for (i,u) in nodes.iter().enumerate() {
            index.entry(*u).or_insert(i);
        }
        let position = |u:NodeId, edge:(NodeId,NodeId)| -> Result<usize, SolverError> {
            index.get(&u).copied().ok_or(SolverError::InvalidEdge { node: u, edge })
        };
        let mut adj_list:Vec<Vec<usize>> = vec![Vec::new() ; n];
        for (u,v) in edges {
            let a = position(*u, (*u,*v))?;
            let b = position(*v, (*u,*v))?;
            adj_list[a].push(b);
            if a != b { adj_list[b].push(a); }
        }
        let mut sum_degrees = 0;
        let mut nb_loops = 0;
        for (i,l) in adj_list.iter_mut().enumerate() {
            l.sort_unstable();
            l.dedup();
            sum_degrees += l.len();
            if l.binary_search(&i).is_ok() { nb_loops += 1; }
        }
        let m = (sum_degrees + nb_loops) / 2; // loops are counted once in ∑ d(v)
        let res = Self { nodes:nodes.to_vec(), index, adj_list, m };
        log::debug!(
            "adjacency built: {} vertices, {} edges, degree in [{}, {}]",
            res.nb_vertices(), res.nb_edges(), res.min_degree(), res.max_degree()
        );
        Ok(res)
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.nodes.len() }

    /// number of distinct edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// identifier of the vertex at position i
    pub fn node(&self, i:usize) -> NodeId { self.nodes[i] }

    /// identifiers, in search order
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }

    /// position of node u (if it belongs to the graph)
    pub fn position(&self, u:NodeId) -> Option<usize> { self.index.get(&u).copied() }

    /// positions adjacent to position i
    pub fn neighbors(&self, i:usize) -> &[usize] { &self.adj_list[i] }

    /// smallest degree (0 if the graph is empty)
    pub fn min_degree(&self) -> usize { self.adj_list.iter().map(Vec::len).min().unwrap_or(0) }

    /// largest degree (0 if the graph is empty)
    pub fn max_degree(&self) -> usize { self.adj_list.iter().map(Vec::len).max().unwrap_or(0) }

    /// print statistics of the graph
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        println!("\t{} \t min degree", self.min_degree());
        println!("\t{} \t max degree", self.max_degree());
    }
}
