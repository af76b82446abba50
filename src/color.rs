use std::fmt;

use bit_set::BitSet;
use serde::{Serialize, Serializer, Deserialize, Deserializer};
use serde::de::{MapAccess, Visitor};

use crate::adjacency::Adjacency;
use crate::error::SolverError;
use crate::graph::GraphDescription;

/** Vertex Id (opaque identifier given by the caller) */
pub type NodeId = i64;

/** Color (integer in [0, num_colors)) */
pub type Color = usize;

/** Solution of a graph coloring problem
(represented as a partition: res[c] lists the vertices colored c).
*/
pub type Solution = Vec<Vec<NodeId>>;

/**
Assignment node -> color.
Entries keep the order in which the nodes were colored, which is the node order of the input
for a complete coloring. Serialized as a JSON object `{"node": color, ...}`.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coloring {
    entries: Vec<(NodeId, Color)>,
}

impl Coloring {
    /// creates a coloring from (node, color) pairs
    pub fn from_entries(entries:Vec<(NodeId, Color)>) -> Self { Self { entries } }

    /// number of colored nodes
    pub fn len(&self) -> usize { self.entries.len() }

    /// true iff no node is colored
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// (node, color) pairs
    pub fn entries(&self) -> &[(NodeId, Color)] { &self.entries }

    /// iterates over (node, color) pairs
    pub fn iter(&self) -> impl Iterator<Item=&(NodeId, Color)> { self.entries.iter() }

    /// color of node u (if colored)
    pub fn get(&self, u:NodeId) -> Option<Color> {
        self.entries.iter().find(|(v,_)| *v == u).map(|(_,c)| *c)
    }

    /// colors node u (replaces its color if already colored)
    pub fn insert(&mut self, u:NodeId, c:Color) {
        match self.entries.iter_mut().find(|(v,_)| *v == u) {
            Some(entry) => entry.1 = c,
            None => self.entries.push((u,c)),
        }
    }

    /// uncolors node u, returns its previous color
    pub fn remove(&mut self, u:NodeId) -> Option<Color> {
        let pos = self.entries.iter().position(|(v,_)| *v == u)?;
        Some(self.entries.remove(pos).1)
    }

    /// number of distinct colors used
    pub fn nb_colors(&self) -> usize {
        let mut used = BitSet::new();
        for (_,c) in &self.entries { used.insert(*c); }
        used.len()
    }

    /** partition representation (res[c]: nodes colored c). Colors that are not used
    yield an empty class. */
    pub fn to_partition(&self) -> Solution {
        let nb_classes = self.entries.iter().map(|(_,c)| c+1).max().unwrap_or(0);
        let mut res = vec![vec![] ; nb_classes];
        for (u,c) in &self.entries {
            res[*c].push(*u);
        }
        res
    }
}

impl Serialize for Coloring {
    fn serialize<S:Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(u,c)| (u,c)))
    }
}

struct ColoringVisitor;

impl<'de> Visitor<'de> for ColoringVisitor {
    type Value = Coloring;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from node to color")
    }

    fn visit_map<A:MapAccess<'de>>(self, mut map: A) -> Result<Coloring, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((u,c)) = map.next_entry::<NodeId, Color>()? {
            entries.push((u,c));
        }
        Ok(Coloring { entries })
    }
}

impl<'de> Deserialize<'de> for Coloring {
    fn deserialize<D:Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ColoringVisitor)
    }
}


/** result of the checker. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// coloring is valid, returns the number of colors used
    Ok(usize),
    /// vertex colored more than once
    VertexAddedTwice(NodeId),
    /// vertex of the graph without a color
    VertexNotColored(NodeId),
    /// colored vertex that does not belong to the graph
    UnknownVertex(NodeId),
    /// color outside of the palette
    ColorOutOfRange(NodeId, Color),
    /// both endpoints of an edge share the same color
    ConflictingEdge(NodeId, NodeId),
}

/**
checks that a coloring is complete and proper for the given graph.
returns the first violation found (colored vertices in coloring order, then uncolored vertices
in input order, then edges by position of their first endpoint).
An edge endpoint outside the graph is reported as `UnknownVertex`.
*/
pub fn checker(graph:&GraphDescription, colors:&Coloring) -> CheckerResult {
    let adj = match Adjacency::build(&graph.nodes, &graph.edges) {
        Ok(adj) => adj,
        Err(SolverError::InvalidEdge { node, .. }) => return CheckerResult::UnknownVertex(node),
    };
    // check that every colored vertex exists and is colored once
    let mut visited = BitSet::with_capacity(adj.nb_vertices());
    let mut color_of:Vec<Option<Color>> = vec![None ; adj.nb_vertices()];
    for (u,c) in colors.iter() {
        let i = match adj.position(*u) {
            None => return CheckerResult::UnknownVertex(*u),
            Some(i) => i,
        };
        if !visited.insert(i) {
            return CheckerResult::VertexAddedTwice(*u);
        }
        if *c >= graph.num_colors {
            return CheckerResult::ColorOutOfRange(*u, *c);
        }
        color_of[i] = Some(*c);
    }
    // check that all vertices are colored
    if let Some((_,u)) = adj.nodes().iter().enumerate().find(|(i,_)| !visited.contains(*i)) {
        return CheckerResult::VertexNotColored(*u);
    }
    // check conflicts (self-loops are ignored)
    for i in 0..adj.nb_vertices() {
        if let Some(j) = adj.neighbors(i).iter().find(|j| **j > i && color_of[**j] == color_of[i]) {
            return CheckerResult::ConflictingEdge(adj.node(i), adj.node(*j));
        }
    }
    CheckerResult::Ok(colors.nb_colors())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(num_colors:usize) -> GraphDescription {
        GraphDescription::new(vec![1,2,3], vec![(1,2),(2,3),(1,3)], num_colors)
    }

    #[test]
    fn test_serialize_keeps_node_order() {
        let colors = Coloring::from_entries(vec![(3,0),(1,1),(2,2)]);
        assert_eq!(serde_json::to_string(&colors).unwrap(), r#"{"3":0,"1":1,"2":2}"#);
        let back:Coloring = serde_json::from_str(r#"{"3":0,"1":1,"2":2}"#).unwrap();
        assert_eq!(back, colors);
    }

    #[test]
    fn test_insert_remove() {
        let mut colors = Coloring::default();
        colors.insert(4, 1);
        colors.insert(2, 0);
        colors.insert(4, 2);
        assert_eq!(colors.entries(), &[(4,2),(2,0)]);
        assert_eq!(colors.remove(4), Some(2));
        assert_eq!(colors.remove(4), None);
        assert_eq!(colors.get(2), Some(0));
    }

    #[test]
    fn test_partition() {
        let colors = Coloring::from_entries(vec![(1,0),(2,2),(3,0)]);
        assert_eq!(colors.to_partition(), vec![vec![1,3], vec![], vec![2]]);
        assert_eq!(colors.nb_colors(), 2);
    }

    #[test]
    fn test_checker_ok() {
        let colors = Coloring::from_entries(vec![(1,0),(2,1),(3,2)]);
        assert_eq!(checker(&triangle(3), &colors), CheckerResult::Ok(3));
    }

    #[test]
    fn test_checker_violations() {
        let g = triangle(3);
        assert_eq!(
            checker(&g, &Coloring::from_entries(vec![(1,0),(2,1)])),
            CheckerResult::VertexNotColored(3)
        );
        assert_eq!(
            checker(&g, &Coloring::from_entries(vec![(1,0),(2,1),(3,0)])),
            CheckerResult::ConflictingEdge(1,3)
        );
        assert_eq!(
            checker(&g, &Coloring::from_entries(vec![(1,0),(2,1),(3,2),(9,0)])),
            CheckerResult::UnknownVertex(9)
        );
        assert_eq!(
            checker(&g, &Coloring::from_entries(vec![(1,0),(1,1),(2,1),(3,2)])),
            CheckerResult::VertexAddedTwice(1)
        );
        assert_eq!(
            checker(&g, &Coloring::from_entries(vec![(1,0),(2,1),(3,5)])),
            CheckerResult::ColorOutOfRange(3,5)
        );
    }

    #[test]
    fn test_checker_edge_outside_the_graph() {
        let g = GraphDescription::new(vec![1,2], vec![(1,2),(2,7)], 2);
        let colors = Coloring::from_entries(vec![(1,0),(2,1)]);
        assert_eq!(checker(&g, &colors), CheckerResult::UnknownVertex(7));
    }

    #[test]
    fn test_checker_ignores_self_loops_and_duplicate_edges() {
        let g = GraphDescription::new(vec![1,2], vec![(1,1),(1,2),(2,1)], 2);
        let colors = Coloring::from_entries(vec![(2,0),(1,1)]);
        assert_eq!(checker(&g, &colors), CheckerResult::Ok(2));
        let colors = Coloring::from_entries(vec![(2,1),(1,1)]);
        assert_eq!(checker(&g, &colors), CheckerResult::ConflictingEdge(1,2));
    }
}
