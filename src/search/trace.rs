//! Step log, solve results and trace replay.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::color::{Color, Coloring, NodeId};

/// kind of search action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// a color was rejected because a neighbor already has it
    Attempt,
    /// a color was assigned
    Assign,
    /// an assignment was undone
    Backtrack,
}

/// why a step did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// a neighbor already has the color
    Conflict,
    /// the next nodes could not be colored
    NoValidColorFound,
}

/**
one entry of the search trace. Serialized as:
 - `{"action":"attempt","node":n,"color":c,"success":false,"reason":"conflict"}`
 - `{"action":"assign","node":n,"color":c,"success":true}`
 - `{"action":"backtrack","node":n,"color":c,"reason":"no_valid_color_found"}`
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// action kind
    pub action: Action,
    /// node involved
    pub node: NodeId,
    /// color involved
    pub color: Color,
    /// outcome (attempt and assign only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// reason (attempt and backtrack only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl Step {
    /// color rejected because of a conflicting neighbor
    pub fn attempt(node:NodeId, color:Color) -> Self {
        Self { action: Action::Attempt, node, color, success: Some(false), reason: Some(Reason::Conflict) }
    }

    /// color assigned
    pub fn assign(node:NodeId, color:Color) -> Self {
        Self { action: Action::Assign, node, color, success: Some(true), reason: None }
    }

    /// color removed after the remaining nodes failed
    pub fn backtrack(node:NodeId, color:Color) -> Self {
        Self { action: Action::Backtrack, node, color, success: None, reason: Some(Reason::NoValidColorFound) }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Attempt => write!(f, "trying node {} with color {}: conflict", self.node, self.color),
            Action::Assign => write!(f, "assigning node {} -> color {}", self.node, self.color),
            Action::Backtrack => write!(
                f, "backtracking: node {} had conflict, removing color {}", self.node, self.color
            ),
        }
    }
}


/// how the search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// every node is colored
    Success,
    /// every color of the first node was tried without success
    Exhausted,
    /// a stopping criterion interrupted the search
    Aborted,
}

impl Default for Outcome {
    fn default() -> Self { Outcome::Exhausted }
}

/**
result of a solve. Owned by the caller; the solver keeps nothing.
`colors` is complete on success and empty otherwise; `steps` is always the full trace.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// true iff a valid coloring was found
    pub success: bool,
    /// final coloring (empty unless success)
    pub colors: Coloring,
    /// search trace, in chronological order
    pub steps: Vec<Step>,
    /// number of steps
    pub total_steps: usize,
    /// number of backtrack steps
    pub backtracks: usize,
    /// how the search ended
    #[serde(default)]
    pub outcome: Outcome,
}

impl SolveResult {
    /// steps of a given kind
    pub fn count(&self, action:Action) -> usize {
        self.steps.iter().filter(|s| s.action == action).count()
    }

    /// iterates over the partial colorings after each step
    pub fn replay(&self) -> Replay<'_> { replay(&self.steps) }

    /**
    true iff the counters match the trace and replaying the trace leads to the reported
    coloring (empty after an exhausted search). Aborted searches only check the counters.
    */
    pub fn is_consistent(&self) -> bool {
        if self.total_steps != self.steps.len() || self.backtracks != self.count(Action::Backtrack) {
            return false;
        }
        if self.success {
            return self.outcome != Outcome::Aborted
                && final_coloring(&self.steps) == self.colors;
        }
        if !self.colors.is_empty() {
            return false;
        }
        self.outcome == Outcome::Aborted || final_coloring(&self.steps).is_empty()
    }
}


/**
coloring left by a trace (same as the last item of [`replay`]).
Linear in the number of steps when backtracks undo the latest assignment, as the solver does.
*/
pub fn final_coloring(steps:&[Step]) -> Coloring {
    let mut colored:HashSet<NodeId> = HashSet::new();
    let mut entries:Vec<(NodeId, Color)> = Vec::new();
    for step in steps {
        match step.action {
            Action::Assign => {
                if colored.insert(step.node) {
                    entries.push((step.node, step.color));
                } else if let Some(entry) = entries.iter_mut().find(|(u,_)| *u == step.node) {
                    entry.1 = step.color;
                }
            },
            Action::Backtrack => {
                if !colored.remove(&step.node) {
                    continue;
                }
                match entries.last() {
                    Some((u,_)) if *u == step.node => { entries.pop(); },
                    _ => entries.retain(|(u,_)| *u != step.node),
                }
            },
            Action::Attempt => {},
        }
    }
    Coloring::from_entries(entries)
}

/// replays a trace, yielding the partial coloring after each step
pub fn replay(steps:&[Step]) -> Replay<'_> {
    Replay { steps: steps.iter(), colors: Coloring::default() }
}

/// iterator built by [`replay`]
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    steps: std::slice::Iter<'a, Step>,
    colors: Coloring,
}

impl<'a> Iterator for Replay<'a> {
    type Item = Coloring;

    fn next(&mut self) -> Option<Coloring> {
        let step = self.steps.next()?;
        match step.action {
            Action::Assign => self.colors.insert(step.node, step.color),
            Action::Backtrack => { self.colors.remove(step.node); },
            Action::Attempt => {},
        }
        Some(self.colors.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.steps.size_hint() }
}
