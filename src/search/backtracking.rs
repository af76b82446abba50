use crate::adjacency::Adjacency;
use crate::color::{Color, Coloring};
use crate::error::SolverError;
use crate::graph::GraphDescription;
use crate::search::stopping::{NeverStoppingCriterion, StoppingCriterion};
use crate::search::trace::{Outcome, SolveResult, Step};


/**
true iff no neighbor of position v is already colored c.
Runs in O(d(v)).
*/
pub fn is_safe(adj:&Adjacency, colors:&[Option<Color>], v:usize, c:Color) -> bool {
    adj.neighbors(v).iter().all(|u| colors[*u] != Some(c))
}

/// the stopping criterion fired
#[derive(Debug)]
struct Aborted;

/**
Backtracking coloring solver.

Colors the nodes in the order they are given. For each node, colors are tried
in ascending order:
 - conflicting color: `attempt` step, next color
 - safe color: `assign` step, then the next node is explored. If it fails, the color is
   removed (`backtrack` step) and the next color is tried.

The search is exhaustive and deterministic: the same input always produces the same trace.
Decisions are kept on an explicit stack, so the graph size is not limited by the call stack.
A solver is built for one solve and consumed by it.
*/
#[derive(Debug)]
pub struct BacktrackingSolver {
    /// adjacency (positions follow the node order)
    adj: Adjacency,
    /// palette size
    nb_colors: usize,
    /// colors[i]: color of the vertex at position i
    colors: Vec<Option<Color>>,
    /// search trace
    steps: Vec<Step>,
    /// number of backtracks
    backtracks: usize,
}

impl BacktrackingSolver {
    /** creates a solver for the given graph. Fails if an edge references an unknown node. */
    pub fn new(graph:&GraphDescription) -> Result<Self, SolverError> {
        let adj = Adjacency::build(&graph.nodes, &graph.edges)?;
        let n = adj.nb_vertices();
        Ok(Self {
            adj,
            nb_colors: graph.num_colors,
            colors: vec![None ; n],
            steps: Vec::with_capacity(n),
            backtracks: 0,
        })
    }

    /// print statistics of the graph
    pub fn display_statistics(&self) {
        self.adj.display_statistics();
        println!("\t{} \t colors", self.nb_colors);
    }

    /// runs the exhaustive search
    pub fn solve(self) -> SolveResult {
        self.solve_with(NeverStoppingCriterion)
    }

    /**
    runs the search until it completes or the stopping criterion fires.
    An interrupted search reports `Outcome::Aborted` with the trace recorded so far.
    */
    pub fn solve_with<Stopping:StoppingCriterion>(mut self, mut stopping_criterion:Stopping) -> SolveResult {
        log::info!(
            "backtracking: {} vertices, {} edges, {} colors",
            self.adj.nb_vertices(), self.adj.nb_edges(), self.nb_colors
        );
        stopping_criterion.init();
        let status = self.explore(&stopping_criterion);
        let result = self.into_result(status);
        log::info!(
            "backtracking {:?}: {} steps, {} backtracks",
            result.outcome, result.total_steps, result.backtracks
        );
        result
    }

    /// appends a step unless the stopping criterion fired
    fn record<Stopping:StoppingCriterion>(&mut self, step:Step, stopping_criterion:&Stopping) -> Result<(), Aborted> {
        if stopping_criterion.is_finished(self.steps.len()) {
            return Err(Aborted);
        }
        self.steps.push(step);
        Ok(())
    }

    /**
    colors every position in order (true iff all of them could be colored).
    stack[k] = (position, next color to try). The color of a position on the stack,
    except the top one, is `next - 1`.
    */
    fn explore<Stopping:StoppingCriterion>(&mut self, stopping_criterion:&Stopping) -> Result<bool, Aborted> {
        let n = self.adj.nb_vertices();
        if n == 0 {
            return Ok(true);
        }
        let mut stack:Vec<(usize, Color)> = Vec::with_capacity(n);
        stack.push((0, 0));
        while let Some(&(i, c)) = stack.last() {
            if c == self.nb_colors {
                // every color failed at position i: undo the parent decision
                stack.pop();
                let (p, next) = match stack.last() {
                    None => return Ok(false),
                    Some(&top) => top,
                };
                self.colors[p] = None;
                self.record(Step::backtrack(self.adj.node(p), next-1), stopping_criterion)?;
                self.backtracks += 1;
                continue;
            }
            let top = stack.len() - 1;
            stack[top].1 = c + 1;
            let node = self.adj.node(i);
            if !is_safe(&self.adj, &self.colors, i, c) {
                self.record(Step::attempt(node, c), stopping_criterion)?;
                continue;
            }
            self.colors[i] = Some(c);
            self.record(Step::assign(node, c), stopping_criterion)?;
            if i + 1 == n {
                return Ok(true);
            }
            stack.push((i+1, 0));
        }
        Ok(false)
    }

    /// builds the result from the final search state
    fn into_result(self, status:Result<bool, Aborted>) -> SolveResult {
        let outcome = match status {
            Ok(true) => Outcome::Success,
            Ok(false) => Outcome::Exhausted,
            Err(Aborted) => Outcome::Aborted,
        };
        let colors = match outcome {
            Outcome::Success => Coloring::from_entries(
                self.colors.iter().enumerate()
                    .filter_map(|(i,c)| c.map(|c| (self.adj.node(i), c)))
                    .collect()
            ),
            _ => Coloring::default(),
        };
        SolveResult {
            success: outcome == Outcome::Success,
            colors,
            total_steps: self.steps.len(),
            steps: self.steps,
            backtracks: self.backtracks,
            outcome,
        }
    }
}


/** solves the graph coloring problem by exhaustive backtracking */
pub fn solve(graph:&GraphDescription) -> Result<SolveResult, SolverError> {
    Ok(BacktrackingSolver::new(graph)?.solve())
}

/** solves the graph coloring problem by backtracking, stopping when the criterion fires */
pub fn solve_with<Stopping:StoppingCriterion>(graph:&GraphDescription, stopping_criterion:Stopping) -> Result<SolveResult, SolverError> {
    Ok(BacktrackingSolver::new(graph)?.solve_with(stopping_criterion))
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, CheckerResult};
    use crate::search::stopping::{StepStoppingCriterion, TimeStoppingCriterion};
    use crate::search::trace::Action;

    fn triangle(num_colors:usize) -> GraphDescription {
        GraphDescription::new(vec![1,2,3], vec![(1,2),(2,3),(1,3)], num_colors)
    }

    #[test]
    fn test_is_safe() {
        let adj = Adjacency::build(&[1,2,3], &[(1,2)]).unwrap();
        let colors = vec![Some(0), None, None];
        assert!(!is_safe(&adj, &colors, 1, 0));
        assert!(is_safe(&adj, &colors, 1, 1));
        assert!(is_safe(&adj, &colors, 2, 0)); // isolated
        assert!(is_safe(&adj, &[None, None, None], 1, 0)); // nothing assigned yet
    }

    #[test]
    fn test_triangle_3_colors() {
        let result = solve(&triangle(3)).unwrap();
        assert!(result.success);
        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.colors, Coloring::from_entries(vec![(1,0),(2,1),(3,2)]));
        assert_eq!(result.backtracks, 0);
        assert_eq!(result.count(Action::Assign), 3);
        assert_eq!(result.steps, vec![
            Step::assign(1,0),
            Step::attempt(2,0),
            Step::assign(2,1),
            Step::attempt(3,0),
            Step::attempt(3,1),
            Step::assign(3,2),
        ]);
        assert_eq!(result.total_steps, 6);
    }

    #[test]
    fn test_triangle_2_colors() {
        let result = solve(&triangle(2)).unwrap();
        assert!(!result.success);
        assert_eq!(result.outcome, Outcome::Exhausted);
        assert!(result.colors.is_empty());
        assert_eq!(result.steps, vec![
            Step::assign(1,0),
            Step::attempt(2,0),
            Step::assign(2,1),
            Step::attempt(3,0),
            Step::attempt(3,1),
            Step::backtrack(2,1),
            Step::backtrack(1,0),
            Step::assign(1,1),
            Step::assign(2,0),
            Step::attempt(3,0),
            Step::attempt(3,1),
            Step::backtrack(2,0),
            Step::attempt(2,1),
            Step::backtrack(1,1),
        ]);
        assert_eq!(result.total_steps, 14);
        assert_eq!(result.backtracks, 4);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_single_isolated_node() {
        let result = solve(&GraphDescription::new(vec![1], vec![], 1)).unwrap();
        assert!(result.success);
        assert_eq!(result.colors, Coloring::from_entries(vec![(1,0)]));
        assert_eq!(result.backtracks, 0);
        assert_eq!(result.steps, vec![Step::assign(1,0)]);
    }

    #[test]
    fn test_invalid_edge() {
        let res = solve(&GraphDescription::new(vec![1,2], vec![(1,3)], 2));
        assert_eq!(res.unwrap_err(), SolverError::InvalidEdge { node: 3, edge: (1,3) });
    }

    #[test]
    fn test_empty_graph() {
        let result = solve(&GraphDescription::new(vec![], vec![], 1)).unwrap();
        assert!(result.success);
        assert!(result.colors.is_empty());
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_no_color() {
        let result = solve(&GraphDescription::new(vec![1,2], vec![], 0)).unwrap();
        assert!(!result.success);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_node_order_drives_the_search() {
        // path 1 - 2 - 3 given in the order [2, 1, 3]
        let result = solve(&GraphDescription::new(vec![2,1,3], vec![(1,2),(2,3)], 2)).unwrap();
        assert!(result.success);
        assert_eq!(result.colors, Coloring::from_entries(vec![(2,0),(1,1),(3,1)]));
        assert_eq!(result.steps[0], Step::assign(2,0));
    }

    #[test]
    fn test_self_loop_does_not_block() {
        let result = solve(&GraphDescription::new(vec![1,2], vec![(1,1),(1,2)], 2)).unwrap();
        assert!(result.success);
        assert_eq!(result.colors, Coloring::from_entries(vec![(1,0),(2,1)]));
    }

    #[test]
    fn test_attempts_after_backtrack_are_logged() {
        // once node 2 backtracks from color 1, the remaining colors of node 1 are still enumerated
        let result = solve(&triangle(2)).unwrap();
        let node1:Vec<Step> = result.steps.iter().filter(|s| s.node == 1).copied().collect();
        assert_eq!(node1, vec![
            Step::assign(1,0), Step::backtrack(1,0), Step::assign(1,1), Step::backtrack(1,1)
        ]);
    }

    #[test]
    fn test_peterson() {
        let g = GraphDescription::from_dimacs_file("insts/other-instances/peterson.col", 3).unwrap();
        let result = solve(&g).unwrap();
        assert!(result.success);
        assert_eq!(checker(&g, &result.colors), CheckerResult::Ok(3));
        assert!(result.is_consistent());
        let result = solve(&g.with_colors(2)).unwrap();
        assert!(!result.success);
        assert!(result.backtracks > 0);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_step_limit() {
        let result = solve_with(&triangle(2), StepStoppingCriterion::new(5)).unwrap();
        assert_eq!(result.outcome, Outcome::Aborted);
        assert!(!result.success);
        assert!(result.colors.is_empty());
        assert_eq!(result.total_steps, 5);
        assert_eq!(result.backtracks, 0);
        let full = solve(&triangle(2)).unwrap();
        assert_eq!(result.steps[..], full.steps[..5]);
        assert!(result.is_consistent());
    }

    #[test]
    fn test_step_limit_reached_exactly() {
        let result = solve_with(&triangle(2), StepStoppingCriterion::new(14)).unwrap();
        assert_eq!(result.outcome, Outcome::Exhausted);
        let result = solve_with(&triangle(3), StepStoppingCriterion::new(6)).unwrap();
        assert_eq!(result.outcome, Outcome::Success);
    }

    #[test]
    fn test_backtracks_match_trace_when_aborted_on_backtrack() {
        // step 6 (index 5) is the first backtrack
        let result = solve_with(&triangle(2), StepStoppingCriterion::new(6)).unwrap();
        assert_eq!(result.total_steps, 6);
        assert_eq!(result.backtracks, 1);
        assert!(result.is_consistent());
        let result = solve_with(&triangle(2), StepStoppingCriterion::new(5)).unwrap();
        assert_eq!(result.backtracks, 0);
    }

    #[test]
    fn test_time_limit() {
        let result = solve_with(&triangle(3), TimeStoppingCriterion::new(0.)).unwrap();
        assert_eq!(result.outcome, Outcome::Aborted);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_result_wire_format() {
        let result = solve(&GraphDescription::new(vec![1], vec![], 1)).unwrap();
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"success":true,"colors":{"1":0},"steps":[{"action":"assign","node":1,"color":0,"success":true}],"total_steps":1,"backtracks":0,"outcome":"success"}"#
        );
    }

    #[test]
    fn test_result_without_outcome_is_consistent() {
        let result:SolveResult = serde_json::from_str(
            r#"{"success":true,"colors":{"1":0},"steps":[{"action":"assign","node":1,"color":0,"success":true}],"total_steps":1,"backtracks":0}"#
        ).unwrap();
        assert!(result.is_consistent());
    }
}
