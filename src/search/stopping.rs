use std::time::Instant;

use serde::{Serialize, Deserialize};

/**
Decides when a search must stop before completion.
Checked before every step is appended to the trace.
*/
pub trait StoppingCriterion {
    /// called once when the search starts
    fn init(&mut self) {}

    /// true iff the search must stop (nb_steps: steps recorded so far)
    fn is_finished(&self, nb_steps:usize) -> bool;
}

impl<S:StoppingCriterion + ?Sized> StoppingCriterion for Box<S> {
    fn init(&mut self) { (**self).init() }

    fn is_finished(&self, nb_steps:usize) -> bool { (**self).is_finished(nb_steps) }
}

/// never stops (exhaustive search)
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStoppingCriterion;

impl StoppingCriterion for NeverStoppingCriterion {
    fn is_finished(&self, _:usize) -> bool { false }
}

/// stops once a given number of steps is recorded
#[derive(Debug, Clone, Copy)]
pub struct StepStoppingCriterion {
    max_steps: usize,
}

impl StepStoppingCriterion {
    /// creates a criterion allowing at most max_steps steps
    pub fn new(max_steps:usize) -> Self { Self { max_steps } }
}

impl StoppingCriterion for StepStoppingCriterion {
    fn is_finished(&self, nb_steps:usize) -> bool { nb_steps >= self.max_steps }
}

/// stops after a given time (in seconds)
#[derive(Debug, Clone, Copy)]
pub struct TimeStoppingCriterion {
    time_limit: f32,
    start: Instant,
}

impl TimeStoppingCriterion {
    /// creates a criterion stopping after t seconds
    pub fn new(t:f32) -> Self { Self { time_limit: t, start: Instant::now() } }
}

impl StoppingCriterion for TimeStoppingCriterion {
    fn init(&mut self) { self.start = Instant::now(); }

    fn is_finished(&self, _:usize) -> bool {
        self.start.elapsed().as_secs_f32() >= self.time_limit
    }
}

/// stops as soon as one of the two criteria stops
#[derive(Debug, Clone, Copy)]
pub struct EitherStoppingCriterion<A, B> {
    a: A,
    b: B,
}

impl<A:StoppingCriterion, B:StoppingCriterion> EitherStoppingCriterion<A, B> {
    /// combines two criteria
    pub fn new(a:A, b:B) -> Self { Self { a, b } }
}

impl<A:StoppingCriterion, B:StoppingCriterion> StoppingCriterion for EitherStoppingCriterion<A, B> {
    fn init(&mut self) {
        self.a.init();
        self.b.init();
    }

    fn is_finished(&self, nb_steps:usize) -> bool {
        self.a.is_finished(nb_steps) || self.b.is_finished(nb_steps)
    }
}


/** search configuration. Default: unbounded search. */
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// maximum number of steps recorded before aborting
    #[serde(default)]
    pub max_steps: Option<usize>,
    /// maximum search time (seconds) before aborting
    #[serde(default)]
    pub time_limit: Option<f32>,
}

impl SearchConfig {
    /// builds the stopping criterion matching the configuration
    pub fn criterion(&self) -> Box<dyn StoppingCriterion> {
        match (self.max_steps, self.time_limit) {
            (None, None) => Box::new(NeverStoppingCriterion),
            (Some(s), None) => Box::new(StepStoppingCriterion::new(s)),
            (None, Some(t)) => Box::new(TimeStoppingCriterion::new(t)),
            (Some(s), Some(t)) => Box::new(EitherStoppingCriterion::new(
                StepStoppingCriterion::new(s),
                TimeStoppingCriterion::new(t),
            )),
        }
    }

    /// true iff no limit is set
    pub fn is_unbounded(&self) -> bool { self.max_steps.is_none() && self.time_limit.is_none() }
}
