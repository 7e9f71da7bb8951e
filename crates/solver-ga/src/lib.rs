pub mod driver;
pub mod encoding;
pub mod operators;

use async_trait::async_trait;
use sched_core::{export, scoring, Problem, SchedError, SolveEnvelope, SolveResult, Solver};
use tracing::warn;
use types::SolveStatus;

pub use driver::{Evolution, GenerationStats, Outcome};

pub struct GaSolver;
impl GaSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GaSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Solver for GaSolver {
    async fn solve(&self, env: SolveEnvelope) -> anyhow::Result<SolveResult> {
        let problem = sched_core::validate(&env)?;
        let res = tokio::task::spawn_blocking(move || solve_problem(&problem)).await??;
        Ok(res)
    }
}

/// Runs the evolution on a validated problem and exports the winner.
pub fn solve_problem(problem: &Problem) -> Result<SolveResult, SchedError> {
    for advisory in problem.advisories() {
        warn!(%advisory, "roster is unlikely to yield a clash-free timetable");
    }

    let outcome = Evolution::new(problem).run()?;
    outcome.best.check(&problem.roster, &problem.grid)?;

    let rows = export::to_table(&outcome.best, &problem.roster, &problem.grid)?;
    let clashes = scoring::clash_report(&outcome.best, &problem.roster, &problem.grid);
    let status = if outcome.fitness == 0 {
        SolveStatus::Feasible
    } else {
        SolveStatus::Conflicted
    };

    Ok(SolveResult {
        status,
        fitness: outcome.fitness,
        rows,
        clashes,
        stats: serde_json::json!({
            "method": "ga",
            "seed": outcome.seed,
            "populationSize": problem.params.population_size,
            "generations": outcome.generations,
            "stoppedEarly": outcome.stopped_early,
            "bestByGeneration": outcome.history.iter().map(|s| s.best).collect::<Vec<_>>(),
        }),
    })
}
