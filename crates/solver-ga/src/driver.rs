use std::time::{Duration, Instant};

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sched_core::{check_params, check_search_size, Candidate, EvolutionParams, Grid, Problem, Roster, SchedError};
use tracing::{debug, info, warn};

use crate::encoding::random_population;
use crate::operators::{crossover, mutate, select};

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: u32,
    pub mean: f64,
}

#[derive(Clone, Debug)]
pub struct Outcome {
    pub best: Candidate,
    pub fitness: u32,
    pub seed: u64,
    /// Generation steps completed after the initial population.
    pub generations: usize,
    /// The deadline cut the run short; `best` is still a valid timetable.
    pub stopped_early: bool,
    /// One entry for the initial population plus one per completed generation.
    pub history: Vec<GenerationStats>,
}

/// Generational search over a fixed-size population: tournament selection,
/// pairwise crossover, per-candidate mutation, re-evaluation of what changed.
pub struct Evolution<'a> {
    roster: &'a Roster,
    grid: Grid,
    params: &'a EvolutionParams,
}

impl<'a> Evolution<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            roster: &problem.roster,
            grid: problem.grid,
            params: &problem.params,
        }
    }

    /// Runs the search; every random draw comes from one `ChaCha8Rng` seeded
    /// from `params.seed`, or from entropy when no seed is given.
    pub fn run(&self) -> Result<Outcome, SchedError> {
        check_params(self.params)?;
        check_search_size(self.params, &self.grid)?;
        let p = self.params;
        let seed = p.seed.unwrap_or_else(rand::random);
        let rng = &mut ChaCha8Rng::seed_from_u64(seed);
        let n = self.grid.num_sections();
        let deadline = p
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        info!(
            seed,
            population = p.population_size,
            generations = p.num_generations,
            cells = self.grid.cell_count(),
            teachers = self.roster.teacher_count(),
            venues = self.roster.venue_count(),
            "evolution started"
        );

        let mut population = random_population(p.population_size, self.roster, &self.grid, rng);
        evaluate_all(&mut population, n, p.parallel_eval);
        let mut history = vec![stats(0, &population)];

        let mut generations = 0usize;
        let mut stopped_early = false;
        for gen in 1..=p.num_generations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                stopped_early = true;
                warn!(completed = generations, "time limit reached, returning best so far");
                break;
            }

            let mut pool = select(&population, p.tournament_size, p.population_size, rng);
            for pair in pool.chunks_exact_mut(2) {
                if rng.gen_bool(p.crossover_rate) {
                    if let [a, b] = pair {
                        crossover(a, b, rng);
                    }
                }
            }
            for c in pool.iter_mut() {
                if rng.gen_bool(p.mutation_rate) {
                    mutate(c, self.roster, rng);
                }
            }
            evaluate_all(&mut pool, n, p.parallel_eval);
            population = pool;
            generations = gen;

            let s = stats(gen, &population);
            debug!(generation = gen, best = s.best, mean = s.mean, "generation done");
            history.push(s);
        }

        let best = population
            .iter()
            .min_by_key(|c| c.fitness().unwrap_or(u32::MAX))
            .cloned()
            .ok_or_else(|| SchedError::InvariantViolation("population is empty".into()))?;
        let fitness = best
            .fitness()
            .ok_or_else(|| SchedError::InvariantViolation("best candidate was never evaluated".into()))?;

        info!(fitness, generations, stopped_early, "evolution finished");
        Ok(Outcome {
            best,
            fitness,
            seed,
            generations,
            stopped_early,
            history,
        })
    }
}

/// Scores every candidate whose cells changed. Candidates are independent, so
/// the parallel path yields exactly the sequential result.
fn evaluate_all(population: &mut [Candidate], num_sections: usize, parallel: bool) {
    if parallel {
        population.par_iter_mut().for_each(|c| {
            c.evaluate(num_sections);
        });
    } else {
        for c in population.iter_mut() {
            c.evaluate(num_sections);
        }
    }
}

fn stats(generation: usize, population: &[Candidate]) -> GenerationStats {
    let scores = population.iter().filter_map(Candidate::fitness);
    let best = scores.clone().min().unwrap_or(0);
    let total: u64 = scores.map(u64::from).sum();
    GenerationStats {
        generation,
        best,
        mean: total as f64 / population.len().max(1) as f64,
    }
}
