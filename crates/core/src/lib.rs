pub mod candidate;
pub mod export;
pub mod roster;
pub mod scoring;

use async_trait::async_trait;
use thiserror::Error;

pub use candidate::{Assignment, Candidate};
pub use roster::{Grid, Roster, SubjectRef, TeacherEntry, TeacherRef, VenueRef};
pub use types::{EvolutionParams, GridShape, RosterSpec, SolveEnvelope, SolveResult, TimetableRow};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedError {
    /// Bad roster, grid or search parameters; the run never starts.
    #[error("configuration error: {}", .0.join("; "))]
    Configuration(Vec<String>),
    /// A candidate broke a structural invariant; indicates an operator bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SchedError {
    fn into_messages(self) -> Vec<String> {
        match self {
            SchedError::Configuration(m) => m,
            other => vec![other.to_string()],
        }
    }
}

pub const MAX_POPULATION_SIZE: usize = 10_000;
pub const MAX_GENERATIONS: usize = 100_000;
pub const MAX_TOURNAMENT_SIZE: usize = 1_000;
/// Upper bound on `populationSize * cells`, the number of assignments one
/// generation holds.
pub const MAX_SEARCH_CELLS: usize = 5_000_000;

pub fn check_params(p: &EvolutionParams) -> Result<(), SchedError> {
    let mut errors: Vec<String> = Vec::new();
    for (name, value, max) in [
        ("populationSize", p.population_size, MAX_POPULATION_SIZE),
        ("numGenerations", p.num_generations, MAX_GENERATIONS),
        ("tournamentSize", p.tournament_size, MAX_TOURNAMENT_SIZE),
    ] {
        if value == 0 {
            errors.push(format!("{name} must be positive"));
        } else if value > max {
            errors.push(format!("{name} must be at most {max}, got {value}"));
        }
    }
    for (name, rate) in [
        ("crossoverRate", p.crossover_rate),
        ("mutationRate", p.mutation_rate),
    ] {
        if !(0.0..=1.0).contains(&rate) {
            errors.push(format!("{name} must be within [0, 1], got {rate}"));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchedError::Configuration(errors))
    }
}

/// Rejects a population whose generations would not fit the memory budget.
pub fn check_search_size(p: &EvolutionParams, grid: &Grid) -> Result<(), SchedError> {
    match p.population_size.checked_mul(grid.cell_count()) {
        Some(cells) if cells <= MAX_SEARCH_CELLS => Ok(()),
        _ => Err(SchedError::Configuration(vec![format!(
            "populationSize {} over {} cells exceeds {MAX_SEARCH_CELLS} assignments per generation",
            p.population_size,
            grid.cell_count()
        )])),
    }
}

/// A validated request: everything the search needs, resolved to indices.
#[derive(Clone, Debug)]
pub struct Problem {
    pub roster: Roster,
    pub grid: Grid,
    pub params: EvolutionParams,
}

impl Problem {
    pub fn advisories(&self) -> Vec<String> {
        self.roster.advisories(&self.grid)
    }
}

/// Checks roster, grid and parameters together and reports every problem found.
pub fn validate(env: &SolveEnvelope) -> Result<Problem, SchedError> {
    let roster = Roster::from_spec(&env.roster);
    let grid = Grid::new(env.grid);
    let params = check_params(&env.params);
    let params = match (&grid, params) {
        (Ok(grid), Ok(())) => check_search_size(&env.params, grid),
        (_, params) => params,
    };

    match (roster, grid, params) {
        (Ok(roster), Ok(grid), Ok(())) => Ok(Problem {
            roster,
            grid,
            params: env.params.clone(),
        }),
        (roster, grid, params) => {
            let errors = [roster.err(), grid.err(), params.err()]
                .into_iter()
                .flatten()
                .flat_map(SchedError::into_messages)
                .collect();
            Err(SchedError::Configuration(errors))
        }
    }
}

#[async_trait]
pub trait Solver: Send + Sync + 'static {
    async fn solve(&self, env: SolveEnvelope) -> anyhow::Result<SolveResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::TeacherSpec;

    fn envelope() -> SolveEnvelope {
        SolveEnvelope {
            roster: RosterSpec {
                teachers: vec![TeacherSpec {
                    name: "T1".into(),
                    subjects: vec!["Math".into()],
                }],
                subjects: vec!["Math".into()],
                venues: vec!["V1".into()],
            },
            grid: GridShape {
                num_sections: 1,
                hours_per_day: 1,
            },
            params: EvolutionParams::default(),
        }
    }

    #[test]
    fn valid_envelope_resolves() {
        let p = validate(&envelope()).unwrap();
        assert_eq!(p.grid.cell_count(), 1);
        assert!(p.advisories().is_empty());
    }

    #[test]
    fn all_problems_are_reported_together() {
        let mut env = envelope();
        env.roster.venues.clear();
        env.grid.hours_per_day = 0;
        env.params.population_size = 0;
        env.params.mutation_rate = 1.5;
        let err = validate(&env).unwrap_err();
        let SchedError::Configuration(msgs) = &err else {
            panic!("expected configuration error, got {err}");
        };
        assert_eq!(msgs.len(), 4);
        assert!(err.to_string().starts_with("configuration error: venues is empty; "));
    }

    #[test]
    fn default_params_are_valid() {
        assert!(check_params(&EvolutionParams::default()).is_ok());
    }

    #[test]
    fn oversized_params_are_rejected() {
        let p = EvolutionParams {
            population_size: 1 << 42,
            num_generations: MAX_GENERATIONS + 1,
            tournament_size: usize::MAX,
            ..EvolutionParams::default()
        };
        let SchedError::Configuration(msgs) = check_params(&p).unwrap_err() else {
            panic!("expected configuration error");
        };
        assert_eq!(msgs.len(), 3);
        assert!(msgs[0].starts_with("populationSize must be at most 10000"));
    }

    #[test]
    fn huge_population_never_reaches_the_search() {
        let mut env = envelope();
        env.params.population_size = 1 << 42;
        assert!(matches!(validate(&env), Err(SchedError::Configuration(_))));
    }

    #[test]
    fn population_is_bounded_by_grid_size() {
        let mut env = envelope();
        env.grid = GridShape {
            num_sections: 100,
            hours_per_day: 10,
        };
        env.params.population_size = MAX_POPULATION_SIZE;
        let err = validate(&env).unwrap_err();
        assert!(err.to_string().contains("exceeds 5000000 assignments per generation"));

        env.params.population_size = MAX_SEARCH_CELLS / 1_000;
        assert!(validate(&env).is_ok());
    }
}
