use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! name_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}
name_newtype!(TeacherName);
name_newtype!(SubjectName);
name_newtype!(VenueName);

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSpec {
    pub name: TeacherName,
    #[serde(default)]
    pub subjects: Vec<SubjectName>,
}

/// Roster as supplied by the operator, referencing subjects by name.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterSpec {
    pub teachers: Vec<TeacherSpec>,
    pub subjects: Vec<SubjectName>,
    pub venues: Vec<VenueName>,
}

/// Daily grid: `hours_per_day` slots, each with `num_sections` parallel cells.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridShape {
    pub num_sections: u32,
    pub hours_per_day: u32,
}

fn default_population_size() -> usize {
    100
}
fn default_num_generations() -> usize {
    50
}
fn default_crossover_rate() -> f64 {
    0.7
}
fn default_mutation_rate() -> f64 {
    0.2
}
fn default_tournament_size() -> usize {
    3
}
fn default_parallel_eval() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionParams {
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[serde(default = "default_num_generations")]
    pub num_generations: usize,
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Fixed seed for reproducible runs; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Wall-clock budget; the search returns the best candidate so far once exceeded.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    #[serde(default = "default_parallel_eval")]
    pub parallel_eval: bool,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            num_generations: default_num_generations(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
            seed: None,
            time_limit_ms: None,
            parallel_eval: default_parallel_eval(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveEnvelope {
    pub roster: RosterSpec,
    pub grid: GridShape,
    #[serde(default)]
    pub params: EvolutionParams,
}

/// One exported cell of the timetable.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRow {
    pub slot: u32,
    pub section: String,
    pub teacher_name: TeacherName,
    pub subject_name: SubjectName,
    pub venue_name: VenueName,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// No teacher or venue is double-booked.
    Feasible,
    /// Best candidate found still has clashes.
    Conflicted,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ClashKind {
    Teacher,
    Venue,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clash {
    /// 1-based slot.
    pub slot: u32,
    pub kind: ClashKind,
    pub resource: String,
    /// 1-based sections holding the resource in this slot.
    pub sections: Vec<u32>,
    /// Bookings beyond the first; sums to the fitness score.
    pub extra: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub status: SolveStatus,
    pub fitness: u32,
    pub rows: Vec<TimetableRow>,
    pub clashes: Vec<Clash>,
    pub stats: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_fill_defaults_from_empty_object() {
        let p: EvolutionParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p, EvolutionParams::default());
        assert_eq!(p.population_size, 100);
        assert_eq!(p.num_generations, 50);
        assert_eq!(p.tournament_size, 3);
        assert!(p.seed.is_none());
    }

    #[test]
    fn envelope_uses_camel_case_and_default_params() {
        let raw = r#"{
            "roster": {
                "teachers": [{"name": "T1", "subjects": ["Math"]}],
                "subjects": ["Math"],
                "venues": ["V1"]
            },
            "grid": {"numSections": 2, "hoursPerDay": 3},
            "params": {"seed": 7, "timeLimitMs": 500}
        }"#;
        let env: SolveEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(env.grid.num_sections, 2);
        assert_eq!(env.grid.hours_per_day, 3);
        assert_eq!(env.params.seed, Some(7));
        assert_eq!(env.params.time_limit_ms, Some(500));
        assert_eq!(env.params.crossover_rate, 0.7);
        assert_eq!(env.roster.teachers[0].subjects[0], SubjectName::from("Math"));
    }
}
