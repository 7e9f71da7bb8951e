use std::collections::{HashMap, HashSet};
use std::fmt;

use types::{GridShape, RosterSpec, SubjectName, TeacherName, VenueName};

use crate::SchedError;

macro_rules! ref_newtype {
    ($name:ident) => {
        /// Index into the owning [`Roster`] collection.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}
ref_newtype!(TeacherRef);
ref_newtype!(SubjectRef);
ref_newtype!(VenueRef);

#[derive(Clone, Debug)]
pub struct TeacherEntry {
    pub name: TeacherName,
    /// Sorted, deduplicated, never empty.
    pub qualified: Vec<SubjectRef>,
}

/// Validated, index-based roster. Cannot be built with an empty collection
/// or with a teacher lacking qualifications.
#[derive(Clone, Debug)]
pub struct Roster {
    teachers: Vec<TeacherEntry>,
    subjects: Vec<SubjectName>,
    venues: Vec<VenueName>,
}

impl Roster {
    pub fn from_spec(spec: &RosterSpec) -> Result<Self, SchedError> {
        let mut errors: Vec<String> = Vec::new();

        if spec.teachers.is_empty() {
            errors.push("teachers is empty".into());
        }
        if spec.subjects.is_empty() {
            errors.push("subjects is empty".into());
        }
        if spec.venues.is_empty() {
            errors.push("venues is empty".into());
        }

        fn chk_names<'a>(
            kind: &str,
            names: impl Iterator<Item = &'a str>,
            errors: &mut Vec<String>,
        ) {
            let mut seen = HashSet::new();
            for n in names {
                if n.trim().is_empty() {
                    errors.push(format!("{kind} name is blank"));
                } else if !seen.insert(n) {
                    errors.push(format!("duplicate {kind} name: {n}"));
                }
            }
        }
        chk_names(
            "teacher",
            spec.teachers.iter().map(|t| t.name.0.as_str()),
            &mut errors,
        );
        chk_names("subject", spec.subjects.iter().map(|s| s.0.as_str()), &mut errors);
        chk_names("venue", spec.venues.iter().map(|v| v.0.as_str()), &mut errors);

        let subject_index: HashMap<&str, usize> = spec
            .subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.0.as_str(), i))
            .collect();

        let mut teachers = Vec::with_capacity(spec.teachers.len());
        for t in &spec.teachers {
            let mut qualified = Vec::with_capacity(t.subjects.len());
            for s in &t.subjects {
                match subject_index.get(s.0.as_str()) {
                    Some(&i) => qualified.push(SubjectRef(i)),
                    None => errors.push(format!(
                        "teacher {} references missing subject {}",
                        t.name, s
                    )),
                }
            }
            qualified.sort_unstable();
            qualified.dedup();
            if t.subjects.is_empty() {
                errors.push(format!("teacher {} has no qualified subjects", t.name));
            }
            teachers.push(TeacherEntry {
                name: t.name.clone(),
                qualified,
            });
        }

        if errors.is_empty() {
            Ok(Self {
                teachers,
                subjects: spec.subjects.clone(),
                venues: spec.venues.clone(),
            })
        } else {
            Err(SchedError::Configuration(errors))
        }
    }

    pub fn teachers(&self) -> &[TeacherEntry] {
        &self.teachers
    }

    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn venue_count(&self) -> usize {
        self.venues.len()
    }

    pub fn teacher(&self, t: TeacherRef) -> Option<&TeacherEntry> {
        self.teachers.get(t.0)
    }

    pub fn subject_name(&self, s: SubjectRef) -> Option<&SubjectName> {
        self.subjects.get(s.0)
    }

    pub fn venue_name(&self, v: VenueRef) -> Option<&VenueName> {
        self.venues.get(v.0)
    }

    pub fn is_qualified(&self, t: TeacherRef, s: SubjectRef) -> bool {
        self.teacher(t)
            .map_or(false, |e| e.qualified.binary_search(&s).is_ok())
    }

    pub fn teacher_by_name(&self, name: &str) -> Option<TeacherRef> {
        self.teachers
            .iter()
            .position(|t| t.name.0 == name)
            .map(TeacherRef)
    }

    pub fn subject_by_name(&self, name: &str) -> Option<SubjectRef> {
        self.subjects.iter().position(|s| s.0 == name).map(SubjectRef)
    }

    pub fn venue_by_name(&self, name: &str) -> Option<VenueRef> {
        self.venues.iter().position(|v| v.0 == name).map(VenueRef)
    }

    /// Sanity checks that make a clash-free timetable unlikely but never block a run.
    pub fn advisories(&self, grid: &Grid) -> Vec<String> {
        let mut out = Vec::new();
        if grid.hours_per_day() > self.teacher_count() {
            out.push(format!(
                "hoursPerDay ({}) exceeds number of teachers ({})",
                grid.hours_per_day(),
                self.teacher_count()
            ));
        }
        if self.venue_count() < grid.num_sections() {
            out.push(format!(
                "number of venues ({}) is less than number of sections ({})",
                self.venue_count(),
                grid.num_sections()
            ));
        }
        out
    }
}

pub const MAX_GRID_CELLS: usize = 100_000;

/// Validated grid shape; both dimensions are at least one and the cell count
/// stays within [`MAX_GRID_CELLS`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Grid {
    num_sections: usize,
    hours_per_day: usize,
}

impl Grid {
    pub fn new(shape: GridShape) -> Result<Self, SchedError> {
        let mut errors = Vec::new();
        if shape.num_sections == 0 {
            errors.push("numSections must be positive".to_string());
        }
        if shape.hours_per_day == 0 {
            errors.push("hoursPerDay must be positive".to_string());
        }
        let cells = u64::from(shape.num_sections) * u64::from(shape.hours_per_day);
        if cells > MAX_GRID_CELLS as u64 {
            errors.push(format!("grid has {cells} cells, at most {MAX_GRID_CELLS} allowed"));
        }
        if !errors.is_empty() {
            return Err(SchedError::Configuration(errors));
        }
        Ok(Self {
            num_sections: shape.num_sections as usize,
            hours_per_day: shape.hours_per_day as usize,
        })
    }

    pub fn num_sections(&self) -> usize {
        self.num_sections
    }

    pub fn hours_per_day(&self) -> usize {
        self.hours_per_day
    }

    pub fn cell_count(&self) -> usize {
        self.num_sections * self.hours_per_day
    }

    pub fn slot_of(&self, offset: usize) -> usize {
        offset / self.num_sections
    }

    pub fn section_of(&self, offset: usize) -> usize {
        offset % self.num_sections
    }

    pub fn offset_of(&self, slot: usize, section: usize) -> usize {
        slot * self.num_sections + section
    }
}
