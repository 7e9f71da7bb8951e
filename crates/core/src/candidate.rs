use crate::roster::{Grid, Roster, SubjectRef, TeacherRef, VenueRef};
use crate::scoring;
use crate::SchedError;

/// Value of one cell: who teaches what, where.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Assignment {
    pub teacher: TeacherRef,
    pub subject: SubjectRef,
    pub venue: VenueRef,
}

/// Flat slot-major timetable, one [`Assignment`] per (slot, section) cell.
///
/// The fitness is cached and dropped whenever the cells are borrowed mutably.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    cells: Vec<Assignment>,
    fitness: Option<u32>,
}

impl Candidate {
    pub fn new(cells: Vec<Assignment>) -> Self {
        Self {
            cells,
            fitness: None,
        }
    }

    pub fn cells(&self) -> &[Assignment] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Assignment] {
        self.fitness = None;
        &mut self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cached score, `None` when the cells changed since the last evaluation.
    pub fn fitness(&self) -> Option<u32> {
        self.fitness
    }

    pub fn evaluate(&mut self, num_sections: usize) -> u32 {
        match self.fitness {
            Some(f) => f,
            None => {
                let f = scoring::evaluate(&self.cells, num_sections);
                self.fitness = Some(f);
                f
            }
        }
    }

    /// Structural check: cell count matches the grid, every reference
    /// resolves, every subject is one its teacher may teach.
    pub fn check(&self, roster: &Roster, grid: &Grid) -> Result<(), SchedError> {
        if self.cells.len() != grid.cell_count() {
            return Err(SchedError::InvariantViolation(format!(
                "candidate has {} cells, grid expects {}",
                self.cells.len(),
                grid.cell_count()
            )));
        }
        for (offset, a) in self.cells.iter().enumerate() {
            if roster.venue_name(a.venue).is_none() {
                return Err(SchedError::InvariantViolation(format!(
                    "cell {offset} references unknown venue {}",
                    a.venue
                )));
            }
            if !roster.is_qualified(a.teacher, a.subject) {
                return Err(SchedError::InvariantViolation(format!(
                    "cell {offset}: teacher {} is not qualified for subject {}",
                    a.teacher, a.subject
                )));
            }
        }
        Ok(())
    }
}
