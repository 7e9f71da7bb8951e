use rand::Rng;
use sched_core::{Assignment, Candidate, Grid, Roster, SubjectRef, TeacherEntry, TeacherRef, VenueRef};

pub(crate) fn draw_teacher<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> TeacherRef {
    TeacherRef(rng.gen_range(0..roster.teacher_count()))
}

pub(crate) fn draw_subject<R: Rng + ?Sized>(teacher: &TeacherEntry, rng: &mut R) -> SubjectRef {
    teacher.qualified[rng.gen_range(0..teacher.qualified.len())]
}

pub(crate) fn draw_venue<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> VenueRef {
    VenueRef(rng.gen_range(0..roster.venue_count()))
}

pub(crate) fn draw_assignment<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Assignment {
    let teacher = draw_teacher(roster, rng);
    let subject = draw_subject(&roster.teachers()[teacher.0], rng);
    let venue = draw_venue(roster, rng);
    Assignment {
        teacher,
        subject,
        venue,
    }
}

/// Fills every cell with a uniformly drawn teacher, one of that teacher's
/// subjects and a venue. Clashes are left for the fitness to penalise.
pub fn random_candidate<R: Rng + ?Sized>(roster: &Roster, grid: &Grid, rng: &mut R) -> Candidate {
    Candidate::new(
        (0..grid.cell_count())
            .map(|_| draw_assignment(roster, rng))
            .collect(),
    )
}

pub fn random_population<R: Rng + ?Sized>(
    size: usize,
    roster: &Roster,
    grid: &Grid,
    rng: &mut R,
) -> Vec<Candidate> {
    (0..size).map(|_| random_candidate(roster, grid, rng)).collect()
}
