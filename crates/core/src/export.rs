use std::fmt::Write;

use types::TimetableRow;

use crate::candidate::{Assignment, Candidate};
use crate::roster::{Grid, Roster};
use crate::SchedError;

fn section_label(section: usize) -> String {
    format!("Section {}", section + 1)
}

/// Turns a candidate into rows ordered by slot, then section, both 1-based.
pub fn to_table(
    candidate: &Candidate,
    roster: &Roster,
    grid: &Grid,
) -> Result<Vec<TimetableRow>, SchedError> {
    if candidate.len() != grid.cell_count() {
        return Err(SchedError::InvariantViolation(format!(
            "candidate has {} cells, grid expects {} ({} sections x {} hours)",
            candidate.len(),
            grid.cell_count(),
            grid.num_sections(),
            grid.hours_per_day()
        )));
    }

    candidate
        .cells()
        .iter()
        .enumerate()
        .map(|(offset, a)| -> Result<TimetableRow, SchedError> {
            let unknown =
                |what: &str| SchedError::InvariantViolation(format!("cell {offset}: unknown {what}"));
            Ok(TimetableRow {
                slot: grid.slot_of(offset) as u32 + 1,
                section: section_label(grid.section_of(offset)),
                teacher_name: roster
                    .teacher(a.teacher)
                    .ok_or_else(|| unknown("teacher"))?
                    .name
                    .clone(),
                subject_name: roster
                    .subject_name(a.subject)
                    .ok_or_else(|| unknown("subject"))?
                    .clone(),
                venue_name: roster
                    .venue_name(a.venue)
                    .ok_or_else(|| unknown("venue"))?
                    .clone(),
            })
        })
        .collect()
}

/// Tab-separated table with a header line.
pub fn render_text(rows: &[TimetableRow]) -> String {
    let mut out = String::from("Hour\tSection\tTeacher Name\tSubject Name\tVenue\n");
    for r in rows {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            r.slot, r.section, r.teacher_name, r.subject_name, r.venue_name
        );
    }
    out
}

/// Resolves exported rows back into a candidate. Every cell of the grid must
/// appear exactly once, names must exist in the roster and each teacher must
/// be qualified for the subject of the row.
pub fn from_rows(
    rows: &[TimetableRow],
    roster: &Roster,
    grid: &Grid,
) -> Result<Candidate, SchedError> {
    let mut errors = Vec::new();
    let mut cells: Vec<Option<Assignment>> = vec![None; grid.cell_count()];

    for (i, r) in rows.iter().enumerate() {
        let section = r
            .section
            .strip_prefix("Section ")
            .and_then(|n| n.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1 && n <= grid.num_sections());
        let slot = Some(r.slot as usize).filter(|&s| s >= 1 && s <= grid.hours_per_day());
        let (Some(slot), Some(section)) = (slot, section) else {
            errors.push(format!(
                "row {i}: cell (slot {}, {}) is outside the grid",
                r.slot, r.section
            ));
            continue;
        };

        let teacher = roster.teacher_by_name(&r.teacher_name.0);
        let subject = roster.subject_by_name(&r.subject_name.0);
        let venue = roster.venue_by_name(&r.venue_name.0);
        let (Some(teacher), Some(subject), Some(venue)) = (teacher, subject, venue) else {
            errors.push(format!("row {i}: unknown teacher, subject or venue name"));
            continue;
        };

        if !roster.is_qualified(teacher, subject) {
            errors.push(format!(
                "row {i}: teacher {} is not qualified for {}",
                r.teacher_name, r.subject_name
            ));
            continue;
        }

        let offset = grid.offset_of(slot - 1, section - 1);
        if cells[offset].is_some() {
            errors.push(format!("row {i}: duplicate cell (slot {slot}, {})", r.section));
            continue;
        }
        cells[offset] = Some(Assignment {
            teacher,
            subject,
            venue,
        });
    }

    let missing = cells.iter().filter(|c| c.is_none()).count();
    if missing > 0 && errors.is_empty() {
        errors.push(format!("{missing} cells of the grid have no row"));
    }
    if !errors.is_empty() {
        return Err(SchedError::Configuration(errors));
    }
    Ok(Candidate::new(cells.into_iter().flatten().collect()))
}
