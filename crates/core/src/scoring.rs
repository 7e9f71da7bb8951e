use std::collections::{BTreeMap, HashSet};

use types::{Clash, ClashKind};

use crate::candidate::{Assignment, Candidate};
use crate::roster::{Grid, Roster, VenueRef};

/// Counts hard-constraint violations: every repeat of a teacher, and every
/// repeat of a venue, within one slot costs one point.
///
/// # Panics
/// When `num_sections` is zero; a validated [`Grid`] never has that shape.
pub fn evaluate(cells: &[Assignment], num_sections: usize) -> u32 {
    assert!(num_sections > 0, "grid has no sections");
    let mut penalty = 0u32;
    let mut teachers = HashSet::with_capacity(num_sections);
    let mut venues = HashSet::with_capacity(num_sections);
    for slot in cells.chunks(num_sections) {
        teachers.clear();
        venues.clear();
        for a in slot {
            if !teachers.insert(a.teacher) {
                penalty += 1;
            }
            if !venues.insert(a.venue) {
                penalty += 1;
            }
        }
    }
    penalty
}

/// Lists every double booking of `candidate`, ordered by slot, then teachers
/// before venues, then by first section. Sum of `extra` equals [`evaluate`].
pub fn clash_report(candidate: &Candidate, roster: &Roster, grid: &Grid) -> Vec<Clash> {
    let mut out = Vec::new();
    for (slot, cells) in candidate.cells().chunks(grid.num_sections()).enumerate() {
        let mut by_teacher: BTreeMap<usize, Vec<u32>> = BTreeMap::new();
        let mut by_venue: BTreeMap<usize, Vec<u32>> = BTreeMap::new();
        for (section, a) in cells.iter().enumerate() {
            by_teacher.entry(a.teacher.0).or_default().push(section as u32 + 1);
            by_venue.entry(a.venue.0).or_default().push(section as u32 + 1);
        }

        let mut slot_clashes = Vec::new();
        for (t, sections) in by_teacher {
            if sections.len() > 1 {
                let resource = roster
                    .teachers()
                    .get(t)
                    .map(|e| e.name.0.clone())
                    .unwrap_or_else(|| format!("#{t}"));
                slot_clashes.push(clash(slot, ClashKind::Teacher, resource, sections));
            }
        }
        for (v, sections) in by_venue {
            if sections.len() > 1 {
                let resource = roster
                    .venue_name(VenueRef(v))
                    .map(|n| n.0.clone())
                    .unwrap_or_else(|| format!("#{v}"));
                slot_clashes.push(clash(slot, ClashKind::Venue, resource, sections));
            }
        }
        slot_clashes.sort_by_key(|c| (c.kind == ClashKind::Venue, c.sections[0]));
        out.extend(slot_clashes);
    }
    out
}

fn clash(slot: usize, kind: ClashKind, resource: String, sections: Vec<u32>) -> Clash {
    Clash {
        slot: slot as u32 + 1,
        kind,
        resource,
        extra: sections.len() as u32 - 1,
        sections,
    }
}
