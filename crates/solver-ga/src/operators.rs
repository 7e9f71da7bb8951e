use rand::Rng;
use sched_core::{Candidate, Roster};

use crate::encoding::{draw_subject, draw_teacher, draw_venue};

/// Single-point crossover: swaps the cells at offsets `cut..len` between the
/// two candidates, `len` being the shorter length and `cut` uniform in
/// `[1, len - 1]`. Returns the cut, or `None` when fewer than two cells leave
/// no legal cut point.
pub fn crossover<R: Rng + ?Sized>(a: &mut Candidate, b: &mut Candidate, rng: &mut R) -> Option<usize> {
    let len = a.len().min(b.len());
    if len < 2 {
        return None;
    }
    let cut = rng.gen_range(1..len);
    a.cells_mut()[cut..len].swap_with_slice(&mut b.cells_mut()[cut..len]);
    Some(cut)
}

/// Perturbs one uniformly chosen cell: half of the time its teacher, otherwise
/// its venue. A new teacher who cannot teach the cell's subject gets a subject
/// drawn from their own qualifications. Returns the touched offset.
pub fn mutate<R: Rng + ?Sized>(candidate: &mut Candidate, roster: &Roster, rng: &mut R) -> Option<usize> {
    if candidate.is_empty() {
        return None;
    }
    let offset = rng.gen_range(0..candidate.len());
    let cell = &mut candidate.cells_mut()[offset];
    if rng.gen_bool(0.5) {
        let teacher = draw_teacher(roster, rng);
        if !roster.is_qualified(teacher, cell.subject) {
            cell.subject = draw_subject(&roster.teachers()[teacher.0], rng);
        }
        cell.teacher = teacher;
    } else {
        cell.venue = draw_venue(roster, rng);
    }
    Some(offset)
}

/// Samples `k` candidates with replacement and returns the one with the
/// lowest fitness; the earliest draw wins ties and unevaluated candidates
/// rank last. `None` for an empty population.
pub fn tournament<'a, R: Rng + ?Sized>(
    population: &'a [Candidate],
    k: usize,
    rng: &mut R,
) -> Option<&'a Candidate> {
    if population.is_empty() {
        return None;
    }
    let score = |c: &Candidate| c.fitness().unwrap_or(u32::MAX);
    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..k {
        let c = &population[rng.gen_range(0..population.len())];
        if score(c) < score(best) {
            best = c;
        }
    }
    Some(best)
}

/// Fills a new pool of `size` candidates by repeated tournaments. An empty
/// population yields an empty pool.
pub fn select<R: Rng + ?Sized>(
    population: &[Candidate],
    k: usize,
    size: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    (0..size)
        .map_while(|_| tournament(population, k, rng).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::random_candidate;
    use crate::test_support::{grid, roster};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_roster() -> Roster {
        roster(
            &[("Ada", "Math"), ("Bob", "Art"), ("Cy", "Music Art"), ("Di", "Math Music")],
            3,
        )
    }

    proptest! {
        #[test]
        fn crossover_keeps_lengths_and_partitions(seed in any::<u64>(), sections in 1usize..5, hours in 1usize..6) {
            let r = sample_roster();
            let g = grid(sections, hours);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let a0 = random_candidate(&r, &g, &mut rng);
            let b0 = random_candidate(&r, &g, &mut rng);
            let (mut a, mut b) = (a0.clone(), b0.clone());

            let cut = crossover(&mut a, &mut b, &mut rng);
            prop_assert_eq!(a.len(), a0.len());
            prop_assert_eq!(b.len(), b0.len());
            match cut {
                None => {
                    prop_assert!(g.cell_count() < 2);
                    prop_assert_eq!(&a, &a0);
                    prop_assert_eq!(&b, &b0);
                }
                Some(cut) => {
                    prop_assert!(cut >= 1 && cut < g.cell_count());
                    prop_assert_eq!(&a.cells()[..cut], &a0.cells()[..cut]);
                    prop_assert_eq!(&a.cells()[cut..], &b0.cells()[cut..]);
                    prop_assert_eq!(&b.cells()[..cut], &b0.cells()[..cut]);
                    prop_assert_eq!(&b.cells()[cut..], &a0.cells()[cut..]);
                    prop_assert!(a.check(&r, &g).is_ok());
                    prop_assert!(b.check(&r, &g).is_ok());
                }
            }
        }

        #[test]
        fn mutation_touches_one_cell_and_keeps_qualifications(seed in any::<u64>(), sections in 1usize..5, hours in 1usize..6) {
            let r = sample_roster();
            let g = grid(sections, hours);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let before = random_candidate(&r, &g, &mut rng);
            let mut after = before.clone();

            let offset = mutate(&mut after, &r, &mut rng).unwrap();
            prop_assert_eq!(after.len(), before.len());
            let changed: Vec<usize> = (0..before.len())
                .filter(|&i| before.cells()[i] != after.cells()[i])
                .collect();
            prop_assert!(changed.is_empty() || changed == vec![offset]);
            prop_assert!(after.check(&r, &g).is_ok());
        }

        #[test]
        fn tournament_winner_beats_every_aspirant(seed in any::<u64>(), k in 1usize..6) {
            let r = sample_roster();
            let g = grid(3, 3);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut pop: Vec<Candidate> = (0..12).map(|_| random_candidate(&r, &g, &mut rng)).collect();
            for c in pop.iter_mut() {
                c.evaluate(g.num_sections());
            }

            // replay the draws the tournament is about to make
            let mut replay = rng.clone();
            let aspirants: Vec<u32> = (0..k)
                .map(|_| pop[replay.gen_range(0..pop.len())].fitness().unwrap())
                .collect();
            let winner = tournament(&pop, k, &mut rng).unwrap().fitness().unwrap();
            prop_assert!(aspirants.iter().all(|&f| winner <= f));
            prop_assert!(aspirants.contains(&winner));
        }
    }

    #[test]
    fn crossover_on_single_cell_is_a_no_op() {
        let r = sample_roster();
        let g = grid(1, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut a = random_candidate(&r, &g, &mut rng);
        let mut b = random_candidate(&r, &g, &mut rng);
        a.evaluate(1);
        assert_eq!(crossover(&mut a, &mut b, &mut rng), None);
        assert_eq!(a.fitness(), Some(0));
    }

    #[test]
    fn teacher_swap_redraws_unteachable_subject() {
        // Ada only teaches Math, Bob only Art: any teacher swap to the other
        // teacher must bring the subject along.
        let r = roster(&[("Ada", "Math"), ("Bob", "Art")], 1);
        let g = grid(1, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut c = random_candidate(&r, &g, &mut rng);
        for _ in 0..500 {
            mutate(&mut c, &r, &mut rng);
            assert!(c.check(&r, &g).is_ok());
        }
    }

    #[test]
    fn select_fills_pool_of_requested_size() {
        let r = sample_roster();
        let g = grid(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut pop: Vec<Candidate> = (0..9).map(|_| random_candidate(&r, &g, &mut rng)).collect();
        for c in pop.iter_mut() {
            c.evaluate(2);
        }
        let pool = select(&pop, 3, pop.len(), &mut rng);
        assert_eq!(pool.len(), 9);
        assert!(pool.iter().all(|c| pop.contains(c)));
    }

    #[test]
    fn empty_population_has_no_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(tournament(&[], 3, &mut rng).is_none());
        assert!(select(&[], 3, 10, &mut rng).is_empty());
    }
}
