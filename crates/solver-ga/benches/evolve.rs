use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sched_core::validate;
use solver_ga::Evolution;
use types::{EvolutionParams, GridShape, RosterSpec, SolveEnvelope, TeacherSpec};

fn school(teachers: usize, subjects: usize, venues: usize, sections: u32, hours: u32) -> SolveEnvelope {
    let subject_names: Vec<String> = (1..=subjects).map(|i| format!("S{i}")).collect();
    SolveEnvelope {
        roster: RosterSpec {
            teachers: (0..teachers)
                .map(|i| TeacherSpec {
                    name: format!("T{}", i + 1).as_str().into(),
                    subjects: vec![
                        subject_names[i % subjects].as_str().into(),
                        subject_names[(i + 1) % subjects].as_str().into(),
                    ],
                })
                .collect(),
            subjects: subject_names.iter().map(|s| s.as_str().into()).collect(),
            venues: (1..=venues).map(|i| format!("R{i}").as_str().into()).collect(),
        },
        grid: GridShape {
            num_sections: sections,
            hours_per_day: hours,
        },
        params: EvolutionParams {
            seed: Some(42),
            ..EvolutionParams::default()
        },
    }
}

fn bench_evolve(c: &mut Criterion) {
    let small = validate(&school(8, 5, 6, 4, 6)).expect("valid roster");
    let large = validate(&school(40, 12, 30, 20, 8)).expect("valid roster");

    c.bench_function("evolve 4x6 default params", |b| {
        b.iter(|| Evolution::new(black_box(&small)).run().expect("run"))
    });
    c.bench_function("evolve 20x8 default params", |b| {
        b.iter(|| Evolution::new(black_box(&large)).run().expect("run"))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_evolve
}
criterion_main!(benches);
