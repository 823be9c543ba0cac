use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pennant::league::{League, LeagueField, Strength, field_from_ranked};
use pennant::sim::{RoundFormats, run_postseason};
use pennant::sim::tournament::TournamentBuilder;

fn graded_field(league: League) -> LeagueField {
    let ranked = (0..6)
        .map(|i| {
            (
                format!("{}-{}", league.abbrev(), i + 1),
                Strength::flat(100.0 - 10.0 * i as f64),
                100.0 - i as f64,
            )
        })
        .collect();
    field_from_ranked(league, ranked).expect("valid bench field")
}

fn bench_single_postseason(c: &mut Criterion) {
    let al = graded_field(League::American);
    let nl = graded_field(League::National);
    let formats = RoundFormats::default();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("single_postseason", |b| {
        b.iter(|| run_postseason(&mut rng, &al, &nl, &formats, 5.0).expect("trial runs"))
    });
}

fn bench_tournament_10k(c: &mut Criterion) {
    let tournament = TournamentBuilder::new()
        .field(graded_field(League::American))
        .field(graded_field(League::National))
        .trials(10_000)
        .seed(42)
        .build()
        .expect("valid bench tournament");

    c.bench_function("tournament_10k_trials", |b| {
        b.iter(|| tournament.run().expect("run completes"))
    });
}

criterion_group!(benches, bench_single_postseason, bench_tournament_10k);
criterion_main!(benches);
