#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use debate_elo::{Leaderboard, RatingScalar, RatingSystem, Round, Silent, Tournament, Winner};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary)]
struct ArbitraryRound {
    affirmative: u8,
    negative: u8,
    winners: Vec<u8>,
}

impl ArbitraryRound {
    fn into_round(self) -> Option<Round> {
        let (affirmative, negative) = (self.affirmative % 8, self.negative % 8);
        if affirmative == negative {
            return None;
        }
        Some(Round::new(
            format!("P{affirmative}"),
            format!("P{negative}"),
            self.winners.into_iter().map(|tag| match tag % 3 {
                0 => Winner::Aff,
                1 => Winner::Neg,
                _ => Winner::Other(format!("tag {tag}")),
            }),
        ))
    }
}

#[derive(Arbitrary)]
struct Replay {
    seed: Vec<(u8, f64)>,
    rounds: Vec<ArbitraryRound>,
}

fn total(leaderboard: &Leaderboard) -> f64 {
    leaderboard.iter().map(|(_, rating)| f64::from(rating)).sum()
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(replay) = Replay::arbitrary(&mut u) else {
        return;
    };

    let seed: Leaderboard = replay
        .seed
        .into_iter()
        .filter(|(_, rating)| rating.is_finite())
        .map(|(name, rating)| (format!("P{}", name % 8), RatingScalar(rating.clamp(-10000.0, 10000.0))))
        .collect();
    let rounds: Vec<Round> = replay.rounds.into_iter().filter_map(ArbitraryRound::into_round).collect();

    let before = total(&seed) + 1000.0 * 8.0;
    let seeded = seed.len();

    let system = RatingSystem::new();
    let (leaderboard, summary) = system.resume(seed, &[Tournament::new("fuzz", rounds)], &mut Silent);

    for (_, rating) in leaderboard.iter() {
        assert!(f64::from(rating).is_finite());
    }

    // Newcomers enter at the default rating and every decision moves points
    // from one side to the other.
    let after = total(&leaderboard) + 1000.0 * (8 - leaderboard.len() + seeded) as f64;
    assert!((after - before).abs() <= 1e-6 * (1.0 + summary.decisions as f64) * 10000.0);
});
