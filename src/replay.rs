use std::collections::BTreeMap;

use crate::{Leaderboard, RatingSystem, Round, Score, Tournament, Winner};

/// Observer notified as a replay or merge moves from one tournament to the
/// next.
pub trait Progress {
    /// Called before tournament `index` (1-based) of `total` is processed.
    fn tournament(&mut self, index: usize, total: usize, name: &str);
}

impl<F> Progress for F
where
    F: FnMut(usize, usize, &str),
{
    fn tournament(&mut self, index: usize, total: usize, name: &str) {
        self(index, total, name)
    }
}

/// Progress observer that ignores all notifications.
#[derive(Debug, Copy, Clone, Default)]
pub struct Silent;

impl Progress for Silent {
    fn tournament(&mut self, _index: usize, _total: usize, _name: &str) {}
}

/// Effect of a single round on the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// A competitor or the decisions were missing. Nothing changed.
    Skipped,
    Applied {
        /// Number of `AFF`/`NEG` decisions that moved ratings.
        decisions: usize,
        /// Tags that were neither `AFF` nor `NEG`, in ballot order.
        ignored: Vec<String>,
    },
}

/// Totals gathered over a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub tournaments: usize,
    pub rounds_applied: usize,
    pub rounds_skipped: usize,
    pub decisions: usize,
    /// Occurrences of each unrecognized winner tag.
    pub ignored_tags: BTreeMap<String, usize>,
}

impl ReplaySummary {
    fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Skipped => self.rounds_skipped += 1,
            RoundOutcome::Applied { decisions, ignored } => {
                self.rounds_applied += 1;
                self.decisions += decisions;
                for tag in ignored {
                    *self.ignored_tags.entry(tag).or_insert(0) += 1;
                }
            }
        }
    }
}

impl RatingSystem {
    /// Applies every decision of `round` to both competitors.
    ///
    /// Expected scores are computed once from the ratings before the round,
    /// so a panel of judges moves ratings against the same expectation.
    pub fn apply_round(&self, leaderboard: &mut Leaderboard, round: &Round) -> RoundOutcome {
        if !round.is_decided() {
            return RoundOutcome::Skipped;
        }

        let mut aff = leaderboard.get_or(&round.affirmative, self.default_rating());
        let mut neg = leaderboard.get_or(&round.negative, self.default_rating());

        let expected_aff = self.expected_score(aff, neg);
        let expected_neg = expected_aff.opposite();

        let mut decisions = 0;
        let mut ignored = Vec::new();

        for winner in &round.winners {
            let actual_aff = match winner {
                Winner::Aff => Score::WIN,
                Winner::Neg => Score::LOSS,
                Winner::Other(tag) => {
                    ignored.push(tag.clone());
                    continue;
                }
            };

            aff = self.update_rating(aff, actual_aff, expected_aff);
            neg = self.update_rating(neg, actual_aff.opposite(), expected_neg);
            decisions += 1;
        }

        leaderboard.set(&round.affirmative, aff);
        leaderboard.set(&round.negative, neg);

        RoundOutcome::Applied { decisions, ignored }
    }

    /// Folds all rounds of all tournaments into `leaderboard`, strictly in
    /// the given order.
    pub fn replay<P: Progress>(
        &self,
        leaderboard: &mut Leaderboard,
        tournaments: &[Tournament],
        progress: &mut P,
    ) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for (i, tournament) in tournaments.iter().enumerate() {
            progress.tournament(i + 1, tournaments.len(), &tournament.name);

            for round in &tournament.rounds {
                summary.record(self.apply_round(leaderboard, round));
            }

            summary.tournaments += 1;
        }

        summary
    }

    /// Continues the rating recurrence from previously persisted ratings.
    pub fn resume<P: Progress>(
        &self,
        seed: Leaderboard,
        tournaments: &[Tournament],
        progress: &mut P,
    ) -> (Leaderboard, ReplaySummary) {
        let mut leaderboard = seed;
        let summary = self.replay(&mut leaderboard, tournaments, progress);
        (leaderboard, summary)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::RatingScalar;

    fn round(aff: &str, neg: &str, winners: &[&str]) -> Round {
        Round::new(aff, neg, winners.iter().map(|w| w.parse::<Winner>().unwrap()))
    }

    #[test]
    fn test_single_aff_win_from_empty() {
        let system = RatingSystem::new();
        let mut leaderboard = Leaderboard::new();

        let outcome = system.apply_round(&mut leaderboard, &round("A", "B", &["AFF"]));

        assert_eq!(
            outcome,
            RoundOutcome::Applied {
                decisions: 1,
                ignored: vec![]
            }
        );
        assert_eq!(leaderboard.get("A"), Some(RatingScalar(1016.0)));
        assert_eq!(leaderboard.get("B"), Some(RatingScalar(984.0)));
    }

    #[test]
    fn test_neg_win() {
        let system = RatingSystem::new();
        let mut leaderboard = Leaderboard::new();

        system.apply_round(&mut leaderboard, &round("A", "B", &["NEG"]));

        assert_eq!(leaderboard.get("A"), Some(RatingScalar(984.0)));
        assert_eq!(leaderboard.get("B"), Some(RatingScalar(1016.0)));
    }

    #[test]
    fn test_panel_uses_pre_round_expectation() {
        let system = RatingSystem::new();
        let mut leaderboard = Leaderboard::new();

        system.apply_round(&mut leaderboard, &round("A", "B", &["AFF", "AFF", "NEG"]));

        // Every ballot is scored against 0.5, so the split panel nets one
        // half-swing in either direction.
        assert_eq!(leaderboard.get("A"), Some(RatingScalar(1016.0)));
        assert_eq!(leaderboard.get("B"), Some(RatingScalar(984.0)));

        let mut unanimous = Leaderboard::new();
        system.apply_round(&mut unanimous, &round("A", "B", &["AFF", "AFF"]));
        assert_eq!(unanimous.get("A"), Some(RatingScalar(1032.0)));
        assert_eq!(unanimous.get("B"), Some(RatingScalar(968.0)));
    }

    #[test]
    fn test_undecided_rounds_leave_leaderboard_untouched() {
        let system = RatingSystem::new();
        let mut leaderboard: Leaderboard = [("A", RatingScalar(1100.0))].into_iter().collect();
        let before = leaderboard.clone();

        for r in [
            round("A", "B", &[]),
            round("", "B", &["AFF"]),
            round("A", "", &["NEG"]),
        ] {
            assert_eq!(system.apply_round(&mut leaderboard, &r), RoundOutcome::Skipped);
        }

        assert_eq!(leaderboard, before);
    }

    #[test]
    fn test_unrecognized_tags_are_reported() {
        let system = RatingSystem::new();
        let mut leaderboard = Leaderboard::new();

        let outcome = system.apply_round(&mut leaderboard, &round("A", "B", &["BYE", "AFF"]));

        assert_eq!(
            outcome,
            RoundOutcome::Applied {
                decisions: 1,
                ignored: vec!["BYE".to_owned()]
            }
        );
        assert_eq!(leaderboard.get("A"), Some(RatingScalar(1016.0)));
    }

    #[test]
    fn test_only_unrecognized_tags_still_register_competitors() {
        let system = RatingSystem::new();
        let mut leaderboard = Leaderboard::new();

        system.apply_round(&mut leaderboard, &round("A", "B", &["DOUBLE WIN"]));

        assert_eq!(leaderboard.get("A"), Some(RatingScalar(1000.0)));
        assert_eq!(leaderboard.get("B"), Some(RatingScalar(1000.0)));
    }

    #[test]
    fn test_seeded_and_default_ratings() {
        let system = RatingSystem::new();
        let seed: Leaderboard = [("Alice", RatingScalar(1200.0))].into_iter().collect();
        let tournaments = [Tournament::new(
            "Districts2020",
            vec![round("Alice", "Bob", &["AFF"])],
        )];

        let (leaderboard, summary) = system.resume(seed, &tournaments, &mut Silent);

        let expected = system.expected_score(RatingScalar(1200.0), RatingScalar(1000.0));
        assert_eq!(
            leaderboard.get("Alice"),
            Some(system.update_rating(RatingScalar(1200.0), Score::WIN, expected))
        );
        assert_eq!(
            leaderboard.get("Bob"),
            Some(system.update_rating(RatingScalar(1000.0), Score::LOSS, expected.opposite()))
        );
        assert_eq!(summary.rounds_applied, 1);
    }

    #[test]
    fn test_replay_reports_progress_in_order() {
        let system = RatingSystem::new();
        let tournaments = [
            Tournament::new("First", vec![round("A", "B", &["AFF"])]),
            Tournament::new("Second", vec![round("A", "C", &["NEG"]), round("", "C", &["AFF"])]),
        ];

        let mut seen = Vec::new();
        let mut leaderboard = Leaderboard::new();
        let summary = system.replay(
            &mut leaderboard,
            &tournaments,
            &mut |index: usize, total: usize, name: &str| seen.push((index, total, name.to_owned())),
        );

        assert_eq!(
            seen,
            [(1, 2, "First".to_owned()), (2, 2, "Second".to_owned())]
        );
        assert_eq!(summary.tournaments, 2);
        assert_eq!(summary.rounds_applied, 2);
        assert_eq!(summary.rounds_skipped, 1);
        assert_eq!(summary.decisions, 2);
    }

    #[test]
    fn test_order_matters() {
        let system = RatingSystem::new();
        let first = round("A", "B", &["AFF"]);
        let second = round("B", "C", &["AFF"]);

        let mut forward = Leaderboard::new();
        system.apply_round(&mut forward, &first);
        system.apply_round(&mut forward, &second);

        let mut backward = Leaderboard::new();
        system.apply_round(&mut backward, &second);
        system.apply_round(&mut backward, &first);

        assert_ne!(forward.get("B"), backward.get("B"));
    }

    fn arb_round() -> impl Strategy<Value = Round> {
        (
            prop::sample::select(vec!["A", "B", "C", "D", ""]),
            prop::sample::select(vec!["A", "B", "C", "D", ""]),
            prop::collection::vec(prop::sample::select(vec!["AFF", "NEG", "BYE"]), 0..4),
        )
            .prop_map(|(aff, neg, winners)| round(aff, neg, &winners))
    }

    proptest! {
        #[test]
        fn prop_replay_is_deterministic(rounds in prop::collection::vec(arb_round(), 0..40)) {
            let system = RatingSystem::new();
            let tournaments = [Tournament::new("T", rounds)];

            let mut first = Leaderboard::new();
            system.replay(&mut first, &tournaments, &mut Silent);
            let mut second = Leaderboard::new();
            system.replay(&mut second, &tournaments, &mut Silent);

            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_aff_win_moves_ratings_apart(aff in 0.0..3000.0f64, neg in 0.0..3000.0f64) {
            let system = RatingSystem::new();
            let mut leaderboard: Leaderboard = [("A", RatingScalar(aff)), ("B", RatingScalar(neg))]
                .into_iter()
                .collect();

            system.apply_round(&mut leaderboard, &round("A", "B", &["AFF"]));

            prop_assert!(leaderboard.get("A").unwrap() > RatingScalar(aff));
            prop_assert!(leaderboard.get("B").unwrap() < RatingScalar(neg));
        }

        #[test]
        fn prop_neg_win_moves_ratings_apart(aff in 0.0..3000.0f64, neg in 0.0..3000.0f64) {
            let system = RatingSystem::new();
            let mut leaderboard: Leaderboard = [("A", RatingScalar(aff)), ("B", RatingScalar(neg))]
                .into_iter()
                .collect();

            system.apply_round(&mut leaderboard, &round("A", "B", &["NEG"]));

            prop_assert!(leaderboard.get("A").unwrap() < RatingScalar(aff));
            prop_assert!(leaderboard.get("B").unwrap() > RatingScalar(neg));
        }
    }
}
