//! ELO ratings for competitive debate.
//!
//! Ratings are computed by replaying rounds strictly in the order they were
//! held. Each judge's decision moves both competitors against the expected
//! score from before the round.
//!
//! ```
//! use debate_elo::{Leaderboard, RatingSystem, Round, Silent, Tournament, Winner, format_rankings};
//!
//! let system = RatingSystem::new();
//! let tournaments = [Tournament::new(
//!     "Districts2020",
//!     vec![Round::new("A", "B", [Winner::Aff])],
//! )];
//!
//! let mut leaderboard = Leaderboard::new();
//! system.replay(&mut leaderboard, &tournaments, &mut Silent);
//!
//! assert_eq!(format_rankings(&leaderboard), "1. A: 1016\n2. B: 984");
//! ```

mod leaderboard;
mod merge;
mod ranking;
mod rating;
mod rating_system;
mod replay;
mod round;
mod score;

pub use leaderboard::Leaderboard;
pub use merge::{merge_tournaments, pending, Identity};
pub use ranking::{format_rankings, standings, Standing};
pub use rating::{RatingDifference, RatingScalar};
pub use rating_system::{RatingSystem, RatingSystemBuilder};
pub use replay::{Progress, ReplaySummary, RoundOutcome, Silent};
pub use round::{Round, Tournament, Winner};
pub use score::Score;
