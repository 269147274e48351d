use std::fmt;

use crate::{Leaderboard, RatingScalar};

/// A competitor's place on the leaderboard.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Standing<'a> {
    /// 1-based position.
    pub rank: usize,
    pub name: &'a str,
    pub rating: RatingScalar,
}

impl fmt::Display for Standing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {}: {}", self.rank, self.name, self.rating.floor())
    }
}

/// Competitors ordered by rating, highest first. Competitors with equal
/// ratings keep their leaderboard order.
pub fn standings(leaderboard: &Leaderboard) -> Vec<Standing<'_>> {
    let mut entries: Vec<_> = leaderboard.iter().collect();
    entries.sort_by(|(_, a), (_, b)| f64::from(*b).total_cmp(&f64::from(*a)));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, rating))| Standing {
            rank: i + 1,
            name,
            rating,
        })
        .collect()
}

/// Renders one `"{rank}. {name}: {rating}"` line per competitor, with
/// ratings floored to integers.
pub fn format_rankings(leaderboard: &Leaderboard) -> String {
    standings(leaderboard)
        .iter()
        .map(Standing::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
