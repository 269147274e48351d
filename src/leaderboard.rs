use rustc_hash::FxHashMap;

use crate::{ranking, RatingScalar};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PlayerId(usize);

/// Current rating of every competitor seen so far.
///
/// Iteration follows the order in which competitors were first inserted.
/// Updating an existing competitor keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    ids: FxHashMap<Box<str>, PlayerId>,
    entries: Vec<(Box<str>, RatingScalar)>,
}

impl Leaderboard {
    pub fn new() -> Leaderboard {
        Leaderboard::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<RatingScalar> {
        self.ids
            .get(name)
            .map(|&PlayerId(id)| self.entries[id].1)
    }

    /// Rating of `name`, or `default` for a competitor that was never rated.
    pub fn get_or(&self, name: &str, default: RatingScalar) -> RatingScalar {
        self.get(name).unwrap_or(default)
    }

    pub fn set(&mut self, name: &str, rating: RatingScalar) {
        match self.ids.get(name) {
            Some(&PlayerId(id)) => self.entries[id].1 = rating,
            None => {
                let id = PlayerId(self.entries.len());
                self.ids.insert(name.into(), id);
                self.entries.push((name.into(), rating));
            }
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, RatingScalar)> + '_ {
        self.entries
            .iter()
            .map(|(name, rating)| (name.as_ref(), *rating))
    }

    /// A copy ordered by rating, highest first. Ties keep their current
    /// relative order.
    #[must_use]
    pub fn sorted(&self) -> Leaderboard {
        ranking::standings(self)
            .into_iter()
            .map(|standing| (standing.name, standing.rating))
            .collect()
    }
}

impl<S: AsRef<str>> Extend<(S, RatingScalar)> for Leaderboard {
    fn extend<I: IntoIterator<Item = (S, RatingScalar)>>(&mut self, iter: I) {
        for (name, rating) in iter {
            self.set(name.as_ref(), rating);
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, RatingScalar)> for Leaderboard {
    fn from_iter<I: IntoIterator<Item = (S, RatingScalar)>>(iter: I) -> Leaderboard {
        let mut leaderboard = Leaderboard::default();
        leaderboard.extend(iter);
        leaderboard
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use std::fmt;

    use serde::{
        de::{MapAccess, Visitor},
        ser::SerializeMap,
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::Leaderboard;
    use crate::RatingScalar;

    impl Serialize for Leaderboard {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, RatingScalar(rating)) in self.iter() {
                map.serialize_entry(name, &rating)?;
            }
            map.end()
        }
    }

    struct LeaderboardVisitor;

    impl<'de> Visitor<'de> for LeaderboardVisitor {
        type Value = Leaderboard;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from competitor name to rating")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Leaderboard, A::Error> {
            let mut leaderboard = Leaderboard::default();
            while let Some((name, rating)) = access.next_entry::<String, f64>()? {
                leaderboard.set(&name, RatingScalar(rating));
            }
            Ok(leaderboard)
        }
    }

    impl<'de> Deserialize<'de> for Leaderboard {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Leaderboard, D::Error> {
            deserializer.deserialize_map(LeaderboardVisitor)
        }
    }
}
