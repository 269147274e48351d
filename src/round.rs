use std::{convert::Infallible, fmt, str::FromStr};

/// One judge's decision in a round.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Winner {
    Aff,
    Neg,
    /// Any other tag, such as a double win or a low point win. Carries no
    /// rating change.
    Other(String),
}

impl FromStr for Winner {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "AFF" => Winner::Aff,
            "NEG" => Winner::Neg,
            other => Winner::Other(other.to_owned()),
        })
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Winner::Aff => f.write_str("AFF"),
            Winner::Neg => f.write_str("NEG"),
            Winner::Other(tag) => f.write_str(tag),
        }
    }
}

/// An adjudicated debate between an affirmative and a negative competitor.
///
/// An empty name stands for a competitor the source did not report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Round {
    pub affirmative: String,
    pub negative: String,
    /// One entry per judge, in ballot order.
    pub winners: Vec<Winner>,
}

impl Round {
    pub fn new<A, N, W>(affirmative: A, negative: N, winners: W) -> Round
    where
        A: Into<String>,
        N: Into<String>,
        W: IntoIterator<Item = Winner>,
    {
        Round {
            affirmative: affirmative.into(),
            negative: negative.into(),
            winners: winners.into_iter().collect(),
        }
    }

    /// Both sides are known and at least one decision was recorded.
    pub fn is_decided(&self) -> bool {
        !self.affirmative.is_empty() && !self.negative.is_empty() && !self.winners.is_empty()
    }
}

/// Results of one tournament, rounds in the order they were held.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tournament {
    /// Unique name, used to recognize tournaments that were already
    /// ingested.
    pub name: String,
    pub rounds: Vec<Round>,
}

impl Tournament {
    pub fn new<S: Into<String>>(name: S, rounds: Vec<Round>) -> Tournament {
        Tournament {
            name: name.into(),
            rounds,
        }
    }
}
