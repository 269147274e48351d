use std::ops;

/// An outcome or expectation value in the range `0.0..=1.0`, where `0.0` is
/// a loss and `1.0` is a win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Score(pub f64);

impl From<Score> for f64 {
    #[inline]
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const WIN: Score = Score(1.0);

    /// The same outcome seen from the other side of the round.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl ops::Sub<Score> for Score {
    type Output = f64;

    #[inline]
    fn sub(self, rhs: Score) -> f64 {
        self.0 - rhs.0
    }
}
