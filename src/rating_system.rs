use crate::{RatingDifference, RatingScalar, Score};

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    default_rating: f64,
    k_factor: f64,
    scale: f64,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: 1000.0,
            k_factor: 32.0,
            scale: 400.0,
        }
    }

    /// Rating of a competitor before their first decided round.
    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        assert!(default_rating.is_finite());
        self.default_rating = default_rating;
        self
    }

    /// Maximum rating swing caused by a single decision.
    pub fn k_factor(&mut self, k_factor: f64) -> &mut Self {
        assert!(k_factor >= 0.0 && k_factor.is_finite());
        self.k_factor = k_factor;
        self
    }

    /// Rating difference at which the stronger side is expected to win ten
    /// times as often as it loses.
    pub fn scale(&mut self, scale: f64) -> &mut Self {
        assert!(scale > 0.0 && scale.is_finite());
        self.scale = scale;
        self
    }

    pub fn build(&self) -> RatingSystem {
        RatingSystem {
            default_rating: self.default_rating,
            k_factor: self.k_factor,
            scale: self.scale,
        }
    }
}

/// Logistic ELO rating system with a fixed K-factor.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    default_rating: f64,
    k_factor: f64,
    scale: f64,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    pub fn default_rating(&self) -> RatingScalar {
        RatingScalar(self.default_rating)
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Probability that `first` beats `second`.
    pub fn expected_score(&self, first: RatingScalar, second: RatingScalar) -> Score {
        let difference = f64::from(second - first);
        Score(1.0 / (1.0 + 10f64.powf(difference / self.scale)))
    }

    /// Moves `rating` towards the observed outcome by at most the K-factor.
    #[must_use]
    pub fn update_rating(&self, rating: RatingScalar, actual: Score, expected: Score) -> RatingScalar {
        rating + RatingDifference(self.k_factor * (actual - expected))
    }
}
