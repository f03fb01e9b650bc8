use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Audience score on a 0.0 to 10.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct MovieRating(f64);

impl MovieRating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    pub fn new(rating: impl Into<f64>) -> Self {
        Self(rating.into())
    }

    pub fn is_in_range(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

/// Content classification such as `PG-13`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct MpaaRating(String);

impl MpaaRating {
    pub fn new(rating: impl Into<String>) -> Self {
        Self(rating.into())
    }
}
