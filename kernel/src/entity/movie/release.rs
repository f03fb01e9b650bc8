use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LengthMinutes(i32);

impl LengthMinutes {
    pub fn new(minutes: impl Into<i32>) -> Self {
        Self(minutes.into())
    }
}
