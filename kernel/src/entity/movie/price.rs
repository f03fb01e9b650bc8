use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalRate(f64);

impl RentalRate {
    pub fn new(rate: impl Into<f64>) -> Self {
        Self(rate.into())
    }
}

impl Default for RentalRate {
    fn default() -> Self {
        Self::new(2.99)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct LateFee(f64);

impl LateFee {
    pub fn new(fee: impl Into<f64>) -> Self {
        Self(fee.into())
    }
}

impl Default for LateFee {
    fn default() -> Self {
        Self::new(1.0)
    }
}
