use std::fmt::Display;
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

/// Availability of a single copy. This is the source of truth for availability,
/// it is kept in lockstep with the open rental that references the copy.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CopyStatus {
    Available,
    Rented,
}

impl CopyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "AVAILABLE",
            CopyStatus::Rented => "RENTED",
        }
    }
}

impl Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyStatus {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(CopyStatus::Available),
            "RENTED" => Ok(CopyStatus::Rented),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown copy status `{other}`"))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::CopyStatus;

    #[test]
    fn parses_stored_values() {
        assert_eq!("AVAILABLE".parse::<CopyStatus>().ok(), Some(CopyStatus::Available));
        assert_eq!("RENTED".parse::<CopyStatus>().ok(), Some(CopyStatus::Rented));
        assert!("LOST".parse::<CopyStatus>().is_err());
    }
}
