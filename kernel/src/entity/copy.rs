mod id;
mod status;

pub use self::{id::*, status::*};
use destructure::Destructure;
use serde::Serialize;
use vodca::References;

use crate::entity::MovieId;

/// One physical, independently rentable unit of a movie.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct InventoryCopy {
    id: CopyId,
    movie_id: MovieId,
    status: CopyStatus,
    location: Option<StoreLocation>,
}

impl InventoryCopy {
    pub fn new(
        id: CopyId,
        movie_id: MovieId,
        status: CopyStatus,
        location: Option<StoreLocation>,
    ) -> Self {
        Self {
            id,
            movie_id,
            status,
            location,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == CopyStatus::Available
    }
}
