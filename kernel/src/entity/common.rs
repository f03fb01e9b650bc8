mod name;
mod time;

pub use self::{name::*, time::*};
