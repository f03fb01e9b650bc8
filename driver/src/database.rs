mod sqlite;

pub use self::sqlite::*;
