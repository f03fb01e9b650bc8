use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use error_stack::Report;

use kernel::interface::hash::{DependOnPasswordHasher, PasswordHasher};
use kernel::prelude::entity::PasswordHash;
use kernel::KernelError;

use crate::database::SqliteDatabase;
use crate::error::ConvertError;

/// Argon2id with default parameters. Hashes are stored in PHC string format,
/// which carries the salt and parameters along with the digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .convert_error()?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> error_stack::Result<bool, KernelError> {
        let stored: &String = hash.as_ref();
        let parsed = password_hash::PasswordHash::new(stored).convert_error()?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(error).convert_error(),
        }
    }
}

impl<T> ConvertError for Result<T, password_hash::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        // password_hash::Error is not a std error without the `std` feature
        self.map_err(|error| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Password hashing failed: {error}"))
        })
    }
}

impl DependOnPasswordHasher for SqliteDatabase {
    type PasswordHasher = Argon2Hasher;
    fn password_hasher(&self) -> &Self::PasswordHasher {
        &Argon2Hasher
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::hash::PasswordHasher;
    use kernel::prelude::entity::PasswordHash;
    use kernel::KernelError;

    use super::Argon2Hasher;

    #[test]
    fn verifies_only_the_original_password() -> error_stack::Result<(), KernelError> {
        let hash = Argon2Hasher.hash("correct-horse")?;
        assert!(String::from(hash.clone()).starts_with("$argon2id$"));
        assert!(Argon2Hasher.verify("correct-horse", &hash)?);
        assert!(!Argon2Hasher.verify("wrong-horse", &hash)?);
        Ok(())
    }

    #[test]
    fn same_password_gets_a_fresh_salt() -> error_stack::Result<(), KernelError> {
        let first = Argon2Hasher.hash("user1234")?;
        let second = Argon2Hasher.hash("user1234")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = Argon2Hasher.verify("user1234", &PasswordHash::new("not-a-phc-string"));
        assert!(result.is_err());
    }
}
