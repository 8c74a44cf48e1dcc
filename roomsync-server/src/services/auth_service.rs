use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Argon2id credentials kept in `users.password` as PHC strings.
#[derive(Clone, Default)]
pub struct AuthService {
    argon2: Argon2<'static>,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self.argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    /// `Ok(false)` for a wrong password; `Err` when `stored` is not a PHC string.
    pub fn verify(&self, stored: &str, password: &str) -> Result<bool, password_hash::Error> {
        let parsed = PasswordHash::new(stored)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
