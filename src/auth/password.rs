//! Password digests in PHC string format (PBKDF2). Plaintext is hashed at
//! registration and verified at login; nothing else ever touches it.

use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rand_core::OsRng;

pub fn hash(password: &str) -> Result<String, pbkdf2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Pbkdf2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            // A digest that does not parse means corrupted stored data;
            // treat it as a mismatch rather than a server failure.
            tracing::error!("stored password digest is not valid PHC format: {}", e);
            false
        }
    }
}
