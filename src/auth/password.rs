use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let parsed = PasswordHash::new(hashed)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}

/// Upper, lower, digit and special character, at least 8 long.
pub fn is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric() && c != '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify() {
        let hashed = hash_password("Str0ng@pass").unwrap();
        assert!(verify_password("Str0ng@pass", &hashed).is_ok());
        assert!(verify_password("wrong", &hashed).is_err());
        assert!(verify_password("Str0ng@pass", "not-a-hash").is_err());
    }

    #[test]
    fn strength_policy() {
        assert!(is_strong("Str0ng@pass"));
        assert!(!is_strong("Sh0rt@"));
        assert!(!is_strong("nouppercase1@"));
        assert!(!is_strong("NoDigits@@"));
        assert!(!is_strong("NoSpecial12"));
    }
}
