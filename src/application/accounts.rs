use crate::domain::entities::user::{Profile, User};
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use crate::domain::values::phone::PhoneNumber;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use std::sync::Arc;

#[derive(Debug)]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone: PhoneNumber,
    pub password: String,
}

pub struct AccountUseCase {
    repo: Arc<dyn AccountRepository>,
}

impl AccountUseCase {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    /// Create a user plus its profile with the starting balance. The phone
    /// number is already normalized; duplicates are rejected by the store.
    pub fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        if request.password.is_empty() {
            return Err(DomainError::InvalidInput("Password is required.".into()));
        }
        let password_hash = hash_password(&request.password)?;
        let user = User::new(request.phone, password_hash);
        let profile = Profile::new(&user.id, &request.full_name);
        self.repo.create_account(&user, &profile)?;
        Ok(user)
    }

    /// Authenticate by phone number and password.
    pub fn authenticate(&self, phone_raw: &str, password: &str) -> Result<User, DomainError> {
        let phone = PhoneNumber::parse(phone_raw).map_err(|_| DomainError::Unauthorized)?;
        let user = self
            .repo
            .find_user_by_phone(phone.as_str())?
            .ok_or(DomainError::Unauthorized)?;
        if !verify_password(&user.password_hash, password) {
            return Err(DomainError::Unauthorized);
        }
        Ok(user)
    }

    pub fn user(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.repo.find_user(id)
    }

    pub fn profile(&self, user_id: &str) -> Result<Profile, DomainError> {
        self.repo.get_or_create_profile(user_id)
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::Database(format!("Password hashing failed: {e}")))
}

fn verify_password(hash: &str, candidate: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password(&hash, "s3cret"));
        assert!(!verify_password(&hash, "wrong"));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-hash", "anything"));
    }
}
