use crate::domain::entities::user::{Profile, User};
use crate::domain::error::DomainError;

pub trait AccountRepository: Send + Sync {
    /// Persist a new user together with its profile. Fails with
    /// `DuplicatePhone` when the phone number is already registered.
    fn create_account(&self, user: &User, profile: &Profile) -> Result<(), DomainError>;

    fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    fn find_user(&self, id: &str) -> Result<Option<User>, DomainError>;

    /// Idempotent: returns the existing profile or creates a default one
    /// with the starting balance.
    fn get_or_create_profile(&self, user_id: &str) -> Result<Profile, DomainError>;
}
