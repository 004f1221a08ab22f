use crate::domain::entities::user::{Profile, User};
use crate::domain::error::DomainError;
use crate::domain::ports::account_repository::AccountRepository;
use crate::domain::values::phone::PhoneNumber;
use crate::infrastructure::sqlite::{decimal_col, SharedConnection};
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SqliteAccountRepo {
    conn: SharedConnection,
}

impl SqliteAccountRepo {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn row_to_user(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
        let phone_raw: String = row.get(1)?;
        let created_str: String = row.get(3)?;
        Ok(User {
            id: row.get(0)?,
            phone: PhoneNumber::parse(&phone_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
            })?,
            password_hash: row.get(2)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }

    fn row_to_profile(row: &rusqlite::Row) -> Result<Profile, rusqlite::Error> {
        Ok(Profile {
            user_id: row.get(0)?,
            full_name: row.get(1)?,
            balance: decimal_col(row, 2)?,
        })
    }

    fn find_user_where(
        conn: &Connection,
        clause: &str,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        conn.query_row(
            &format!(
                "SELECT id, phone, password_hash, created_at FROM users WHERE {clause} = ?1"
            ),
            params![value],
            Self::row_to_user,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }
}

impl AccountRepository for SqliteAccountRepo {
    fn create_account(&self, user: &User, profile: &Profile) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        tx.execute(
            "INSERT INTO users (id, phone, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id,
                user.phone.as_str(),
                user.password_hash,
                user.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::DuplicatePhone(user.phone.to_string())
            }
            _ => DomainError::Database(format!("Failed to create user: {e}")),
        })?;
        tx.execute(
            "INSERT INTO profiles (user_id, full_name, balance) VALUES (?1, ?2, ?3)",
            params![
                profile.user_id,
                profile.full_name,
                profile.balance.to_string(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to create profile: {e}")))?;
        tx.commit()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(())
    }

    fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Self::find_user_where(&conn, "phone", phone)
    }

    fn find_user(&self, id: &str) -> Result<Option<User>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Self::find_user_where(&conn, "id", id)
    }

    fn get_or_create_profile(&self, user_id: &str) -> Result<Profile, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let existing = conn
            .query_row(
                "SELECT user_id, full_name, balance FROM profiles WHERE user_id = ?1",
                params![user_id],
                Self::row_to_profile,
            )
            .optional()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if let Some(profile) = existing {
            return Ok(profile);
        }

        let profile = Profile::new(user_id, "");
        conn.execute(
            "INSERT INTO profiles (user_id, full_name, balance) VALUES (?1, ?2, ?3)",
            params![
                profile.user_id,
                profile.full_name,
                profile.balance.to_string(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to create profile: {e}")))?;
        Ok(profile)
    }
}
