use crate::domain::error::DomainError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const SESSION_COOKIE: &str = "tradex_session";

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// Issues and validates the signed session tokens carried in the session
/// cookie.
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Secret from `TRADEX_SECRET`, or a random per-process value. With the
    /// random fallback every restart invalidates existing sessions.
    pub fn from_env() -> Self {
        let secret = match std::env::var("TRADEX_SECRET") {
            Ok(s) if !s.trim().is_empty() => s,
            _ => {
                warn!("TRADEX_SECRET not set; sessions will not survive a restart");
                uuid::Uuid::new_v4().to_string()
            }
        };
        Self::new(secret.as_bytes(), DEFAULT_SESSION_TTL)
    }

    pub fn issue(&self, user_id: &str) -> Result<String, DomainError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| DomainError::Database("System clock is before UNIX_EPOCH".into()))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: (now + self.ttl).as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Database(format!("Failed to sign session token: {e}")))
    }

    /// Returns the user id from a valid token.
    pub fn validate(&self, token: &str) -> Result<String, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| DomainError::Unauthorized)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

pub fn session_cookie(token: &str, max_age: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age.as_secs()
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from a Cookie header value.
pub fn token_from_cookies(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(b"test-secret", Duration::from_secs(60))
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let sessions = manager();
        let token = sessions.issue("user-1").unwrap();
        assert_eq!(sessions.validate(&token).unwrap(), "user-1");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = manager().issue("user-1").unwrap();
        let other = SessionManager::new(b"other-secret", Duration::from_secs(60));
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(manager().validate("not-a-token").is_err());
    }

    #[test]
    fn test_token_from_cookies() {
        let header = format!("theme=dark; {SESSION_COOKIE}=abc123; other=1");
        assert_eq!(token_from_cookies(&header), Some("abc123".to_string()));
        assert_eq!(token_from_cookies("theme=dark"), None);
        assert_eq!(token_from_cookies(&format!("{SESSION_COOKIE}=")), None);
    }
}
