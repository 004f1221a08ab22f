//! Form payloads and their validators. Validation returns structured field
//! errors so pages can re-render with messages next to the offending input.

use crate::application::accounts::RegisterRequest;
use crate::domain::values::phone::PhoneNumber;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegisterForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(FieldError {
                field: "full_name",
                message: "Full name is required.".into(),
            });
        }

        let phone = match PhoneNumber::parse(&self.phone_number) {
            Ok(phone) => Some(phone),
            Err(message) => {
                errors.push(FieldError {
                    field: "phone_number",
                    message,
                });
                None
            }
        };

        if self.password.is_empty() {
            errors.push(FieldError {
                field: "password",
                message: "Password is required.".into(),
            });
        } else if self.password != self.confirm_password {
            errors.push(FieldError {
                field: "confirm_password",
                message: "Passwords do not match.".into(),
            });
        }

        match (phone, errors.is_empty()) {
            (Some(phone), true) => Ok(RegisterRequest {
                full_name: self.full_name.trim().to_string(),
                phone,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantityForm {
    #[serde(default)]
    pub quantity: String,
}

impl QuantityForm {
    pub fn validate(&self) -> Result<i64, FieldError> {
        match self.quantity.trim().parse::<i64>() {
            Ok(quantity) if quantity >= 1 => Ok(quantity),
            _ => Err(FieldError {
                field: "quantity",
                message: "Quantity must be a positive whole number.".into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SymbolQuery {
    pub symbol: Option<String>,
}

/// Flash-style notices passed through redirect query strings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FlashParams {
    pub msg: Option<String>,
    pub err: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(full_name: &str, phone: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            full_name: full_name.into(),
            phone_number: phone.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn test_valid_registration_normalizes_phone() {
        let request = form("Asha Rao", "+91 98765-43210", "pw", "pw")
            .validate()
            .unwrap();
        assert_eq!(request.phone.as_str(), "919876543210");
        assert_eq!(request.full_name, "Asha Rao");
    }

    #[test]
    fn test_password_mismatch() {
        let errors = form("Asha Rao", "9876543210", "pw", "other")
            .validate()
            .unwrap_err();
        assert!(errors.iter().any(|e| e.field == "confirm_password"));
    }

    #[test]
    fn test_bad_phone_and_missing_name_collected_together() {
        let errors = form("", "123", "pw", "pw").validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "full_name"));
        assert!(errors.iter().any(|e| e.field == "phone_number"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(QuantityForm { quantity: " 5 ".into() }.validate().unwrap(), 5);
        assert!(QuantityForm { quantity: "0".into() }.validate().is_err());
        assert!(QuantityForm { quantity: "-2".into() }.validate().is_err());
        assert!(QuantityForm { quantity: "ten".into() }.validate().is_err());
    }
}
