mod common;

use common::{register_user, setup};
use rust_decimal_macros::dec;
use tradex::application::accounts::RegisterRequest;
use tradex::domain::error::DomainError;
use tradex::domain::values::phone::PhoneNumber;

#[test]
fn test_register_creates_profile_with_starting_balance() {
    let app = setup();
    let user = register_user(&app, "9876543210");

    let profile = app.profile(&user.id).unwrap();
    assert_eq!(profile.balance, dec!(100000.00));
    assert_eq!(profile.full_name, "Test User");
}

#[test]
fn test_duplicate_phone_rejected() {
    let app = setup();
    register_user(&app, "9876543210");

    let result = app.register(RegisterRequest {
        full_name: "Someone Else".into(),
        // Same digits, different formatting.
        phone: PhoneNumber::parse("98765 43210").unwrap(),
        password: "other".into(),
    });
    assert!(matches!(result, Err(DomainError::DuplicatePhone(_))));
}

#[test]
fn test_authenticate_with_formatted_phone() {
    let app = setup();
    let user = register_user(&app, "9876543210");

    let authed = app.authenticate("98765-43210", "s3cret").unwrap();
    assert_eq!(authed.id, user.id);
}

#[test]
fn test_wrong_password_rejected() {
    let app = setup();
    register_user(&app, "9876543210");

    assert!(matches!(
        app.authenticate("9876543210", "wrong"),
        Err(DomainError::Unauthorized)
    ));
}

#[test]
fn test_unknown_phone_rejected() {
    let app = setup();
    assert!(matches!(
        app.authenticate("1111111111", "s3cret"),
        Err(DomainError::Unauthorized)
    ));
}

#[test]
fn test_password_never_stored_in_clear() {
    let app = setup();
    let user = register_user(&app, "9876543210");
    let stored = app.user(&user.id).unwrap().unwrap();
    assert_ne!(stored.password_hash, "s3cret");
    assert!(!stored.password_hash.contains("s3cret"));
}
