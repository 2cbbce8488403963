//! Tests for user directory entities.

use chrono::{DateTime, Utc};
use rstest::rstest;

use super::*;

fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
        .expect("RFC3339 fixture timestamp")
        .with_timezone(&Utc)
}

fn sample_draft() -> UserDraft {
    UserDraft {
        id: UserId::random(),
        name: "Juan Pérez".to_owned(),
        email: EmailAddress::new("juan@example.com").expect("valid email"),
        phone: "+541112345678".to_owned(),
        role: UserRole::Customer,
        created_at: fixture_timestamp(),
        avatar: None,
        address: Some("Av. Corrientes 1234".to_owned()),
        location: None,
    }
}

#[rstest]
fn new_user_starts_unrated() {
    let user = User::new(sample_draft()).expect("valid draft");
    assert_eq!(user.rating(), 0.0);
    assert_eq!(user.ratings_count(), 0);
    assert_eq!(user.role(), UserRole::Customer);
}

#[rstest]
#[case("")]
#[case("   ")]
fn rejects_blank_names(#[case] name: &str) {
    let mut draft = sample_draft();
    draft.name = name.to_owned();
    let err = User::new(draft).expect_err("blank name rejected");
    assert_eq!(err, UserValidationError::EmptyName);
}

#[rstest]
#[case("no-at-sign.example.com")]
#[case("@example.com")]
#[case("juan@")]
#[case("juan@localhost")]
fn rejects_malformed_emails(#[case] email: &str) {
    let err = EmailAddress::new(email).expect_err("malformed email rejected");
    assert_eq!(err, UserValidationError::InvalidEmail);
}

#[rstest]
fn seeded_rating_is_clamped() {
    let user = User::with_rating(sample_draft(), 9.5, 3).expect("valid draft");
    assert_eq!(user.rating(), 5.0);
    assert_eq!(user.ratings_count(), 3);
}

#[rstest]
#[case("customer", UserRole::Customer)]
#[case("transporter", UserRole::Transporter)]
#[case("admin", UserRole::Admin)]
fn roles_round_trip_through_str(#[case] raw: &str, #[case] role: UserRole) {
    assert_eq!(raw.parse::<UserRole>().expect("known role"), role);
    assert_eq!(role.as_str(), raw);
}

#[rstest]
fn unknown_role_is_rejected() {
    let err = "driver".parse::<UserRole>().expect_err("unknown role");
    assert_eq!(
        err,
        UserValidationError::UnknownRole {
            input: "driver".to_owned()
        }
    );
}

#[rstest]
fn user_id_parses_uuid_strings() {
    let id = UserId::random();
    let reparsed = UserId::new(id.to_string()).expect("round trip");
    assert_eq!(reparsed, id);

    assert!(UserId::new("not-a-uuid").is_err());
}
