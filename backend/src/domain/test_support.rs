//! Shared test doubles and builders for domain service tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::{
    CargoDetails, EmailAddress, FreightDraft, FreightRequest, Location, PackageDimensions,
    PackageDraft, PackageItem, Participant, TransporterRef, User, UserDraft, UserId, UserRole,
};

/// A clock pinned to a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant every fixture clock reports.
pub fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-02T09:00:00Z")
        .expect("RFC3339 fixture timestamp")
        .with_timezone(&Utc)
}

/// A registered user with the given role.
pub fn user_with_role(role: UserRole) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        name: match role {
            UserRole::Customer => "Juan Pérez".to_owned(),
            UserRole::Transporter => "María González".to_owned(),
            UserRole::Admin => "Admin".to_owned(),
        },
        email: EmailAddress::new(format!("{}@example.com", role)).expect("valid email"),
        phone: "+541112345678".to_owned(),
        role,
        created_at: fixture_timestamp(),
        avatar: None,
        address: Some("Av. Corrientes 1234".to_owned()),
        location: None,
    })
    .expect("valid user")
}

/// A pending shared freight created by `creator`.
pub fn shared_freight(creator: &User, max_packages: u32) -> FreightRequest {
    FreightRequest::new(FreightDraft {
        id: Uuid::new_v4(),
        customer_id: creator.id(),
        customer_name: creator.name().to_owned(),
        customer_avatar: None,
        pickup: Location::new("Av. Corrientes 1234", "Buenos Aires").expect("valid pickup"),
        delivery: Location::new("Bv. Oroño 500", "Rosario").expect("valid delivery"),
        cargo: CargoDetails {
            width_cm: 60.0,
            height_cm: 40.0,
            length_cm: 40.0,
            weight_kg: 12.0,
            description: "Mudanza chica".to_owned(),
            photos: Vec::new(),
        },
        price: 1450.0,
        distance_km: 18.0,
        requested_date: fixture_timestamp(),
        created_at: fixture_timestamp(),
        is_shared: true,
        max_packages,
    })
}

/// A package owned by `owner`, quoted at fixed values.
pub fn package_owned_by(owner: &User) -> PackageItem {
    PackageItem::new(
        PackageDraft {
            id: Uuid::new_v4(),
            dimensions: PackageDimensions::new(30.0, 30.0, 30.0, 5.0).expect("valid dims"),
            description: "Electrodoméstico".to_owned(),
            photos: Vec::new(),
            owner_id: owner.id(),
            owner_name: owner.name().to_owned(),
        },
        9.0,
        540.0,
    )
    .expect("valid package")
}

/// A participant entry for `user`.
pub fn participant_for(user: &User) -> Participant {
    Participant {
        id: user.id(),
        name: user.name().to_owned(),
        address: user.address().unwrap_or_default().to_owned(),
        city: "Buenos Aires".to_owned(),
        latitude: None,
        longitude: None,
    }
}

/// A delivered shared freight with `customer`'s package carried by
/// `transporter`.
pub fn delivered_freight(creator: &User, customer: &User, transporter: &User) -> FreightRequest {
    let mut freight = shared_freight(creator, 2);
    freight
        .join(participant_for(customer), vec![package_owned_by(customer)])
        .expect("customer joins");
    freight
        .assign_transporter(
            TransporterRef {
                id: transporter.id(),
                name: transporter.name().to_owned(),
                avatar: None,
            },
            fixture_timestamp(),
        )
        .expect("accepted");
    freight
        .begin_transit(transporter.id())
        .expect("in transit");
    let package_id = freight.packages()[0].id();
    freight
        .mark_package_delivered(transporter.id(), package_id)
        .expect("delivered");
    freight
}
