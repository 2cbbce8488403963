//! Startup seeding of fixture users and freights.
//!
//! The source marketplace reseeds its collections from static fixtures on
//! every reload; this module mirrors that behaviour behind the same
//! repositories live data uses, gated by `AppConfig.seed_example_data`.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    FreightRepository, FreightRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    CargoDetails, EmailAddress, FreightDraft, FreightRequest, Location, User, UserDraft, UserId,
    UserRole, UserValidationError,
};

/// Errors returned while seeding fixtures.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A fixture user failed validation.
    #[error("fixture user invalid: {0}")]
    User(#[from] UserValidationError),
    /// The directory rejected a fixture user.
    #[error("fixture user rejected: {0}")]
    UserStore(#[from] UserRepositoryError),
    /// The freight store rejected a fixture freight.
    #[error("fixture freight rejected: {0}")]
    FreightStore(#[from] FreightRepositoryError),
}

struct FixtureUser {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    role: UserRole,
    rating: f64,
    ratings_count: u32,
    address: Option<&'static str>,
}

const FIXTURE_USERS: [FixtureUser; 3] = [
    FixtureUser {
        name: "Juan Pérez",
        email: "cliente@example.com",
        phone: "+541112345678",
        role: UserRole::Customer,
        rating: 4.8,
        ratings_count: 15,
        address: Some("Av. Corrientes 1234"),
    },
    FixtureUser {
        name: "María González",
        email: "transportista@example.com",
        phone: "+541187654321",
        role: UserRole::Transporter,
        rating: 4.6,
        ratings_count: 24,
        address: None,
    },
    FixtureUser {
        name: "Admin User",
        email: "admin@example.com",
        phone: "+541155554444",
        role: UserRole::Admin,
        rating: 0.0,
        ratings_count: 0,
        address: None,
    },
];

fn fixture_freights(creator: &User, clock: &dyn Clock) -> Vec<FreightRequest> {
    let now = clock.utc();
    vec![
        FreightRequest::new(FreightDraft {
            id: Uuid::new_v4(),
            customer_id: creator.id(),
            customer_name: creator.name().to_owned(),
            customer_avatar: None,
            pickup: Location::new("Av. Corrientes 1234", "Buenos Aires")
                .unwrap_or_else(|err| panic!("fixture pickup invalid: {err}"))
                .with_coordinates(-34.6037, -58.3816),
            delivery: Location::new("Bv. Oroño 500", "Rosario")
                .unwrap_or_else(|err| panic!("fixture delivery invalid: {err}"))
                .with_coordinates(-32.9468, -60.6393),
            cargo: CargoDetails {
                width_cm: 120.0,
                height_cm: 80.0,
                length_cm: 100.0,
                weight_kg: 45.0,
                description: "Mudanza chica: cajas y un sillón".to_owned(),
                photos: Vec::new(),
            },
            price: 1450.0,
            distance_km: 18.0,
            requested_date: now + chrono::Duration::days(2),
            created_at: now,
            is_shared: true,
            max_packages: 3,
        }),
        FreightRequest::new(FreightDraft {
            id: Uuid::new_v4(),
            customer_id: creator.id(),
            customer_name: creator.name().to_owned(),
            customer_avatar: None,
            pickup: Location::new("Calle 9 de Julio 50", "Córdoba")
                .unwrap_or_else(|err| panic!("fixture pickup invalid: {err}")),
            delivery: Location::new("San Martín 800", "Mendoza")
                .unwrap_or_else(|err| panic!("fixture delivery invalid: {err}")),
            cargo: CargoDetails {
                width_cm: 60.0,
                height_cm: 40.0,
                length_cm: 40.0,
                weight_kg: 12.0,
                description: "Electrodoméstico embalado".to_owned(),
                photos: Vec::new(),
            },
            price: 830.0,
            distance_km: 11.0,
            requested_date: now + chrono::Duration::days(1),
            created_at: now,
            is_shared: false,
            max_packages: 0,
        }),
    ]
}

/// Insert fixture users and freights; skips nothing and is meant to run
/// once per process start on empty in-memory stores.
pub async fn seed_example_data<U, F>(
    user_repo: &U,
    freight_repo: &F,
    clock: Arc<dyn Clock>,
) -> Result<(), SeedError>
where
    U: UserRepository,
    F: FreightRepository,
{
    let mut seeded_creator = None;
    for fixture in FIXTURE_USERS {
        let user = User::with_rating(
            UserDraft {
                id: UserId::random(),
                name: fixture.name.to_owned(),
                email: EmailAddress::new(fixture.email)?,
                phone: fixture.phone.to_owned(),
                role: fixture.role,
                created_at: clock.utc(),
                avatar: None,
                address: fixture.address.map(str::to_owned),
                location: None,
            },
            fixture.rating,
            fixture.ratings_count,
        )?;
        user_repo.insert(&user).await?;
        if fixture.role == UserRole::Customer && seeded_creator.is_none() {
            seeded_creator = Some(user);
        }
    }

    if let Some(creator) = seeded_creator {
        for freight in fixture_freights(&creator, clock.as_ref()) {
            freight_repo.insert(&freight).await?;
        }
    }

    info!("seeded fixture users and freights");
    Ok(())
}
