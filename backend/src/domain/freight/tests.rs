//! Tests for the freight aggregate's guarded mutations.

use chrono::{DateTime, Duration, Utc};
use rstest::rstest;
use uuid::Uuid;

use crate::domain::{Location, UserId};

use super::*;

fn fixture_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-02T09:00:00Z")
        .expect("RFC3339 fixture timestamp")
        .with_timezone(&Utc)
}

fn sample_cargo() -> CargoDetails {
    CargoDetails {
        width_cm: 60.0,
        height_cm: 40.0,
        length_cm: 40.0,
        weight_kg: 12.0,
        description: "Mudanza chica".to_owned(),
        photos: Vec::new(),
    }
}

fn shared_freight(creator: UserId, max_packages: u32) -> FreightRequest {
    FreightRequest::new(FreightDraft {
        id: Uuid::new_v4(),
        customer_id: creator,
        customer_name: "Juan Pérez".to_owned(),
        customer_avatar: None,
        pickup: Location::new("Av. Corrientes 1234", "Buenos Aires").expect("valid pickup"),
        delivery: Location::new("Bv. Oroño 500", "Rosario").expect("valid delivery"),
        cargo: sample_cargo(),
        price: 1450.0,
        distance_km: 18.0,
        requested_date: fixture_timestamp() + Duration::days(2),
        created_at: fixture_timestamp(),
        is_shared: true,
        max_packages,
    })
}

fn plain_freight(creator: UserId) -> FreightRequest {
    FreightRequest::new(FreightDraft {
        id: Uuid::new_v4(),
        customer_id: creator,
        customer_name: "Juan Pérez".to_owned(),
        customer_avatar: None,
        pickup: Location::new("Av. Corrientes 1234", "Buenos Aires").expect("valid pickup"),
        delivery: Location::new("Bv. Oroño 500", "Rosario").expect("valid delivery"),
        cargo: sample_cargo(),
        price: 900.0,
        distance_km: 10.0,
        requested_date: fixture_timestamp() + Duration::days(1),
        created_at: fixture_timestamp(),
        is_shared: false,
        max_packages: 4,
    })
}

fn participant(id: UserId, name: &str) -> Participant {
    Participant {
        id,
        name: name.to_owned(),
        address: "Calle Falsa 123".to_owned(),
        city: "Buenos Aires".to_owned(),
        latitude: None,
        longitude: None,
    }
}

fn package_owned_by(owner: UserId, name: &str) -> PackageItem {
    let draft = PackageDraft {
        id: Uuid::new_v4(),
        dimensions: PackageDimensions::new(30.0, 30.0, 30.0, 5.0).expect("valid dims"),
        description: "Electrodoméstico".to_owned(),
        photos: Vec::new(),
        owner_id: owner,
        owner_name: name.to_owned(),
    };
    PackageItem::new(draft, 9.0, 540.0).expect("valid package")
}

fn transporter_ref(id: UserId) -> TransporterRef {
    TransporterRef {
        id,
        name: "María González".to_owned(),
        avatar: None,
    }
}

/// Drives a freight with two joined participants into transit.
fn freight_in_transit() -> (FreightRequest, UserId, UserId, UserId) {
    let creator = UserId::random();
    let owner_b = UserId::random();
    let owner_c = UserId::random();
    let transporter = UserId::random();

    let mut freight = shared_freight(creator, 2);
    freight
        .join(participant(owner_b, "B"), vec![package_owned_by(owner_b, "B")])
        .expect("B joins");
    freight
        .join(participant(owner_c, "C"), vec![package_owned_by(owner_c, "C")])
        .expect("C joins");
    freight
        .assign_transporter(transporter_ref(transporter), fixture_timestamp())
        .expect("accepted");
    freight.begin_transit(transporter).expect("in transit");
    (freight, transporter, owner_b, owner_c)
}

#[rstest]
fn non_shared_freight_has_no_capacity() {
    let freight = plain_freight(UserId::random());
    assert_eq!(freight.max_packages(), 0);
    assert_eq!(freight.current_packages(), 0);
    assert!(!freight.is_shared());
}

#[rstest]
fn join_tracks_capacity_and_participants() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 2);

    let owner_b = UserId::random();
    freight
        .join(participant(owner_b, "B"), vec![package_owned_by(owner_b, "B")])
        .expect("B joins");
    assert_eq!(freight.current_packages(), 1);

    let owner_c = UserId::random();
    freight
        .join(participant(owner_c, "C"), vec![package_owned_by(owner_c, "C")])
        .expect("C joins");
    assert_eq!(freight.current_packages(), 2);
    assert_eq!(freight.shared_by().len(), 2);
    assert_eq!(freight.participants().len(), 2);

    let owner_d = UserId::random();
    let err = freight
        .join(participant(owner_d, "D"), vec![package_owned_by(owner_d, "D")])
        .expect_err("freight is full");
    assert_eq!(err, FreightError::CapacityExhausted { max_packages: 2 });
    assert_eq!(freight.current_packages(), 2);
}

#[rstest]
fn join_rejects_creator_and_duplicates() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 3);

    let err = freight
        .join(participant(creator, "self"), vec![package_owned_by(creator, "self")])
        .expect_err("own freight");
    assert_eq!(err, FreightError::OwnFreight);

    let owner = UserId::random();
    freight
        .join(participant(owner, "B"), vec![package_owned_by(owner, "B")])
        .expect("first join");
    let err = freight
        .join(participant(owner, "B"), vec![package_owned_by(owner, "B")])
        .expect_err("second join");
    assert_eq!(err, FreightError::AlreadyJoined);
}

#[rstest]
fn join_rejects_non_shared_and_non_pending() {
    let creator = UserId::random();
    let owner = UserId::random();

    let mut plain = plain_freight(creator);
    let err = plain
        .join(participant(owner, "B"), vec![package_owned_by(owner, "B")])
        .expect_err("not shared");
    assert_eq!(err, FreightError::NotShared);

    let mut shared = shared_freight(creator, 2);
    shared
        .assign_transporter(transporter_ref(UserId::random()), fixture_timestamp())
        .expect("accepted");
    let err = shared
        .join(participant(owner, "B"), vec![package_owned_by(owner, "B")])
        .expect_err("past pending");
    assert_eq!(
        err,
        FreightError::NotJoinable {
            status: FreightStatus::Confirmed
        }
    );
}

#[rstest]
fn join_is_all_or_nothing_when_packages_exceed_capacity() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 2);
    let owner = UserId::random();

    let err = freight
        .join(
            participant(owner, "B"),
            vec![
                package_owned_by(owner, "B"),
                package_owned_by(owner, "B"),
                package_owned_by(owner, "B"),
            ],
        )
        .expect_err("three packages, two slots");
    assert_eq!(
        err,
        FreightError::ExceedsCapacity {
            remaining: 2,
            offered: 3
        }
    );
    assert_eq!(freight.current_packages(), 0);
    assert!(freight.shared_by().is_empty());
    assert!(freight.participants().is_empty());
}

#[rstest]
fn join_requires_at_least_one_package() {
    let mut freight = shared_freight(UserId::random(), 2);
    let owner = UserId::random();
    let err = freight
        .join(participant(owner, "B"), Vec::new())
        .expect_err("no packages");
    assert_eq!(err, FreightError::NoPackages);
}

#[rstest]
fn accept_assigns_transporter_once() {
    let mut freight = shared_freight(UserId::random(), 2);
    let transporter = UserId::random();
    let eta = fixture_timestamp() + Duration::hours(2);

    freight
        .assign_transporter(transporter_ref(transporter), eta)
        .expect("accepted");
    assert_eq!(freight.status(), FreightStatus::Confirmed);
    assert_eq!(freight.transporter_id(), Some(transporter));
    assert_eq!(freight.estimated_arrival(), Some(eta));

    let err = freight
        .assign_transporter(transporter_ref(UserId::random()), eta)
        .expect_err("already assigned");
    assert_eq!(err, FreightError::AlreadyAssigned);
}

#[rstest]
fn transit_requires_the_assigned_transporter() {
    let mut freight = shared_freight(UserId::random(), 2);
    let transporter = UserId::random();
    freight
        .assign_transporter(transporter_ref(transporter), fixture_timestamp())
        .expect("accepted");

    let err = freight
        .begin_transit(UserId::random())
        .expect_err("stranger cannot start transit");
    assert_eq!(err, FreightError::NotAssignedTransporter);

    freight.begin_transit(transporter).expect("transporter can");
    assert_eq!(freight.status(), FreightStatus::InTransit);
}

#[rstest]
fn cancel_is_limited_to_parties_and_early_statuses() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 2);

    let err = freight
        .cancel(UserId::random())
        .expect_err("stranger cannot cancel");
    assert_eq!(err, FreightError::NotAParty);

    freight.cancel(creator).expect("creator cancels pending");
    assert_eq!(freight.status(), FreightStatus::Cancelled);

    let (mut in_transit, transporter, _, _) = freight_in_transit();
    let err = in_transit
        .cancel(transporter)
        .expect_err("in transit is past cancellation");
    assert_eq!(
        err,
        FreightError::NotCancellable {
            status: FreightStatus::InTransit
        }
    );
}

#[rstest]
fn creator_cancellation_keeps_participant_data() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 2);
    let owner = UserId::random();
    freight
        .join(participant(owner, "B"), vec![package_owned_by(owner, "B")])
        .expect("B joins");

    freight.cancel(creator).expect("creator cancels");
    assert_eq!(freight.status(), FreightStatus::Cancelled);
    assert_eq!(freight.current_packages(), 1);
    assert_eq!(freight.shared_by(), &[owner]);
}

#[rstest]
fn deliveries_complete_in_join_order() {
    let (mut freight, transporter, owner_b, owner_c) = freight_in_transit();
    let ids: Vec<Uuid> = freight.packages().iter().map(PackageItem::id).collect();
    let (first, second) = (ids[0], ids[1]);

    // Skipping ahead never works.
    let err = freight
        .mark_package_delivered(transporter, second)
        .expect_err("second package is not next");
    assert_eq!(err, FreightError::OutOfSequence { expected: Some(first) });

    let advance = freight
        .mark_package_delivered(transporter, first)
        .expect("first delivery");
    assert_eq!(advance.delivered_owner, owner_b);
    assert_eq!(advance.next_owner, Some(owner_c));
    assert!(!advance.freight_delivered);
    assert_eq!(freight.status(), FreightStatus::InTransit);
    assert_eq!(
        freight.packages()[1].delivery_status(),
        DeliveryStatus::InTransit
    );

    let advance = freight
        .mark_package_delivered(transporter, second)
        .expect("second delivery");
    assert_eq!(advance.delivered_owner, owner_c);
    assert_eq!(advance.next_owner, None);
    assert!(advance.freight_delivered);
    assert_eq!(freight.status(), FreightStatus::Delivered);
}

#[rstest]
fn delivery_requires_transporter_and_transit() {
    let (mut freight, _, _, _) = freight_in_transit();
    let first = freight.packages()[0].id();

    let err = freight
        .mark_package_delivered(UserId::random(), first)
        .expect_err("stranger cannot deliver");
    assert_eq!(err, FreightError::NotAssignedTransporter);

    let creator = UserId::random();
    let transporter = UserId::random();
    let mut confirmed = shared_freight(creator, 2);
    let owner = UserId::random();
    confirmed
        .join(participant(owner, "B"), vec![package_owned_by(owner, "B")])
        .expect("B joins");
    confirmed
        .assign_transporter(transporter_ref(transporter), fixture_timestamp())
        .expect("accepted");
    let pkg = confirmed.packages()[0].id();
    let err = confirmed
        .mark_package_delivered(transporter, pkg)
        .expect_err("not yet in transit");
    assert_eq!(
        err,
        FreightError::NotInTransit {
            status: FreightStatus::Confirmed
        }
    );
}

#[rstest]
fn direct_completion_requires_all_packages_delivered() {
    let (mut freight, transporter, _, _) = freight_in_transit();
    let first = freight.packages()[0].id();

    let err = freight
        .complete(transporter)
        .expect_err("joined packages still outstanding");
    assert_eq!(err, FreightError::OutOfSequence { expected: Some(first) });

    // A non-shared freight completes directly.
    let creator = UserId::random();
    let solo_transporter = UserId::random();
    let mut plain = plain_freight(creator);
    plain
        .assign_transporter(transporter_ref(solo_transporter), fixture_timestamp())
        .expect("accepted");
    plain.begin_transit(solo_transporter).expect("in transit");
    plain.complete(solo_transporter).expect("direct completion");
    assert_eq!(plain.status(), FreightStatus::Delivered);
}

#[rstest]
fn leaving_removes_exactly_the_participants_packages() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 4);
    let owner_b = UserId::random();
    let owner_c = UserId::random();
    freight
        .join(
            participant(owner_b, "B"),
            vec![package_owned_by(owner_b, "B"), package_owned_by(owner_b, "B")],
        )
        .expect("B joins with two");
    freight
        .join(participant(owner_c, "C"), vec![package_owned_by(owner_c, "C")])
        .expect("C joins with one");
    assert_eq!(freight.current_packages(), 3);

    let removed = freight.remove_participation(owner_b).expect("B leaves");
    assert_eq!(removed, 2);
    assert_eq!(freight.current_packages(), 1);
    assert_eq!(freight.shared_by(), &[owner_c]);
    assert!(freight.packages().iter().all(|p| p.owner_id() == owner_c));
}

#[rstest]
fn leaving_requires_prior_participation_and_early_status() {
    let creator = UserId::random();
    let mut freight = shared_freight(creator, 2);

    let err = freight
        .remove_participation(UserId::random())
        .expect_err("never joined");
    assert_eq!(err, FreightError::NotParticipant);

    let err = freight
        .remove_participation(creator)
        .expect_err("creator has no participation");
    assert_eq!(err, FreightError::NotParticipant);

    let (mut in_transit, _, owner_b, _) = freight_in_transit();
    let err = in_transit
        .remove_participation(owner_b)
        .expect_err("sequence already running");
    assert_eq!(
        err,
        FreightError::ParticipationLocked {
            status: FreightStatus::InTransit
        }
    );
}

#[rstest]
fn payments_are_scoped_to_owner_and_transporter() {
    let (mut freight, transporter, owner_b, _) = freight_in_transit();
    let first = freight.packages()[0].id();

    let err = freight
        .submit_payment(transporter, first, PaymentMethod::Cash, None)
        .expect_err("only the owner pays");
    assert_eq!(err, FreightError::NotPackageOwner);

    let package = freight
        .submit_payment(owner_b, first, PaymentMethod::Cash, None)
        .expect("owner pays");
    assert_eq!(package.payment_status(), PaymentStatus::Paid);

    let err = freight
        .confirm_payment(owner_b, first)
        .expect_err("only the transporter confirms");
    assert_eq!(err, FreightError::NotAssignedTransporter);

    let package = freight
        .confirm_payment(transporter, first)
        .expect("transporter confirms");
    assert_eq!(package.payment_status(), PaymentStatus::Confirmed);
}

#[rstest]
fn unknown_package_ids_are_reported() {
    let (mut freight, transporter, owner_b, _) = freight_in_transit();
    let ghost = Uuid::new_v4();

    let err = freight
        .mark_package_delivered(transporter, ghost)
        .expect_err("unknown package");
    assert_eq!(err, FreightError::PackageNotFound { package_id: ghost });

    let err = freight
        .submit_payment(owner_b, ghost, PaymentMethod::Cash, None)
        .expect_err("unknown package");
    assert_eq!(err, FreightError::PackageNotFound { package_id: ghost });
}
