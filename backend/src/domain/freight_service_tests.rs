//! Tests for the freight service.

use std::sync::{Arc, Mutex};

use chrono::Duration;
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    FreightUpdate, FreightUpdateError, MockFreightRepository, MockIdempotencyRepository,
    MockNotificationRepository, MockPriceEngine, MockUserRepository, Quote,
};
use crate::domain::test_support::{
    FixedClock, fixture_timestamp, package_owned_by, participant_for, shared_freight,
    user_with_role,
};
use crate::domain::{ErrorCode, Location, PaymentMethod, PaymentStatus};

/// Mock bundle with a relaxed notification log and a fixed clock.
struct Harness {
    freight_repo: MockFreightRepository,
    user_repo: MockUserRepository,
    notification_repo: MockNotificationRepository,
    idempotency_repo: MockIdempotencyRepository,
    price_engine: MockPriceEngine,
    appended: Arc<Mutex<Vec<Notification>>>,
}

impl Harness {
    fn new() -> Self {
        let appended = Arc::new(Mutex::new(Vec::new()));
        let mut notification_repo = MockNotificationRepository::new();
        let sink = Arc::clone(&appended);
        notification_repo.expect_append().returning(move |n| {
            sink.lock().expect("notification sink").push(n.clone());
            Ok(())
        });
        Self {
            freight_repo: MockFreightRepository::new(),
            user_repo: MockUserRepository::new(),
            notification_repo,
            idempotency_repo: MockIdempotencyRepository::new(),
            price_engine: MockPriceEngine::new(),
            appended,
        }
    }

    fn knows_user(&mut self, user: &User) {
        let stored = user.clone();
        let id = user.id();
        self.user_repo
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .returning(move |_| Ok(Some(stored.clone())));
    }

    fn quotes(&mut self, distance_km: f64, price: f64) {
        self.price_engine
            .expect_quote()
            .returning(move |_| Ok(Quote { distance_km, price }));
    }

    /// Back the mock repository with one real aggregate so `update` applies
    /// mutations exactly like the store would.
    fn holds_freight(&mut self, freight: FreightRequest) -> Arc<Mutex<FreightRequest>> {
        let stored = Arc::new(Mutex::new(freight));
        let for_update = Arc::clone(&stored);
        self.freight_repo
            .expect_update()
            .returning(move |freight_id, mutation| {
                let mut guard = for_update.lock().expect("freight store");
                if guard.id() != freight_id {
                    return Err(FreightUpdateError::NotFound { freight_id });
                }
                let mut candidate = guard.clone();
                let outcome = candidate
                    .apply(mutation)
                    .map_err(FreightUpdateError::Rejected)?;
                *guard = candidate.clone();
                Ok(FreightUpdate {
                    freight: candidate,
                    outcome,
                })
            });
        let for_find = Arc::clone(&stored);
        self.freight_repo
            .expect_find_by_id()
            .returning(move |freight_id| {
                let guard = for_find.lock().expect("freight store");
                Ok((guard.id() == freight_id).then(|| guard.clone()))
            });
        stored
    }

    fn service(
        self,
    ) -> (
        FreightService<
            MockFreightRepository,
            MockUserRepository,
            MockNotificationRepository,
            MockIdempotencyRepository,
            MockPriceEngine,
        >,
        Arc<Mutex<Vec<Notification>>>,
    ) {
        let appended = Arc::clone(&self.appended);
        let service = FreightService::new(
            Arc::new(self.freight_repo),
            Arc::new(self.user_repo),
            Arc::new(self.notification_repo),
            Arc::new(self.idempotency_repo),
            Arc::new(self.price_engine),
            Arc::new(FixedClock(fixture_timestamp())),
        );
        (service, appended)
    }
}

fn create_request(customer_id: UserId, is_shared: bool, max_packages: u32) -> CreateFreightRequest {
    CreateFreightRequest {
        customer_id,
        pickup: Location::new("Av. Corrientes 1234", "Buenos Aires").expect("valid pickup"),
        delivery: Location::new("Bv. Oroño 500", "Rosario").expect("valid delivery"),
        cargo: CargoInput {
            width_cm: 60.0,
            height_cm: 40.0,
            length_cm: 40.0,
            weight_kg: 12.0,
            description: "Mudanza chica".to_owned(),
            photos: Vec::new(),
        },
        requested_date: fixture_timestamp() + Duration::days(2),
        is_shared,
        max_packages,
    }
}

fn join_request(freight_id: Uuid, customer_id: UserId) -> JoinFreightRequest {
    JoinFreightRequest {
        freight_id,
        customer_id,
        packages: vec![CargoInput {
            width_cm: 30.0,
            height_cm: 30.0,
            length_cm: 30.0,
            weight_kg: 5.0,
            description: "Electrodoméstico".to_owned(),
            photos: Vec::new(),
        }],
        idempotency_key: None,
    }
}

#[tokio::test]
async fn create_freight_quotes_and_persists() {
    let customer = user_with_role(UserRole::Customer);
    let mut harness = Harness::new();
    harness.knows_user(&customer);
    harness.quotes(12.0, 860.0);
    harness
        .freight_repo
        .expect_insert()
        .times(1)
        .returning(|_| Ok(()));

    let (service, _) = harness.service();
    let response = service
        .create_freight(create_request(customer.id(), true, 2))
        .await
        .expect("create succeeds");

    let freight = response.freight;
    assert_eq!(freight.status, FreightStatus::Pending);
    assert_eq!(freight.price, 860.0);
    assert_eq!(freight.distance_km, 12.0);
    assert_eq!(freight.created_at, fixture_timestamp());
    assert_eq!(freight.customer_id, customer.id());
    assert!(freight.is_shared);
    assert_eq!(freight.max_packages, 2);
    assert_eq!(freight.current_packages, 0);
}

#[tokio::test]
async fn create_freight_requires_the_customer_role() {
    let transporter = user_with_role(UserRole::Transporter);
    let mut harness = Harness::new();
    harness.knows_user(&transporter);
    harness.freight_repo.expect_insert().times(0);

    let (service, _) = harness.service();
    let error = service
        .create_freight(create_request(transporter.id(), false, 0))
        .await
        .expect_err("wrong role");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn create_freight_rejects_zero_capacity_sharing() {
    let customer = user_with_role(UserRole::Customer);
    let mut harness = Harness::new();
    harness.knows_user(&customer);

    let (service, _) = harness.service();
    let error = service
        .create_freight(create_request(customer.id(), true, 0))
        .await
        .expect_err("shared freight needs capacity");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_freight_rejects_non_positive_dimensions() {
    let customer = user_with_role(UserRole::Customer);
    let mut harness = Harness::new();
    harness.knows_user(&customer);
    harness.freight_repo.expect_insert().times(0);

    let mut request = create_request(customer.id(), false, 0);
    request.cargo.width_cm = 0.0;

    let (service, _) = harness.service();
    let error = service
        .create_freight(request)
        .await
        .expect_err("invalid dimensions");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("non_positive_dimension"))
    );
}

#[tokio::test]
async fn accept_sets_arrival_estimate_and_notifies_parties() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);
    let transporter = user_with_role(UserRole::Transporter);

    let mut freight = shared_freight(&creator, 2);
    freight
        .join(participant_for(&joiner), vec![package_owned_by(&joiner)])
        .expect("joiner attaches");

    let mut harness = Harness::new();
    harness.knows_user(&transporter);
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, appended) = harness.service();
    let response = service
        .accept_freight(AcceptFreightRequest {
            freight_id,
            transporter_id: transporter.id(),
        })
        .await
        .expect("accept succeeds");

    assert_eq!(response.freight.status, FreightStatus::Confirmed);
    assert_eq!(response.freight.transporter_id, Some(transporter.id()));
    assert_eq!(
        response.freight.estimated_arrival,
        Some(fixture_timestamp() + Duration::hours(2))
    );

    let notifications = appended.lock().expect("notification sink");
    assert_eq!(notifications.len(), 2);
    let recipients: Vec<UserId> = notifications.iter().map(Notification::user_id).collect();
    assert!(recipients.contains(&creator.id()));
    assert!(recipients.contains(&joiner.id()));
    assert!(
        notifications
            .iter()
            .all(|n| n.kind() == NotificationKind::FreightAccepted)
    );
}

#[tokio::test]
async fn accept_requires_the_transporter_role() {
    let creator = user_with_role(UserRole::Customer);
    let impostor = user_with_role(UserRole::Customer);
    let mut harness = Harness::new();
    harness.knows_user(&impostor);
    let freight = shared_freight(&creator, 2);
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, _) = harness.service();
    let error = service
        .accept_freight(AcceptFreightRequest {
            freight_id,
            transporter_id: impostor.id(),
        })
        .await
        .expect_err("wrong role");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_status_rejects_strangers_for_transit() {
    let creator = user_with_role(UserRole::Customer);
    let transporter = user_with_role(UserRole::Transporter);
    let mut freight = shared_freight(&creator, 2);
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

    let mut harness = Harness::new();
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, _) = harness.service();
    let error = service
        .update_status(UpdateFreightStatusRequest {
            freight_id,
            actor_id: creator.id(),
            status: FreightStatus::InTransit,
        })
        .await
        .expect_err("creator is not the transporter");
    assert_eq!(error.code(), ErrorCode::Forbidden);

    let response = service
        .update_status(UpdateFreightStatusRequest {
            freight_id,
            actor_id: transporter.id(),
            status: FreightStatus::InTransit,
        })
        .await
        .expect("transporter starts transit");
    assert_eq!(response.freight.status, FreightStatus::InTransit);
}

#[tokio::test]
async fn update_status_refuses_confirmed_target() {
    let harness = Harness::new();
    let (service, _) = harness.service();
    let error = service
        .update_status(UpdateFreightStatusRequest {
            freight_id: Uuid::new_v4(),
            actor_id: UserId::random(),
            status: FreightStatus::Confirmed,
        })
        .await
        .expect_err("acceptance has its own operation");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn cancellation_notifies_the_other_parties() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);
    let mut freight = shared_freight(&creator, 2);
    freight
        .join(participant_for(&joiner), vec![package_owned_by(&joiner)])
        .expect("joiner attaches");

    let mut harness = Harness::new();
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, appended) = harness.service();
    let response = service
        .update_status(UpdateFreightStatusRequest {
            freight_id,
            actor_id: creator.id(),
            status: FreightStatus::Cancelled,
        })
        .await
        .expect("creator cancels");
    assert_eq!(response.freight.status, FreightStatus::Cancelled);
    // Participant data survives cancellation.
    assert_eq!(response.freight.current_packages, 1);

    let notifications = appended.lock().expect("notification sink");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id(), joiner.id());
    assert_eq!(notifications[0].kind(), NotificationKind::FreightCancelled);
}

#[tokio::test]
async fn join_quotes_packages_and_updates_capacity() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);
    let mut harness = Harness::new();
    harness.knows_user(&joiner);
    harness.quotes(9.0, 540.0);
    let freight = shared_freight(&creator, 2);
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, _) = harness.service();
    let response = service
        .join_freight(join_request(freight_id, joiner.id()))
        .await
        .expect("join succeeds");

    assert!(!response.replayed);
    assert_eq!(response.freight.current_packages, 1);
    assert_eq!(response.freight.shared_by, vec![joiner.id()]);
    let package = &response.freight.packages[0];
    assert_eq!(package.owner_id, joiner.id());
    assert_eq!(package.distance_km, 9.0);
    assert_eq!(package.price, 540.0);
    assert_eq!(package.space_m3, 0.027);
}

#[tokio::test]
async fn join_reports_distinct_precondition_errors() {
    let creator = user_with_role(UserRole::Customer);
    let joiner_b = user_with_role(UserRole::Customer);
    let joiner_c = user_with_role(UserRole::Customer);
    let late = user_with_role(UserRole::Customer);

    let mut harness = Harness::new();
    harness.knows_user(&creator);
    harness.knows_user(&joiner_b);
    harness.knows_user(&joiner_c);
    harness.knows_user(&late);
    harness.quotes(9.0, 540.0);
    let freight = shared_freight(&creator, 2);
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, _) = harness.service();

    // Creator cannot join their own freight.
    let error = service
        .join_freight(join_request(freight_id, creator.id()))
        .await
        .expect_err("own freight");
    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("own_freight"))
    );

    service
        .join_freight(join_request(freight_id, joiner_b.id()))
        .await
        .expect("B joins");

    // Joining twice fails with a duplicate-participation error.
    let error = service
        .join_freight(join_request(freight_id, joiner_b.id()))
        .await
        .expect_err("duplicate join");
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("already_joined"))
    );

    service
        .join_freight(join_request(freight_id, joiner_c.id()))
        .await
        .expect("C joins");

    // The freight is now full.
    let error = service
        .join_freight(join_request(freight_id, late.id()))
        .await
        .expect_err("capacity exhausted");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("capacity_exhausted"))
    );
}

#[tokio::test]
async fn join_with_idempotency_key_records_and_replays() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);

    let mut harness = Harness::new();
    harness.knows_user(&joiner);
    harness.quotes(9.0, 540.0);
    let freight = shared_freight(&creator, 2);
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let recorded: Arc<Mutex<Option<IdempotencyRecord>>> = Arc::new(Mutex::new(None));
    let lookup_store = Arc::clone(&recorded);
    harness
        .idempotency_repo
        .expect_lookup()
        .returning(move |query| {
            let guard = lookup_store.lock().expect("record store");
            Ok(match guard.as_ref() {
                None => IdempotencyLookupResult::NotFound,
                Some(record) if record.payload_hash == query.payload_hash => {
                    IdempotencyLookupResult::MatchingPayload(record.clone())
                }
                Some(record) => IdempotencyLookupResult::ConflictingPayload(record.clone()),
            })
        });
    let store_sink = Arc::clone(&recorded);
    harness
        .idempotency_repo
        .expect_store()
        .times(1)
        .returning(move |record| {
            *store_sink.lock().expect("record store") = Some(record.clone());
            Ok(())
        });

    let (service, _) = harness.service();
    let mut request = join_request(freight_id, joiner.id());
    request.idempotency_key = Some(IdempotencyKey::new("retry-1").expect("valid key"));

    let first = service
        .join_freight(request.clone())
        .await
        .expect("first attempt");
    assert!(!first.replayed);
    assert_eq!(first.freight.current_packages, 1);

    // The retry replays the recorded response instead of tripping the
    // already-joined guard.
    let second = service
        .join_freight(request.clone())
        .await
        .expect("replay succeeds");
    assert!(second.replayed);
    assert_eq!(second.freight.current_packages, 1);

    // Same key, different payload: rejected.
    let mut altered = request;
    altered.packages[0].description = "Otra cosa".to_owned();
    let error = service
        .join_freight(altered)
        .await
        .expect_err("conflicting payload");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn leaving_decrements_capacity_by_removed_packages() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);
    let mut freight = shared_freight(&creator, 4);
    freight
        .join(
            participant_for(&joiner),
            vec![package_owned_by(&joiner), package_owned_by(&joiner)],
        )
        .expect("joiner attaches two");

    let mut harness = Harness::new();
    harness.knows_user(&joiner);
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, _) = harness.service();
    let response = service
        .cancel_participation(CancelParticipationRequest {
            freight_id,
            customer_id: joiner.id(),
            idempotency_key: None,
        })
        .await
        .expect("leave succeeds");

    assert_eq!(response.removed_packages, 2);
    assert_eq!(response.freight.current_packages, 0);
    assert!(response.freight.shared_by.is_empty());
}

#[tokio::test]
async fn delivery_sequence_notifies_both_owners_and_completes() {
    let creator = user_with_role(UserRole::Customer);
    let owner_b = user_with_role(UserRole::Customer);
    let owner_c = user_with_role(UserRole::Customer);
    let transporter = user_with_role(UserRole::Transporter);

    let mut freight = shared_freight(&creator, 2);
    freight
        .join(participant_for(&owner_b), vec![package_owned_by(&owner_b)])
        .expect("B joins");
    freight
        .join(participant_for(&owner_c), vec![package_owned_by(&owner_c)])
        .expect("C joins");
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
    let first = freight.packages()[0].id();
    let second = freight.packages()[1].id();

    let mut harness = Harness::new();
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, appended) = harness.service();
    let response = service
        .mark_package_delivered(MarkPackageDeliveredRequest {
            freight_id,
            package_id: first,
            transporter_id: transporter.id(),
        })
        .await
        .expect("first delivery");
    assert_eq!(response.freight.status, FreightStatus::InTransit);

    {
        let notifications = appended.lock().expect("notification sink");
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].user_id(), owner_b.id());
        assert_eq!(notifications[0].title(), "Order delivered");
        assert_eq!(notifications[1].user_id(), owner_c.id());
        assert_eq!(notifications[1].title(), "Order on the way");
    }

    let response = service
        .mark_package_delivered(MarkPackageDeliveredRequest {
            freight_id,
            package_id: second,
            transporter_id: transporter.id(),
        })
        .await
        .expect("second delivery");
    assert_eq!(response.freight.status, FreightStatus::Delivered);
}

#[tokio::test]
async fn out_of_order_delivery_is_rejected() {
    let creator = user_with_role(UserRole::Customer);
    let owner_b = user_with_role(UserRole::Customer);
    let owner_c = user_with_role(UserRole::Customer);
    let transporter = user_with_role(UserRole::Transporter);

    let mut freight = shared_freight(&creator, 2);
    freight
        .join(participant_for(&owner_b), vec![package_owned_by(&owner_b)])
        .expect("B joins");
    freight
        .join(participant_for(&owner_c), vec![package_owned_by(&owner_c)])
        .expect("C joins");
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
    let second = freight.packages()[1].id();

    let mut harness = Harness::new();
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, appended) = harness.service();
    let error = service
        .mark_package_delivered(MarkPackageDeliveredRequest {
            freight_id,
            package_id: second,
            transporter_id: transporter.id(),
        })
        .await
        .expect_err("cannot skip ahead");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().and_then(|d| d.get("code")),
        Some(&json!("out_of_sequence"))
    );
    assert!(appended.lock().expect("notification sink").is_empty());
}

#[tokio::test]
async fn bank_payment_without_proof_is_rejected() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);
    let transporter = user_with_role(UserRole::Transporter);

    let mut freight = shared_freight(&creator, 2);
    freight
        .join(participant_for(&joiner), vec![package_owned_by(&joiner)])
        .expect("joiner attaches");
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
    let package_id = freight.packages()[0].id();

    let mut harness = Harness::new();
    let freight_id = freight.id();
    let stored = harness.holds_freight(freight);

    let (service, appended) = harness.service();
    let error = service
        .submit_payment(SubmitPaymentRequest {
            freight_id,
            package_id,
            customer_id: joiner.id(),
            method: PaymentMethod::Bank,
            proof: None,
        })
        .await
        .expect_err("proof required");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        stored.lock().expect("freight store").packages()[0].payment_status(),
        PaymentStatus::Pending
    );

    let response = service
        .submit_payment(SubmitPaymentRequest {
            freight_id,
            package_id,
            customer_id: joiner.id(),
            method: PaymentMethod::Bank,
            proof: Some("proof://receipt-9".to_owned()),
        })
        .await
        .expect("proof satisfies bank payment");
    assert_eq!(response.package.payment_status, PaymentStatus::Paid);

    // The transporter hears about the submission.
    let notifications = appended.lock().expect("notification sink");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id(), transporter.id());
    assert_eq!(notifications[0].kind(), NotificationKind::Payment);
}

#[tokio::test]
async fn payment_confirmation_notifies_the_owner() {
    let creator = user_with_role(UserRole::Customer);
    let joiner = user_with_role(UserRole::Customer);
    let transporter = user_with_role(UserRole::Transporter);

    let mut freight = shared_freight(&creator, 2);
    freight
        .join(participant_for(&joiner), vec![package_owned_by(&joiner)])
        .expect("joiner attaches");
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
    let package_id = freight.packages()[0].id();
    freight
        .submit_payment(
            joiner.id(),
            package_id,
            PaymentMethod::Cash,
            None,
        )
        .expect("paid");

    let mut harness = Harness::new();
    let freight_id = freight.id();
    harness.holds_freight(freight);

    let (service, appended) = harness.service();
    let response = service
        .confirm_payment(ConfirmPaymentRequest {
            freight_id,
            package_id,
            transporter_id: transporter.id(),
        })
        .await
        .expect("confirmation succeeds");
    assert_eq!(response.package.payment_status, PaymentStatus::Confirmed);

    let notifications = appended.lock().expect("notification sink");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id(), joiner.id());
}

#[tokio::test]
async fn get_freight_reports_missing_ids() {
    let mut harness = Harness::new();
    harness
        .freight_repo
        .expect_find_by_id()
        .returning(|_| Ok(None));

    let (service, _) = harness.service();
    let error = service
        .get_freight(Uuid::new_v4())
        .await
        .expect_err("nothing stored");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_freights_maps_payloads() {
    let creator = user_with_role(UserRole::Customer);
    let freight = shared_freight(&creator, 2);
    let expected_id = freight.id();

    let mut harness = Harness::new();
    let listed = freight.clone();
    harness
        .freight_repo
        .expect_list()
        .returning(move || Ok(vec![listed.clone()]));

    let (service, _) = harness.service();
    let freights = service.list_freights().await.expect("list succeeds");
    assert_eq!(freights.len(), 1);
    assert_eq!(freights[0].id, expected_id);
}
