//! Freight domain services.
//!
//! Implements the freight driving ports, re-validating every guard at the
//! mutation boundary regardless of what the inbound adapter already checked.
//! Notification emission is fire-and-forget: a failed append is logged and
//! never rolls back the triggering mutation.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    AcceptFreightRequest, CancelParticipationRequest, CancelParticipationResponse, CargoInput,
    ConfirmPaymentRequest, CreateFreightRequest, CreateFreightResponse, FreightCommand,
    FreightPayload, FreightQuery, FreightRepository, FreightRepositoryError, FreightResponse,
    FreightUpdateError, IdempotencyRepository, IdempotencyRepositoryError, JoinFreightRequest,
    JoinFreightResponse, MarkPackageDeliveredRequest, NotificationRepository, PackagePayload,
    PackageResponse, PriceEngine, PriceEngineError, SubmitPaymentRequest,
    UpdateFreightStatusRequest, UserRepository, UserRepositoryError,
};
use crate::domain::{
    DomainError, FreightDraft, FreightError, FreightMutation, FreightMutationOutcome,
    FreightRequest, FreightStatus, IdempotencyKey, IdempotencyLookup, IdempotencyLookupResult,
    IdempotencyRecord, MutationType, Notification, NotificationKind, PackageDimensions,
    PackageDraft, PackageItem, PackageValidationError, Participant, PayloadHash, PaymentError,
    TransporterRef, User, UserId, UserRole, canonicalize_payload,
};

/// Hours between acceptance and the synthetic arrival estimate.
const ESTIMATED_ARRIVAL_HOURS: i64 = 2;

pub(crate) fn map_freight_repository_error(error: FreightRepositoryError) -> DomainError {
    match error {
        FreightRepositoryError::Connection { message } => DomainError::service_unavailable(
            format!("freight repository unavailable: {message}"),
        ),
        FreightRepositoryError::Query { message } => {
            DomainError::internal(format!("freight repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> DomainError {
    match error {
        UserRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            DomainError::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            DomainError::conflict(format!("email {email} is already registered"))
                .with_details(json!({ "code": "duplicate_email" }))
        }
    }
}

fn map_idempotency_error(error: IdempotencyRepositoryError) -> DomainError {
    match error {
        IdempotencyRepositoryError::Connection { message } => DomainError::service_unavailable(
            format!("idempotency repository unavailable: {message}"),
        ),
        IdempotencyRepositoryError::Query { message } => {
            DomainError::internal(format!("idempotency repository error: {message}"))
        }
        IdempotencyRepositoryError::DuplicateKey { message } => {
            DomainError::internal(format!("unexpected idempotency key conflict: {message}"))
        }
    }
}

fn map_price_engine_error(error: PriceEngineError) -> DomainError {
    match error {
        PriceEngineError::Unavailable { message } => {
            DomainError::service_unavailable(format!("price engine unavailable: {message}"))
        }
    }
}

fn map_package_validation_error(error: &PackageValidationError, index: usize) -> DomainError {
    match error {
        PackageValidationError::NonPositiveDimension { field, value } => {
            DomainError::invalid_request(format!("package {field} must be positive"))
                .with_details(json!({
                    "field": field,
                    "index": index,
                    "value": value,
                    "code": "non_positive_dimension",
                }))
        }
        PackageValidationError::EmptyDescription => {
            DomainError::invalid_request("package description must not be empty").with_details(
                json!({
                    "field": "description",
                    "index": index,
                    "code": "empty_description",
                }),
            )
        }
    }
}

/// Translate an aggregate guard failure into a transport-agnostic error.
pub(crate) fn map_freight_error(error: FreightError) -> DomainError {
    let coded = |err: DomainError, code: &str| err.with_details(json!({ "code": code }));
    match error {
        FreightError::InvalidTransition { from, to } => coded(
            DomainError::conflict(format!("cannot move freight from {from} to {to}")),
            "invalid_transition",
        ),
        FreightError::AlreadyAssigned => coded(
            DomainError::conflict("freight already has a transporter"),
            "already_assigned",
        ),
        FreightError::NotAssignedTransporter => coded(
            DomainError::forbidden("caller is not the assigned transporter"),
            "not_assigned_transporter",
        ),
        FreightError::NotCancellable { status } => coded(
            DomainError::conflict(format!("freight in status {status} cannot be cancelled")),
            "not_cancellable",
        ),
        FreightError::NotAParty => coded(
            DomainError::forbidden("only the creator or the transporter may cancel"),
            "not_a_party",
        ),
        FreightError::NotShared => coded(
            DomainError::conflict("freight does not accept shared packages"),
            "not_shared",
        ),
        FreightError::CapacityExhausted { max_packages } => coded(
            DomainError::conflict(format!("freight is full ({max_packages} packages)")),
            "capacity_exhausted",
        ),
        FreightError::ExceedsCapacity { remaining, offered } => coded(
            DomainError::conflict(format!(
                "{offered} packages offered but only {remaining} slots free"
            )),
            "exceeds_capacity",
        ),
        FreightError::NotJoinable { status } => coded(
            DomainError::conflict(format!("freight in status {status} cannot be joined")),
            "not_joinable",
        ),
        FreightError::OwnFreight => coded(
            DomainError::forbidden("creator cannot join their own freight"),
            "own_freight",
        ),
        FreightError::AlreadyJoined => coded(
            DomainError::conflict("customer already joined this freight"),
            "already_joined",
        ),
        FreightError::NoPackages => coded(
            DomainError::invalid_request("a join must include at least one package"),
            "no_packages",
        ),
        FreightError::NotParticipant => coded(
            DomainError::conflict("customer has not joined this freight"),
            "not_participant",
        ),
        FreightError::ParticipationLocked { status } => coded(
            DomainError::conflict(format!(
                "participation cannot change once the freight is {status}"
            )),
            "participation_locked",
        ),
        FreightError::PackageNotFound { package_id } => coded(
            DomainError::not_found(format!("package {package_id} not found on this freight")),
            "package_not_found",
        ),
        FreightError::OutOfSequence { expected } => {
            DomainError::conflict("package is not next in the delivery sequence").with_details(
                json!({
                    "code": "out_of_sequence",
                    "expectedPackageId": expected,
                }),
            )
        }
        FreightError::NotInTransit { status } => coded(
            DomainError::conflict(format!(
                "deliveries only progress while in transit, freight is {status}"
            )),
            "not_in_transit",
        ),
        FreightError::NotPackageOwner => coded(
            DomainError::forbidden("caller does not own this package"),
            "not_package_owner",
        ),
        FreightError::Payment(PaymentError::MissingProof) => coded(
            DomainError::invalid_request("bank payments require a payment proof"),
            "payment_proof_required",
        ),
        FreightError::Payment(PaymentError::AlreadySubmitted { status }) => coded(
            DomainError::conflict(format!("payment already submitted (status {status})")),
            "payment_already_submitted",
        ),
        FreightError::Payment(PaymentError::NotPaid { status }) => coded(
            DomainError::conflict(format!(
                "payment must be submitted before confirmation (status {status})"
            )),
            "payment_not_submitted",
        ),
    }
}

pub(crate) fn map_freight_update_error(error: FreightUpdateError) -> DomainError {
    match error {
        FreightUpdateError::NotFound { freight_id } => {
            DomainError::not_found(format!("freight {freight_id} not found"))
                .with_details(json!({ "code": "freight_not_found" }))
        }
        FreightUpdateError::Rejected(err) => map_freight_error(err),
        FreightUpdateError::Repository(err) => map_freight_repository_error(err),
    }
}

/// Freight service implementing the command and query driving ports.
#[derive(Clone)]
pub struct FreightService<F, U, N, I, P> {
    freight_repo: Arc<F>,
    user_repo: Arc<U>,
    notification_repo: Arc<N>,
    idempotency_repo: Arc<I>,
    price_engine: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<F, U, N, I, P> FreightService<F, U, N, I, P> {
    /// Create a new service over the given adapters.
    pub fn new(
        freight_repo: Arc<F>,
        user_repo: Arc<U>,
        notification_repo: Arc<N>,
        idempotency_repo: Arc<I>,
        price_engine: Arc<P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            freight_repo,
            user_repo,
            notification_repo,
            idempotency_repo,
            price_engine,
            clock,
        }
    }
}

impl<F, U, N, I, P> FreightService<F, U, N, I, P>
where
    F: FreightRepository,
    U: UserRepository,
    N: NotificationRepository,
    I: IdempotencyRepository,
    P: PriceEngine,
{
    async fn require_user(&self, user_id: UserId) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("user {user_id} not found")))
    }

    fn require_role(user: &User, role: UserRole) -> Result<(), DomainError> {
        if user.role() != role {
            return Err(
                DomainError::forbidden(format!("action requires the {role} role")).with_details(
                    json!({ "code": "role_required", "requiredRole": role.as_str() }),
                ),
            );
        }
        Ok(())
    }

    /// Append a notification; failures are logged, never propagated.
    async fn notify(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        title: &str,
        message: String,
        related_id: Option<Uuid>,
    ) {
        let notification = Notification::new(
            Uuid::new_v4(),
            user_id,
            kind,
            title,
            message,
            related_id,
            self.clock.utc(),
        );
        if let Err(error) = self.notification_repo.append(&notification).await {
            warn!(%user_id, %error, "notification append failed");
        }
    }

    /// Quote and validate one cargo input into a package.
    async fn build_package(
        &self,
        owner: &User,
        cargo: &CargoInput,
        index: usize,
    ) -> Result<PackageItem, DomainError> {
        let dimensions = PackageDimensions::new(
            cargo.width_cm,
            cargo.height_cm,
            cargo.length_cm,
            cargo.weight_kg,
        )
        .map_err(|err| map_package_validation_error(&err, index))?;
        let quote = self
            .price_engine
            .quote(&dimensions)
            .await
            .map_err(map_price_engine_error)?;
        PackageItem::new(
            PackageDraft {
                id: Uuid::new_v4(),
                dimensions,
                description: cargo.description.clone(),
                photos: cargo.photos.clone(),
                owner_id: owner.id(),
                owner_name: owner.name().to_owned(),
            },
            quote.distance_km,
            quote.price,
        )
        .map_err(|err| map_package_validation_error(&err, index))
    }

    fn participant_entry(user: &User) -> Participant {
        Participant {
            id: user.id(),
            name: user.name().to_owned(),
            address: user.address().unwrap_or_default().to_owned(),
            city: user
                .location()
                .map(|l| l.city().to_owned())
                .unwrap_or_default(),
            latitude: user.location().and_then(|l| l.latitude()),
            longitude: user.location().and_then(|l| l.longitude()),
        }
    }

    async fn apply(
        &self,
        freight_id: Uuid,
        mutation: FreightMutation,
    ) -> Result<(FreightRequest, FreightMutationOutcome), DomainError> {
        let update = self
            .freight_repo
            .update(freight_id, mutation)
            .await
            .map_err(map_freight_update_error)?;
        Ok((update.freight, update.outcome))
    }

    /// Everyone attached to a freight: the creator plus joined participants.
    fn involved_customers(freight: &FreightRequest) -> Vec<UserId> {
        let mut involved = vec![freight.customer_id()];
        involved.extend_from_slice(freight.shared_by());
        involved
    }

    fn serialize_response<T: Serialize>(response: &T) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(response)
            .map_err(|err| DomainError::internal(format!("failed to serialize response: {err}")))
    }

    fn deserialize_response<T: DeserializeOwned>(
        snapshot: serde_json::Value,
    ) -> Result<T, DomainError> {
        serde_json::from_value(snapshot)
            .map_err(|err| DomainError::internal(format!("failed to deserialize response: {err}")))
    }

    fn mark_replayed<T: HasReplayFlag>(mut response: T) -> T {
        response.mark_replayed();
        response
    }

    async fn handle_duplicate_key_race<T>(
        &self,
        context: &IdempotencyContext,
    ) -> Result<T, DomainError>
    where
        T: DeserializeOwned + HasReplayFlag,
    {
        let retry_result = self
            .idempotency_repo
            .lookup(&context.lookup())
            .await
            .map_err(map_idempotency_error)?;

        match retry_result {
            IdempotencyLookupResult::MatchingPayload(record) => {
                let response = Self::deserialize_response(record.response_snapshot)?;
                Ok(Self::mark_replayed(response))
            }
            IdempotencyLookupResult::ConflictingPayload(_) => Err(DomainError::conflict(
                "idempotency key already used with different payload",
            )),
            IdempotencyLookupResult::NotFound => Err(DomainError::internal(
                "idempotency record disappeared during race resolution",
            )),
        }
    }

    /// Run `operation` once per idempotency key: a replay with the same
    /// payload returns the recorded response; the same key with a different
    /// payload is a conflict.
    async fn handle_idempotent<T, Op, Fut>(
        &self,
        context: IdempotencyContext,
        operation: Op,
    ) -> Result<T, DomainError>
    where
        T: DeserializeOwned + Serialize + HasReplayFlag,
        Op: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let lookup_result = self
            .idempotency_repo
            .lookup(&context.lookup())
            .await
            .map_err(map_idempotency_error)?;

        match lookup_result {
            IdempotencyLookupResult::NotFound => {
                let response = operation().await?;
                let record = IdempotencyRecord {
                    key: context.key.clone(),
                    user_id: context.user_id,
                    mutation_type: context.mutation_type,
                    payload_hash: context.payload_hash.clone(),
                    response_snapshot: Self::serialize_response(&response)?,
                    created_at: self.clock.utc(),
                };
                match self.idempotency_repo.store(&record).await {
                    Ok(()) => Ok(response),
                    Err(IdempotencyRepositoryError::DuplicateKey { .. }) => {
                        self.handle_duplicate_key_race(&context).await
                    }
                    Err(err) => Err(map_idempotency_error(err)),
                }
            }
            IdempotencyLookupResult::MatchingPayload(record) => {
                let response = Self::deserialize_response(record.response_snapshot)?;
                Ok(Self::mark_replayed(response))
            }
            IdempotencyLookupResult::ConflictingPayload(_) => Err(DomainError::conflict(
                "idempotency key already used with different payload",
            )),
        }
    }

    async fn perform_join(
        &self,
        request: &JoinFreightRequest,
        joiner: &User,
    ) -> Result<JoinFreightResponse, DomainError> {
        let mut packages = Vec::with_capacity(request.packages.len());
        for (index, cargo) in request.packages.iter().enumerate() {
            packages.push(self.build_package(joiner, cargo, index).await?);
        }

        let (freight, _) = self
            .apply(
                request.freight_id,
                FreightMutation::Join {
                    participant: Self::participant_entry(joiner),
                    packages,
                },
            )
            .await?;

        Ok(JoinFreightResponse {
            freight: FreightPayload::from(&freight),
            replayed: false,
        })
    }

    async fn perform_cancel_participation(
        &self,
        request: &CancelParticipationRequest,
    ) -> Result<CancelParticipationResponse, DomainError> {
        let (freight, outcome) = self
            .apply(
                request.freight_id,
                FreightMutation::RemoveParticipation {
                    customer: request.customer_id,
                },
            )
            .await?;
        let removed_packages = match outcome {
            FreightMutationOutcome::ParticipationRemoved { removed_packages } => removed_packages,
            _ => 0,
        };

        Ok(CancelParticipationResponse {
            freight: FreightPayload::from(&freight),
            removed_packages,
            replayed: false,
        })
    }

    fn join_payload_hash(request: &JoinFreightRequest) -> PayloadHash {
        let packages: Vec<serde_json::Value> = request
            .packages
            .iter()
            .map(|p| {
                json!({
                    "widthCm": p.width_cm,
                    "heightCm": p.height_cm,
                    "lengthCm": p.length_cm,
                    "weightKg": p.weight_kg,
                    "description": p.description,
                })
            })
            .collect();
        canonicalize_payload(&json!({
            "freightId": request.freight_id,
            "customerId": request.customer_id,
            "packages": packages,
        }))
    }

    fn leave_payload_hash(request: &CancelParticipationRequest) -> PayloadHash {
        canonicalize_payload(&json!({
            "freightId": request.freight_id,
            "customerId": request.customer_id,
        }))
    }
}

#[derive(Debug, Clone)]
struct IdempotencyContext {
    key: IdempotencyKey,
    user_id: UserId,
    mutation_type: MutationType,
    payload_hash: PayloadHash,
}

impl IdempotencyContext {
    fn new(
        key: IdempotencyKey,
        user_id: UserId,
        mutation_type: MutationType,
        payload_hash: PayloadHash,
    ) -> Self {
        Self {
            key,
            user_id,
            mutation_type,
            payload_hash,
        }
    }

    fn lookup(&self) -> IdempotencyLookup {
        IdempotencyLookup {
            key: self.key.clone(),
            user_id: self.user_id,
            mutation_type: self.mutation_type,
            payload_hash: self.payload_hash.clone(),
        }
    }
}

trait HasReplayFlag {
    fn mark_replayed(&mut self);
}

impl HasReplayFlag for JoinFreightResponse {
    fn mark_replayed(&mut self) {
        self.replayed = true;
    }
}

impl HasReplayFlag for CancelParticipationResponse {
    fn mark_replayed(&mut self) {
        self.replayed = true;
    }
}

#[async_trait]
impl<F, U, N, I, P> FreightCommand for FreightService<F, U, N, I, P>
where
    F: FreightRepository,
    U: UserRepository,
    N: NotificationRepository,
    I: IdempotencyRepository,
    P: PriceEngine,
{
    async fn create_freight(
        &self,
        request: CreateFreightRequest,
    ) -> Result<CreateFreightResponse, DomainError> {
        let creator = self.require_user(request.customer_id).await?;
        Self::require_role(&creator, UserRole::Customer)?;

        if request.is_shared && request.max_packages == 0 {
            return Err(
                DomainError::invalid_request("a shared freight needs capacity for packages")
                    .with_details(json!({ "field": "maxPackages", "code": "invalid_capacity" })),
            );
        }

        let dimensions = PackageDimensions::new(
            request.cargo.width_cm,
            request.cargo.height_cm,
            request.cargo.length_cm,
            request.cargo.weight_kg,
        )
        .map_err(|err| map_package_validation_error(&err, 0))?;
        if request.cargo.description.trim().is_empty() {
            return Err(map_package_validation_error(
                &PackageValidationError::EmptyDescription,
                0,
            ));
        }
        let quote = self
            .price_engine
            .quote(&dimensions)
            .await
            .map_err(map_price_engine_error)?;

        let freight = FreightRequest::new(FreightDraft {
            id: Uuid::new_v4(),
            customer_id: creator.id(),
            customer_name: creator.name().to_owned(),
            customer_avatar: creator.avatar().map(str::to_owned),
            pickup: request.pickup,
            delivery: request.delivery,
            cargo: crate::domain::CargoDetails {
                width_cm: request.cargo.width_cm,
                height_cm: request.cargo.height_cm,
                length_cm: request.cargo.length_cm,
                weight_kg: request.cargo.weight_kg,
                description: request.cargo.description,
                photos: request.cargo.photos,
            },
            price: quote.price,
            distance_km: quote.distance_km,
            requested_date: request.requested_date,
            created_at: self.clock.utc(),
            is_shared: request.is_shared,
            max_packages: request.max_packages,
        });

        self.freight_repo
            .insert(&freight)
            .await
            .map_err(map_freight_repository_error)?;

        Ok(CreateFreightResponse {
            freight: FreightPayload::from(&freight),
        })
    }

    async fn accept_freight(
        &self,
        request: AcceptFreightRequest,
    ) -> Result<FreightResponse, DomainError> {
        let transporter = self.require_user(request.transporter_id).await?;
        Self::require_role(&transporter, UserRole::Transporter)?;

        let estimated_arrival = self.clock.utc() + Duration::hours(ESTIMATED_ARRIVAL_HOURS);
        let (freight, _) = self
            .apply(
                request.freight_id,
                FreightMutation::AssignTransporter {
                    transporter: TransporterRef {
                        id: transporter.id(),
                        name: transporter.name().to_owned(),
                        avatar: transporter.avatar().map(str::to_owned),
                    },
                    estimated_arrival,
                },
            )
            .await?;

        for customer in Self::involved_customers(&freight) {
            self.notify(
                customer,
                NotificationKind::FreightAccepted,
                "Freight accepted",
                format!("{} accepted the freight", transporter.name()),
                Some(freight.id()),
            )
            .await;
        }

        Ok(FreightResponse {
            freight: FreightPayload::from(&freight),
        })
    }

    async fn update_status(
        &self,
        request: UpdateFreightStatusRequest,
    ) -> Result<FreightResponse, DomainError> {
        let mutation = match request.status {
            FreightStatus::InTransit => FreightMutation::BeginTransit {
                actor: request.actor_id,
            },
            FreightStatus::Delivered => FreightMutation::Complete {
                actor: request.actor_id,
            },
            FreightStatus::Cancelled => FreightMutation::Cancel {
                actor: request.actor_id,
            },
            FreightStatus::Confirmed => {
                return Err(DomainError::invalid_request(
                    "acceptance assigns the transporter; use the accept operation",
                )
                .with_details(json!({ "code": "use_accept_operation" })));
            }
            FreightStatus::Pending => {
                return Err(DomainError::invalid_request(
                    "a freight cannot return to pending",
                )
                .with_details(json!({ "code": "invalid_target_status" })));
            }
        };

        let cancelling = request.status == FreightStatus::Cancelled;
        let (freight, _) = self.apply(request.freight_id, mutation).await?;

        if cancelling {
            for customer in Self::involved_customers(&freight)
                .into_iter()
                .filter(|id| *id != request.actor_id)
            {
                self.notify(
                    customer,
                    NotificationKind::FreightCancelled,
                    "Freight cancelled",
                    "The freight was cancelled".to_owned(),
                    Some(freight.id()),
                )
                .await;
            }
        }

        Ok(FreightResponse {
            freight: FreightPayload::from(&freight),
        })
    }

    async fn join_freight(
        &self,
        request: JoinFreightRequest,
    ) -> Result<JoinFreightResponse, DomainError> {
        let joiner = self.require_user(request.customer_id).await?;
        Self::require_role(&joiner, UserRole::Customer)?;

        let Some(key) = request.idempotency_key.clone() else {
            return self.perform_join(&request, &joiner).await;
        };

        let context = IdempotencyContext::new(
            key,
            request.customer_id,
            MutationType::Join,
            Self::join_payload_hash(&request),
        );
        self.handle_idempotent(context, || self.perform_join(&request, &joiner))
            .await
    }

    async fn cancel_participation(
        &self,
        request: CancelParticipationRequest,
    ) -> Result<CancelParticipationResponse, DomainError> {
        self.require_user(request.customer_id).await?;

        let Some(key) = request.idempotency_key.clone() else {
            return self.perform_cancel_participation(&request).await;
        };

        let context = IdempotencyContext::new(
            key,
            request.customer_id,
            MutationType::Leave,
            Self::leave_payload_hash(&request),
        );
        self.handle_idempotent(context, || self.perform_cancel_participation(&request))
            .await
    }

    async fn mark_package_delivered(
        &self,
        request: MarkPackageDeliveredRequest,
    ) -> Result<FreightResponse, DomainError> {
        let (freight, outcome) = self
            .apply(
                request.freight_id,
                FreightMutation::MarkPackageDelivered {
                    actor: request.transporter_id,
                    package_id: request.package_id,
                },
            )
            .await?;

        if let FreightMutationOutcome::Delivery(advance) = &outcome {
            self.notify(
                advance.delivered_owner,
                NotificationKind::Delivery,
                "Order delivered",
                "Your order was delivered".to_owned(),
                Some(freight.id()),
            )
            .await;
            if let Some(next_owner) = advance.next_owner {
                self.notify(
                    next_owner,
                    NotificationKind::Delivery,
                    "Order on the way",
                    "Your order is on the way".to_owned(),
                    Some(freight.id()),
                )
                .await;
            }
        }

        Ok(FreightResponse {
            freight: FreightPayload::from(&freight),
        })
    }

    async fn submit_payment(
        &self,
        request: SubmitPaymentRequest,
    ) -> Result<PackageResponse, DomainError> {
        let (freight, outcome) = self
            .apply(
                request.freight_id,
                FreightMutation::SubmitPayment {
                    actor: request.customer_id,
                    package_id: request.package_id,
                    method: request.method,
                    proof: request.proof,
                },
            )
            .await?;

        let FreightMutationOutcome::Payment(package) = outcome else {
            return Err(DomainError::internal("payment mutation produced no package"));
        };

        if let Some(transporter_id) = freight.transporter_id() {
            self.notify(
                transporter_id,
                NotificationKind::Payment,
                "Payment submitted",
                format!(
                    "{} submitted a {} payment",
                    package.owner_name(),
                    request.method
                ),
                Some(freight.id()),
            )
            .await;
        }

        Ok(PackageResponse {
            package: PackagePayload::from(&package),
        })
    }

    async fn confirm_payment(
        &self,
        request: ConfirmPaymentRequest,
    ) -> Result<PackageResponse, DomainError> {
        let (freight, outcome) = self
            .apply(
                request.freight_id,
                FreightMutation::ConfirmPayment {
                    actor: request.transporter_id,
                    package_id: request.package_id,
                },
            )
            .await?;

        let FreightMutationOutcome::Payment(package) = outcome else {
            return Err(DomainError::internal("payment mutation produced no package"));
        };

        self.notify(
            package.owner_id(),
            NotificationKind::Payment,
            "Payment confirmed",
            "The transporter confirmed your payment".to_owned(),
            Some(freight.id()),
        )
        .await;

        Ok(PackageResponse {
            package: PackagePayload::from(&package),
        })
    }
}

#[async_trait]
impl<F, U, N, I, P> FreightQuery for FreightService<F, U, N, I, P>
where
    F: FreightRepository,
    U: UserRepository,
    N: NotificationRepository,
    I: IdempotencyRepository,
    P: PriceEngine,
{
    async fn list_freights(&self) -> Result<Vec<FreightPayload>, DomainError> {
        let freights = self
            .freight_repo
            .list()
            .await
            .map_err(map_freight_repository_error)?;
        Ok(freights.iter().map(FreightPayload::from).collect())
    }

    async fn get_freight(&self, freight_id: Uuid) -> Result<FreightPayload, DomainError> {
        let freight = self
            .freight_repo
            .find_by_id(freight_id)
            .await
            .map_err(map_freight_repository_error)?
            .ok_or_else(|| {
                DomainError::not_found(format!("freight {freight_id} not found"))
                    .with_details(json!({ "code": "freight_not_found" }))
            })?;
        Ok(FreightPayload::from(&freight))
    }
}

#[cfg(test)]
#[path = "freight_service_tests.rs"]
mod tests;
