//! In-memory repository adapters.
//!
//! The process-local store is the production adapter here: it replaces the
//! source system's local-storage/in-memory collections while keeping
//! durability a swappable choice behind the repository ports. Every
//! collection sits behind a `Mutex`, so mutations on one aggregate
//! serialize at the store and commit all-or-nothing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    FreightRepository, FreightRepositoryError, FreightUpdate, FreightUpdateError,
    IdempotencyRepository, IdempotencyRepositoryError, NotificationRepository,
    NotificationRepositoryError, ReviewRepository, ReviewRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    FreightMutation, FreightRequest, IdempotencyLookup, IdempotencyLookupResult,
    IdempotencyRecord, Notification, Review, User, UserId,
};

fn lock_poisoned<E>(make: impl FnOnce(String) -> E) -> E {
    make("store mutex poisoned".to_owned())
}

/// In-memory freight store; newest insertions list first.
#[derive(Debug, Default)]
pub struct InMemoryFreightRepository {
    store: Mutex<Vec<FreightRequest>>,
}

impl InMemoryFreightRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FreightRepository for InMemoryFreightRepository {
    async fn insert(&self, freight: &FreightRequest) -> Result<(), FreightRepositoryError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(FreightRepositoryError::query))?;
        guard.insert(0, freight.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        freight_id: Uuid,
    ) -> Result<Option<FreightRequest>, FreightRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(FreightRepositoryError::query))?;
        Ok(guard.iter().find(|f| f.id() == freight_id).cloned())
    }

    async fn list(&self) -> Result<Vec<FreightRequest>, FreightRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(FreightRepositoryError::query))?;
        Ok(guard.clone())
    }

    async fn update(
        &self,
        freight_id: Uuid,
        mutation: FreightMutation,
    ) -> Result<FreightUpdate, FreightUpdateError> {
        let mut guard = self.store.lock().map_err(|_| {
            FreightUpdateError::Repository(lock_poisoned(FreightRepositoryError::query))
        })?;
        let slot = guard
            .iter_mut()
            .find(|f| f.id() == freight_id)
            .ok_or(FreightUpdateError::NotFound { freight_id })?;

        // Mutate a copy and commit only on success.
        let mut candidate = slot.clone();
        let outcome = candidate.apply(mutation)?;
        *slot = candidate.clone();
        Ok(FreightUpdate {
            freight: candidate,
            outcome,
        })
    }
}

/// In-memory user directory with a unique-email constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(UserRepositoryError::query))?;
        if guard
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserRepositoryError::duplicate_email(
                user.email().to_string(),
            ));
        }
        guard.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(UserRepositoryError::query))?;
        Ok(guard.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(UserRepositoryError::query))?;
        Ok(guard
            .values()
            .find(|user| user.email().as_ref() == email)
            .cloned())
    }
}

/// In-memory append-only review ledger.
#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    store: Mutex<Vec<Review>>,
}

impl InMemoryReviewRepository {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn append(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(ReviewRepositoryError::query))?;
        guard.insert(0, review.clone());
        Ok(())
    }

    async fn list_for_freight(
        &self,
        freight_id: Uuid,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(ReviewRepositoryError::query))?;
        Ok(guard
            .iter()
            .filter(|r| r.freight_id() == freight_id)
            .cloned()
            .collect())
    }

    async fn exists(
        &self,
        freight_id: Uuid,
        author_id: UserId,
        target_id: UserId,
    ) -> Result<bool, ReviewRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(ReviewRepositoryError::query))?;
        Ok(guard.iter().any(|r| {
            r.freight_id() == freight_id
                && r.author_id() == author_id
                && r.target_id() == target_id
        }))
    }
}

/// In-memory notification log; newest entries list first.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    store: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn append(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationRepositoryError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(NotificationRepositoryError::query))?;
        guard.insert(0, notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(NotificationRepositoryError::query))?;
        Ok(guard
            .iter()
            .filter(|n| n.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(NotificationRepositoryError::query))?;
        Ok(guard.iter().find(|n| n.id() == notification_id).cloned())
    }

    async fn mark_read(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(NotificationRepositoryError::query))?;
        Ok(guard.iter_mut().find(|n| n.id() == notification_id).map(
            |notification| {
                notification.mark_read();
                notification.clone()
            },
        ))
    }
}

/// In-memory idempotency record store keyed per (user, mutation, key).
#[derive(Debug, Default)]
pub struct InMemoryIdempotencyRepository {
    store: Mutex<HashMap<(UserId, &'static str, String), IdempotencyRecord>>,
}

impl InMemoryIdempotencyRepository {
    /// Create an empty record store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdempotencyRepository for InMemoryIdempotencyRepository {
    async fn lookup(
        &self,
        query: &IdempotencyLookup,
    ) -> Result<IdempotencyLookupResult, IdempotencyRepositoryError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(IdempotencyRepositoryError::query))?;
        let key = (
            query.user_id,
            query.mutation_type.as_str(),
            query.key.as_str().to_owned(),
        );
        Ok(match guard.get(&key) {
            None => IdempotencyLookupResult::NotFound,
            Some(record) if record.payload_hash == query.payload_hash => {
                IdempotencyLookupResult::MatchingPayload(record.clone())
            }
            Some(record) => IdempotencyLookupResult::ConflictingPayload(record.clone()),
        })
    }

    async fn store(&self, record: &IdempotencyRecord) -> Result<(), IdempotencyRepositoryError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| lock_poisoned(IdempotencyRepositoryError::query))?;
        let key = (
            record.user_id,
            record.mutation_type.as_str(),
            record.key.as_str().to_owned(),
        );
        if guard.contains_key(&key) {
            return Err(IdempotencyRepositoryError::duplicate_key(record.key.as_str()));
        }
        guard.insert(key, record.clone());
        Ok(())
    }
}
