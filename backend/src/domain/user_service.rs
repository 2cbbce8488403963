//! User directory domain services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::freight_service::map_user_repository_error;
use crate::domain::ports::{
    LoginRequest, LoginResponse, RegisterUserRequest, RegisterUserResponse, UserCommand,
    UserPayload, UserRepository, UsersQuery,
};
use crate::domain::{
    DomainError, EmailAddress, User, UserDraft, UserId, UserRole, UserValidationError,
};

fn map_user_validation_error(error: &UserValidationError) -> DomainError {
    match error {
        UserValidationError::InvalidId => DomainError::invalid_request("invalid user id")
            .with_details(json!({ "field": "id", "code": "invalid_id" })),
        UserValidationError::EmptyName => DomainError::invalid_request("name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })),
        UserValidationError::InvalidEmail => DomainError::invalid_request(
            "email must contain a local part and a domain",
        )
        .with_details(json!({ "field": "email", "code": "invalid_email" })),
        UserValidationError::UnknownRole { input } => {
            DomainError::invalid_request(format!("unknown user role: {input}"))
                .with_details(json!({ "field": "role", "code": "unknown_role" }))
        }
    }
}

/// User directory service implementing the user driving ports.
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserDirectoryService<U> {
    /// Create a new service over the directory.
    pub fn new(user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<U> UserCommand for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, DomainError> {
        if request.role == UserRole::Admin {
            return Err(
                DomainError::forbidden("admin accounts cannot self-register")
                    .with_details(json!({ "field": "role", "code": "role_not_registerable" })),
            );
        }

        let email = EmailAddress::new(request.email)
            .map_err(|err| map_user_validation_error(&err))?;
        let user = User::new(UserDraft {
            id: UserId::random(),
            name: request.name,
            email,
            phone: request.phone,
            role: request.role,
            created_at: self.clock.utc(),
            avatar: None,
            address: request.address,
            location: request.location,
        })
        .map_err(|err| map_user_validation_error(&err))?;

        self.user_repo
            .insert(&user)
            .await
            .map_err(map_user_repository_error)?;

        Ok(RegisterUserResponse {
            user: UserPayload::from(&user),
        })
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, DomainError> {
        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| {
                DomainError::not_found("no user registered with this email")
                    .with_details(json!({ "code": "user_not_found" }))
            })?;

        Ok(LoginResponse {
            user: UserPayload::from(&user),
        })
    }
}

#[async_trait]
impl<U> UsersQuery for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn get_user(&self, user_id: UserId) -> Result<UserPayload, DomainError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("user {user_id} not found")))?;
        Ok(UserPayload::from(&user))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
