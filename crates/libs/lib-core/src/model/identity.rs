//! # Authenticated Identity
//!
//! The verified caller of a protected route.
//!
//! The auth middleware inserts an [`Identity`] into the request extensions after
//! checking the bearer token. Handlers take it as an extractor argument and pass
//! it on to the services explicitly:
//!
//! ```rust,ignore
//! async fn list_todos(identity: Identity, State(tasks): State<TaskService>) -> Result<...> {
//!     tasks.list(&identity, pagination).await
//! }
//! ```
//!
//! Reaching a handler without one yields [`AppError::Unauthorized`].

use axum::{extract::FromRequestParts, http::request::Parts};

use super::account::AccountId;
use crate::error::AppError;

/// Request-scoped identity of the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    account_id: AccountId,
    username: String,
}

impl Identity {
    pub fn new(account_id: AccountId, username: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
        }
    }

    /// Owner key used to scope every task operation.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_identity_from_extensions() {
        let identity = Identity::new(AccountId::new(), "alice");
        let (mut parts, _) = Request::builder()
            .extension(identity.clone())
            .body(())
            .unwrap()
            .into_parts();

        let extracted = Identity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted, identity);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let err = Identity::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
