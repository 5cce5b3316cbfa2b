use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use enrollment_auth::verify_token;
use enrollment_core::AppError;

use crate::modules::auth::model::Claims;
use crate::modules::users::model::Caller;
use crate::state::AppState;
use enrollment_models::ids::UserId;

/// Extractor that validates the bearer token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID from the `sub` claim
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    /// The identity the request runs as.
    pub fn caller(&self) -> Result<Caller, AppError> {
        Ok(Caller::new(self.user_id()?, self.0.role))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::unauthorized("Missing or invalid authorization header".to_string())
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Creates an extractor that authenticates the caller and checks their role
/// against one operation. Parts extractors run before the body is read, so a
/// denied caller gets `Forbidden` whatever the body holds.
#[macro_export]
macro_rules! require_operation {
    ($name:ident, $operation:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = enrollment_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                enrollment_core::AccessControl::authorize(auth_user.0.role, $operation)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_operation!(RequireCreateStudent, enrollment_core::Operation::CreateStudent);
require_operation!(RequireUpdateStudent, enrollment_core::Operation::UpdateStudent);
require_operation!(RequireLinkStudentAccount, enrollment_core::Operation::LinkStudentAccount);
