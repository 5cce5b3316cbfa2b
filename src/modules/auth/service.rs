use enrollment_auth::create_access_token;
use enrollment_config::JwtConfig;
use enrollment_core::AppError;
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::modules::users::service::CredentialStore;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(credentials, dto), fields(username = %dto.username))]
    pub async fn register_user(
        credentials: &CredentialStore,
        dto: RegisterRequest,
    ) -> Result<RegisterResponse, AppError> {
        let user_id = credentials
            .register(&dto.username, &dto.password, dto.role)
            .await?;

        Ok(RegisterResponse {
            user_id,
            message: "User registered".to_string(),
        })
    }

    /// Verifies the credential and issues an access token for it.
    #[instrument(skip(credentials, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login_user(
        credentials: &CredentialStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let (user_id, role) = credentials
            .authenticate(&dto.username, &dto.password)
            .await?;

        let token = create_access_token(user_id.into_inner(), role, jwt_config)?;

        Ok(LoginResponse {
            token,
            role,
            message: "Login successful".to_string(),
        })
    }
}
