use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::model::finance_profile::FinanceProfile;
use crate::model::user::User;
use crate::repository::finance_repo::{FinanceRepository, MongoFinanceRepository};
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, TokenPair};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: AuthUser,
    pub tokens: TokenPair,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, email: String, password: String) -> Result<AuthResponse, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<AuthResponse, ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<MongoUserRepository>,
    pub finance_repo: Arc<MongoFinanceRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AuthServiceImpl {
    pub fn new(
        user_repo: Arc<MongoUserRepository>,
        finance_repo: Arc<MongoFinanceRepository>,
        jwt_utils: Arc<JwtTokenUtilsImpl>,
    ) -> Self {
        Self {
            user_repo,
            finance_repo,
            jwt_utils,
        }
    }

    fn token_pair_for(&self, user: &User) -> Result<TokenPair, ServiceError> {
        let id = user
            .id
            .as_ref()
            .map(|id| id.to_hex())
            .ok_or_else(|| ServiceError::InternalError("User has no id".to_string()))?;
        self.jwt_utils
            .generate_token_pair(&id, &user.email)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(&self, email: String, password: String) -> Result<AuthResponse, ServiceError> {
        info!("Registering new user");
        let hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            email: email.clone(),
            password_hash: hash,
            created_at: None,
            updated_at: None,
        };

        // The unique email index makes this a single atomic uniqueness check.
        let inserted = match self.user_repo.insert(user).await {
            Ok(u) => u,
            Err(e) => {
                error!("Failed to insert user: {e}");
                return Err(match ServiceError::from(e) {
                    ServiceError::Conflict(_) => {
                        ServiceError::Conflict("Email already registered".to_string())
                    }
                    other => other,
                });
            }
        };
        let user_id = inserted
            .id
            .as_ref()
            .map(|id| id.to_hex())
            .ok_or_else(|| ServiceError::InternalError("User has no id".to_string()))?;

        // Every account gets a finance profile. If that write fails, delete
        // the account again so no orphaned half-signup survives.
        let profile = FinanceProfile::new(user_id.clone());
        if let Err(e) = self.finance_repo.insert(profile).await {
            error!("Failed to create finance profile, rolling back account: {e}");
            if let Some(id) = inserted.id.as_ref() {
                if let Err(del) = self.user_repo.delete(id).await {
                    warn!("Compensating account delete failed: {del}");
                }
            }
            return Err(ServiceError::from(e));
        }

        let tokens = self.token_pair_for(&inserted)?;
        info!("User registered successfully");
        Ok(AuthResponse {
            user: AuthUser {
                id: user_id,
                email: inserted.email,
                created_at: inserted.created_at,
            },
            tokens,
        })
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<AuthResponse, ServiceError> {
        info!("User login attempt");
        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(ServiceError::from)?
            .ok_or_else(|| {
                warn!("Login for unknown email");
                ServiceError::NotFound("User not found".to_string())
            })?;

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Invalid credentials for user: {}", email);
            return Err(ServiceError::Unauthorized("Incorrect password".to_string()));
        }

        let tokens = self.token_pair_for(&user)?;
        let user_id = user
            .id
            .as_ref()
            .map(|id| id.to_hex())
            .ok_or_else(|| ServiceError::InternalError("User has no id".to_string()))?;
        info!("User logged in successfully");
        Ok(AuthResponse {
            user: AuthUser {
                id: user_id,
                email: user.email,
                created_at: user.created_at,
            },
            tokens,
        })
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<TokenPair, ServiceError> {
        info!("Refreshing token");
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid refresh token: {}", e)))?;
        let tokens = self
            .jwt_utils
            .generate_token_pair(&claims.sub, &claims.email)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        info!("Token refreshed successfully");
        Ok(tokens)
    }
}
