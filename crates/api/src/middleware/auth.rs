//! # Authentication Middleware
//!
//! Password hashing (Argon2) and JWT issuance/verification (HS256), plus
//! the axum middleware that authenticates requests and gates the admin
//! surface on the ADMIN role.
//!
//! Tokens carry the user id as `sub`; on every authenticated request the
//! user row is re-read so tokens for deleted users stop working
//! immediately.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use eyre::Result;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use agenda_core::errors::{AgendaError, AgendaResult};
use agenda_core::models::user::{Role, User};

use crate::middleware::error_handling::AppError;
use crate::ApiState;

const TOKEN_LIFETIME_HOURS: i64 = 24;
const ISSUER: &str = "agenda";

/// JWT claims for an authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,
    /// Issuer
    pub iss: String,
    /// User email (informational)
    pub email: String,
    /// User role at issuance time
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    pub fn new(user: &User) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(TOKEN_LIFETIME_HOURS);

        Self {
            sub: user.id,
            iss: ISSUER.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Signs a token for the given user.
pub fn create_token(user: &User, secret: &str) -> AgendaResult<String> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &Claims::new(user), &key)
        .map_err(|e| AgendaError::Internal(Box::new(e)))
}

/// Validates a token's signature, expiry, nbf, and issuer.
pub fn validate_token(token: &str, secret: &str) -> AgendaResult<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AgendaError::Authentication("Token has expired, please log in again".to_string())
        }
        _ => AgendaError::Authentication("Invalid token".to_string()),
    })?;

    Ok(token_data.claims)
}

/// Hashes a password with Argon2 and a fresh random salt. The result is a
/// PHC string embedding algorithm, parameters, salt, and hash.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored PHC hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| eyre::eyre!("Malformed password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// The authenticated principal, inserted into request extensions by the
/// auth middleware and read by handlers for attribution.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

async fn authenticate(state: &ApiState, headers: &header::HeaderMap) -> Result<User, AppError> {
    // Extract the Bearer token from the Authorization header
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError(AgendaError::Authentication(
                "An authentication token is required".to_string(),
            ))
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError(AgendaError::Authentication(
            "Expected a Bearer token".to_string(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt_secret).map_err(AppError)?;

    // The token may outlive its user; re-read the row to be sure.
    let db_user = agenda_db::repositories::user::get_user_by_id(&state.db_pool, claims.sub)
        .await
        .map_err(|e| AppError(AgendaError::Database(e)))?
        .ok_or_else(|| {
            AppError(AgendaError::Authentication(
                "The user associated with this token no longer exists".to_string(),
            ))
        })?;

    let role = db_user
        .role
        .parse::<Role>()
        .map_err(|e| AppError(AgendaError::Internal(e.into())))?;

    Ok(User {
        id: db_user.id,
        name: db_user.name,
        email: db_user.email,
        role,
    })
}

/// Middleware requiring a valid token; inserts [`CurrentUser`].
pub async fn require_auth(
    State(state): State<Arc<ApiState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Middleware requiring a valid token for a user with the ADMIN role.
pub async fn require_admin(
    State(state): State<Arc<ApiState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, req.headers()).await?;

    if user.role != Role::Admin {
        return Err(AppError(AgendaError::Authorization {
            role: user.role.to_string(),
        }));
    }

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
