//! Authentication service: credential verification and registration.
//!
//! Login failures on unknown email and on wrong password produce the same
//! message, so the response does not reveal which emails are registered.

use sqlx::PgPool;

use agenda_core::errors::{AgendaError, AgendaResult};
use agenda_core::models::user::{AuthResponse, LoginRequest, RegisterRequest, Role, User};
use agenda_core::validation::validate_user_data;
use agenda_db::models::DbUser;
use agenda_db::repositories::user as user_repo;

use crate::middleware::auth::{create_token, hash_password, verify_password};

const MIN_PASSWORD_LENGTH: usize = 6;

fn to_user(db: DbUser) -> AgendaResult<User> {
    let role = db
        .role
        .parse::<Role>()
        .map_err(|e| AgendaError::Internal(e.into()))?;

    Ok(User {
        id: db.id,
        name: db.name,
        email: db.email,
        role,
    })
}

fn invalid_credentials() -> AgendaError {
    AgendaError::Authentication("Invalid email or password".to_string())
}

/// Verifies credentials and issues a token.
pub async fn login(pool: &PgPool, jwt_secret: &str, request: &LoginRequest) -> AgendaResult<AuthResponse> {
    let (email, password) = match (&request.email, &request.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(AgendaError::MissingFields(
                "email and password are required".to_string(),
            ))
        }
    };

    let db_user = user_repo::get_user_by_email(pool, email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = verify_password(password, &db_user.password_hash)?;
    if !valid {
        return Err(invalid_credentials());
    }

    let user = to_user(db_user)?;
    let token = create_token(&user, jwt_secret)?;

    Ok(AuthResponse { token, user })
}

/// Registers a new user and issues a token for the fresh account.
///
/// Public registration only ever produces USER accounts; requesting ADMIN
/// is rejected outright.
pub async fn register(
    pool: &PgPool,
    jwt_secret: &str,
    request: &RegisterRequest,
) -> AgendaResult<AuthResponse> {
    let (name, email, password) = match (&request.name, &request.email, &request.password) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => {
            return Err(AgendaError::MissingFields(
                "name, email and password are required".to_string(),
            ))
        }
    };

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AgendaError::Validation(vec![format!(
            "'password' must be at least {MIN_PASSWORD_LENGTH} characters"
        )]));
    }

    let errors = validate_user_data(name, email);
    if !errors.is_empty() {
        return Err(AgendaError::Validation(errors));
    }

    if let Some(raw_role) = &request.role {
        match raw_role.parse::<Role>() {
            Ok(Role::Admin) => {
                return Err(AgendaError::Authorization {
                    role: Role::Admin.to_string(),
                })
            }
            Ok(Role::User) => {}
            Err(_) => {
                return Err(AgendaError::Validation(vec![
                    "'role' must be USER or ADMIN".to_string(),
                ]))
            }
        }
    }

    if user_repo::email_exists(pool, email).await? {
        return Err(AgendaError::EmailTaken);
    }

    let password_hash = hash_password(password)?;
    let db_user =
        user_repo::create_user(pool, name, email, &password_hash, &Role::User.to_string()).await?;

    let user = to_user(db_user)?;
    let token = create_token(&user, jwt_secret)?;

    Ok(AuthResponse { token, user })
}
