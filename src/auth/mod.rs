//! Register-or-login authentication flow
//!
//! Obtaining an access token is the one genuinely branching flow in the
//! suite: attempt registration, and when the service reports the account
//! already exists (HTTP 400), fall back to login. Both paths converge on a
//! bearer token. The branch is modeled as an explicit [`RegisterOutcome`]
//! resolved before proceeding, not as nested callbacks.
//!
//! Tokens are opaque strings; the harness only forwards them in the
//! `Authorization` header and never inspects their contents.

use crate::client::{ApiClient, ApiRequest, ApiResponse, ClientError};
use crate::config::CredentialsConfig;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

/// Authentication flow errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Unexpected status {actual} from {operation} (expected {expected})")]
    UnexpectedStatus {
        operation: &'static str,
        expected: u16,
        actual: u16,
    },

    #[error("Response from {operation} has no accessToken")]
    MissingToken { operation: &'static str },
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// Fresh registration; the service returned a token directly.
    Registered { access_token: String },
    /// The account already exists (HTTP 400); login is required.
    MustLogin,
}

/// POST `/register`. 201 yields a token, 400 means the account exists.
/// Any other status is an error.
pub async fn register(
    client: &ApiClient,
    credentials: &CredentialsConfig,
) -> Result<RegisterOutcome, AuthError> {
    info!(email = %credentials.email, "registering user");
    let response = client
        .execute(
            ApiRequest::post("/register")
                .with_json(credentials_body(credentials))
                .allow_error_status(),
        )
        .await?;

    match response.status {
        201 => Ok(RegisterOutcome::Registered {
            access_token: extract_token(&response, "register")?,
        }),
        400 => {
            info!("account already exists, falling back to login");
            Ok(RegisterOutcome::MustLogin)
        }
        actual => Err(AuthError::UnexpectedStatus {
            operation: "register",
            expected: 201,
            actual,
        }),
    }
}

/// POST `/login`, expecting 200 and an `accessToken` field in the body.
pub async fn login(
    client: &ApiClient,
    credentials: &CredentialsConfig,
) -> Result<String, AuthError> {
    info!(email = %credentials.email, "logging in");
    let response = client
        .execute(
            ApiRequest::post("/login")
                .with_json(credentials_body(credentials))
                .allow_error_status(),
        )
        .await?;

    if response.status != 200 {
        return Err(AuthError::UnexpectedStatus {
            operation: "login",
            expected: 200,
            actual: response.status,
        });
    }

    extract_token(&response, "login")
}

/// Resolve the register-or-login branch to a bearer token.
pub async fn obtain_access_token(
    client: &ApiClient,
    credentials: &CredentialsConfig,
) -> Result<String, AuthError> {
    match register(client, credentials).await? {
        RegisterOutcome::Registered { access_token } => Ok(access_token),
        RegisterOutcome::MustLogin => login(client, credentials).await,
    }
}

fn credentials_body(credentials: &CredentialsConfig) -> Value {
    json!({
        "email": credentials.email,
        "password": credentials.password,
    })
}

fn extract_token(response: &ApiResponse, operation: &'static str) -> Result<String, AuthError> {
    response
        .json()?
        .get("accessToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(AuthError::MissingToken { operation })
}
