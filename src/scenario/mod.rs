//! Scenario Orchestrator
//!
//! Typed operations over the posts API plus the chained scenario drivers.
//! Each driver is a short linear sequence of executor calls with a
//! validator call after each state-changing step, threading state (the
//! assigned id, updated fields) forward through the scenario's
//! [`PostRecord`] context. Failure at any step aborts the scenario; there
//! is no cleanup of partially created records.
//!
//! Steps log through `tracing` so a failing run names the step it died in.

use crate::auth::{self, AuthError};
use crate::check::{self, CheckError};
use crate::client::{ApiClient, ApiRequest, ApiResponse, ClientError};
use crate::config::CredentialsConfig;
use crate::data::PostRecord;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

/// Scenario failures, converging the per-component error types.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("Record has no numeric id")]
    MissingId,
}

/// Typed operations on the posts resource.
///
/// Operations that the suite intentionally drives into 4xx territory
/// (collection-route update/delete, unauthenticated create, read of a
/// deleted record) disable the fail-on-error-status flag so the status
/// comes back as data.
pub struct PostsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PostsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET `/posts/`
    pub async fn list(&self) -> Result<ApiResponse, ClientError> {
        self.client.execute(ApiRequest::get("/posts/")).await
    }

    /// GET `/posts?_limit=N`
    pub async fn list_with_limit(&self, limit: usize) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("/posts?_limit={limit}")))
            .await
    }

    /// GET `/posts?id=A&id=B&...` - result order follows the query order.
    pub async fn filter_by_ids(&self, ids: &[u64]) -> Result<ApiResponse, ClientError> {
        let query = ids
            .iter()
            .map(|id| format!("id={id}"))
            .collect::<Vec<_>>()
            .join("&");
        self.client
            .execute(ApiRequest::get(format!("/posts?{query}")))
            .await
    }

    /// POST `/posts`
    pub async fn create(&self, record: &PostRecord) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(ApiRequest::post("/posts").with_json(record.to_json()))
            .await
    }

    /// GET `/posts/{id}`
    pub async fn read(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("/posts/{id}")))
            .await
    }

    /// GET `/posts/{id}`, any status returned as data (404 probes).
    pub async fn read_allow_missing(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("/posts/{id}")).allow_error_status())
            .await
    }

    /// PUT `/posts/{id}`
    pub async fn update(&self, id: u64, record: &PostRecord) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(ApiRequest::put(format!("/posts/{id}")).with_json(record.to_json()))
            .await
    }

    /// PUT `/posts` - the collection route, no item id; the service
    /// answers 404.
    pub async fn update_collection(&self, record: &PostRecord) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(
                ApiRequest::put("/posts")
                    .with_json(record.to_json())
                    .allow_error_status(),
            )
            .await
    }

    /// DELETE `/posts/{id}`
    pub async fn delete(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(ApiRequest::delete(format!("/posts/{id}")))
            .await
    }

    /// DELETE `/posts` - the collection route, no item id; the service
    /// answers 404.
    pub async fn delete_collection(&self, record: &PostRecord) -> Result<ApiResponse, ClientError> {
        self.client
            .execute(
                ApiRequest::delete("/posts")
                    .with_json(record.to_json())
                    .allow_error_status(),
            )
            .await
    }

    /// POST `/{user_id}/posts`, optionally with a bearer token.
    ///
    /// Without a token the service answers 401, so the unauthenticated
    /// variant returns the status as data.
    pub async fn create_under_user(
        &self,
        user_id: u64,
        record: &PostRecord,
        token: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest::post(format!("/{user_id}/posts")).with_json(record.to_json());
        let request = match token {
            Some(token) => request.with_bearer(token),
            None => request.allow_error_status(),
        };
        self.client.execute(request).await
    }
}

/// Extract the server-assigned id from a creation response.
fn assigned_id(response: &ApiResponse) -> Result<u64, ScenarioError> {
    response
        .json()?
        .get("id")
        .and_then(Value::as_u64)
        .ok_or(ScenarioError::MissingId)
}

/// Create a post, capture its assigned id into the record, then read it
/// back and verify {id, title, body}.
pub async fn create_and_verify(
    client: &ApiClient,
    record: &mut PostRecord,
) -> Result<(), ScenarioError> {
    let api = PostsApi::new(client);

    info!(payload = %record.to_json(), "creating post entity");
    let response = api.create(record).await?;
    check::expect_status(&response, 201)?;
    let id = assigned_id(&response)?;
    record.id = Some(id);

    info!(id, "verifying created post entity");
    let response = api.read(id).await?;
    check::expect_status(&response, 200)?;
    check::check_post(response.json()?, record)?;

    Ok(())
}

/// Update the record's names, PUT it to the item route, then read it back
/// and verify the update took effect and the id survived.
pub async fn update_and_verify(
    client: &ApiClient,
    record: &mut PostRecord,
    firstname: &str,
    lastname: &str,
) -> Result<(), ScenarioError> {
    let api = PostsApi::new(client);
    let id = record.id.ok_or(ScenarioError::MissingId)?;

    record.firstname = Some(firstname.to_string());
    record.lastname = Some(lastname.to_string());

    info!(id, payload = %record.to_json(), "updating post entity");
    let response = api.update(id, record).await?;
    check::expect_status(&response, 200)?;

    info!(id, "verifying updated post entity");
    let response = api.read(id).await?;
    check::expect_status(&response, 200)?;
    let body = response.json()?;
    check::check_post(body, record)?;
    check::expect_field(body, "firstname", &json!(firstname))?;
    check::expect_field(body, "lastname", &json!(lastname))?;

    Ok(())
}

/// Delete the record, then verify a subsequent read answers 404.
pub async fn delete_and_verify_gone(
    client: &ApiClient,
    record: &PostRecord,
) -> Result<(), ScenarioError> {
    let api = PostsApi::new(client);
    let id = record.id.ok_or(ScenarioError::MissingId)?;

    info!(id, "deleting post entity");
    let response = api.delete(id).await?;
    check::expect_status(&response, 200)?;

    info!(id, "verifying deleted post entity is gone");
    let response = api.read_allow_missing(id).await?;
    check::expect_status(&response, 404)?;

    Ok(())
}

/// Full lifecycle: create, verify, update, verify, delete, verify gone.
pub async fn lifecycle(
    client: &ApiClient,
    record: &mut PostRecord,
    firstname: &str,
    lastname: &str,
) -> Result<(), ScenarioError> {
    create_and_verify(client, record).await?;
    update_and_verify(client, record, firstname, lastname).await?;
    delete_and_verify_gone(client, record).await?;
    Ok(())
}

/// Obtain a token via register-or-login, create a post on the per-user
/// route with it, then read the post back and verify it.
pub async fn authenticated_create(
    client: &ApiClient,
    credentials: &CredentialsConfig,
    user_id: u64,
    record: &mut PostRecord,
) -> Result<(), ScenarioError> {
    let api = PostsApi::new(client);
    let token = auth::obtain_access_token(client, credentials).await?;

    info!(user_id, payload = %record.to_json(), "creating post with access token");
    let response = api.create_under_user(user_id, record, Some(&token)).await?;
    check::expect_status(&response, 201)?;
    let id = assigned_id(&response)?;
    record.id = Some(id);

    info!(id, "verifying post is created");
    let response = api.read(id).await?;
    check::expect_status(&response, 200)?;
    check::check_post(response.json()?, record)?;

    Ok(())
}
