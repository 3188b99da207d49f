//! Test data for the posts API
//!
//! `PostRecord` is the JSON resource under test. Its shape varies by
//! scenario (a freshly generated post has only `title` and `body`, a
//! user-shaped record carries names and an age), so every field is optional
//! and absent fields are skipped on the wire.
//!
//! `random_post` decorrelates test runs from fixed fixture data; there is
//! no uniqueness guarantee across calls.

use crate::config::CredentialsConfig;
use fake::faker::internet::en::{Password, SafeEmail};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use serde::{Deserialize, Serialize};

/// A post (or user-shaped) record as the service accepts and returns it.
///
/// `id` is assigned by the server on creation and absent before.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u64>,
}

impl PostRecord {
    /// Serialize to a JSON value for use as a request body.
    pub fn to_json(&self) -> serde_json::Value {
        // All fields are primitives; serialization cannot fail.
        serde_json::to_value(self).expect("PostRecord serializes to JSON")
    }
}

/// Generate a random post payload with a short title and a free-text body.
pub fn random_post() -> PostRecord {
    PostRecord {
        title: Some(JobTitle().fake()),
        body: Some(Sentence(3..8).fake()),
        ..PostRecord::default()
    }
}

/// Generate fresh credentials for registration tests.
pub fn random_credentials() -> CredentialsConfig {
    CredentialsConfig {
        email: SafeEmail().fake(),
        password: Password(12..16).fake(),
    }
}
