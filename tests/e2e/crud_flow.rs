//! E2E CRUD Flow Tests
//!
//! Chained create/read/update/delete scenarios threading the assigned id
//! from step to step, plus the collection-route probes that must answer
//! 404. Failure at any step aborts the scenario without cleanup.

use super::common::E2eEnv;
use restcheckr::check;
use restcheckr::data::{self, PostRecord};
use restcheckr::scenario;
use serial_test::serial;

/// Create a post entity from a user-shaped literal record and verify it
/// is created.
#[tokio::test]
#[serial]
async fn test_create_entity_and_verify() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();

    let mut record = PostRecord {
        email: Some("olivier@mail.com".into()),
        password: Some("bestPassw0rd".into()),
        firstname: Some("Olivier".into()),
        lastname: Some("Monge".into()),
        age: Some(32),
        ..PostRecord::default()
    };

    scenario::create_and_verify(&env.client, &mut record)
        .await
        .expect("Create-and-verify failed");
}

/// Update a non-existing entity: the collection route carries no id and
/// must answer 404.
#[tokio::test]
async fn test_update_nonexistent_entity() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();
    let record = data::random_post();

    let response = env
        .posts()
        .update_collection(&record)
        .await
        .expect("Request failed");

    check::expect_status(&response, 404).expect("Unexpected status");
}

/// Create a post entity, read it back, update it, and verify the update
/// took effect under the same id.
#[tokio::test]
#[serial]
async fn test_create_then_update_entity() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();
    let mut record = data::random_post();

    scenario::create_and_verify(&env.client, &mut record)
        .await
        .expect("Create-and-verify failed");
    let created_id = record.id;

    scenario::update_and_verify(&env.client, &mut record, "Mykhailo", "Shvaliuk")
        .await
        .expect("Update-and-verify failed");

    assert_eq!(record.id, created_id, "update retains the assigned id");
}

/// Delete a non-existing entity: the collection route carries no id and
/// must answer 404.
#[tokio::test]
async fn test_delete_nonexistent_entity() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();
    let record = data::random_post();

    let response = env
        .posts()
        .delete_collection(&record)
        .await
        .expect("Request failed");

    check::expect_status(&response, 404).expect("Unexpected status");
}

/// Full lifecycle: create, verify, update, verify, delete, and verify the
/// entity is gone.
#[tokio::test]
#[serial]
async fn test_full_entity_lifecycle() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();
    let mut record = data::random_post();

    scenario::lifecycle(&env.client, &mut record, "Mykhailo", "Shvaliuk")
        .await
        .expect("Lifecycle scenario failed");
}
