//! E2E Listing Tests
//!
//! Collection reads against the live service: the full list, a limited
//! page, and an explicit id filter. Read-only; safe to run alongside the
//! mutating scenarios.

use super::common::{E2eEnv, CONTENT_TYPE_JSON};
use restcheckr::check;
use serde_json::json;

/// Get all posts. Verify HTTP response status code and content type.
#[tokio::test]
async fn test_list_posts_status_and_content_type() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();

    let response = env.posts().list().await.expect("Request failed");

    check::expect_status(&response, 200).expect("Unexpected status");
    check::expect_content_type(&response, CONTENT_TYPE_JSON).expect("Unexpected content type");
}

/// Get only the first 10 posts. Verify that only the first posts are
/// returned.
#[tokio::test]
async fn test_list_first_ten_posts() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();

    let response = env
        .posts()
        .list_with_limit(10)
        .await
        .expect("Request failed");

    check::expect_status(&response, 200).expect("Unexpected status");
    check::expect_content_type(&response, CONTENT_TYPE_JSON).expect("Unexpected content type");
    check::expect_len(response.json().expect("JSON body"), 10).expect("Unexpected page size");
}

/// Get posts with id = 55 and id = 60. Verify id values of the returned
/// records, in query order.
#[tokio::test]
async fn test_filter_posts_by_ids() {
    crate::skip_if_no_api!();
    let env = E2eEnv::new();

    let response = env
        .posts()
        .filter_by_ids(&[55, 60])
        .await
        .expect("Request failed");

    check::expect_status(&response, 200).expect("Unexpected status");
    check::expect_content_type(&response, CONTENT_TYPE_JSON).expect("Unexpected content type");

    let body = response.json().expect("JSON body");
    check::expect_len(body, 2).expect("Unexpected result count");
    let items = body.as_array().expect("array body");
    check::expect_field(&items[0], "id", &json!(55)).expect("Unexpected first id");
    check::expect_field(&items[1], "id", &json!(60)).expect("Unexpected second id");
}
