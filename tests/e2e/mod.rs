//! End-to-End Tests for Restcheckr
//!
//! This module contains the live-service scenario suite:
//!
//! - Collection listing, paging, and id filtering
//! - Unauthenticated and authenticated creation
//! - Chained CRUD scenarios with state threaded between steps
//!
//! ## Test Infrastructure
//!
//! Tests require a running posts API (json-server-auth style). The base
//! URL, fixture user id, and credentials come from `RESTCHECKR_*`
//! environment variables or a YAML config file; defaults target
//! `http://localhost:3000`.
//!
//! Tests that mutate the service run serialized so the listing scenarios
//! observe a stable collection.

pub mod common;
pub mod crud_flow;
pub mod listing;
