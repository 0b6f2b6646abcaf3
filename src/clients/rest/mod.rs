//! REST API client for NetSuite.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) with helpers for the
//! SuiteTalk REST endpoints NetSuite integrations use most.
//!
//! # Overview
//!
//! - [`RestClient`]: record requests (`get`, `post`, `put`, `patch`, `delete`),
//!   SuiteQL (`fetch_suiteql`, `suiteql_stream`), RESTlets (`get_restlet`),
//!   `test_connection` and `get_openapi_metadata`
//! - [`MetadataOptions`]: options for metadata retrieval
//! - [`RestError`]: Error type for REST API operations
//!
//! # Paths
//!
//! Paths are relative to `https://{account}.suitetalk.api.netsuite.com/services/rest/`,
//! so `record/v1/customer/107` addresses a customer record. Absolute
//! `http(s)://` URLs are sent as given.
//!
//! # Retry Behavior
//!
//! By default, requests are attempted once. [`RestClient::with_tries`]
//! enables automatic retries on 429 and 5xx responses.

mod client;
mod errors;

pub use client::{
    MetadataOptions, RestClient, DEFAULT_DEPLOY_ID, DEFAULT_METADATA_FILE_NAME,
    METADATA_CATALOG_PATH, SUITEQL_PATH,
};
pub use errors::RestError;
