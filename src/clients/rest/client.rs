//! REST client implementation for the NetSuite SuiteTalk REST API.
//!
//! This module provides the [`RestClient`] type: generic record requests,
//! SuiteQL queries (single page or as a paginated stream), RESTlet calls,
//! a connectivity probe and OpenAPI metadata retrieval.

use std::path::PathBuf;

use futures::Stream;
use serde::de::DeserializeOwned;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse};
use crate::config::NetsuiteConfig;
use crate::pagination::{Page, Paginator};

/// Path of the SuiteQL endpoint, relative to the REST base URL.
pub const SUITEQL_PATH: &str = "query/v1/suiteql";

/// Path of the record metadata catalog, relative to the REST base URL.
pub const METADATA_CATALOG_PATH: &str = "record/v1/metadata-catalog";

/// Deployment id used for RESTlet calls when none is given.
pub const DEFAULT_DEPLOY_ID: u32 = 1;

/// File name used when saving metadata without an explicit name.
pub const DEFAULT_METADATA_FILE_NAME: &str = "netsuite-openapi-metadata.json";

const SWAGGER_CONTENT_TYPE: &str = "application/swagger+json";

/// Options for [`RestClient::get_openapi_metadata`].
///
/// # Example
///
/// ```rust
/// use netsuite_api::clients::rest::MetadataOptions;
///
/// let options = MetadataOptions::default()
///     .record_types(["customer", "salesorder"])
///     .save_to_file("metadata.json");
///
/// assert_eq!(options.record_types, vec!["customer", "salesorder"]);
/// assert!(options.save_to_file);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataOptions {
    /// Record types to include. Empty means all record types.
    pub record_types: Vec<String>,
    /// Whether to write the metadata to disk.
    pub save_to_file: bool,
    /// Target file, relative to the working directory. Defaults to
    /// [`DEFAULT_METADATA_FILE_NAME`].
    pub file_name: Option<String>,
}

impl MetadataOptions {
    /// Restricts the catalog to the given record types.
    #[must_use]
    pub fn record_types<I, S>(mut self, record_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record_types = record_types.into_iter().map(Into::into).collect();
        self
    }

    /// Enables saving the catalog to `file_name`.
    #[must_use]
    pub fn save_to_file(mut self, file_name: impl Into<String>) -> Self {
        self.save_to_file = true;
        self.file_name = Some(file_name.into());
        self
    }

    fn file_path(&self) -> std::io::Result<PathBuf> {
        let file_name = self
            .file_name
            .as_deref()
            .unwrap_or(DEFAULT_METADATA_FILE_NAME);
        Ok(std::env::current_dir()?.join(file_name))
    }
}

/// REST API client for NetSuite.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use futures::TryStreamExt;
/// use netsuite_api::{NetsuiteConfig, RestClient};
///
/// let config = NetsuiteConfig::from_env()?;
/// let client = RestClient::new(&config);
///
/// // One page of SuiteQL results
/// let page = client
///     .fetch_suiteql::<serde_json::Value>("SELECT id, companyname FROM customer", 0, 10)
///     .await?;
///
/// // Every page, following NetSuite's next links
/// let stream = client.suiteql_stream::<serde_json::Value>("SELECT id FROM customer", 1000);
/// futures::pin_mut!(stream);
/// while let Some(page) = stream.try_next().await? {
///     println!("{} of {}", page.items.len(), page.total_results);
/// }
///
/// // Generic record request
/// let customer = client.get("record/v1/customer/107").await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// RESTlet endpoint URL.
    restlet_url: String,
    /// Attempts per request.
    tries: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the account in `config`.
    #[must_use]
    pub fn new(config: &NetsuiteConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
            restlet_url: config.restlet_url(),
            tries: 1,
        }
    }

    /// Sets the number of attempts for every request made by this client.
    ///
    /// Values above 1 enable retries on 429 and 5xx responses. Zero is
    /// treated as 1.
    #[must_use]
    pub fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries.max(1);
        self
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the RESTlet endpoint URL.
    #[must_use]
    pub fn restlet_url(&self) -> &str {
        &self.restlet_url
    }

    /// Sends a request to the given path.
    ///
    /// `path` is relative to the SuiteTalk REST base URL (e.g.
    /// `record/v1/customer/107`), or an absolute URL. An empty path targets `*`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors, including a
    /// missing body on POST, PUT or PATCH.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, RestError> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        self.send(builder).await
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Get, path, None).await
    }

    /// Sends a POST request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let response = client
    ///     .post("record/v1/customer", serde_json::json!({"companyName": "Wolfe Electronics"}))
    ///     .await?;
    /// println!("created customer {:?}", response.record_id());
    /// ```
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PUT request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Put, path, Some(body)).await
    }

    /// Sends a PATCH request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Patch, path, Some(body)).await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, RestError> {
        self.request(HttpMethod::Delete, path, None).await
    }

    /// Runs a SuiteQL query and returns one page of results.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors and
    /// [`RestError::Deserialize`] if the page or its items do not decode
    /// into `T`.
    pub async fn fetch_suiteql<T: DeserializeOwned>(
        &self,
        query: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Page<T>, RestError> {
        let builder = HttpRequest::builder(HttpMethod::Post, SUITEQL_PATH)
            .body(serde_json::json!({ "q": query }))
            .query_param("offset", offset.to_string())
            .query_param("limit", limit.to_string())
            .header("Prefer", "transient");

        let response = self.send(builder).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Runs a SuiteQL query and streams every page of results.
    ///
    /// Pages are fetched lazily as the stream is polled, following the
    /// `next` link of each page. The stream ends after the last page or
    /// right after the first error.
    pub fn suiteql_stream<'a, T>(
        &'a self,
        query: &'a str,
        limit: u32,
    ) -> impl Stream<Item = Result<Page<T>, RestError>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        Paginator::new(move |offset, limit| self.fetch_suiteql::<T>(query, offset, limit))
            .with_limit(limit)
            .into_stream()
    }

    /// Calls a RESTlet with a GET request.
    ///
    /// The query string carries `script`, `deploy` and then `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use netsuite_api::clients::rest::DEFAULT_DEPLOY_ID;
    ///
    /// let response = client
    ///     .get_restlet(1234, DEFAULT_DEPLOY_ID, [("customerId", "107")])
    ///     .await?;
    /// ```
    pub async fn get_restlet<I, K, V>(
        &self,
        script_id: u32,
        deploy_id: u32,
        params: I,
    ) -> Result<HttpResponse, RestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let builder = HttpRequest::builder(HttpMethod::Get, self.restlet_url.as_str())
            .query_param("script", script_id.to_string())
            .query_param("deploy", deploy_id.to_string())
            .query(params);

        self.send(builder).await
    }

    /// Checks that NetSuite accepts the configured credentials.
    ///
    /// Sends `OPTIONS *` and returns `true` on a 2xx response. Failures are
    /// logged and reported as `false`.
    pub async fn test_connection(&self) -> bool {
        match self.request(HttpMethod::Options, "*", None).await {
            Ok(_) => {
                tracing::debug!("NetSuite connection test succeeded");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "NetSuite connection test failed");
                false
            }
        }
    }

    /// Retrieves the OpenAPI 3.0 metadata catalog.
    ///
    /// When `options.save_to_file` is set, the catalog is also written,
    /// pretty-printed, to `options.file_name` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] for HTTP-level errors and
    /// [`RestError::Io`] if the file cannot be written.
    pub async fn get_openapi_metadata(
        &self,
        options: &MetadataOptions,
    ) -> Result<serde_json::Value, RestError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, METADATA_CATALOG_PATH)
            .header("Accept", SWAGGER_CONTENT_TYPE);
        if !options.record_types.is_empty() {
            builder = builder.query_param("select", options.record_types.join(","));
        }

        let metadata = self.send(builder).await?.body;

        if options.save_to_file {
            let path = options.file_path()?;
            tokio::fs::write(&path, serde_json::to_string_pretty(&metadata)?).await?;
            tracing::info!("OpenAPI metadata saved to: {}", path.display());
        }

        Ok(metadata)
    }

    /// Builds the request with this client's retry budget and sends it.
    async fn send(&self, builder: HttpRequestBuilder) -> Result<HttpResponse, RestError> {
        let request = builder
            .tries(self.tries)
            .build()
            .map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}
