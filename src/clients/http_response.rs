//! HTTP response type for the NetSuite API client.

use std::collections::HashMap;

/// An HTTP response from NetSuite.
///
/// Header names are stored lowercase and may have multiple values.
///
/// Record creation and updates answer `204 No Content` with a `Location`
/// header pointing at the record; [`record_id`](Self::record_id) extracts
/// the id from it.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    ///
    /// `{}` for an empty body. A body that is not valid JSON is kept as a
    /// JSON string.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Location` header value, if present.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Returns the id of the record named by the `Location` header.
    ///
    /// ```rust
    /// use netsuite_api::clients::HttpResponse;
    /// use std::collections::HashMap;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert(
    ///     "location".to_string(),
    ///     vec!["https://123456.suitetalk.api.netsuite.com/services/rest/record/v1/customer/647".to_string()],
    /// );
    ///
    /// let response = HttpResponse::new(204, headers, serde_json::json!({}));
    /// assert_eq!(response.record_id(), Some("647"));
    /// ```
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.location()?
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
    }
}
