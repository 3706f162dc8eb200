//! HTTP API Request/Response Types
//!
//! JSON-serializable types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::record::{PageResult, QuerySpec};

/// Envelope status for successful responses
pub const STATUS_SUCCESS: &str = "success";

/// Envelope status for failed responses
pub const STATUS_ERROR: &str = "error";

/// Raw paging query string: `?page=2&limit=20&q=shalat`.
///
/// Values are kept as strings so a malformed number falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub q: Option<String>,
}

impl PageParams {
    /// Decode into a valid [`QuerySpec`]
    pub fn to_spec(&self) -> QuerySpec {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok());
        QuerySpec::clamped(parse(&self.page), parse(&self.limit), self.q.clone())
    }
}

/// Standard response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Pagination metadata for list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(spec: &QuerySpec, page: &PageResult) -> Self {
        Self {
            current_page: spec.page,
            total_items: page.total_matching,
            total_pages: page.total_pages(spec.limit),
            per_page: spec.limit,
        }
    }
}

/// Response envelope with pagination information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn success(message: impl Into<String>, data: T, pagination: Pagination) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: Some(message.into()),
            data,
            pagination,
        }
    }
}

/// Available narrators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrators {
    pub available: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    /// Human-readable summary
    pub message: String,
    /// Underlying error detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>, q: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            q: q.map(String::from),
        }
    }

    #[test]
    fn test_params_defaults() {
        let spec = params(None, None, None).to_spec();
        assert_eq!(spec, QuerySpec::default());
    }

    #[test]
    fn test_params_unparseable_fall_back() {
        let spec = params(Some("two"), Some("lots"), Some("")).to_spec();
        assert_eq!(spec, QuerySpec::default());
    }

    #[test]
    fn test_params_clamped() {
        let spec = params(Some("0"), Some("1000"), Some("sabar")).to_spec();
        assert_eq!(spec.page, 1);
        assert_eq!(spec.limit, 100);
        assert_eq!(spec.search(), Some("sabar"));
    }

    #[test]
    fn test_pagination_from_page() {
        let spec = QuerySpec::new(2, 10);
        let page = PageResult {
            items: vec![],
            total_matching: 31,
        };

        let pagination = Pagination::new(&spec, &page);
        assert_eq!(
            pagination,
            Pagination {
                current_page: 2,
                total_items: 31,
                total_pages: 4,
                per_page: 10,
            }
        );
    }

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(ErrorResponse::new("Hadith not found", "no such number")).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Hadith not found");
        assert_eq!(value["error"], "no such number");
    }
}
