//! JSON:API document wrappers shared by all endpoints

use serde::{Deserialize, Serialize};

use crate::hcp::{Pagination, PaginationMeta};

/// Single-resource JSON:API document (`{"data": {...}}`)
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<serde_json::Value>>,
}

/// Generic API list response wrapper for one page of a collection
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T> ApiListResponse<T> {
    /// Pagination details for this page, if the server sent them
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.as_ref().and_then(|m| m.pagination.as_ref())
    }

    /// True when the server reports pages after this one
    pub fn has_next_page(&self) -> bool {
        self.pagination()
            .map(|p| match p.next_page {
                Some(_) => true,
                None => p.current_page < p.total_pages,
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_data() {
        let response: ApiResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": {"id": "item-1"}
            }))
            .unwrap();
        assert_eq!(response.data["id"], "item-1");
        assert!(response.included.is_none());
    }

    #[test]
    fn test_api_list_response_meta() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}],
                "meta": {
                    "pagination": {
                        "current-page": 1,
                        "page-size": 1,
                        "prev-page": null,
                        "next-page": 2,
                        "total-pages": 3,
                        "total-count": 5
                    }
                }
            }))
            .unwrap();
        let pagination = response.pagination().unwrap();
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.total_count, 5);
        assert_eq!(pagination.next_page, Some(2));
        assert!(response.has_next_page());
    }

    #[test]
    fn test_api_list_response_last_page() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [],
                "meta": {
                    "pagination": {
                        "current-page": 2,
                        "total-pages": 2,
                        "total-count": 3
                    }
                }
            }))
            .unwrap();
        assert!(!response.has_next_page());
    }

    #[test]
    fn test_api_list_response_without_meta() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}]
            }))
            .unwrap();
        assert!(response.pagination().is_none());
        assert!(!response.has_next_page());
        assert_eq!(response.data.len(), 1);
    }

    #[test]
    fn test_api_list_response_with_included() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [],
                "included": [{"id": "team-1", "type": "teams"}]
            }))
            .unwrap();
        assert_eq!(response.included.unwrap().len(), 1);
    }
}
