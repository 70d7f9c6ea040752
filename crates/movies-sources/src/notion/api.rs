use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use crate::error::StoreError;
use crate::notion::document::{Cover, Page, PropertyValue};

pub const NOTION_API_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Transport for the two Notion endpoints the movie database needs
pub trait NotionApi {
    fn create_page(&self, request: &CreatePageRequest) -> Result<Page, StoreError>;

    fn query_database(&self, database_id: &str, query: &QueryRequest) -> Result<QueryResponse, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: BTreeMap<String, PropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<Cover>,
}

impl CreatePageRequest {
    pub fn new(database_id: &str, page: Page) -> Self {
        Self {
            parent: Parent { database_id: database_id.to_string() },
            properties: page.properties,
            cover: page.cover,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parent {
    pub database_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Property filter; only exact title matches are needed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub property: String,
    pub title: TextCondition,
}

impl Filter {
    pub fn title_equals(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            title: TextCondition { equals: value.to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextCondition {
    pub equals: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Notion REST client over blocking reqwest
pub struct HttpNotionApi {
    client: Client,
    token: String,
}

impl HttpNotionApi {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("movies/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            token: token.into(),
        })
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, StoreError> {
        let url = format!("{}/{}", NOTION_API_URL, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .header("Accept", "application/json")
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&error_text) {
                Ok(body) => match body.code {
                    Some(code) => format!("{}: {}", code, body.message),
                    None => body.message,
                },
                Err(_) => error_text,
            };
            warn!("Notion API error: {} - {}. URL: {}", status, message, url);
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json()?)
    }
}

impl NotionApi for HttpNotionApi {
    fn create_page(&self, request: &CreatePageRequest) -> Result<Page, StoreError> {
        self.post("pages", request)
    }

    fn query_database(&self, database_id: &str, query: &QueryRequest) -> Result<QueryResponse, StoreError> {
        self.post(&format!("databases/{}/query", urlencoding::encode(database_id)), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_skips_unset_fields() {
        let query = QueryRequest {
            page_size: Some(100),
            ..QueryRequest::default()
        };
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"page_size": 100}));

        let query = QueryRequest {
            filter: Some(Filter::title_equals("IMDb id", "tt0111161")),
            start_cursor: Some("abc".to_string()),
            page_size: Some(100),
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filter": {"property": "IMDb id", "title": {"equals": "tt0111161"}},
                "start_cursor": "abc",
                "page_size": 100
            })
        );
    }

    #[test]
    fn test_create_page_request_shape() {
        let mut properties = BTreeMap::new();
        properties.insert("IMDb id".to_string(), PropertyValue::title("tt0111161"));
        let request = CreatePageRequest::new(
            "db-123",
            Page {
                id: None,
                properties,
                cover: None,
            },
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["parent"], json!({"database_id": "db-123"}));
        assert!(value.get("cover").is_none());
        assert_eq!(value["properties"]["IMDb id"]["type"], json!("title"));
    }

    #[test]
    fn test_query_response_last_page() {
        let response: QueryResponse = serde_json::from_value(json!({
            "object": "list",
            "results": [],
            "next_cursor": null,
            "has_more": false,
            "type": "page_or_database"
        }))
        .unwrap();
        assert!(!response.has_more);
        assert!(response.next_cursor.is_none());
    }
}
