//! Blocking HTTP client for the two Notion endpoints this tool uses.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::NotionError;
use super::model::{ApiErrorBody, Block, ListResponse, Page};

/// Largest page size the API accepts for list endpoints.
const PAGE_SIZE: u32 = 100;

/// Read access to a Notion database (allows mocking in tests).
pub trait NotionApi {
    /// Returns every row of the database, in the order the API returns them.
    fn query_database(&self, database_id: &str) -> Result<Vec<Page>, NotionError>;

    /// Returns every top-level child block of a page or block.
    fn list_block_children(&self, block_id: &str) -> Result<Vec<Block>, NotionError>;
}

/// `NotionApi` backed by `reqwest::blocking`.
pub struct HttpNotionClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

impl HttpNotionClient {
    /// Creates a client that authenticates with `token` against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `NotionError::Config` if the token or version cannot be used
    /// as a header value, or if the underlying HTTP client cannot be built.
    pub fn new(token: &str, base_url: &str, notion_version: &str) -> Result<Self, NotionError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| NotionError::Config("token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let version = HeaderValue::from_str(notion_version).map_err(|_| {
            NotionError::Config(format!("invalid Notion-Version '{}'", notion_version))
        })?;
        headers.insert(HeaderName::from_static("notion-version"), version);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("notion-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotionError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, NotionError> {
        debug!(url, "sending request");
        let response = request.send().map_err(|source| NotionError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let body = decode_error_body(&text);
            return Err(NotionError::Api {
                url: url.to_string(),
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            });
        }

        response.json::<T>().map_err(|source| NotionError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl NotionApi for HttpNotionClient {
    fn query_database(&self, database_id: &str) -> Result<Vec<Page>, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);
        collect_all(|cursor| {
            let body = QueryBody {
                page_size: PAGE_SIZE,
                start_cursor: cursor,
            };
            self.send(self.http.post(&url).json(&body), &url)
        })
    }

    fn list_block_children(&self, block_id: &str) -> Result<Vec<Block>, NotionError> {
        let url = format!("{}/blocks/{}/children", self.base_url, block_id);
        collect_all(|cursor| {
            let mut query = vec![("page_size", PAGE_SIZE.to_string())];
            if let Some(cursor) = cursor {
                query.push(("start_cursor", cursor.to_string()));
            }
            self.send(self.http.get(&url).query(&query), &url)
        })
    }
}

/// Decodes a Notion error object, keeping the raw text when it isn't one.
fn decode_error_body(text: &str) -> ApiErrorBody {
    serde_json::from_str(text).unwrap_or_else(|_| ApiErrorBody {
        code: "unknown".to_string(),
        message: text.trim().to_string(),
    })
}

/// Follows `has_more`/`next_cursor` until the listing is exhausted.
///
/// Results are concatenated in the order the pages arrive. A response that
/// claims more results but carries no new cursor ends the listing.
pub(crate) fn collect_all<T, F>(mut fetch: F) -> Result<Vec<T>, NotionError>
where
    F: FnMut(Option<&str>) -> Result<ListResponse<T>, NotionError>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch(cursor.as_deref())?;
        items.extend(page.results);

        if !page.has_more {
            break;
        }
        match page.next_cursor {
            Some(next) if cursor.as_deref() != Some(next.as_str()) => {
                debug!(cursor = %next, "following pagination cursor");
                cursor = Some(next);
            }
            Some(next) => {
                warn!(cursor = %next, "API repeated a pagination cursor, stopping");
                break;
            }
            None => {
                warn!("API reported more results without a cursor, stopping");
                break;
            }
        }
    }

    Ok(items)
}
