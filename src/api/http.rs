use std::time::Duration;

use crate::api::{DateRange, Endpoint, Payload, SummarySource};
use crate::consts::DEFAULT_BASE_URL;
use crate::error::{FrameError, Result};
use crate::utils::debug_enabled;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Stop following `next_token` after this many pages
const MAX_PAGES: usize = 100;

/// Blocking HTTP source authenticated with a personal access token
pub struct HttpSource {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

impl HttpSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            agent: build_agent(DEFAULT_TIMEOUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = self.url(path);
        if debug_enabled() {
            eprintln!("[DEBUG] GET {url} {query:?}");
        }
        let mut request = self
            .agent
            .get(url.as_str())
            .header("Authorization", format!("Bearer {}", self.token));
        for (name, value) in query {
            request = request.query(*name, value);
        }
        let response = request.call()?;
        let mut body = response.into_body();
        Ok(serde_json::from_reader(body.as_reader())?)
    }
}

/// Take the `next_token` of a page, if the API sent one
fn next_token(page: &serde_json::Value) -> Option<String> {
    page.get("next_token")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Append the records of `page` to the `field` array of `first`
fn append_page(first: &mut serde_json::Value, page: serde_json::Value, field: &str) -> Result<()> {
    let Some(serde_json::Value::Array(more)) = page.get(field).cloned() else {
        return Err(FrameError::MissingField {
            field: field.to_string(),
        });
    };
    match first.get_mut(field) {
        Some(serde_json::Value::Array(items)) => {
            items.extend(more);
            Ok(())
        }
        _ => Err(FrameError::MissingField {
            field: field.to_string(),
        }),
    }
}

impl SummarySource for HttpSource {
    fn fetch(&self, endpoint: &Endpoint, range: &DateRange) -> Result<serde_json::Value> {
        let query = range.query_pairs(endpoint);
        let mut body = self.get_json(endpoint.path, &query)?;

        let Payload::Field(field) = endpoint.payload else {
            return Ok(body);
        };
        if !endpoint.paginated {
            return Ok(body);
        }

        let mut token = next_token(&body);
        let mut pages = 1;
        while let Some(t) = token {
            if pages >= MAX_PAGES {
                if debug_enabled() {
                    eprintln!("[DEBUG] {} stopped after {MAX_PAGES} pages", endpoint.path);
                }
                break;
            }
            let mut paged = query.clone();
            paged.push(("next_token", t));
            let page = self.get_json(endpoint.path, &paged)?;
            token = next_token(&page);
            append_page(&mut body, page, field)?;
            pages += 1;
        }
        if let Some(map) = body.as_object_mut() {
            map.remove("next_token");
        }
        Ok(body)
    }
}
