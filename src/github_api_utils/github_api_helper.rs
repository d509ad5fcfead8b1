use super::error::SearchError;
use super::search_repo_api_response;
use crate::config::{Config, ConfigError};
use crate::repository::Repository;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::{ops::Range, time::Duration};

/// Page size used for every `/search/repositories` request (github max).
pub const SEARCH_REPOS_PAGE_SIZE: usize = 100;

const SEARCH_REPOS_PATH: &str = "/search/repositories";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Validated filter and window of a repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySearch {
    pub language: String,
    pub stars_min: u64,
    pub stars_max: Option<u64>,
    pub forks_min: u64,
    pub forks_max: Option<u64>,
    pub offset: usize,
    pub limit: usize,
}

impl RepositorySearch {
    /// Builds the github search query, e.g. `language:rust stars:>=10 forks:>=0`.
    /// Multi-word languages are quoted so github matches them as one qualifier.
    pub fn build_search_query(&self) -> String {
        let language = if self.language.contains(char::is_whitespace) {
            format!("language:\"{}\"", self.language)
        } else {
            format!("language:{}", self.language)
        };
        let mut query_parts = vec![
            language,
            format!("stars:>={}", self.stars_min),
        ];
        if let Some(stars_max) = self.stars_max {
            query_parts.push(format!("stars:<={stars_max}"));
        }
        query_parts.push(format!("forks:>={}", self.forks_min));
        if let Some(forks_max) = self.forks_max {
            query_parts.push(format!("forks:<={forks_max}"));
        }
        query_parts.join(" ")
    }
}

/// 0-indexed pages intersecting `[offset, offset + limit)`.
pub fn page_range(offset: usize, limit: usize, page_size: usize) -> Range<usize> {
    offset / page_size..(offset + limit).div_ceil(page_size)
}

/// Maps the global window onto a page aligned buffer starting at page `offset / page_size`.
pub fn take_window<T>(items: Vec<T>, offset: usize, limit: usize, page_size: usize) -> Vec<T> {
    items
        .into_iter()
        .skip(offset % page_size)
        .take(limit)
        .collect()
}

/// Creates and sets standard github api request headers:
/// 1. **accept**, the v3 json media type.
/// 2. **X-GitHub-Api-Version**, github api version.
/// 3. **user-agent**, from the configuration.
/// 4. **authorization**, only when a token is configured.
fn get_requests_headers(config: &Config) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(
        "x-github-api-version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)?,
    );
    if let Some(token) = &config.github_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Fails fast when github reports an exhausted quota. A missing
/// `x-ratelimit-remaining` header on a 403 counts as exhausted.
fn check_rate_limit(
    response_headers: &HeaderMap,
    response_status: StatusCode,
) -> Result<(), SearchError> {
    if response_status != StatusCode::FORBIDDEN {
        return Ok(());
    }
    let remaining = response_headers
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or("0");
    if remaining == "0" {
        let reset = response_headers
            .get("x-ratelimit-reset")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        return Err(SearchError::RateLimited { reset });
    }
    Ok(())
}

/// Async client for the github `/search/repositories` endpoint.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    endpoint: String,
    page_delay: Duration,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .default_headers(get_requests_headers(config)?)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                config.github_base_url.trim_end_matches('/'),
                SEARCH_REPOS_PATH
            ),
            page_delay: config.page_delay,
        })
    }

    /// Returns exactly the `[offset, offset + limit)` window of the search results,
    /// requesting only the pages intersecting it. Any failure discards the pages
    /// already fetched.
    pub async fn search_repositories(
        &self,
        search: &RepositorySearch,
    ) -> Result<Vec<Repository>, SearchError> {
        let query = search.build_search_query();
        let pages = page_range(search.offset, search.limit, SEARCH_REPOS_PAGE_SIZE);
        let last_page = pages.end.saturating_sub(1);
        info!(
            "Searching repositories with query '{}', pages {:?}",
            query, pages
        );

        let mut repos = Vec::new();
        for page in pages {
            let fetched = self.fetch_page(&query, page).await?;
            let fetched_len = fetched.len();
            repos.extend(fetched);
            if fetched_len < SEARCH_REPOS_PAGE_SIZE {
                debug!("Page {} returned {} items, no more results", page, fetched_len);
                break;
            }
            if page < last_page && !self.page_delay.is_zero() {
                // sleep before next request
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(take_window(
            repos,
            search.offset,
            search.limit,
            SEARCH_REPOS_PAGE_SIZE,
        ))
    }

    /// Requests a single 0-indexed page, github pages are 1-indexed on the wire.
    pub async fn fetch_page(
        &self,
        query: &str,
        page: usize,
    ) -> Result<Vec<Repository>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.to_owned()),
                ("page", (page + 1).to_string()),
                ("per_page", SEARCH_REPOS_PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        check_rate_limit(response.headers(), status)?;
        if !status.is_success() {
            error!("Request failed: {}", status);
            return Err(SearchError::Upstream {
                status: status.as_u16(),
            });
        }
        debug!("Request successful: {}", status);

        let response_body = response.text().await?;
        let get_repo_response: search_repo_api_response::GetRepoResponse =
            serde_json::from_str(&response_body)
                .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        Ok(get_repo_response
            .repositories
            .into_iter()
            .map(Repository::from)
            .collect())
    }
}
