use serde::Deserialize;

use crate::github_api_utils::{error::SearchError, github_api_helper::RepositorySearch};

fn default_limit() -> usize {
    10
}

/// Query parameters of the `/search` endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchQueryParams {
    pub lang: String,
    #[serde(default)]
    pub stars_min: u64,
    pub stars_max: Option<u64>,
    #[serde(default)]
    pub forks_min: u64,
    pub forks_max: Option<u64>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl SearchQueryParams {
    /// Checks the parameters and turns them into a search, before anything is sent to github.
    pub fn validate(self) -> Result<RepositorySearch, SearchError> {
        let lang = self.lang.trim();
        if lang.is_empty() {
            return Err(SearchError::Validation("lang must not be empty".to_owned()));
        }
        // lang ends up in the dump file name and in a quoted search qualifier
        if lang.contains(['/', '\\', '"']) || lang.chars().any(char::is_control) {
            return Err(SearchError::Validation(format!(
                "lang {lang:?} contains forbidden characters"
            )));
        }
        if self.limit < 1 {
            return Err(SearchError::Validation(
                "limit must be greater than or equal to 1".to_owned(),
            ));
        }
        if matches!(self.stars_max, Some(stars_max) if self.stars_min > stars_max) {
            return Err(SearchError::Validation(
                "Provided stars constraints are contradictory".to_owned(),
            ));
        }
        if matches!(self.forks_max, Some(forks_max) if self.forks_min > forks_max) {
            return Err(SearchError::Validation(
                "Provided forks constraints are contradictory".to_owned(),
            ));
        }
        self.offset.checked_add(self.limit).ok_or_else(|| {
            SearchError::Validation("offset + limit is out of range".to_owned())
        })?;

        Ok(RepositorySearch {
            language: lang.to_owned(),
            stars_min: self.stars_min,
            stars_max: self.stars_max,
            forks_min: self.forks_min,
            forks_max: self.forks_max,
            offset: self.offset,
            limit: self.limit,
        })
    }
}
