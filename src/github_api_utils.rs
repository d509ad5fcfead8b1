pub mod error;
pub mod github_api_helper;

pub(crate) mod search_repo_api_response {
    use serde::{Deserialize, Deserializer};

    use crate::repository::Repository;

    /// `null` becomes an empty string, a missing key is still an error.
    fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    #[derive(Deserialize, Debug)]
    pub(crate) struct License {
        pub(crate) name: String,
    }

    #[derive(Deserialize, Debug)]
    pub(crate) struct Repo {
        pub(crate) name: String,
        #[serde(deserialize_with = "null_as_empty")]
        pub(crate) description: String,
        #[serde(rename = "html_url")]
        pub(crate) url: String,
        pub(crate) created_at: String,
        pub(crate) updated_at: String,
        pub(crate) homepage: Option<String>,
        pub(crate) size: u64,
        #[serde(rename = "stargazers_count")]
        pub(crate) stars: u64,
        #[serde(rename = "forks_count")]
        pub(crate) forks: u64,
        #[serde(rename = "open_issues")]
        pub(crate) issues: u64,
        pub(crate) watchers: u64,
        #[serde(deserialize_with = "null_as_empty")]
        pub(crate) language: String,
        pub(crate) license: Option<License>,
        pub(crate) topics: Vec<String>,
        pub(crate) has_issues: bool,
        pub(crate) has_projects: bool,
        pub(crate) has_downloads: bool,
        pub(crate) has_wiki: bool,
        pub(crate) has_pages: bool,
        pub(crate) has_discussions: bool,
        #[serde(rename = "fork")]
        pub(crate) is_fork: bool,
        #[serde(rename = "archived")]
        pub(crate) is_archived: bool,
        pub(crate) is_template: bool,
        pub(crate) default_branch: String,
    }

    #[derive(Deserialize, Debug)]
    pub(crate) struct GetRepoResponse {
        #[serde(rename = "items")]
        pub(crate) repositories: Vec<Repo>,
    }

    impl From<Repo> for Repository {
        fn from(repo: Repo) -> Self {
            Repository {
                name: repo.name,
                description: repo.description,
                url: repo.url,
                created_at: repo.created_at,
                updated_at: repo.updated_at,
                homepage: repo.homepage,
                size: repo.size,
                stars: repo.stars,
                forks: repo.forks,
                issues: repo.issues,
                watchers: repo.watchers,
                language: repo.language,
                license: repo.license.map(|license| license.name),
                topics: repo.topics,
                has_issues: repo.has_issues,
                has_projects: repo.has_projects,
                has_downloads: repo.has_downloads,
                has_wiki: repo.has_wiki,
                has_pages: repo.has_pages,
                has_discussions: repo.has_discussions,
                is_fork: repo.is_fork,
                is_archived: repo.is_archived,
                is_template: repo.is_template,
                default_branch: repo.default_branch,
            }
        }
    }

}
