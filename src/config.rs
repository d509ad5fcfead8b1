use std::{net::IpAddr, path::PathBuf, str::FromStr, time::Duration};

const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
const DEFAULT_USER_AGENT: &str = "GitHub-API-Client/1.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_DELAY_MS: u64 = 10;
const DEFAULT_OUTPUT_DIR: &str = "static";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unable to parse {name:?}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Unable to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Service configuration, read once at start up.
#[derive(Debug, Clone)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    /// Bearer token, requests are unauthenticated without it.
    pub github_token: Option<String>,
    pub github_base_url: String,
    pub user_agent: String,
    /// Network timeout of a single github request.
    pub timeout: Duration,
    /// Pause between two page requests of the same search.
    pub page_delay: Duration,
    /// Directory receiving the csv dumps.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            port: DEFAULT_PORT,
            github_token: None,
            github_base_url: DEFAULT_GITHUB_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source, unset variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            address: parse_or(&lookup, "ADDRESS", defaults.address)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            github_token: lookup("GITHUB_TOKEN").filter(|token| !token.trim().is_empty()),
            github_base_url: lookup("GH_API_BASE_URL").unwrap_or(defaults.github_base_url),
            user_agent: lookup("GH_API_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "GH_API_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            page_delay: Duration::from_millis(parse_or(
                &lookup,
                "GH_API_PAGE_DELAY_MS",
                DEFAULT_PAGE_DELAY_MS,
            )?),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        })
    }

    pub fn socket_address(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from((self.address, self.port))
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default_value: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let Some(value) = lookup(name) else {
        return Ok(default_value);
    };
    value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        name: name.to_owned(),
        message: e.to_string(),
    })
}
