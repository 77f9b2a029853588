use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://www.magicbricks.com/property-for-sale/residential-real-estate?bedroom=2,3&proptype=Multistorey-Apartment,Builder-Floor-Apartment,Penthouse,Studio-Apartment,Residential-House,Villa&cityName=Chennai";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "housing-insights/0.1 (neighbourhood price research)";
pub const DEFAULT_CITY: &str = "Chennai";
/// Nominatim usage policy: no more than one request per second
pub const MIN_GEOCODE_DELAY: Duration = Duration::from_secs(1);

/// Runtime settings for every pipeline stage, loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub search_url: String,
    /// Appended to geocoding queries and used as the location fallback
    pub city: String,
    pub fetch: FetchSettings,
    pub geocode: GeocodeSettings,
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub scrolls: usize,
    pub page_load_timeout: Duration,
    pub scroll_timeout: Duration,
    pub poll_interval: Duration,
    pub max_attempts: usize,
}

#[derive(Debug, Clone)]
pub struct GeocodeSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub min_delay: Duration,
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            scrolls: 5,
            page_load_timeout: Duration::from_secs(30),
            scroll_timeout: Duration::from_secs(8),
            poll_interval: Duration::from_millis(500),
            max_attempts: 3,
        }
    }
}

impl Default for GeocodeSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_delay: MIN_GEOCODE_DELAY,
            timeout: Duration::from_secs(10),
            max_retries: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            city: DEFAULT_CITY.to_string(),
            fetch: FetchSettings::default(),
            geocode: GeocodeSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            search_url: env::var("HOUSING_SEARCH_URL").unwrap_or(defaults.search_url),
            city: env::var("HOUSING_CITY").unwrap_or(defaults.city),
            fetch: FetchSettings {
                scrolls: parse_var("FETCH_SCROLLS", defaults.fetch.scrolls)?,
                page_load_timeout: secs_var(
                    "FETCH_PAGE_LOAD_TIMEOUT_SECS",
                    defaults.fetch.page_load_timeout,
                )?,
                scroll_timeout: secs_var("FETCH_SCROLL_TIMEOUT_SECS", defaults.fetch.scroll_timeout)?,
                poll_interval: defaults.fetch.poll_interval,
                max_attempts: parse_var("FETCH_MAX_ATTEMPTS", defaults.fetch.max_attempts)?,
            },
            geocode: GeocodeSettings {
                endpoint: env::var("NOMINATIM_URL").unwrap_or(defaults.geocode.endpoint),
                user_agent: env::var("NOMINATIM_USER_AGENT")
                    .unwrap_or(defaults.geocode.user_agent),
                min_delay: delay_var("GEOCODE_MIN_DELAY_MS", defaults.geocode.min_delay)?,
                timeout: secs_var("GEOCODE_TIMEOUT_SECS", defaults.geocode.timeout)?,
                max_retries: parse_var("GEOCODE_MAX_RETRIES", defaults.geocode.max_retries)?,
            },
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn secs_var(name: &str, default: Duration) -> Result<Duration> {
    parse_var(name, default.as_secs()).map(Duration::from_secs)
}

/// Millisecond delay that may be raised but never set below `MIN_GEOCODE_DELAY`
fn delay_var(name: &str, default: Duration) -> Result<Duration> {
    let delay = Duration::from_millis(parse_var(name, default.as_millis() as u64)?);
    if delay < MIN_GEOCODE_DELAY {
        bail!(
            "{} must be at least {} ms, got {} ms",
            name,
            MIN_GEOCODE_DELAY.as_millis(),
            delay.as_millis()
        );
    }
    Ok(delay)
}
