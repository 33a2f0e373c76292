//! Typed accessors over the Envoy status pages.

use chrono::{DateTime, Local};
use std::time::Duration;

use crate::config::EnvoyConfig;
use crate::envoy::cache::PageCache;
use crate::envoy::client::{Client, PageSource};
use crate::envoy::extract::StatsTable;
use crate::envoy::page::Page;
use crate::envoy::quantity::{parse_quantity, Quantity};
use crate::error::{EnvoyError, FetchError};

/// Row labels as printed by the device.
pub mod labels {
    pub const CURRENTLY_GENERATING: &str = "Currently generating";
    pub const MICROINVERTERS: &str = "Number of Microinverters";
    pub const MICROINVERTERS_ONLINE: &str = "Number of Microinverters Online";
    pub const LIFETIME_GENERATION: &str = "Lifetime generation";
    pub const SOFTWARE_VERSION: &str = "Current Software Version";
    pub const SOFTWARE_BUILD_DATE: &str = "Software Build Date";
    pub const LAST_CONNECTION: &str = "Last connection to website";
    pub const TODAY: &str = "Today";
    pub const PAST_WEEK: &str = "Past Week";
}

/// Every value the accessors expose, read in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvoySummary {
    pub current_generation: Quantity,
    pub generation_today: Quantity,
    pub generation_past_week: Quantity,
    pub lifetime_generation: Quantity,
    pub microinverters: String,
    pub microinverters_online: String,
    pub software_version: String,
    pub software_build_date: String,
    pub last_connection_to_website: String,
}

/// Client for one Envoy monitoring device.
///
/// Each accessor makes sure the page it reads from is no older than the
/// configured cache timeout, fetching it if needed, and then looks up a single
/// label. Accessors take `&mut self`; requests never overlap.
pub struct Envoy<S = Client> {
    source: S,
    cache: PageCache,
}

impl Envoy<Client> {
    /// Connects to the device described by `config`.
    pub fn new(config: &EnvoyConfig) -> Result<Self, FetchError> {
        Ok(Self::with_source(config, Client::new(config)?))
    }
}

impl<S: PageSource> Envoy<S> {
    /// Reads pages through `source` instead of HTTP.
    pub fn with_source(config: &EnvoyConfig, source: S) -> Self {
        Self {
            source,
            cache: PageCache::new(config.cache_timeout(), config.system_stats_rows),
        }
    }

    /// Whole label/value table of `page`.
    pub async fn stats(&mut self, page: Page) -> Result<&StatsTable, EnvoyError> {
        self.cache.ensure_fresh(&self.source, page).await
    }

    async fn raw(&mut self, page: Page, label: &str) -> Result<String, EnvoyError> {
        let table = self.stats(page).await?;
        lookup(table, page, label)
    }

    async fn quantity(&mut self, page: Page, label: &str) -> Result<Quantity, EnvoyError> {
        let raw = self.raw(page, label).await?;
        parse_quantity(&raw).map_err(|source| EnvoyError::value(label, source))
    }

    /// Power currently being generated, e.g. `1.25 kW`.
    pub async fn current_generation(&mut self) -> Result<Quantity, EnvoyError> {
        self.quantity(Page::SystemStats, labels::CURRENTLY_GENERATING)
            .await
    }

    /// Total number of microinverters, as reported.
    pub async fn number_of_microinverters(&mut self) -> Result<String, EnvoyError> {
        self.raw(Page::SystemStats, labels::MICROINVERTERS).await
    }

    /// Number of microinverters currently online, as reported.
    pub async fn number_of_microinverters_online(&mut self) -> Result<String, EnvoyError> {
        self.raw(Page::SystemStats, labels::MICROINVERTERS_ONLINE)
            .await
    }

    /// Energy generated over the lifetime of the system.
    pub async fn lifetime_generation(&mut self) -> Result<Quantity, EnvoyError> {
        self.quantity(Page::SystemStats, labels::LIFETIME_GENERATION)
            .await
    }

    pub async fn current_software_version(&mut self) -> Result<String, EnvoyError> {
        self.raw(Page::SystemStats, labels::SOFTWARE_VERSION).await
    }

    pub async fn software_build_date(&mut self) -> Result<String, EnvoyError> {
        self.raw(Page::SystemStats, labels::SOFTWARE_BUILD_DATE)
            .await
    }

    /// Time since the device last reached the Enlighten website, as text
    /// (e.g. `2 minute(s) ago`).
    pub async fn last_connection_to_website(&mut self) -> Result<String, EnvoyError> {
        self.raw(Page::SystemStats, labels::LAST_CONNECTION).await
    }

    /// Energy generated today.
    pub async fn power_generation_today(&mut self) -> Result<Quantity, EnvoyError> {
        self.quantity(Page::Production, labels::TODAY).await
    }

    /// Energy generated over the past seven days.
    pub async fn power_generation_past_week(&mut self) -> Result<Quantity, EnvoyError> {
        self.quantity(Page::Production, labels::PAST_WEEK).await
    }

    /// Reads every accessor value, fetching each page at most once.
    pub async fn summary(&mut self) -> Result<EnvoySummary, EnvoyError> {
        let system = self.stats(Page::SystemStats).await?.clone();
        let production = self.stats(Page::Production).await?.clone();

        let quantity = |table: &StatsTable, page: Page, label: &str| -> Result<Quantity, EnvoyError> {
            let raw = lookup(table, page, label)?;
            parse_quantity(&raw).map_err(|source| EnvoyError::value(label, source))
        };

        Ok(EnvoySummary {
            current_generation: quantity(&system, Page::SystemStats, labels::CURRENTLY_GENERATING)?,
            generation_today: quantity(&production, Page::Production, labels::TODAY)?,
            generation_past_week: quantity(&production, Page::Production, labels::PAST_WEEK)?,
            lifetime_generation: quantity(&system, Page::SystemStats, labels::LIFETIME_GENERATION)?,
            microinverters: lookup(&system, Page::SystemStats, labels::MICROINVERTERS)?,
            microinverters_online: lookup(&system, Page::SystemStats, labels::MICROINVERTERS_ONLINE)?,
            software_version: lookup(&system, Page::SystemStats, labels::SOFTWARE_VERSION)?,
            software_build_date: lookup(&system, Page::SystemStats, labels::SOFTWARE_BUILD_DATE)?,
            last_connection_to_website: lookup(&system, Page::SystemStats, labels::LAST_CONNECTION)?,
        })
    }

    /// Wall-clock time of the last successful fetch of `page`.
    pub fn last_fetched_at(&self, page: Page) -> Option<DateTime<Local>> {
        self.cache.last_fetched_at(page)
    }

    /// Age after which a cached page is fetched again.
    pub fn cache_timeout(&self) -> Duration {
        self.cache.timeout()
    }

    /// Forces the next access to `page` to go to the device.
    pub fn invalidate(&mut self, page: Page) {
        self.cache.invalidate(page);
    }

    pub fn invalidate_all(&mut self) {
        self.cache.invalidate_all();
    }
}

fn lookup(table: &StatsTable, page: Page, label: &str) -> Result<String, EnvoyError> {
    table
        .get(label)
        .cloned()
        .ok_or_else(|| EnvoyError::key_not_found(page, label))
}
