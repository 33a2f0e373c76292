//! Per-page cache of extracted statistics tables.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use crate::config::RowPolicy;
use crate::envoy::client::PageSource;
use crate::envoy::extract::{self, StatsTable};
use crate::envoy::page::Page;
use crate::envoy::tree::Document;
use crate::error::EnvoyError;

/// Last successful extraction of one page.
#[derive(Debug)]
struct CacheEntry {
    page: Page,
    table: StatsTable,
    // None until the first successful fetch
    fetched: Option<Instant>,
    fetched_at: Option<DateTime<Local>>,
}

impl CacheEntry {
    fn new(page: Page) -> Self {
        Self {
            page,
            table: StatsTable::new(),
            fetched: None,
            fetched_at: None,
        }
    }

    fn is_fresh(&self, timeout: Duration) -> bool {
        self.fetched
            .is_some_and(|fetched| fetched.elapsed() < timeout)
    }
}

/// Keeps the most recent table of each page and re-fetches it once it is
/// older than the cache timeout.
///
/// Failed fetches are not cached: the previous table and its timestamp stay
/// as they were, so the next access tries the device again.
#[derive(Debug)]
pub struct PageCache {
    timeout: Duration,
    system_stats_rows: RowPolicy,
    system_stats: CacheEntry,
    production: CacheEntry,
}

impl PageCache {
    pub fn new(timeout: Duration, system_stats_rows: RowPolicy) -> Self {
        Self {
            timeout,
            system_stats_rows,
            system_stats: CacheEntry::new(Page::SystemStats),
            production: CacheEntry::new(Page::Production),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn entry(&self, page: Page) -> &CacheEntry {
        match page {
            Page::SystemStats => &self.system_stats,
            Page::Production => &self.production,
        }
    }

    fn entry_mut(&mut self, page: Page) -> &mut CacheEntry {
        match page {
            Page::SystemStats => &mut self.system_stats,
            Page::Production => &mut self.production,
        }
    }

    /// Returns the table of `page`, fetching it first when the cached copy is
    /// older than the timeout.
    ///
    /// A fetch failure is logged and the cached (possibly empty) table is
    /// returned. A page that was fetched but cannot be parsed is an error; the
    /// cache is left untouched in that case too.
    pub async fn ensure_fresh<S>(&mut self, source: &S, page: Page) -> Result<&StatsTable, EnvoyError>
    where
        S: PageSource + ?Sized,
    {
        if self.entry(page).is_fresh(self.timeout) {
            tracing::trace!(page = %page, "Using cached table");
            return Ok(&self.entry(page).table);
        }

        let started = Instant::now();
        let body = match source.fetch(page).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(page = %page, error = %err, "Failed to load page, keeping cached table");
                return Ok(&self.entry(page).table);
            }
        };

        let table = {
            let document = Document::parse(&body);
            extract::extract(&document, page, self.system_stats_rows)
                .map_err(|source| EnvoyError::parse(page, source))?
        };

        tracing::debug!(
            page = %page,
            labels = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Refreshed page"
        );

        let entry = self.entry_mut(page);
        entry.table = table;
        entry.fetched = Some(Instant::now());
        entry.fetched_at = Some(Local::now());
        Ok(&entry.table)
    }

    /// Table of `page` as cached, without touching the device.
    pub fn cached(&self, page: Page) -> &StatsTable {
        &self.entry(page).table
    }

    /// Wall-clock time of the last successful fetch of `page`.
    pub fn last_fetched_at(&self, page: Page) -> Option<DateTime<Local>> {
        self.entry(page).fetched_at
    }

    /// Marks `page` stale so the next access fetches it. The table is kept
    /// as a fallback for fetch failures.
    pub fn invalidate(&mut self, page: Page) {
        let entry = self.entry_mut(page);
        tracing::debug!(page = %entry.page, "Invalidating cached table");
        entry.fetched = None;
    }

    pub fn invalidate_all(&mut self) {
        for page in Page::ALL {
            self.invalidate(page);
        }
    }
}
