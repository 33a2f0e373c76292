//! Scraping and caching of the Envoy status pages.

mod cache;
mod client;
mod extract;
mod monitor;
mod page;
mod quantity;
mod tree;

pub use cache::PageCache;
pub use client::{Client, PageSource};
pub use extract::{extract, extract_production_stats, extract_system_stats, StatsTable};
pub use monitor::{labels, Envoy, EnvoySummary};
pub use page::Page;
pub use quantity::{parse_quantity, Quantity};
pub use tree::{html_selector, Document, HtmlTree};
