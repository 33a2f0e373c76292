//! Label/value extraction from the Envoy status tables.

use std::collections::HashMap;

use crate::config::RowPolicy;
use crate::envoy::page::Page;
use crate::envoy::tree::HtmlTree;
use crate::error::ParseError;

/// Label → raw value, both trimmed.
pub type StatsTable = HashMap<String, String>;

const SYSTEM_STATS_HEADING: &str = "System Statistics";
const PRODUCTION_LANDMARK: &str = "System has been live since";

/// Extracts the table of `page` from a parsed document.
pub fn extract<T: HtmlTree>(
    tree: &T,
    page: Page,
    system_stats_rows: RowPolicy,
) -> Result<StatsTable, ParseError> {
    match page {
        Page::SystemStats => extract_system_stats(tree, system_stats_rows),
        Page::Production => extract_production_stats(tree),
    }
}

/// Reads the cell holding the "System Statistics" heading on `/home`.
///
/// Every row below that cell is a (label, value) pair. With
/// [`RowPolicy::Strict`] a row with any other number of cells fails the whole
/// extraction; with [`RowPolicy::Lenient`] it is skipped.
pub fn extract_system_stats<T: HtmlTree>(
    tree: &T,
    policy: RowPolicy,
) -> Result<StatsTable, ParseError> {
    let heading = tree
        .find_by_text("h2", SYSTEM_STATS_HEADING)?
        .ok_or_else(|| ParseError::table_not_found(SYSTEM_STATS_HEADING))?;
    let cell = tree
        .enclosing(heading, "td")
        .ok_or_else(|| ParseError::table_not_found(SYSTEM_STATS_HEADING))?;

    walk_rows(tree, cell, policy)
}

/// Reads the table containing the "System has been live since" row on
/// `/production`. Rows with fewer than two cells are skipped.
pub fn extract_production_stats<T: HtmlTree>(tree: &T) -> Result<StatsTable, ParseError> {
    let landmark = tree
        .find_by_text("td", PRODUCTION_LANDMARK)?
        .ok_or_else(|| ParseError::table_not_found(PRODUCTION_LANDMARK))?;
    let table = tree
        .enclosing(landmark, "table")
        .ok_or_else(|| ParseError::table_not_found(PRODUCTION_LANDMARK))?;

    walk_rows(tree, table, RowPolicy::Lenient)
}

fn walk_rows<'a, T: HtmlTree>(
    tree: &'a T,
    container: T::Node<'a>,
    policy: RowPolicy,
) -> Result<StatsTable, ParseError> {
    let mut table = StatsTable::new();

    for (index, row) in tree.rows(container)?.into_iter().enumerate() {
        let cells = tree.children(row);
        let well_formed = match policy {
            RowPolicy::Strict => cells.len() == 2,
            RowPolicy::Lenient => cells.len() >= 2,
        };
        if !well_formed {
            if policy == RowPolicy::Strict {
                return Err(ParseError::malformed_row(index, cells.len()));
            }
            tracing::debug!(index, cells = cells.len(), "Skipping row without label/value pair");
            continue;
        }

        table.insert(tree.text(cells[0]), tree.text(cells[1]));
    }

    Ok(table)
}
