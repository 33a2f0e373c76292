//! HTML generation utilities for testing.
//!
//! The builders mirror the layout of the Envoy status pages: an outer layout
//! table holding the statistics table, so lookups have to pick the nearest
//! enclosing element rather than the first one in the document.

/// Builder for the `/home` page with its "System Statistics" cell.
#[derive(Debug, Default)]
pub struct SystemStatsPageBuilder {
    rows: Vec<String>,
}

impl SystemStatsPageBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Adds a two-cell label/value row.
    pub fn row(self, label: &str, value: &str) -> Self {
        self.raw_row(&format!("<td>{}</td><td>{}</td>", label, value))
    }

    /// Adds a row with arbitrary cell markup.
    pub fn raw_row(mut self, cells: &str) -> Self {
        self.rows.push(format!("<tr>{}</tr>", cells));
        self
    }

    pub fn build(self) -> String {
        format!(
            r#"<html><head><title>Envoy</title></head><body>
<table class="layout">
  <tr><td><h1>Envoy</h1></td></tr>
  <tr><td>
    <h2>System Statistics</h2>
    <table>
      {}
    </table>
  </td></tr>
</table>
</body></html>"#,
            self.rows.join("\n      ")
        )
    }
}

/// Builder for the `/production` page.
///
/// The "System has been live since" row is always present as the first row.
#[derive(Debug)]
pub struct ProductionPageBuilder {
    rows: Vec<String>,
}

impl ProductionPageBuilder {
    pub fn new() -> Self {
        Self {
            rows: vec![
                "<tr><td>System has been live since</td><td>Mon Mar 02, 2020 09:14 AM</td></tr>"
                    .to_string(),
            ],
        }
    }

    /// Adds a two-cell label/value row.
    pub fn row(mut self, label: &str, value: &str) -> Self {
        self.rows
            .push(format!("<tr><td>{}</td><td>{}</td></tr>", label, value));
        self
    }

    /// Adds a single-cell section heading row.
    pub fn heading_row(mut self, title: &str) -> Self {
        self.rows
            .push(format!(r#"<tr><th colspan="2">{}</th></tr>"#, title));
        self
    }

    pub fn build(self) -> String {
        format!(
            r#"<html><body>
<table class="layout"><tr><td>
  <h1>System Energy Production</h1>
  <table>
    {}
  </table>
</td></tr></table>
</body></html>"#,
            self.rows.join("\n    ")
        )
    }
}

/// A `/home` page carrying every label the accessors read.
pub fn sample_home_page() -> String {
    SystemStatsPageBuilder::new()
        .row("Number of Microinverters", "24")
        .row("Number of Microinverters Online", "23")
        .row("Currently generating", "1.25 kW")
        .row("Lifetime generation", "18.3 MWh")
        .row("Current Software Version", "D5.0.49")
        .row("Software Build Date", "Wed Jun 01, 2022 10:00 AM")
        .row("Last connection to website", "2 minute(s) ago")
        .build()
}

/// A `/production` page carrying every label the accessors read.
pub fn sample_production_page() -> String {
    ProductionPageBuilder::new()
        .heading_row("Energy")
        .row("Currently", "1.25 kW")
        .row("Today", "6.42 kWh")
        .row("Past Week", "41.2 kWh")
        .row("Since Installation", "18.3 MWh")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_stats_builder() {
        let html = SystemStatsPageBuilder::new()
            .row("Currently generating", "1.25 kW")
            .build();

        assert!(html.contains("<h2>System Statistics</h2>"));
        assert!(html.contains("<tr><td>Currently generating</td><td>1.25 kW</td></tr>"));
    }

    #[test]
    fn test_production_builder_starts_with_landmark() {
        let html = ProductionPageBuilder::new().row("Today", "6.42 kWh").build();

        let landmark = html.find("System has been live since").unwrap();
        let today = html.find("Today").unwrap();
        assert!(landmark < today);
    }
}
