use std::fmt;

/// Status pages served by the Envoy web interface.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Page {
    /// `/home`, carrying the "System Statistics" table
    SystemStats,
    /// `/production`, carrying the production history table
    Production,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::SystemStats, Page::Production];

    /// Path relative to the device root.
    pub fn path(&self) -> &'static str {
        match self {
            Page::SystemStats => "home",
            Page::Production => "production",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
