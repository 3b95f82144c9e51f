//! Fill options and configuration.

/// Options controlling a template fill.
#[derive(Debug, Clone)]
pub struct FillOptions {
    /// Remove empty paragraphs from the end of the document after filling
    pub trim_trailing_empty: bool,

    /// Substitute scalar placeholders inside table cells
    pub fill_tables: bool,

    /// Record the fill time in the document metadata when anything changed
    pub stamp_modified: bool,
}

impl FillOptions {
    /// Create new fill options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable trimming of trailing empty paragraphs.
    pub fn with_trim_trailing_empty(mut self, trim: bool) -> Self {
        self.trim_trailing_empty = trim;
        self
    }

    /// Enable or disable substitution inside tables.
    pub fn with_tables(mut self, fill: bool) -> Self {
        self.fill_tables = fill;
        self
    }

    /// Enable or disable the modification timestamp.
    pub fn with_stamp_modified(mut self, stamp: bool) -> Self {
        self.stamp_modified = stamp;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            trim_trailing_empty: true,
            fill_tables: true,
            stamp_modified: true,
        }
    }
}
