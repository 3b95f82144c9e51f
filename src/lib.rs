//! # docfill
//!
//! Fill placeholder tokens in rich-text document templates while keeping
//! their formatting.
//!
//! A template is an ordinary document whose text contains `{{NAME}}`
//! placeholders, list placeholders and `{{#NAME}}` … `{{/NAME}}` repeating
//! blocks. Filling substitutes JSON data into it, inheriting the style of
//! the run that held each placeholder, and honoring `*emphasis*` markup
//! inside the substituted values.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfill::{fill_file, TemplateData};
//!
//! fn main() -> docfill::Result<()> {
//!     let data = TemplateData::load("data.json")?;
//!     let report = fill_file("template.json", &data, "output/cv.json")?;
//!     println!("{} placeholder(s) replaced", report.scalars_replaced);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Run-preserving substitution**: placeholders split across runs are
//!   still found, and untouched runs keep their styling
//! - **Lists and repeating blocks**: one paragraph per list item, one copy of
//!   a block per data record
//! - **Inline emphasis**: `*text*` and `**text**` in values become bold runs
//! - **Pluggable containers**: JSON and plain text stores, dispatched by
//!   extension
//! - **PDF export**: through an external office converter

pub mod data;
pub mod error;
pub mod export;
pub mod model;
pub mod store;
pub mod template;

// Re-export commonly used types
pub use data::{Record, TemplateData, Value};
pub use error::{Error, Result};
pub use export::{ExternalRenderer, RenderRequest};
pub use model::{
    Document, Element, ElementId, Metadata, Paragraph, ParagraphFormat, Table, TableCell,
    TableRow, TextRun, TextStyle,
};
pub use store::{DocumentStore, JsonFormat, JsonStore, StoreRegistry, TextStore};
pub use template::{fill, fill_with_options, FillOptions, FillReport};

use std::path::{Path, PathBuf};

/// Default directory for generated documents.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Load a template document, dispatching on its file extension.
///
/// # Example
///
/// ```no_run
/// use docfill::load_template;
///
/// let doc = load_template("template.txt").unwrap();
/// println!("{} element(s)", doc.len());
/// ```
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::TemplateNotFound(path.to_path_buf()));
    }
    StoreRegistry::with_defaults().load(path)
}

/// Save a document, dispatching on the file extension and creating missing
/// parent directories.
pub fn save_document<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    StoreRegistry::with_defaults().save(doc, path.as_ref())
}

/// Load `template`, fill it with `data` and save the result to `output`.
pub fn fill_file<P: AsRef<Path>, Q: AsRef<Path>>(
    template: P,
    data: &TemplateData,
    output: Q,
) -> Result<FillReport> {
    let filled = Docfill::new().with_data(data.clone()).fill(template)?;
    filled.save(output)?;
    Ok(filled.report)
}

/// Build the default output path for a template:
/// `<dir>/<template stem>[_<role>][_<company>].<template ext>`.
///
/// Role and company are passed through [`sanitize_component`]; a component
/// that sanitizes to nothing is omitted.
///
/// # Example
///
/// ```
/// use docfill::output_path;
/// use std::path::{Path, PathBuf};
///
/// let path = output_path(Path::new("cv.txt"), "output", Some("Data Engineer"), Some("Acme, Inc."));
/// assert_eq!(path, PathBuf::from("output/cv_Data_Engineer_Acme_Inc.txt"));
/// ```
pub fn output_path(
    template: &Path,
    dir: impl AsRef<Path>,
    role: Option<&str>,
    company: Option<&str>,
) -> PathBuf {
    let mut name = template
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    for part in [role, company].into_iter().flatten() {
        let part = sanitize_component(part);
        if !part.is_empty() {
            name.push('_');
            name.push_str(&part);
        }
    }

    if let Some(ext) = template.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }

    dir.as_ref().join(name)
}

/// Make a string safe for use inside a file name: whitespace runs become a
/// single `_`, other non-alphanumeric characters are dropped.
pub fn sanitize_component(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Builder for filling templates.
///
/// # Example
///
/// ```no_run
/// use docfill::{Docfill, TemplateData};
///
/// let filled = Docfill::new()
///     .with_data(TemplateData::load("data.json")?)
///     .keep_trailing_empty()
///     .fill("template.txt")?;
/// filled.save("output/cv.txt")?;
/// # Ok::<(), docfill::Error>(())
/// ```
pub struct Docfill {
    data: TemplateData,
    options: FillOptions,
    registry: StoreRegistry,
}

impl Docfill {
    /// Create a new builder with empty data and default options.
    pub fn new() -> Self {
        Self {
            data: TemplateData::new(),
            options: FillOptions::default(),
            registry: StoreRegistry::with_defaults(),
        }
    }

    /// Set the data to fill with.
    pub fn with_data(mut self, data: TemplateData) -> Self {
        self.data = data;
        self
    }

    /// Set fill options.
    pub fn with_options(mut self, options: FillOptions) -> Self {
        self.options = options;
        self
    }

    /// Keep empty paragraphs at the end of the document.
    pub fn keep_trailing_empty(mut self) -> Self {
        self.options = self.options.with_trim_trailing_empty(false);
        self
    }

    /// Use a custom store registry.
    pub fn with_registry(mut self, registry: StoreRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Load and fill a template file.
    pub fn fill<P: AsRef<Path>>(self, template: P) -> Result<FilledDocument> {
        let path = template.as_ref();
        if !path.exists() {
            return Err(Error::TemplateNotFound(path.to_path_buf()));
        }
        let document = self.registry.load(path)?;
        log::debug!("loaded template {} ({} elements)", path.display(), document.len());
        Ok(self.fill_document(document))
    }

    /// Fill an already loaded document.
    pub fn fill_document(self, mut document: Document) -> FilledDocument {
        let report = fill_with_options(&mut document, &self.data, &self.options);
        FilledDocument {
            document,
            report,
            registry: self.registry,
        }
    }
}

impl Default for Docfill {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of filling a template.
pub struct FilledDocument {
    /// The filled document
    pub document: Document,
    /// What the fill changed
    pub report: FillReport,
    registry: StoreRegistry,
}

impl FilledDocument {
    /// Save the document, dispatching on the output extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.registry.save(&self.document, path.as_ref())
    }

    /// Get plain text of the filled document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
