//! Paragraph and run-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of styled text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Formatted runs, in reading order
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Paragraph-level formatting
    #[serde(default)]
    pub format: ParagraphFormat,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding a single default-styled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph holding a single run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::styled(text, style));
        p
    }

    /// Set the paragraph format and return self.
    pub fn with_format(mut self, format: ParagraphFormat) -> Self {
        self.format = format;
        self
    }

    /// Append a default-styled run. Empty text is ignored.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_run(TextRun::new(text));
    }

    /// Append a run. Empty runs are ignored so the paragraph never holds
    /// zero-length runs.
    pub fn add_run(&mut self, run: TextRun) {
        if !run.is_empty() {
            self.runs.push(run);
        }
    }

    /// Get the concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check whether the rendered text contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        match self.runs.as_slice() {
            [] => needle.is_empty(),
            [run] => run.text.contains(needle),
            _ => self.plain_text().contains(needle),
        }
    }

    /// Check if the paragraph has no runs or no text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new run that inherits every style attribute.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a run with an explicit style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: Some(true),
                ..Default::default()
            },
        )
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: Some(true),
                ..Default::default()
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Run styling. `None` means the attribute is inherited from the paragraph
/// or document defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Italic text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Underlined text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,

    /// Font name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Text color (hex format, e.g., "#FF0000")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextStyle {
    /// Copy of this style with emphasis (bold) forced on.
    pub fn emphasized(&self) -> Self {
        Self {
            bold: Some(true),
            ..self.clone()
        }
    }
}

/// Paragraph-level formatting, cloned as one opaque descriptor when the
/// template engine creates sibling paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormat {
    /// Named paragraph style (e.g., "List Bullet", "Heading 1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,

    /// Text alignment
    #[serde(default)]
    pub alignment: Alignment,

    /// List numbering, if this paragraph belongs to a numbered or bulleted list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<Numbering>,

    /// Indentation
    #[serde(default)]
    pub indent: Indent,

    /// Tab stops, in position order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tab_stops: Vec<TabStop>,

    /// Spacing around and within the paragraph
    #[serde(default)]
    pub spacing: Spacing,
}

impl ParagraphFormat {
    /// Create a format with a named style.
    pub fn with_style(name: impl Into<String>) -> Self {
        Self {
            style_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the numbering descriptor and return self.
    pub fn numbered(mut self, numbering: Numbering) -> Self {
        self.numbering = Some(numbering);
        self
    }

    /// Add a tab stop and return self.
    pub fn with_tab_stop(mut self, stop: TabStop) -> Self {
        self.tab_stops.push(stop);
        self
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.numbering.is_some()
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// Reference into a numbering definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Numbering {
    /// Numbering definition id
    pub num_id: u32,

    /// Nesting level (0 = top level)
    #[serde(default)]
    pub level: u8,
}

impl Numbering {
    /// Create a top-level bullet reference.
    pub fn bullet() -> Self {
        Self { num_id: 1, level: 0 }
    }
}

/// Paragraph indentation in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Indent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<f32>,
}

/// Paragraph spacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Space before paragraph in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<f32>,

    /// Space after paragraph in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<f32>,

    /// Line spacing multiplier (1.0 = single)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<f32>,
}

/// A tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabStop {
    /// Position from the left margin in points
    pub position: f32,

    #[serde(default)]
    pub alignment: TabAlignment,

    #[serde(default)]
    pub leader: TabLeader,
}

impl TabStop {
    /// Create a right-aligned tab stop without leader.
    pub fn right(position: f32) -> Self {
        Self {
            position,
            alignment: TabAlignment::Right,
            leader: TabLeader::Spaces,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabAlignment {
    #[default]
    Left,
    Center,
    Right,
    Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabLeader {
    #[default]
    Spaces,
    Dots,
    Dashes,
    Underscore,
}
