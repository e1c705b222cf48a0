/*!
 * Core document tree types for template filling.
 *
 * These types mirror the structure of a word-processing document as the
 * container codec exposes it: body paragraphs, tables, and per-section
 * headers/footers, all built from paragraphs of styled runs. They are
 * JSON-serializable so a template can be stored and exchanged as a tree.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StyleError;

/// 24-bit foreground color, serialized as a six-digit hex string ("1F2E3D").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form without a leading '#'
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid RGB color: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

/// Character formatting of a run.
///
/// The substitution engine never inspects these fields; the only edit it may
/// request is a color override through [`RunStyle::set_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Font family name (e.g., "Times New Roman")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Font size in half-points, as word processors store it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_half_points: Option<u32>,

    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    #[serde(default)]
    pub underline: bool,

    /// Explicit foreground color; None inherits from the paragraph style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,

    /// Theme-linked or protected style that rejects edits
    #[serde(default)]
    pub locked: bool,
}

impl RunStyle {
    /// Override the foreground color
    pub fn set_color(&mut self, color: RgbColor) -> Result<(), StyleError> {
        if self.locked {
            return Err(StyleError::Locked);
        }
        self.color = Some(color);
        Ok(())
    }
}

/// Smallest styled unit of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run text (may be empty)
    #[serde(default)]
    pub text: String,

    /// Character formatting
    #[serde(default)]
    pub style: RunStyle,
}

impl Run {
    /// Create an unstyled run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a run with the given style
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Ordered sequence of runs.
///
/// `text` is the aggregate text accessor some producers fill in for
/// paragraphs whose content does not live in plain runs (fields, hyperlinks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs, text: None }
    }

    /// Paragraph made of one unstyled run
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::new(text)])
    }

    /// Concatenation of all run texts
    pub fn logical_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Logical text, falling back to the aggregate text when the runs carry none
    pub fn scan_text(&self) -> String {
        let joined = self.logical_text();
        if joined.is_empty() {
            self.text.clone().unwrap_or_default()
        } else {
            joined
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Build a table from rows of cell texts, one paragraph per cell
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells
                        .into_iter()
                        .map(|text| TableCell {
                            paragraphs: vec![Paragraph::from_text(text)],
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Page section with its own header and footer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub header: Vec<Paragraph>,

    #[serde(default)]
    pub footer: Vec<Paragraph>,
}

/// Complete document tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Main body paragraphs
    #[serde(default)]
    pub body: Vec<Paragraph>,

    /// Tables in document order
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Sections in document order
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Template file this document was loaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.body.push(paragraph);
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}
