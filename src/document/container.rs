/*!
 * Flat traversal over every text container of a document.
 *
 * Body paragraphs, table cell paragraphs, and header/footer paragraphs are
 * structurally different, but the scanner and the substitution engine only
 * need "the next paragraph". `ContainerSource` hides the zone-specific
 * walking behind one ordered sequence.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::{Document, Paragraph, Section};

/// Part of the document a container belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Body,
    Table,
    Header,
    Footer,
}

impl Zone {
    // @returns: Lowercase zone identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Table => "table",
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Producer of text containers in a fixed, deterministic order.
///
/// Order: body paragraphs; tables row-major then cell-major; then for each
/// section its header paragraphs followed by its footer paragraphs.
pub trait ContainerSource {
    fn containers(&self) -> Box<dyn Iterator<Item = (Zone, &Paragraph)> + '_>;

    fn containers_mut(&mut self) -> Box<dyn Iterator<Item = (Zone, &mut Paragraph)> + '_>;

    /// Number of containers the source yields
    fn container_count(&self) -> usize {
        self.containers().count()
    }
}

impl ContainerSource for Document {
    fn containers(&self) -> Box<dyn Iterator<Item = (Zone, &Paragraph)> + '_> {
        let body = self.body.iter().map(|p| (Zone::Body, p));
        let tables = self
            .tables
            .iter()
            .flat_map(|t| t.rows.iter())
            .flat_map(|r| r.cells.iter())
            .flat_map(|c| c.paragraphs.iter())
            .map(|p| (Zone::Table, p));
        let sections = self.sections.iter().flat_map(|s| {
            s.header
                .iter()
                .map(|p| (Zone::Header, p))
                .chain(s.footer.iter().map(|p| (Zone::Footer, p)))
        });

        Box::new(body.chain(tables).chain(sections))
    }

    fn containers_mut(&mut self) -> Box<dyn Iterator<Item = (Zone, &mut Paragraph)> + '_> {
        let body = self.body.iter_mut().map(|p| (Zone::Body, p));
        let tables = self
            .tables
            .iter_mut()
            .flat_map(|t| t.rows.iter_mut())
            .flat_map(|r| r.cells.iter_mut())
            .flat_map(|c| c.paragraphs.iter_mut())
            .map(|p| (Zone::Table, p));
        let sections = self.sections.iter_mut().flat_map(|s| {
            let Section { header, footer } = s;
            header
                .iter_mut()
                .map(|p| (Zone::Header, p))
                .chain(footer.iter_mut().map(|p| (Zone::Footer, p)))
        });

        Box::new(body.chain(tables).chain(sections))
    }
}
