/*!
 * Document-wide template filling.
 *
 * Applies the run-preserving substitution engine to every text container of
 * a document in the fixed container order (body, tables, headers/footers).
 */

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::document::ContainerSource;
use crate::mapping::Mapping;
use crate::substitution::{ColorPolicy, SubstitutionEngine, SubstitutionReport};

/// Aggregated result of filling one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Text containers visited
    pub containers: usize,
    /// Placeholder spans replaced
    pub replaced: usize,
    /// Distinct tokens left in the document because the mapping lacks them
    pub unresolved: BTreeSet<String>,
    /// Cosmetic style edits that were rejected
    pub style_failures: usize,
}

impl FillReport {
    fn absorb(&mut self, report: SubstitutionReport) {
        self.replaced += report.replaced;
        self.unresolved.extend(report.unresolved);
        self.style_failures += report.style_failures;
    }

    /// Whether every placeholder found had a value
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Fills placeholders across whole documents
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFiller {
    color_policy: ColorPolicy,
}

impl TemplateFiller {
    pub fn new(color_policy: ColorPolicy) -> Self {
        Self { color_policy }
    }

    /// Substitute `mapping` into every container of `document`, in place
    pub fn fill<S: ContainerSource>(&self, document: &mut S, mapping: &Mapping) -> FillReport {
        let engine = SubstitutionEngine::new(mapping).with_color_policy(self.color_policy);
        let mut report = FillReport::default();

        for (zone, paragraph) in document.containers_mut() {
            report.containers += 1;
            let paragraph_report = engine.substitute_paragraph(paragraph);
            if paragraph_report.replaced > 0 {
                trace!("Replaced {} placeholder(s) in {} paragraph", paragraph_report.replaced, zone);
            }
            report.absorb(paragraph_report);
        }

        debug!(
            "Filled document: {} container(s), {} replacement(s), {} unresolved token(s)",
            report.containers,
            report.replaced,
            report.unresolved.len()
        );

        report
    }
}
