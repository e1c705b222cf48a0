/*!
 * Placeholder discovery across documents.
 *
 * The scanner walks every text container of every document (body, tables,
 * headers/footers) and collects the distinct placeholder tokens. Tokens are
 * matched on the paragraph's logical text, so a token that an editor split
 * over several runs is still found.
 */

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use crate::document::{ContainerSource, Zone};
use crate::placeholder;

/// Collects placeholder tokens from documents
pub struct PlaceholderScanner;

impl PlaceholderScanner {
    /// Sorted, deduplicated tokens (braces included) found in any document
    pub fn scan<'a, S, I>(documents: I) -> Vec<String>
    where
        S: ContainerSource + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let mut found = BTreeSet::new();
        for document in documents {
            Self::collect_into(document, &mut found);
        }
        found.into_iter().collect()
    }

    /// Tokens of a single document
    pub fn scan_document<S: ContainerSource>(document: &S) -> Vec<String> {
        let mut found = BTreeSet::new();
        Self::collect_into(document, &mut found);
        found.into_iter().collect()
    }

    /// Tokens together with the zones they appear in, keyed in token order
    pub fn scan_with_zones<'a, S, I>(documents: I) -> BTreeMap<String, BTreeSet<Zone>>
    where
        S: ContainerSource + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let mut found: BTreeMap<String, BTreeSet<Zone>> = BTreeMap::new();
        for document in documents {
            for (zone, paragraph) in document.containers() {
                let text = paragraph.scan_text();
                for token in placeholder::tokens_in(&text) {
                    found.entry(token.to_string()).or_default().insert(zone);
                }
            }
        }
        found
    }

    fn collect_into<S: ContainerSource>(document: &S, found: &mut BTreeSet<String>) {
        for (zone, paragraph) in document.containers() {
            let text = paragraph.scan_text();
            if text.is_empty() {
                continue;
            }
            for token in placeholder::tokens_in(&text) {
                if found.insert(token.to_string()) {
                    trace!("Found placeholder {} in {}", token, zone);
                }
            }
        }
    }
}
