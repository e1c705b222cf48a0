/*!
 * Run-preserving placeholder substitution.
 *
 * A paragraph's visible text is the concatenation of its runs, and editors
 * freely split a placeholder such as `{NAME}` over several runs. The engine
 * matches placeholders on that logical text, maps every match back to the
 * runs that hold it through a prefix-sum index, and rewrites run texts in
 * place by index. Runs are never removed or re-created, so every style object
 * stays attached to its run.
 *
 * Matches are applied from the last to the first: an edit only touches text
 * at or after its own start offset, so the index built from the original text
 * stays valid for every match that has not been processed yet.
 */

use log::trace;

use crate::document::{Paragraph, RgbColor, Run};
use crate::errors::StyleError;
use crate::mapping::Mapping;
use crate::placeholder::{self, PlaceholderMatch};

/// A run as seen by the substitution engine: mutable text plus an opaque style
pub trait StyledRun {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: String);

    /// Best-effort cosmetic override of the run's foreground color
    fn force_color(&mut self, color: RgbColor) -> Result<(), StyleError>;
}

impl StyledRun for Run {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn force_color(&mut self, color: RgbColor) -> Result<(), StyleError> {
        self.style.set_color(color)
    }
}

/// What happens to the color of runs that receive a replacement value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Leave the run's style untouched
    #[default]
    Preserve,
    /// Force the given foreground color onto the run receiving the value
    Force(RgbColor),
}

/// Outcome of substituting one or more paragraphs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Number of placeholder spans replaced
    pub replaced: usize,
    /// Tokens found in the text but absent from the mapping, in text order
    pub unresolved: Vec<String>,
    /// Color overrides the style system rejected
    pub style_failures: usize,
}

/// Prefix-sum index from logical-text byte offsets to runs
struct RunIndex {
    starts: Vec<usize>,
}

impl RunIndex {
    fn build<R: StyledRun>(runs: &[R]) -> (String, Self) {
        let mut logical = String::new();
        let mut starts = Vec::with_capacity(runs.len());
        for run in runs {
            starts.push(logical.len());
            logical.push_str(run.text());
        }
        (logical, Self { starts })
    }

    // @returns: (run index, offset inside that run) of the byte at `pos`
    fn locate(&self, pos: usize) -> (usize, usize) {
        // Empty runs share their start with the next run; the last run
        // starting at or before `pos` is the one that owns the byte.
        let idx = self.starts.partition_point(|&start| start <= pos).saturating_sub(1);
        (idx, pos - self.starts[idx])
    }
}

/// Replaces mapped placeholders in paragraphs while keeping run styles
pub struct SubstitutionEngine<'m> {
    mapping: &'m Mapping,
    color_policy: ColorPolicy,
}

impl<'m> SubstitutionEngine<'m> {
    pub fn new(mapping: &'m Mapping) -> Self {
        Self {
            mapping,
            color_policy: ColorPolicy::default(),
        }
    }

    pub fn with_color_policy(mut self, color_policy: ColorPolicy) -> Self {
        self.color_policy = color_policy;
        self
    }

    pub fn substitute_paragraph(&self, paragraph: &mut Paragraph) -> SubstitutionReport {
        self.substitute_runs(&mut paragraph.runs)
    }

    /// Rewrite `runs` in place so every mapped placeholder shows its value
    pub fn substitute_runs<R: StyledRun>(&self, runs: &mut [R]) -> SubstitutionReport {
        let mut report = SubstitutionReport::default();
        if runs.is_empty() {
            return report;
        }

        let (logical, index) = RunIndex::build(runs);
        if logical.is_empty() {
            return report;
        }

        let matches = placeholder::find_placeholders(&logical);
        for m in matches.iter().rev() {
            match self.mapping.get(&m.token) {
                Some(value) => {
                    self.apply(runs, &index, m, value, &mut report);
                    report.replaced += 1;
                }
                None => report.unresolved.push(m.token.clone()),
            }
        }
        report.unresolved.reverse();

        report
    }

    fn apply<R: StyledRun>(
        &self,
        runs: &mut [R],
        index: &RunIndex,
        m: &PlaceholderMatch,
        value: &str,
        report: &mut SubstitutionReport,
    ) {
        let (first, start_offset) = index.locate(m.start);
        let (last, last_byte_offset) = index.locate(m.end - 1);
        let end_offset = last_byte_offset + 1;

        if first == last {
            let text = runs[first].text();
            let replaced = format!("{}{}{}", &text[..start_offset], value, &text[end_offset..]);
            runs[first].set_text(replaced);
        } else {
            let head = format!("{}{}", &runs[first].text()[..start_offset], value);
            runs[first].set_text(head);

            let tail = runs[last].text()[end_offset..].to_string();
            runs[last].set_text(tail);

            for run in &mut runs[first + 1..last] {
                run.set_text(String::new());
            }
        }

        if let ColorPolicy::Force(color) = self.color_policy {
            if let Err(e) = runs[first].force_color(color) {
                trace!("Color override for {} ignored: {}", m.token, e);
                report.style_failures += 1;
            }
        }
    }
}
