use anyhow::{Result, Context, anyhow};
use chrono::Local;
use log::{warn, info, debug};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::document::{Document, Zone};
use crate::file_utils::FileManager;
use crate::filler::{FillReport, TemplateFiller};
use crate::mapping::Mapping;
use crate::naming::OutputNamer;
use crate::scanner::PlaceholderScanner;

// @module: Application controller for template filling

/// One filled template written to disk
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Template the output was produced from
    pub template: PathBuf,
    /// Written output path
    pub output: PathBuf,
    /// Substitution statistics for this document
    pub report: FillReport,
}

/// Result of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Files written
    pub generated: Vec<GeneratedFile>,
    /// Outputs skipped because they already existed
    pub skipped: Vec<PathBuf>,
    /// Suggested base name for bundling the outputs
    pub bundle_stem: String,
}

impl GenerationSummary {
    /// Distinct tokens left unresolved in any generated file
    pub fn unresolved(&self) -> BTreeSet<String> {
        self.generated
            .iter()
            .flat_map(|g| g.report.unresolved.iter().cloned())
            .collect()
    }
}

/// Main application controller for template filling
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Template files available in a directory
    pub fn list_templates<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !FileManager::dir_exists(dir) {
            return Err(anyhow!("Template directory does not exist: {:?}", dir));
        }
        FileManager::list_templates(dir, &self.config.templates.extension)
    }

    /// Decode submitted form fields into a mapping using the configured prefix
    pub fn decode_form<I, K, V>(&self, fields: I) -> Mapping
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Mapping::from_form_fields(fields, &self.config.form.key_prefix)
    }

    /// Resolve selected template names against the templates listed in `dir`.
    ///
    /// Names that are not in the listing are dropped with a warning; an empty
    /// selection after filtering is an error.
    pub fn select_templates<P: AsRef<Path>, S: AsRef<str>>(&self, dir: P, selected: &[S]) -> Result<Vec<PathBuf>> {
        let available = self.list_templates(dir)?;
        let mut chosen = Vec::new();

        for name in selected {
            let name = name.as_ref();
            let found = available
                .iter()
                .find(|path| path.file_name().is_some_and(|f| f.to_string_lossy() == name));
            match found {
                Some(path) if !chosen.contains(path) => chosen.push(path.clone()),
                Some(_) => {}
                None => warn!("Ignoring unknown template: {}", name),
            }
        }

        if chosen.is_empty() {
            return Err(anyhow!("Select at least one template"));
        }
        Ok(chosen)
    }

    fn load_templates(&self, templates: &[PathBuf]) -> Result<Vec<Document>> {
        templates
            .iter()
            .map(|path| {
                FileManager::read_document(path, &self.config.templates.extension)
                    .with_context(|| format!("Failed to load template: {:?}", path))
            })
            .collect()
    }

    /// Sorted distinct placeholders across the given templates
    pub fn scan(&self, templates: &[PathBuf]) -> Result<Vec<String>> {
        let documents = self.load_templates(templates)?;
        let tokens = PlaceholderScanner::scan(&documents);
        debug!("Found {} placeholder(s) in {} template(s)", tokens.len(), documents.len());
        Ok(tokens)
    }

    /// Placeholders with the zones they occur in
    pub fn scan_with_zones(&self, templates: &[PathBuf]) -> Result<BTreeMap<String, BTreeSet<Zone>>> {
        let documents = self.load_templates(templates)?;
        Ok(PlaceholderScanner::scan_with_zones(&documents))
    }

    /// Fill every template with `mapping` and write the results to `output_dir`
    pub fn generate(
        &self,
        templates: &[PathBuf],
        mapping: &Mapping,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<GenerationSummary> {
        if templates.is_empty() {
            return Err(anyhow!("Select at least one template"));
        }

        FileManager::ensure_dir(output_dir)?;

        let filler = TemplateFiller::new(self.config.fill.color_policy());
        let namer = OutputNamer::from_config(&self.config.naming);
        let extension = self.config.templates.extension.as_str();
        let now = Local::now();

        let mut summary = GenerationSummary {
            bundle_stem: namer.bundle_stem(mapping, now)?,
            ..GenerationSummary::default()
        };

        let mut written = HashSet::new();
        for template in templates {
            let output = output_dir.join(namer.output_file_name(template, mapping, extension, now)?);
            if written.contains(&output) {
                warn!("Skipping {:?}, its output {:?} was already written in this run", template, output);
                summary.skipped.push(output);
                continue;
            }
            if output.exists() && !force_overwrite {
                warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output);
                summary.skipped.push(output);
                continue;
            }

            let mut document = FileManager::read_document(template, extension)
                .with_context(|| format!("Failed to load template: {:?}", template))?;
            let report = filler.fill(&mut document, mapping);

            FileManager::write_document(&output, &document)
                .with_context(|| format!("Failed to write output: {:?}", output))?;

            if !report.is_complete() {
                warn!(
                    "{:?} still contains unfilled placeholders: {}",
                    output,
                    report.unresolved.iter().cloned().collect::<Vec<_>>().join(", ")
                );
            }
            info!("Success: {:?}", output);

            written.insert(output.clone());
            summary.generated.push(GeneratedFile {
                template: template.clone(),
                output,
                report,
            });
        }

        Ok(summary)
    }
}
