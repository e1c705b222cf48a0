/*!
 * Common test utilities for the docfill test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use docfill::document::{Document, Paragraph, RgbColor, Run, RunStyle, Section, Table};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes a document tree as a JSON template
pub fn create_test_template(dir: &Path, filename: &str, document: &Document) -> Result<PathBuf> {
    let content = serde_json::to_string_pretty(document)?;
    create_test_file(dir, filename, &content)
}

/// Style used for placeholder runs in sample templates
pub fn highlighted_style() -> RunStyle {
    RunStyle {
        font_family: Some("Times New Roman".to_string()),
        size_half_points: Some(24),
        bold: true,
        color: Some(RgbColor::new(255, 0, 0)),
        ..RunStyle::default()
    }
}

/// Contract-like template with placeholders in every zone, some split across runs
pub fn sample_contract() -> Document {
    let body_style = RunStyle {
        font_family: Some("Times New Roman".to_string()),
        size_half_points: Some(24),
        ..RunStyle::default()
    };

    Document::new()
        .with_paragraph(Paragraph::new(vec![
            Run::styled("Contract No. ", body_style.clone()),
            Run::styled("{CONTRACT_NO}", highlighted_style()),
        ]))
        .with_paragraph(Paragraph::new(vec![
            Run::styled("Customer: {FULL", body_style.clone()),
            Run::styled("_NA", highlighted_style()),
            Run::styled("ME}, hereinafter the Customer.", body_style.clone()),
        ]))
        .with_paragraph(Paragraph::default())
        .with_table(Table::from_rows(vec![
            vec!["Service", "Price"],
            vec!["{SERVICE}", "{PRICE}"],
        ]))
        .with_section(Section {
            header: vec![Paragraph::from_text("Contract {CONTRACT_NO}")],
            footer: vec![Paragraph::from_text("Signed by {FULL_NAME} on {DATE}")],
        })
}
