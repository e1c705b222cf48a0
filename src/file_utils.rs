use anyhow::{Result, Context};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::Document;
use crate::errors::DocumentError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: Extension match, case-insensitive, with or without leading dot
    pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
    }

    /// List template files directly inside a directory, sorted by file name
    pub fn list_templates<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, extension) {
                result.push(path.to_path_buf());
            }
        }

        result.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(result)
    }

    /// Load a document tree from a template file
    pub fn read_document<P: AsRef<Path>>(path: P, extension: &str) -> Result<Document, DocumentError> {
        let path = path.as_ref();
        if !Self::has_extension(path, extension) {
            return Err(DocumentError::UnsupportedFormat(format!(
                "{:?} (expected .{})",
                path,
                extension.trim_start_matches('.')
            )));
        }

        let reader = BufReader::new(File::open(path)?);
        let document: Document = serde_json::from_reader(reader)?;
        if document.source.is_some() {
            return Ok(document);
        }
        Ok(document.with_source(&path.to_string_lossy()))
    }

    /// Serialize a document tree to a file, creating parent directories
    pub fn write_document<P: AsRef<Path>>(path: P, document: &Document) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
        Ok(())
    }
}
