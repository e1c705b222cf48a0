/*!
 * # docfill - Placeholder filling for rich-text document templates
 *
 * A Rust library that replaces `{PLACEHOLDER}` tokens in document templates
 * with user-supplied values while keeping the formatting of every run.
 *
 * ## Features
 *
 * - Discover placeholders across body text, tables, and headers/footers
 * - Match placeholders that an editor split across several runs
 * - Rewrite run text in place so fonts, sizes, weights and colors survive
 * - Optional color normalization of filled-in values
 * - Output naming from a placeholder value or a timestamp
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `placeholder`: The placeholder token pattern
 * - `document`: Document tree and flat container traversal:
 *   - `document::model`: Runs, paragraphs, tables, sections
 *   - `document::container`: Ordered producer of text containers
 * - `scanner`: Placeholder discovery
 * - `substitution`: Run-preserving substitution engine
 * - `filler`: Document-wide substitution
 * - `mapping`: Placeholder-to-value mapping and form decoding
 * - `naming`: Output file naming
 * - `app_config`: Configuration management
 * - `file_utils`: Template listing and document load/save
 * - `app_controller`: Scan and generate workflows
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod filler;
pub mod mapping;
pub mod naming;
pub mod placeholder;
pub mod scanner;
pub mod substitution;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{ContainerSource, Document, Paragraph, Run, RunStyle, Zone};
pub use errors::{AppError, ConfigError, DocumentError, StyleError};
pub use filler::{FillReport, TemplateFiller};
pub use mapping::Mapping;
pub use scanner::PlaceholderScanner;
pub use substitution::{ColorPolicy, StyledRun, SubstitutionEngine, SubstitutionReport};
