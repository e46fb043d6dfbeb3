//! @ai:module:intent tdf library for finding TODO/FIXME/BUG annotations in source trees
//! @ai:module:layer infrastructure
//! @ai:module:public_api slice, filetype, annotation, scanner, extractor, output, config, error
//! @ai:module:stateless true
//!
//! # tdf
//!
//! Scans source files for line comments of the form `TODO: text`,
//! `FIXME(name): text` or `BUG: text` and renders them as a backlog.
//!
//! The scanning core works on borrowed byte slices and never copies line
//! content; text is only materialized once an annotation has matched.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tdf::{extractor, output, Config};
//! use std::path::Path;
//!
//! let config = Config::default();
//! let report = extractor::scan_path(Path::new("src"), &config).unwrap();
//! print!("{}", output::format_report(&report, output::OutputFormat::MarkdownListFull).unwrap());
//! ```
//!
//! The core can also be driven directly over an in-memory buffer:
//!
//! ```rust
//! use tdf::{FileType, FileTypeTable, LineScanner, Whitespace};
//!
//! let table = FileTypeTable::builtin();
//! let scanner = LineScanner::new(&table, Whitespace::Space);
//! let found = scanner.collect(FileType::Python, b"x = 1\n# TODO(alice): refactor this\n");
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].0, 2);
//! assert_eq!(found[0].1.to_string(), "TODO(alice): refactor this");
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filetype;
pub mod output;
pub mod scanner;
pub mod slice;

pub use annotation::{parse_annotation, Annotation, AnnotationKind};
pub use config::{Config, Excludes};
pub use error::{Error, Result};
pub use extractor::{scan_file, scan_path, scan_source, Finding, ScanReport};
pub use filetype::{FileType, FileTypeEntry, FileTypeTable};
pub use output::{format_finding, format_report, format_summary, OutputFormat};
pub use scanner::{comment_body, is_comment_line, LineScanner, ScanPosition};
pub use slice::{Slice, Whitespace};
