//! @ai:module:intent Turn files and directory trees into owned annotation findings
//! @ai:module:layer application
//! @ai:module:public_api Finding, ScanReport, scan_source, scan_file, scan_path
//! @ai:module:depends_on scanner, filetype, annotation, config, error
//! @ai:module:stateless true

use crate::annotation::{Annotation, AnnotationKind};
use crate::config::{Config, Excludes};
use crate::error::{Error, Result};
use crate::filetype::FileType;
use crate::scanner::LineScanner;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// @ai:intent One annotation materialized out of its source buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub file: PathBuf,
    pub line: usize,
    pub kind: AnnotationKind,
    pub assignee: Option<String>,
    pub description: String,
}

impl Finding {
    /// @ai:intent Copy an annotation's text out of the scanned buffer
    pub fn new(file: &Path, line: usize, annotation: &Annotation<'_>) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            kind: annotation.kind,
            assignee: annotation.assignee.map(|a| a.to_string_lossy().into_owned()),
            description: annotation.description.to_string_lossy().into_owned(),
        }
    }
}

impl fmt::Display for Finding {
    /// Renders as `KIND: text` or `KIND(assignee): text`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.assignee {
            Some(assignee) => write!(f, "{}({}): {}", self.kind, assignee, self.description),
            None => write!(f, "{}: {}", self.kind, self.description),
        }
    }
}

/// @ai:intent Result of scanning a file or directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub findings: Vec<Finding>,
}

impl ScanReport {
    pub fn annotation_count(&self) -> usize {
        self.findings.len()
    }

    /// @ai:intent Merge another scan report into this one
    pub fn merge(&mut self, other: ScanReport) {
        self.files_scanned += other.files_scanned;
        self.files_skipped += other.files_skipped;
        self.files_failed += other.files_failed;
        self.findings.extend(other.findings);
    }
}

/// @ai:intent Extract findings from an in-memory file
/// @ai:pre content is the complete file
/// @ai:post findings are in line order
/// @ai:example ("a.py", "# TODO: x") -> [Finding { line: 1, kind: Todo, description: "x", .. }]
/// @ai:effects pure
pub fn scan_source(path: &Path, content: &[u8], config: &Config) -> Vec<Finding> {
    let file_type = config.file_types.classify_path(path);
    scan_typed(path, file_type, content, config)
}

fn scan_typed(path: &Path, file_type: FileType, content: &[u8], config: &Config) -> Vec<Finding> {
    let scanner = LineScanner::new(&config.file_types, config.whitespace);
    let mut findings = Vec::new();

    let position = scanner.scan(file_type, content, |line, annotation| {
        findings.push(Finding::new(path, line, &annotation));
    });

    debug!(
        "Scanned {} as {} ({} lines, {} annotations)",
        path.display(),
        file_type.name(),
        position.line_number,
        findings.len()
    );

    findings
}

/// @ai:intent Read a file fully and extract its findings
/// @ai:effects fs:read
pub fn scan_file(path: &Path, config: &Config) -> Result<Vec<Finding>> {
    let content = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(scan_source(path, &content, config))
}

/// @ai:intent Scan a single file or every file below a directory
/// @ai:pre path exists
/// @ai:post unreadable files are counted in files_failed instead of aborting the scan
/// @ai:effects fs:read
pub fn scan_path(path: &Path, config: &Config) -> Result<ScanReport> {
    let excludes = config.excludes()?;
    let metadata = std::fs::metadata(path)?;

    let report = if metadata.is_file() {
        let mut report = ScanReport::default();
        scan_entry(path, config, &mut report);
        report
    } else {
        scan_directory(path, config, &excludes)
    };

    info!(
        "Scanned {} files under {}: {} annotations, {} skipped, {} failed",
        report.files_scanned,
        path.display(),
        report.annotation_count(),
        report.files_skipped,
        report.files_failed
    );

    Ok(report)
}

fn scan_directory(path: &Path, config: &Config, excludes: &Excludes) -> ScanReport {
    let mut report = ScanReport::default();

    let walker = WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        // the root itself is never pruned
        .filter_entry(|e| {
            e.depth() == 0
                || !excludes.is_excluded(e.path().strip_prefix(path).unwrap_or(e.path()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                report.files_failed += 1;
                continue;
            }
        };

        if entry.file_type().is_file() {
            scan_entry(entry.path(), config, &mut report);
        } else if !entry.file_type().is_dir() {
            debug!("Skipping {}: not a regular file", entry.path().display());
        }
    }

    report
}

fn scan_entry(path: &Path, config: &Config, report: &mut ScanReport) {
    let file_type = config.file_types.classify_path(path);
    if config.known_only && file_type == FileType::Unknown {
        debug!("Skipping {}: unknown file type", path.display());
        report.files_skipped += 1;
        return;
    }

    match std::fs::read(path) {
        Ok(content) => {
            report
                .findings
                .extend(scan_typed(path, file_type, &content, config));
            report.files_scanned += 1;
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            report.files_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::Whitespace;
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_source() {
        let findings = scan_source(
            Path::new("tool.py"),
            b"import os\n# TODO(alice): refactor this\n",
            &Config::default(),
        );

        assert_eq!(
            findings,
            vec![Finding {
                file: PathBuf::from("tool.py"),
                line: 2,
                kind: AnnotationKind::Todo,
                assignee: Some("alice".to_string()),
                description: "refactor this".to_string(),
            }]
        );
    }

    #[test]
    fn test_scan_source_whitespace_policy() {
        let content = b"\t// TODO: tabbed\n";
        assert!(scan_source(Path::new("a.rs"), content, &Config::default()).is_empty());

        let config = Config {
            whitespace: Whitespace::Blank,
            ..Default::default()
        };
        assert_eq!(scan_source(Path::new("a.rs"), content, &config).len(), 1);
    }

    #[test]
    fn test_finding_display() {
        let findings = scan_source(
            Path::new("notes"),
            b"FIXME: plain\nBUG(x): assigned",
            &Config::default(),
        );
        let rendered: Vec<String> = findings.iter().map(|f| f.to_string()).collect();
        assert_eq!(rendered, vec!["FIXME: plain", "BUG(x): assigned"]);
    }

    #[test]
    fn test_scan_file() {
        let mut file = NamedTempFile::with_suffix(".rs").unwrap();
        write!(
            file,
            r#"fn main() {{
    // FIXME(bob): handle errors
    let x = 1; // TODO: not a comment line
}}
// TODO: last line"#
        )
        .unwrap();

        let findings = scan_file(file.path(), &Config::default()).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].kind, AnnotationKind::Fixme);
        assert_eq!(findings[0].assignee.as_deref(), Some("bob"));
        assert_eq!(findings[1].line, 5);
        assert_eq!(findings[1].description, "last line");
    }

    #[test]
    fn test_scan_file_missing() {
        let err = scan_file(Path::new("/no/such/file.rs"), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_scan_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.py", "# TODO: python\n");
        write(dir.path(), "a/lib.rs", "// BUG: rust\n# TODO: not rust\n");
        write(dir.path(), "README", "TODO: readme\n");
        write(dir.path(), ".git/HEAD", "TODO: never\n");

        let report = scan_path(dir.path(), &Config::default()).unwrap();

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_failed, 0);
        let rendered: Vec<String> = report.findings.iter().map(|f| f.to_string()).collect();
        assert_eq!(rendered, vec!["TODO: readme", "BUG: rust", "TODO: python"]);
    }

    #[test]
    fn test_known_only_skips_unknown_types() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.c", "// TODO: c\n");
        write(dir.path(), "Makefile", "TODO: make\n");

        let config = Config {
            known_only: true,
            ..Default::default()
        };
        let report = scan_path(dir.path(), &config).unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.annotation_count(), 1);
        assert_eq!(report.findings[0].description, "c");
    }

    #[test]
    fn test_custom_exclude() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/main.rs", "// TODO: keep\n");
        write(dir.path(), "vendor/dep.rs", "// TODO: drop\n");

        let config = Config {
            exclude: vec!["(^|/)vendor$".to_string()],
            ..Default::default()
        };
        let report = scan_path(dir.path(), &config).unwrap();

        assert_eq!(report.annotation_count(), 1);
        assert_eq!(report.findings[0].description, "keep");
    }

    #[test]
    fn test_exclude_ignores_ancestors_of_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("vendor-checkout/proj");
        write(&root, "src/main.rs", "// TODO: keep\n");
        write(&root, "vendor/dep.rs", "// TODO: drop\n");

        let config = Config {
            exclude: vec!["vendor".to_string()],
            ..Default::default()
        };
        let report = scan_path(&root, &config).unwrap();

        assert_eq!(report.annotation_count(), 1);
        assert_eq!(report.findings[0].description, "keep");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_followed() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        write(outside.path(), "real.py", "# FIXME: linked\n");
        std::os::unix::fs::symlink(outside.path().join("real.py"), dir.path().join("link.py"))
            .unwrap();

        let report = scan_path(dir.path(), &Config::default()).unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.findings[0].description, "linked");
        assert_eq!(report.findings[0].file, dir.path().join("link.py"));
    }

    #[test]
    fn test_scan_path_single_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "one.lua", "-- TODO: lua\n");

        let report = scan_path(&dir.path().join("one.lua"), &Config::default()).unwrap();
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.findings[0].line, 1);
    }

    #[test]
    fn test_scan_path_missing_root() {
        let err = scan_path(Path::new("/no/such/dir"), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_merge() {
        let mut report = ScanReport {
            files_scanned: 1,
            ..Default::default()
        };
        report.merge(ScanReport {
            files_scanned: 2,
            files_failed: 1,
            findings: scan_source(Path::new("x.txt"), b"TODO: merged", &Config::default()),
            ..Default::default()
        });
        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.annotation_count(), 1);
    }
}
