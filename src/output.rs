//! @ai:module:intent Render findings as plain lines, markdown task lists, quickfix entries or JSON
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_finding, format_report, format_summary
//! @ai:module:depends_on extractor, error
//! @ai:module:stateless true

use crate::error::Result;
use crate::extractor::{Finding, ScanReport};
use colored::Colorize;
use std::fmt::Write;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `TODO: text`
    Plain,
    /// `file:line: TODO: text`
    FileLoc,
    /// `- [ ] TODO: text`
    MarkdownList,
    /// ``- [ ] `file:line`: TODO: text``
    #[default]
    MarkdownListFull,
    /// `file; line; TODO: text`
    Quickfix,
    /// One JSON object per finding, one per line.
    Json,
    /// The whole report as a single indented JSON document.
    JsonPretty,
}

impl OutputFormat {
    /// @ai:intent Pick a line format from the on/off switches of the classic CLI
    /// @ai:post quickfix overrides both other switches
    /// @ai:effects pure
    pub fn from_switches(markdown_list: bool, file_loc: bool, quickfix: bool) -> Self {
        if quickfix {
            return OutputFormat::Quickfix;
        }
        match (markdown_list, file_loc) {
            (true, true) => OutputFormat::MarkdownListFull,
            (true, false) => OutputFormat::MarkdownList,
            (false, true) => OutputFormat::FileLoc,
            (false, false) => OutputFormat::Plain,
        }
    }
}

/// @ai:intent Format one finding as a single line without trailing newline
/// @ai:effects pure
pub fn format_finding(finding: &Finding, format: OutputFormat) -> Result<String> {
    let file = finding.file.display();
    let line = finding.line;

    Ok(match format {
        OutputFormat::Plain => finding.to_string(),
        OutputFormat::FileLoc => format!("{}:{}: {}", file, line, finding),
        OutputFormat::MarkdownList => format!("- [ ] {}", finding),
        OutputFormat::MarkdownListFull => format!("- [ ] `{}:{}`: {}", file, line, finding),
        OutputFormat::Quickfix => format!("{}; {}; {}", file, line, finding),
        OutputFormat::Json => serde_json::to_string(finding)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(finding)?,
    })
}

/// @ai:intent Format a whole scan report
/// @ai:post line formats end every finding with a newline; no findings gives an empty string
/// @ai:effects pure
pub fn format_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::JsonPretty {
        let mut output = serde_json::to_string_pretty(report)?;
        output.push('\n');
        return Ok(output);
    }

    let mut output = String::new();
    for finding in &report.findings {
        output.push_str(&format_finding(finding, format)?);
        output.push('\n');
    }
    Ok(output)
}

/// @ai:intent One-line human summary of a scan, colored for terminals
/// @ai:effects pure
pub fn format_summary(report: &ScanReport) -> String {
    let mut output = String::new();

    let count = report.annotation_count();
    let count = if count > 0 {
        count.to_string().yellow().bold()
    } else {
        count.to_string().green().bold()
    };

    let _ = write!(
        output,
        "{} annotations in {} files",
        count, report.files_scanned
    );

    if report.files_skipped > 0 {
        let _ = write!(output, ", {} skipped", report.files_skipped.to_string().dimmed());
    }

    if report.files_failed > 0 {
        let _ = write!(
            output,
            ", {} unreadable",
            report.files_failed.to_string().red().bold()
        );
    }

    output
}
