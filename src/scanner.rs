//! @ai:module:intent Walk a buffer line by line and hand comment bodies to the annotation parser
//! @ai:module:layer application
//! @ai:module:public_api LineScanner, ScanPosition, is_comment_line, comment_body
//! @ai:module:depends_on slice, filetype, annotation
//! @ai:module:stateless true

use crate::annotation::{parse_annotation, Annotation};
use crate::filetype::{FileType, FileTypeTable};
use crate::slice::{Slice, Whitespace};

/// @ai:intent Progress through one buffer; reset for every file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanPosition {
    pub byte_offset: usize,
    /// 1-based number of the most recently consumed line, 0 before the first.
    pub line_number: usize,
}

/// @ai:intent Check whether a line starts with the comment marker after leading whitespace
/// @ai:post an empty marker accepts every line
/// @ai:effects pure
pub fn is_comment_line(line: Slice<'_>, marker: &str, ws: Whitespace) -> bool {
    line.trim_whitespace_left(ws).starts_with(marker.as_bytes())
}

/// @ai:intent Strip the marker and surrounding whitespace from a comment line
/// @ai:post None when the line is not a comment
/// @ai:example ("  // TODO: x  ", "//") -> Some("TODO: x")
/// @ai:effects pure
pub fn comment_body<'a>(line: Slice<'a>, marker: &str, ws: Whitespace) -> Option<Slice<'a>> {
    if !is_comment_line(line, marker, ws) {
        return None;
    }
    let trimmed = line.trim_whitespace_left(ws);
    Some(trimmed.trim_front(marker.len()).trim_whitespace(ws))
}

/// @ai:intent Line-oriented annotation scanner for one file type at a time
#[derive(Debug, Clone, Copy)]
pub struct LineScanner<'t> {
    table: &'t FileTypeTable,
    whitespace: Whitespace,
}

impl<'t> LineScanner<'t> {
    pub fn new(table: &'t FileTypeTable, whitespace: Whitespace) -> Self {
        Self { table, whitespace }
    }

    /// @ai:intent Emit every annotation in a buffer together with its 1-based line number
    /// @ai:pre content is the complete file; file_type came from the same table
    /// @ai:post lines are counted once per newline-terminated record plus a final unterminated one
    /// @ai:effects pure
    /// @ai:complexity O(content.len() * marker.len())
    pub fn scan<'a, F>(&self, file_type: FileType, content: &'a [u8], mut emit: F) -> ScanPosition
    where
        F: FnMut(usize, Annotation<'a>),
    {
        // Unknown resolves to the plain-text marker once, for the whole file
        let marker = self.table.comment_marker(file_type);
        let mut position = ScanPosition::default();
        let mut chunk = Slice::new(content);

        while !chunk.is_empty() {
            let (line, terminated) = match chunk.split_line() {
                Some(line) => (line, true),
                None => (chunk, false),
            };
            position.line_number += 1;

            // CRLF line endings
            let content_line = if line.ends_with(b"\r") {
                line.trim_back(1)
            } else {
                line
            };

            if !content_line.is_empty() {
                if let Some(annotation) = self.scan_line(content_line, marker) {
                    emit(position.line_number, annotation);
                }
            }

            if !terminated {
                position.byte_offset += line.len();
                break;
            }
            position.byte_offset += line.len() + 1;
            chunk = chunk.trim_front(line.len() + 1);
        }

        position
    }

    /// @ai:intent Classify then parse a single line
    /// @ai:effects pure
    pub fn scan_line<'a>(&self, line: Slice<'a>, marker: &str) -> Option<Annotation<'a>> {
        let body = comment_body(line, marker, self.whitespace)?;
        parse_annotation(body, self.whitespace)
    }

    /// @ai:intent Collect every annotation of a buffer
    /// @ai:effects pure
    pub fn collect<'a>(&self, file_type: FileType, content: &'a [u8]) -> Vec<(usize, Annotation<'a>)> {
        let mut found = Vec::new();
        self.scan(file_type, content, |line, annotation| found.push((line, annotation)));
        found
    }
}
