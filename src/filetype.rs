//! @ai:module:intent Classify files by name suffix and map each type to its line-comment marker
//! @ai:module:layer domain
//! @ai:module:public_api FileType, FileTypeEntry, FileTypeTable
//! @ai:module:stateless true

use crate::slice::Slice;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Language tag used to pick the comment marker of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Unknown,
    PlainText,
    Python,
    Rust,
    Cpp,
    CppHeader,
    C,
    CHeader,
    Lua,
    Tex,
    Go,
    Java,
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "typescript")]
    TypeScript,
    Shell,
    Toml,
    Haskell,
    Sql,
}

impl FileType {
    /// @ai:intent Get the file type name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            FileType::Unknown => "unknown",
            FileType::PlainText => "plain_text",
            FileType::Python => "python",
            FileType::Rust => "rust",
            FileType::Cpp => "cpp",
            FileType::CppHeader => "cpp_header",
            FileType::C => "c",
            FileType::CHeader => "c_header",
            FileType::Lua => "lua",
            FileType::Tex => "tex",
            FileType::Go => "go",
            FileType::Java => "java",
            FileType::JavaScript => "javascript",
            FileType::TypeScript => "typescript",
            FileType::Shell => "shell",
            FileType::Toml => "toml",
            FileType::Haskell => "haskell",
            FileType::Sql => "sql",
        }
    }
}

/// @ai:intent One row of the classification table: a type, its marker, and its suffixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeEntry {
    pub file_type: FileType,
    /// Line-comment token. Empty means every line is a comment candidate.
    #[serde(default)]
    pub marker: String,
    pub suffixes: Vec<String>,
}

impl FileTypeEntry {
    pub fn new(file_type: FileType, marker: &str, suffixes: &[&str]) -> Self {
        Self {
            file_type,
            marker: marker.to_string(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// @ai:intent Ordered suffix/marker table; later entries win when suffixes overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTypeTable {
    entries: Vec<FileTypeEntry>,
}

impl Default for FileTypeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FileTypeTable {
    pub fn new(entries: Vec<FileTypeEntry>) -> Self {
        Self { entries }
    }

    /// @ai:intent Table of the languages tdf knows out of the box
    /// @ai:effects pure
    pub fn builtin() -> Self {
        Self::new(vec![
            FileTypeEntry::new(FileType::PlainText, "", &[".txt"]),
            FileTypeEntry::new(FileType::Python, "#", &[".py", ".pyi"]),
            FileTypeEntry::new(FileType::Rust, "//", &[".rs"]),
            FileTypeEntry::new(FileType::Cpp, "//", &[".cpp", ".cc", ".cxx"]),
            FileTypeEntry::new(FileType::CppHeader, "//", &[".hpp", ".hh", ".hxx"]),
            FileTypeEntry::new(FileType::C, "//", &[".c"]),
            FileTypeEntry::new(FileType::CHeader, "//", &[".h"]),
            FileTypeEntry::new(FileType::Lua, "--", &[".lua"]),
            FileTypeEntry::new(FileType::Tex, "%", &[".tex"]),
            FileTypeEntry::new(FileType::Go, "//", &[".go"]),
            FileTypeEntry::new(FileType::Java, "//", &[".java"]),
            FileTypeEntry::new(FileType::JavaScript, "//", &[".js", ".jsx", ".mjs"]),
            FileTypeEntry::new(FileType::TypeScript, "//", &[".ts", ".tsx"]),
            FileTypeEntry::new(FileType::Shell, "#", &[".sh", ".bash", ".zsh"]),
            FileTypeEntry::new(FileType::Toml, "#", &[".toml"]),
            FileTypeEntry::new(FileType::Haskell, "--", &[".hs"]),
            FileTypeEntry::new(FileType::Sql, "--", &[".sql"]),
        ])
    }

    pub fn entries(&self) -> &[FileTypeEntry] {
        &self.entries
    }

    /// @ai:intent Detect the file type from a file name
    /// @ai:pre name is a bare file name or a path; only its suffix matters
    /// @ai:post Unknown when no suffix matches
    /// @ai:example ("main.cpp") -> Cpp
    /// @ai:example ("notes.txt") -> PlainText
    /// @ai:example ("Makefile") -> Unknown
    /// @ai:effects pure
    pub fn classify(&self, name: &str) -> FileType {
        let name = Slice::from_str(name);

        self.entries
            .iter()
            .rev()
            .find(|entry| {
                entry
                    .suffixes
                    .iter()
                    .any(|suffix| name.ends_with(suffix.as_bytes()))
            })
            .map(|entry| entry.file_type)
            .unwrap_or(FileType::Unknown)
    }

    /// @ai:intent Detect the file type from the last component of a path
    /// @ai:effects pure
    pub fn classify_path(&self, path: &Path) -> FileType {
        match path.file_name() {
            Some(name) => self.classify(&name.to_string_lossy()),
            None => FileType::Unknown,
        }
    }

    /// @ai:intent Line-comment marker for a file type
    /// @ai:post Unknown resolves to the PlainText marker; a type without a row gets the empty marker
    /// @ai:effects pure
    pub fn comment_marker(&self, file_type: FileType) -> &str {
        let file_type = match file_type {
            FileType::Unknown => FileType::PlainText,
            other => other,
        };

        self.entries
            .iter()
            .rev()
            .find(|entry| entry.file_type == file_type)
            .map(|entry| entry.marker.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_builtin() {
        let table = FileTypeTable::builtin();
        assert_eq!(table.classify("main.cpp"), FileType::Cpp);
        assert_eq!(table.classify("main.hpp"), FileType::CppHeader);
        assert_eq!(table.classify("main.c"), FileType::C);
        assert_eq!(table.classify("main.h"), FileType::CHeader);
        assert_eq!(table.classify("tool.py"), FileType::Python);
        assert_eq!(table.classify("lib.rs"), FileType::Rust);
        assert_eq!(table.classify("init.lua"), FileType::Lua);
        assert_eq!(table.classify("paper.tex"), FileType::Tex);
        assert_eq!(table.classify("notes.txt"), FileType::PlainText);
    }

    #[test]
    fn test_unknown() {
        let table = FileTypeTable::builtin();
        assert_eq!(table.classify("Makefile"), FileType::Unknown);
        assert_eq!(table.classify("image.png"), FileType::Unknown);
        assert_eq!(table.classify(""), FileType::Unknown);
    }

    #[test]
    fn test_suffix_must_match_whole_extension() {
        let table = FileTypeTable::builtin();
        assert_eq!(table.classify("archive.rsx"), FileType::Unknown);
        assert_eq!(table.classify("rs"), FileType::Unknown);
    }

    #[test]
    fn test_later_entry_wins_on_overlap() {
        let table = FileTypeTable::new(vec![
            FileTypeEntry::new(FileType::C, "//", &[".c"]),
            FileTypeEntry::new(FileType::Python, "#", &[".in.c"]),
        ]);
        assert_eq!(table.classify("config.in.c"), FileType::Python);
        assert_eq!(table.classify("main.c"), FileType::C);
    }

    #[test]
    fn test_classify_path_uses_file_name() {
        let table = FileTypeTable::builtin();
        assert_eq!(table.classify_path(Path::new("src/lib.rs")), FileType::Rust);
        assert_eq!(table.classify_path(Path::new("docs.py/README")), FileType::Unknown);
    }

    #[test]
    fn test_comment_markers() {
        let table = FileTypeTable::builtin();
        assert_eq!(table.comment_marker(FileType::Rust), "//");
        assert_eq!(table.comment_marker(FileType::Python), "#");
        assert_eq!(table.comment_marker(FileType::Lua), "--");
        assert_eq!(table.comment_marker(FileType::Tex), "%");
        assert_eq!(table.comment_marker(FileType::PlainText), "");
    }

    #[test]
    fn test_unknown_uses_plain_text_marker() {
        let table = FileTypeTable::builtin();
        assert_eq!(table.comment_marker(FileType::Unknown), "");

        let no_plain = FileTypeTable::new(vec![FileTypeEntry::new(FileType::Rust, "//", &[".rs"])]);
        assert_eq!(no_plain.comment_marker(FileType::Unknown), "");
        assert_eq!(no_plain.comment_marker(FileType::Lua), "");
    }
}
