//! @ai:module:intent Recognize TODO/FIXME/BUG annotations inside a comment body
//! @ai:module:layer domain
//! @ai:module:public_api AnnotationKind, Annotation, parse_annotation
//! @ai:module:depends_on slice
//! @ai:module:stateless true
//!
//! Grammar accepted after the comment marker has been stripped:
//!
//! ```text
//! KEYWORD: description
//! KEYWORD(assignee): description
//! ```
//!
//! Anything else is not an annotation and yields `None`.

use crate::slice::{Slice, Whitespace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// @ai:intent The kinds of annotation tdf recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnnotationKind {
    Bug,
    Fixme,
    Todo,
}

impl AnnotationKind {
    /// Match order used by [`parse_annotation`].
    pub const ALL: [AnnotationKind; 3] = [AnnotationKind::Bug, AnnotationKind::Fixme, AnnotationKind::Todo];

    /// @ai:intent Exact keyword spelling, also used as the rendered tag
    /// @ai:effects pure
    pub fn keyword(&self) -> &'static str {
        match self {
            AnnotationKind::Bug => "BUG",
            AnnotationKind::Fixme => "FIXME",
            AnnotationKind::Todo => "TODO",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// @ai:intent A matched annotation, borrowing its text from the scanned line
/// @ai:invariant description is non-empty after whitespace trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub kind: AnnotationKind,
    pub assignee: Option<Slice<'a>>,
    pub description: Slice<'a>,
}

impl fmt::Display for Annotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.assignee {
            Some(assignee) => write!(f, "{}({}): {}", self.kind, assignee, self.description),
            None => write!(f, "{}: {}", self.kind, self.description),
        }
    }
}

/// @ai:intent Parse an annotation from a comment body with the marker already removed
/// @ai:pre body has been whitespace-trimmed on both ends
/// @ai:post Some only for `KEYWORD: text` or `KEYWORD(name): text` with non-blank text
/// @ai:example ("TODO: fix the thing") -> Some(Todo, None, "fix the thing")
/// @ai:example ("TODO(alice): refactor this") -> Some(Todo, "alice", "refactor this")
/// @ai:example ("TODOing about stuff") -> None
/// @ai:example ("TODO(bob incomplete") -> None
/// @ai:edge_cases a bare keyword, an unmatched `(`, a missing `:` after `)` and an empty description all yield None
/// @ai:effects pure
pub fn parse_annotation<'a>(body: Slice<'a>, ws: Whitespace) -> Option<Annotation<'a>> {
    let kind = AnnotationKind::ALL
        .into_iter()
        .find(|kind| body.starts_with(kind.keyword().as_bytes()))?;

    let keyword_len = kind.keyword().len();
    if body.len() <= keyword_len {
        return None;
    }

    let rest = body.trim_front(keyword_len);
    let (assignee, after_colon) = match rest.at(0) {
        b':' => (None, rest.trim_front(1)),
        b'(' => {
            let close = rest.find_byte(b')')?;
            let assignee = rest.sub(1, close);
            let after_paren = rest.trim_front(close + 1);
            if after_paren.first() != Some(b':') {
                return None;
            }
            (Some(assignee), after_paren.trim_front(1))
        }
        _ => return None,
    };

    let description = after_colon.trim_whitespace(ws);
    if description.is_empty() {
        return None;
    }

    Some(Annotation {
        kind,
        assignee,
        description,
    })
}
