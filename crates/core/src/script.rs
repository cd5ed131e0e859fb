//! Executable snippet sources.
//!
//! The host runs snippet text embedded in the plugin document. Authors
//! supply each snippet as an explicit text blob holding a full function
//! listing: the signature line(s) followed by an indented body. At compile
//! time the signature is stripped and the body dedented, so the embedded
//! text starts at column zero the way the host expects.

use thiserror::Error;

/// Errors raised while recovering a snippet body from its listing.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The listing holds a signature with no statements after it.
    #[error("script listings must carry at least one line of code after the signature")]
    MissingBody,
}

/// Literal source text for one executable snippet slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSource {
    text: String,
}

impl ScriptSource {
    /// Wraps a full function listing.
    pub fn new(text: impl Into<String>) -> Self {
        ScriptSource { text: text.into() }
    }

    /// Returns the raw listing text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Recovers the executable body of the listing.
    ///
    /// The signature runs from the first line starting with `def` through
    /// the first line ending with `:`, so multi-line signatures are
    /// stripped whole. The remaining lines are dedented. A listing of one
    /// line or fewer fails with [`ScriptError::MissingBody`].
    pub fn body(&self) -> Result<String, ScriptError> {
        let lines: Vec<&str> = self.text.split_inclusive('\n').collect();
        if lines.len() <= 1 {
            return Err(ScriptError::MissingBody);
        }

        let mut saw_signature = false;
        let mut header_end = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if !saw_signature && trimmed.starts_with("def") {
                saw_signature = true;
            }
            if saw_signature && trimmed.ends_with(':') {
                header_end = i;
                break;
            }
        }

        Ok(dedent(&lines[header_end + 1..].concat()))
    }
}

/// Removes the longest common leading whitespace from all lines.
///
/// Lines consisting solely of whitespace are ignored when computing the
/// margin and come out empty, matching Python's `textwrap.dedent`.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start().len()];
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    let margin = margin.unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (content, has_newline) = match line.strip_suffix('\n') {
            Some(stripped) => (stripped, true),
            None => (line, false),
        };
        if !content.trim().is_empty() {
            out.push_str(content.strip_prefix(margin).unwrap_or(content));
        }
        if has_newline {
            out.push('\n');
        }
    }
    out
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
