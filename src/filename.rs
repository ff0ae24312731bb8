//! Text extraction from reference file names.
//!
//! Batch inputs are named `<order><separator><utterance>.wav`, e.g.
//! `1-how old are you.wav` or `15你好世界.wav`. The ordering prefix is kept
//! verbatim for the output name; the rest is the text to synthesize.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading digits followed by any run of whitespace, hyphens or underscores.
static PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[\s\-_]*").expect("valid regex"));

/// Extension given to every generated file.
pub const OUTPUT_EXTENSION: &str = "wav";

/// Return the ordering prefix of `name`, or `""` when it does not start with a digit.
///
/// `name` is a base name with the extension already stripped.
pub fn extract_prefix(name: &str) -> &str {
    PREFIX_RE.find(name).map_or("", |m| m.as_str())
}

/// Return the text of `name` with its ordering prefix removed and whitespace trimmed.
pub fn extract_text(name: &str) -> &str {
    name[extract_prefix(name).len()..].trim()
}

/// Build the output file name `prefix + text + ".wav"`.
///
/// Returns `None` when there is no text left, in which case the file should
/// be skipped.
pub fn output_file_name(name: &str) -> Option<String> {
    ParsedName::parse(name).output_file_name()
}

/// A base name split into its ordering prefix and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName<'a> {
    pub prefix: &'a str,
    pub text: &'a str,
}

impl<'a> ParsedName<'a> {
    pub fn parse(name: &'a str) -> Self {
        Self {
            prefix: extract_prefix(name),
            text: extract_text(name),
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn output_file_name(&self) -> Option<String> {
        if !self.has_text() {
            return None;
        }
        Some(format!("{}{}.{OUTPUT_EXTENSION}", self.prefix, self.text))
    }
}
