//! Editable YAML front matter that keeps the template's layout.
//!
//! A document is split into a header (between the first two `---` lines) and
//! a body (everything after the second `---`, copied verbatim). The header is
//! exposed as an ordered mapping. Keys that are never changed are written back
//! exactly as they were read, comments included; changed keys keep their
//! position, their preceding comment lines and their inline comment.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DELIMITER: &str = "---";
/// Featured-image block, always dropped in compact output.
pub const IMAGE_KEY: &str = "image";
/// Featured flag, dropped in compact output when `false`.
pub const FEATURED_KEY: &str = "featured";

/// Errors emitted while loading, parsing or writing front matter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Unclosed YAML fence (e.g., missing terminating `---`).
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
    /// A value could not be turned into YAML.
    #[error("Frontmatter serialization error: {0}")]
    Serialize(String),
    /// Reading or writing the document failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// `dump` was called on a document that was parsed from a string.
    #[error("Document was not loaded from a file")]
    Unbound,
}

/// Comment side-table entry for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct KeyComments {
    /// Comment and blank lines directly above the key.
    leading: String,
    /// Inline comment on the key line, with its leading whitespace.
    inline: Option<String>,
}

/// A Markdown document with an editable YAML header.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    path: Option<PathBuf>,
    dry_run: bool,
    fields: IndexMap<String, Value>,
    comments: HashMap<String, KeyComments>,
    verbatim: HashMap<String, String>,
    trailing: String,
    body: String,
}

impl FrontMatter {
    /// Reads and parses the document at `path`.
    ///
    /// In dry-run mode a missing file yields an empty document bound to
    /// `path`, so a dry import can run without materializing the template.
    pub fn load(path: impl AsRef<Path>, dry_run: bool) -> Result<Self, FrontmatterError> {
        let path = path.as_ref();
        if dry_run && !path.exists() {
            return Ok(Self {
                path: Some(path.to_path_buf()),
                dry_run,
                ..Self::default()
            });
        }

        let content = fs::read_to_string(path).map_err(|source| FrontmatterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut document = Self::parse(&content)?;
        document.path = Some(path.to_path_buf());
        document.dry_run = dry_run;
        Ok(document)
    }

    /// Parses a document from text.
    ///
    /// Text without a leading `---` fence becomes the body of a document with
    /// an empty header.
    pub fn parse(input: &str) -> Result<Self, FrontmatterError> {
        let Some((header, body)) = split_document(input)? else {
            return Ok(Self {
                body: input.to_string(),
                ..Self::default()
            });
        };

        let mut document = Self {
            body: body.to_string(),
            ..Self::default()
        };
        document.read_header(header)?;
        Ok(document)
    }

    fn read_header(&mut self, header: &str) -> Result<(), FrontmatterError> {
        let mapping = parse_header_mapping(header)?;
        let (blocks, trailing) = split_blocks(header);
        let aligned = blocks.len() == mapping.len();
        if !aligned {
            log::debug!(
                "Front matter layout not recognized ({} blocks for {} keys); using canonical formatting",
                blocks.len(),
                mapping.len()
            );
        }

        let mut blocks = blocks.into_iter();
        for (key, value) in mapping {
            let key = key_string(&key)?;
            if aligned && let Some(block) = blocks.next() {
                let inline = block.text.lines().next().and_then(inline_comment);
                self.comments.insert(
                    key.clone(),
                    KeyComments {
                        leading: block.leading,
                        inline,
                    },
                );
                self.verbatim.insert(key.clone(), block.text);
            }
            self.fields.insert(key, value);
        }

        if aligned {
            self.trailing = trailing;
        }
        Ok(())
    }

    /// Path this document was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether [`dump`](Self::dump) is a no-op.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Markdown body after the header, untouched.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Header value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Header value for `key` when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns true when the header has `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Header keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of header keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the header has no keys.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets `key`, keeping its position and comments when it already exists.
    ///
    /// New keys are appended after the last existing key. Setting a key to
    /// the value it already has leaves its original text untouched.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if self.fields.get(&key) == Some(&value) {
            return;
        }
        self.verbatim.remove(&key);
        self.fields.insert(key, value);
    }

    /// Serializes `value` with serde and sets it under `key`.
    pub fn set_serialized<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), FrontmatterError> {
        let value =
            serde_yaml::to_value(value).map_err(|err| FrontmatterError::Serialize(err.to_string()))?;
        self.set(key, value);
        Ok(())
    }

    /// Removes `key` together with its comments.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.verbatim.remove(key);
        self.comments.remove(key);
        self.fields.shift_remove(key)
    }

    /// Renders the full document: delimiter, header, delimiter, body.
    ///
    /// Compact output drops all comments, keys whose value is null, an empty
    /// string or an empty sequence, the image block, and `featured: false`.
    pub fn render(&self, compact: bool) -> Result<String, FrontmatterError> {
        let header = if compact {
            self.render_compact_header()?
        } else {
            self.render_header()?
        };

        let mut out = String::with_capacity(header.len() + self.body.len() + 8);
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&header);
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(&self.body);
        Ok(out)
    }

    /// Writes [`render`](Self::render) back to the loaded path.
    ///
    /// Does nothing in dry-run mode.
    pub fn dump(&self, compact: bool) -> Result<(), FrontmatterError> {
        if self.dry_run {
            return Ok(());
        }
        let path = self.path.as_ref().ok_or(FrontmatterError::Unbound)?;
        let rendered = self.render(compact)?;
        fs::write(path, rendered).map_err(|source| FrontmatterError::Io {
            path: path.clone(),
            source,
        })
    }

    fn render_header(&self) -> Result<String, FrontmatterError> {
        let mut out = String::new();
        for (key, value) in &self.fields {
            let comments = self.comments.get(key);
            if let Some(comments) = comments {
                out.push_str(&comments.leading);
            }
            match self.verbatim.get(key) {
                Some(text) => out.push_str(text),
                None => {
                    let inline = comments.and_then(|c| c.inline.as_deref());
                    out.push_str(&render_entry(key, value, inline)?);
                }
            }
        }
        out.push_str(&self.trailing);
        Ok(out)
    }

    fn render_compact_header(&self) -> Result<String, FrontmatterError> {
        let mut out = String::new();
        for (key, value) in &self.fields {
            if is_pruned(key, value) {
                continue;
            }
            out.push_str(&render_entry(key, value, None)?);
        }
        Ok(out)
    }
}

/// One top-level key of the header as it appeared in the source.
struct RawBlock {
    leading: String,
    text: String,
}

fn parse_header_mapping(header: &str) -> Result<Mapping, FrontmatterError> {
    let has_content = header.lines().any(|line| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    });
    if !has_content {
        return Ok(Mapping::new());
    }

    let value: Value =
        serde_yaml::from_str(header).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn key_string(key: &Value) -> Result<String, FrontmatterError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(FrontmatterError::Parse(
            "front matter keys must be scalars".to_string(),
        )),
    }
}

/// Splits header text into top-level key blocks.
///
/// Comment and blank lines at column 0 are attached to the next key; the
/// ones after the last key are returned as trailing text.
fn split_blocks(header: &str) -> (Vec<RawBlock>, String) {
    let mut blocks = Vec::new();
    let mut pending = String::new();
    let mut current: Option<RawBlock> = None;

    for line in header.split_inclusive('\n') {
        let content = normalize_line(line.trim_end_matches('\n'));
        if is_key_line(content) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(RawBlock {
                leading: std::mem::take(&mut pending),
                text: line.to_string(),
            });
        } else if content.trim().is_empty() || content.starts_with('#') {
            pending.push_str(line);
        } else if let Some(block) = current.as_mut() {
            block.text.push_str(&pending);
            pending.clear();
            block.text.push_str(line);
        } else {
            pending.push_str(line);
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    (blocks, pending)
}

fn is_key_line(content: &str) -> bool {
    match content.chars().next() {
        Some(first) => {
            !first.is_whitespace()
                && !matches!(first, '#' | '-' | '?' | ':')
                && content.contains(':')
        }
        None => false,
    }
}

/// Extracts the inline comment of a `key: value` line, with the whitespace
/// that precedes it.
fn inline_comment(line: &str) -> Option<String> {
    let line = normalize_line(line);
    let value_start = value_offset(line)?;
    let value = &line[value_start..];

    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut chars = value.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        match quote {
            Some('"') => {
                if ch == '\\' {
                    chars.next();
                } else if ch == '"' {
                    quote = None;
                }
            }
            Some(_) => {
                if ch == '\'' {
                    if matches!(chars.peek(), Some((_, '\''))) {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
            }
            None => {
                let token_start = matches!(prev, None | Some(' ' | '\t' | '[' | '{' | ','));
                if (ch == '"' || ch == '\'') && token_start {
                    quote = Some(ch);
                } else if ch == '#' && matches!(prev, Some(' ' | '\t')) {
                    let start = value_start + value[..index].trim_end().len();
                    return Some(line[start..].to_string());
                }
            }
        }
        prev = Some(ch);
    }
    None
}

/// Byte offset just past the `:` that separates key and value.
fn value_offset(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    bytes
        .iter()
        .enumerate()
        .find(|(i, b)| **b == b':' && matches!(bytes.get(i + 1), None | Some(b' ' | b'\t')))
        .map(|(i, _)| i + 1)
}

fn render_entry(key: &str, value: &Value, inline: Option<&str>) -> Result<String, FrontmatterError> {
    let mut single = Mapping::new();
    single.insert(Value::String(key.to_string()), value.clone());
    let mut text =
        serde_yaml::to_string(&single).map_err(|err| FrontmatterError::Serialize(err.to_string()))?;
    if let Some(comment) = inline
        && let Some(end) = text.find('\n')
    {
        text.insert_str(end, comment);
    }
    Ok(text)
}

fn is_pruned(key: &str, value: &Value) -> bool {
    if key == IMAGE_KEY {
        return true;
    }
    if key == FEATURED_KEY && matches!(value, Value::Bool(false)) {
        return true;
    }
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        _ => false,
    }
}

/// Splits a document into header text and body text.
///
/// Returns `None` when the first non-blank line is not a `---` fence.
fn split_document(input: &str) -> Result<Option<(&str, &str)>, FrontmatterError> {
    let without_bom = strip_bom(input);
    let mut cursor = 0usize;

    while let Some((line, next_cursor)) = next_line(without_bom, cursor) {
        if line.trim().is_empty() {
            cursor = next_cursor;
            continue;
        }

        if !is_yaml_fence(line) {
            return Ok(None);
        }

        let header_start = next_cursor;
        let mut scan_cursor = next_cursor;
        while let Some((header_line, next_line_cursor)) = next_line(without_bom, scan_cursor) {
            if is_yaml_fence(header_line) {
                let header = &without_bom[header_start..scan_cursor];
                let body = &without_bom[next_line_cursor..];
                return Ok(Some((header, body)));
            }
            scan_cursor = next_line_cursor;
        }
        return Err(FrontmatterError::Unterminated);
    }

    Ok(None)
}

fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{feff}').unwrap_or(input)
}

fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    let bytes = &input.as_bytes()[start..];
    if let Some(pos) = bytes.iter().position(|b| *b == b'\n') {
        let line_end = start + pos;
        let line = &input[start..line_end];
        Some((line, line_end + 1))
    } else {
        Some((&input[start..], input.len()))
    }
}

fn is_yaml_fence(line: &str) -> bool {
    normalize_line(line) == DELIMITER
}

fn normalize_line(line: &str) -> &str {
    line.trim_end_matches('\r')
}
