//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po (Portable Object) file decoder
//!
//! The decoder reads a .po file as a stream of directives, one per line:
//!
//! - `#...` and blank lines end the entry in progress (comments are dropped)
//! - `msgctxt "..."`, `msgid "..."`, `msgstr "..."` start a field
//! - a line holding only quoted strings continues the last field
//!
//! Decoding never fails. Lines that cannot be understood are skipped and
//! reported as [`ParseWarning`]s; the rest of the file is still used.

use crate::catalog_lib::catalog::{Catalog, Entry};
use crate::catalog_lib::escape::unescape;
use crate::catalog_lib::header::PoHeader;

/// Why a line was skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarningKind {
    #[error("unsupported keyword '{0}'")]
    UnsupportedKeyword(String),
    #[error("expected quoted string after '{0}'")]
    MissingString(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected text after string")]
    TrailingText,
    #[error("continuation line without a preceding keyword")]
    OrphanContinuation,
    #[error("unrecognized line")]
    Unrecognized,
}

/// A skipped line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub kind: ParseWarningKind,
}

/// Everything recovered from a .po file
#[derive(Debug, Clone, Default)]
pub struct PoDocument {
    /// Header entry (msgid ""), if the file had one
    pub header: Option<PoHeader>,
    pub catalog: Catalog,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgctxt,
    Msgid,
    Msgstr,
}

/// Entry under construction
#[derive(Debug, Default)]
struct Pending {
    msgctxt: Option<String>,
    msgid: Option<String>,
    msgstr: Option<String>,
}

impl Pending {
    fn field_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Msgctxt => &mut self.msgctxt,
            Field::Msgid => &mut self.msgid,
            Field::Msgstr => &mut self.msgstr,
        }
    }
}

struct Decoder {
    current: Pending,
    last_field: Option<Field>,
    doc: PoDocument,
}

impl Decoder {
    fn new() -> Self {
        Decoder {
            current: Pending::default(),
            last_field: None,
            doc: PoDocument::default(),
        }
    }

    /// Finish the pending entry, if it has a msgid.
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.current);
        self.last_field = None;

        let Some(msgid) = pending.msgid else {
            return;
        };
        let msgstr = pending.msgstr.unwrap_or_default();

        if msgid.trim().is_empty() {
            // only the first header counts
            if self.doc.header.is_none() && pending.msgctxt.is_none() {
                self.doc.header = Some(PoHeader::parse(&msgstr));
            }
            return;
        }

        self.doc.catalog.push(Entry {
            original: msgid,
            translation: msgstr,
            context: pending.msgctxt.filter(|c| !c.is_empty()),
        });
    }

    fn warn(&mut self, line: usize, kind: ParseWarningKind) {
        log::warn!("po: line {}: {}", line, kind);
        self.doc.warnings.push(ParseWarning { line, kind });
    }

    fn start_field(&mut self, field: Field, value: String) {
        // a new msgctxt/msgid after a msgstr begins the next entry
        if field != Field::Msgstr && self.current.msgstr.is_some() {
            self.flush();
        }
        *self.current.field_mut(field) = Some(value);
        self.last_field = Some(field);
    }

    fn line(&mut self, lineno: usize, raw: &str) {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            self.flush();
            return;
        }

        if line.starts_with('"') {
            let Some(field) = self.last_field else {
                self.warn(lineno, ParseWarningKind::OrphanContinuation);
                return;
            };
            match parse_quoted_run(line) {
                Ok(value) => self
                    .current
                    .field_mut(field)
                    .get_or_insert_with(String::new)
                    .push_str(&value),
                Err(kind) => self.warn(lineno, kind),
            }
            return;
        }

        let keyword_len = line
            .find(|c: char| c.is_whitespace() || c == '"')
            .unwrap_or(line.len());
        let (keyword, rest) = line.split_at(keyword_len);

        let field = match keyword {
            "msgctxt" => Field::Msgctxt,
            "msgid" => Field::Msgid,
            "msgstr" => Field::Msgstr,
            _ => {
                // drop the directive along with any continuation lines
                self.last_field = None;
                let kind = if keyword.starts_with("msg") || keyword == "domain" {
                    ParseWarningKind::UnsupportedKeyword(keyword.to_string())
                } else {
                    ParseWarningKind::Unrecognized
                };
                self.warn(lineno, kind);
                return;
            }
        };

        match parse_quoted_run(rest) {
            Ok(value) => self.start_field(field, value),
            Err(ParseWarningKind::MissingString(_)) => {
                self.last_field = None;
                self.warn(lineno, ParseWarningKind::MissingString(keyword.to_string()));
            }
            Err(kind) => {
                self.last_field = None;
                self.warn(lineno, kind);
            }
        }
    }

    fn finish(mut self) -> PoDocument {
        self.flush();
        self.doc
    }
}

/// Parse one or more adjacent quoted strings (`"a" "b"`) into their
/// unescaped concatenation.
fn parse_quoted_run(s: &str) -> Result<String, ParseWarningKind> {
    let mut rest = s.trim_start();
    if !rest.starts_with('"') {
        return Err(ParseWarningKind::MissingString(String::new()));
    }

    let mut result = String::new();

    while let Some(body) = rest.strip_prefix('"') {
        let mut escaped = false;
        let mut end = None;
        for (i, c) in body.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }

        let end = end.ok_or(ParseWarningKind::UnterminatedString)?;
        result.push_str(&unescape(&body[..end]));
        rest = body[end + 1..].trim_start();
    }

    if rest.is_empty() {
        Ok(result)
    } else {
        Err(ParseWarningKind::TrailingText)
    }
}

/// Decode .po text into a document with header and warnings.
pub fn decode_document(source: &str) -> PoDocument {
    let mut decoder = Decoder::new();

    for (i, line) in source.lines().enumerate() {
        decoder.line(i + 1, line);
    }

    let doc = decoder.finish();
    log::debug!(
        "po: decoded {} entries, {} warnings",
        doc.catalog.len(),
        doc.warnings.len()
    );
    doc
}

/// Decode .po text into a catalog, skipping anything malformed.
pub fn decode(source: &str) -> Catalog {
    decode_document(source).catalog
}
