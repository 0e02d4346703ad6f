//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! PO header entry
//!
//! The header is the `msgid ""` entry at the top of a .po file. Its msgstr
//! holds `Name: value` lines such as:
//!
//! ```text
//! Language: tr
//! Content-Type: text/plain; charset=UTF-8
//! Plural-Forms: nplurals=2; plural=(n != 1);
//! ```

use chrono::{DateTime, TimeZone};

/// Plural-Forms line written into generated headers
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

/// Timestamp layout used by gettext tools
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M%z";

/// Parsed or generated header fields, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoHeader {
    fields: Vec<(String, String)>,
}

impl PoHeader {
    /// Build the header written for a freshly generated catalog.
    pub fn generated<Tz>(project: &str, language: &str, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let timestamp = now.format(DATE_FORMAT).to_string();

        let mut header = PoHeader::default();
        header.set("Project-Id-Version", project);
        header.set("POT-Creation-Date", &timestamp);
        header.set("PO-Revision-Date", &timestamp);
        header.set("Language", language);
        header.set("MIME-Version", "1.0");
        header.set("Content-Type", "text/plain; charset=UTF-8");
        header.set("Content-Transfer-Encoding", "8bit");
        header.set("Plural-Forms", DEFAULT_PLURAL_FORMS);
        header.set("X-Generator", project);
        header
    }

    /// Parse the msgstr of a header entry. Lines without a colon are ignored.
    pub fn parse(msgstr: &str) -> Self {
        let fields = msgstr
            .lines()
            .filter_map(|line| {
                let (name, value) = line.split_once(':')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();

        PoHeader { fields }
    }

    /// Render as the msgstr of a header entry (one `Name: value\n` per field).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.fields {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace a field in place, or append it.
    pub fn set(&mut self, name: &str, value: &str) {
        match self
            .fields
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(field) => field.1 = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn language(&self) -> Option<&str> {
        self.get("Language").filter(|l| !l.is_empty())
    }

    /// Charset from the Content-Type field
    pub fn charset(&self) -> Option<&str> {
        self.get("Content-Type")?
            .split(';')
            .find_map(|part| part.trim().strip_prefix("charset="))
            .map(str::trim)
    }

    pub fn plural_forms(&self) -> Option<&str> {
        self.get("Plural-Forms")
    }
}
