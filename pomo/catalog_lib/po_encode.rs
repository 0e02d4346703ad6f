//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po file encoder

use std::fmt::Write;

use chrono::Local;
use plib::PROJECT_NAME;

use crate::catalog_lib::catalog::Catalog;
use crate::catalog_lib::escape::escape;
use crate::catalog_lib::header::PoHeader;

/// Append `keyword "value"`, escaping the value.
fn write_field(out: &mut String, keyword: &str, value: &str) {
    let _ = writeln!(out, "{} \"{}\"", keyword, escape(value));
}

/// Encode a catalog with a freshly generated header for `language`.
pub fn encode(language: &str, catalog: &Catalog) -> String {
    let header = PoHeader::generated(PROJECT_NAME, language, &Local::now());
    encode_with_header(&header, catalog)
}

/// Encode a catalog below the given header.
pub fn encode_with_header(header: &PoHeader, catalog: &Catalog) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Translation catalog generated by {}.", PROJECT_NAME);
    write_field(&mut out, "msgid", "");
    write_field(&mut out, "msgstr", "");
    for line in header.render().lines() {
        let _ = writeln!(out, "\"{}\\n\"", escape(line));
    }
    out.push('\n');

    for entry in catalog.iter().filter(|e| !e.is_header()) {
        if let Some(ref ctx) = entry.context {
            write_field(&mut out, "msgctxt", ctx);
        }
        write_field(&mut out, "msgid", &entry.original);
        write_field(&mut out, "msgstr", &entry.translation);
        out.push('\n');
    }

    out
}
