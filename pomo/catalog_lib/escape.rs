//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Escaping for PO quoted strings

/// Escape a string for use inside a PO quoted string.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 8);

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }

    result
}

/// Undo [`escape`] in a single left-to-right scan.
///
/// Unknown sequences such as `\x` are kept verbatim, as is a trailing lone
/// backslash.
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
