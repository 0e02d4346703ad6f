//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

pub mod io;
pub mod testing;

pub const PROJECT_NAME: &str = "pomo";

/// Default text domain when neither `-D` nor `TEXTDOMAIN` is given.
pub const DEFAULT_DOMAIN: &str = "messages";

pub use testing::*;

/// Resolve the text domain: explicit argument, then `TEXTDOMAIN`, then the default.
pub fn text_domain(explicit: Option<&str>) -> String {
    if let Some(domain) = explicit {
        return domain.to_string();
    }

    match std::env::var("TEXTDOMAIN") {
        Ok(val) if !val.is_empty() => val,
        _ => String::from(DEFAULT_DOMAIN),
    }
}
