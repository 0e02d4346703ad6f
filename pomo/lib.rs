//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! pomo library
//!
//! Translation catalog handling for the pomo utilities:
//! - decoding and encoding .po text catalogs
//! - compiling catalogs into GNU .mo binaries
//! - loading and persisting catalogs through a translation store

pub mod catalog_lib;
