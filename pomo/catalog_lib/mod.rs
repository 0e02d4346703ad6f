//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Catalog library
//!
//! The codecs (`escape`, `po_decode`, `po_encode`, `mo_file`) are pure
//! functions over a [`catalog::Catalog`]. File access and external tool
//! invocation live in `store` and `compiler`.

pub mod catalog;
pub mod compiler;
pub mod escape;
pub mod header;
pub mod mo_file;
pub mod po_decode;
pub mod po_encode;
pub mod store;

pub use catalog::{Catalog, CatalogStats, Entry};
pub use compiler::{CompileError, Compiler, TranslationContext};
pub use mo_file::MoError;
