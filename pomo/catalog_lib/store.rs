//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Translation store
//!
//! A store owns where catalogs live and how they are named. The codecs
//! never see paths; the orchestrator hands them text and bytes read
//! through a [`CatalogStore`].

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage for one text domain's catalogs
pub trait CatalogStore {
    /// PO source for a locale, or `None` if the locale has no catalog yet.
    fn read_po(&self, locale: &str) -> io::Result<Option<String>>;

    /// Domain template (.pot) used to seed new locales.
    fn read_template(&self) -> io::Result<Option<String>>;

    fn write_po(&self, locale: &str, text: &str) -> io::Result<()>;

    fn write_mo(&self, locale: &str, data: &[u8]) -> io::Result<()>;
}

/// Catalogs stored as `<dir>/<domain>-<locale>.po` and `.mo`,
/// with the template at `<dir>/<domain>.pot`.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
    domain: String,
}

/// Reject locale codes that could escape the store directory.
fn check_locale(locale: &str) -> io::Result<()> {
    let valid = !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '@' | '.'))
        && !locale.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("invalid locale code '{}'", locale),
        ))
    }
}

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write through a uniquely named temporary sibling and rename, so readers
/// never see a partially written catalog and concurrent writers of the same
/// file never share a temporary.
fn write_replace(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path)?;
    Ok(())
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>, domain: impl Into<String>) -> Self {
        DirStore {
            dir: dir.into(),
            domain: domain.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn po_path(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.po", self.domain, locale))
    }

    pub fn mo_path(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{}-{}.mo", self.domain, locale))
    }

    pub fn template_path(&self) -> PathBuf {
        self.dir.join(format!("{}.pot", self.domain))
    }
}

impl CatalogStore for DirStore {
    fn read_po(&self, locale: &str) -> io::Result<Option<String>> {
        check_locale(locale)?;
        read_optional(&self.po_path(locale))
    }

    fn read_template(&self) -> io::Result<Option<String>> {
        read_optional(&self.template_path())
    }

    fn write_po(&self, locale: &str, text: &str) -> io::Result<()> {
        check_locale(locale)?;
        fs::create_dir_all(&self.dir)?;
        write_replace(&self.po_path(locale), text.as_bytes())
    }

    fn write_mo(&self, locale: &str, data: &[u8]) -> io::Result<()> {
        check_locale(locale)?;
        fs::create_dir_all(&self.dir)?;
        write_replace(&self.mo_path(locale), data)
    }
}
