//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, TestPlan};
use pomo::catalog_lib::mo_file::MoFile;
use pomo::catalog_lib::po_decode::decode_document;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn poset_args(dir: &Path, rest: &[&str]) -> Vec<String> {
    let mut args = vec![
        String::from("--no-external"),
        String::from("-d"),
        dir.to_str().unwrap().to_string(),
        String::from("-D"),
        String::from("shop"),
    ];
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}

fn read_mo(path: &Path) -> MoFile {
    MoFile::read(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn test_poset_new_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let mo_path = temp_dir.path().join("shop-de.mo");

    run_test(TestPlan {
        cmd: String::from("poset"),
        args: poset_args(temp_dir.path(), &["de", "Hello", "Hallo"]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 1 translated, 0 untranslated (in-process)\n",
            mo_path.display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    assert_eq!(read_mo(&mo_path).gettext("Hello"), Some("Hallo"));

    let po = fs::read_to_string(temp_dir.path().join("shop-de.po")).unwrap();
    let doc = decode_document(&po);
    assert!(doc.warnings.is_empty());
    assert_eq!(doc.header.unwrap().language(), Some("de"));
    assert_eq!(doc.catalog.translation(None, "Hello"), Some("Hallo"));
}

#[test]
fn test_poset_updates_existing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("shop-de.po"),
        "msgid \"Hello\"\nmsgstr \"Hallo\"\n\nmsgid \"Goodbye\"\nmsgstr \"\"\n",
    )
    .unwrap();

    run_test(TestPlan {
        cmd: String::from("poset"),
        args: poset_args(temp_dir.path(), &["de", "Goodbye", "Tschüss"]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 2 translated, 0 untranslated (in-process)\n",
            temp_dir.path().join("shop-de.mo").display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let mo = read_mo(&temp_dir.path().join("shop-de.mo"));
    assert_eq!(mo.gettext("Hello"), Some("Hallo"));
    assert_eq!(mo.gettext("Goodbye"), Some("Tschüss"));
}

#[test]
fn test_poset_seeds_from_template() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("shop.pot"),
        "msgid \"Hello\"\nmsgstr \"\"\n\nmsgid \"Cart\"\nmsgstr \"ignored\"\n",
    )
    .unwrap();

    run_test(TestPlan {
        cmd: String::from("poset"),
        args: poset_args(temp_dir.path(), &["fr", "Hello", "Bonjour"]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 1 translated, 1 untranslated (in-process)\n",
            temp_dir.path().join("shop-fr.mo").display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let mo = read_mo(&temp_dir.path().join("shop-fr.mo"));
    assert_eq!(mo.gettext("Cart"), None);
}

#[test]
fn test_poset_context_and_escapes() {
    let temp_dir = TempDir::new().unwrap();

    run_test(TestPlan {
        cmd: String::from("poset"),
        args: poset_args(
            temp_dir.path(),
            &["-c", "menu", "-e", "de", "Open\\n", "Öffnen\\t\\\"x\\\""],
        ),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 1 translated, 0 untranslated (in-process)\n",
            temp_dir.path().join("shop-de.mo").display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let mo = read_mo(&temp_dir.path().join("shop-de.mo"));
    assert_eq!(mo.pgettext("menu", "Open\n"), Some("Öffnen\t\"x\""));
    assert_eq!(mo.gettext("Open\n"), None);
}

#[test]
fn test_poset_untranslated_saves_po_only() {
    let temp_dir = TempDir::new().unwrap();
    let po_path = temp_dir.path().join("shop-de.po");

    run_test(TestPlan {
        cmd: String::from("poset"),
        args: poset_args(temp_dir.path(), &["de", "Hello", ""]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 0 translated, 1 untranslated (not compiled)\n",
            po_path.display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    assert!(po_path.exists());
    assert!(!temp_dir.path().join("shop-de.mo").exists());
}

#[test]
fn test_poset_invalid_locale() {
    let temp_dir = TempDir::new().unwrap();

    run_test(TestPlan {
        cmd: String::from("poset"),
        args: poset_args(temp_dir.path(), &["../de", "Hello", "Hallo"]),
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::from("poset: ../de: I/O error: invalid locale code '../de'\n"),
        expected_exit_code: 1,
    });
}

#[test]
fn test_poset_empty_msgid() {
    let temp_dir = TempDir::new().unwrap();

    for msgid in ["", "   "] {
        run_test(TestPlan {
            cmd: String::from("poset"),
            args: poset_args(temp_dir.path(), &["de", msgid, "Hallo"]),
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::from("poset: de: MSGID must not be empty\n"),
            expected_exit_code: 1,
        });
    }

    assert!(!temp_dir.path().join("shop-de.po").exists());
}
