//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, TestPlan};
use pomo::catalog_lib::mo_file;
use pomo::catalog_lib::{Catalog, Entry};
use std::fs;
use tempfile::TempDir;

const SAMPLE_PO: &str = r#"msgid ""
msgstr ""
"Language: pt_BR\n"

msgid "Hello"
msgstr "Olá"

msgctxt "menu"
msgid "Open"
msgstr "Abrir\n"

msgid "Goodbye"
msgstr ""
"#;

#[test]
fn test_postats_po_stdin() {
    run_test(TestPlan {
        cmd: String::from("postats"),
        args: vec![String::from("-")],
        stdin_data: String::from(SAMPLE_PO),
        expected_out: String::from("-: 2 translated, 1 untranslated, 3 total [pt_BR]\n"),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_postats_po_list() {
    let temp_dir = TempDir::new().unwrap();
    let po_path = temp_dir.path().join("pt_BR.po");
    fs::write(&po_path, SAMPLE_PO).unwrap();

    run_test(TestPlan {
        cmd: String::from("postats"),
        args: vec![String::from("-l"), po_path.to_str().unwrap().to_string()],
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 2 translated, 1 untranslated, 3 total [pt_BR]\n  Hello => Olá\n  [menu] Open => Abrir\\n\n",
            po_path.display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_postats_mo_file() {
    let temp_dir = TempDir::new().unwrap();
    let mo_path = temp_dir.path().join("de.mo");

    let catalog: Catalog = vec![
        Entry::new("Hello", "Hallo"),
        Entry::new("Open", "Öffnen").with_context("menu"),
        Entry::new("Goodbye", ""),
    ]
    .into_iter()
    .collect();
    fs::write(&mo_path, mo_file::encode(&catalog).unwrap()).unwrap();

    run_test(TestPlan {
        cmd: String::from("postats"),
        args: vec![String::from("-l"), mo_path.to_str().unwrap().to_string()],
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 2 messages\n  Hello => Hallo\n  [menu] Open => Öffnen\n",
            mo_path.display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });
}

#[test]
fn test_postats_verbose_warnings() {
    run_test(TestPlan {
        cmd: String::from("postats"),
        args: vec![String::from("-v"), String::from("-")],
        stdin_data: String::from("msgid \"a\"\nmsgstr \"b\"\nbogus line\n"),
        expected_out: String::from("-: 1 translated, 0 untranslated, 1 total\n"),
        expected_err: String::from("postats: -: line 3: unrecognized line\n"),
        expected_exit_code: 0,
    });
}

#[test]
fn test_postats_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.po");
    let po_path = temp_dir.path().join("ok.po");
    fs::write(&po_path, "msgid \"a\"\nmsgstr \"b\"\n").unwrap();

    let output = plib::testing::run_test_base(
        "postats",
        &[
            missing.to_str().unwrap().to_string(),
            po_path.to_str().unwrap().to_string(),
        ],
        b"",
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        format!("{}: 1 translated, 0 untranslated, 1 total\n", po_path.display())
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with(&format!("postats: {}: ", missing.display())));
}
