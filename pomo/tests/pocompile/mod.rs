//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use plib::testing::{run_test, run_test_with_checker, TestPlan};
use pomo::catalog_lib::mo_file::MoFile;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SHOP_DE: &str = r#"msgid ""
msgstr ""
"Language: de\n"
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Hello"
msgstr "Hallo"

msgctxt "menu"
msgid "Open"
msgstr "Öffnen"

msgid "Goodbye"
msgstr ""
"#;

fn pocompile_args(dir: &Path, locales: &[&str]) -> Vec<String> {
    let mut args = vec![
        String::from("--no-external"),
        String::from("-d"),
        dir.to_str().unwrap().to_string(),
        String::from("-D"),
        String::from("shop"),
    ];
    args.extend(locales.iter().map(|l| l.to_string()));
    args
}

#[test]
fn test_pocompile_single_locale() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shop-de.po"), SHOP_DE).unwrap();
    let mo_path = temp_dir.path().join("shop-de.mo");

    run_test(TestPlan {
        cmd: String::from("pocompile"),
        args: pocompile_args(temp_dir.path(), &["de"]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 2 translated, 1 untranslated (in-process)\n",
            mo_path.display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let mo = MoFile::read(&fs::read(&mo_path).unwrap()).unwrap();
    assert_eq!(mo.message_count(), 2);
    assert_eq!(mo.gettext("Hello"), Some("Hallo"));
    assert_eq!(mo.pgettext("menu", "Open"), Some("Öffnen"));
    assert_eq!(mo.gettext("Goodbye"), None);
}

#[test]
fn test_pocompile_multiple_locales() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shop-de.po"), SHOP_DE).unwrap();
    fs::write(
        temp_dir.path().join("shop-fr.po"),
        "msgid \"Hello\"\nmsgstr \"Bonjour\"\n",
    )
    .unwrap();

    run_test(TestPlan {
        cmd: String::from("pocompile"),
        args: pocompile_args(temp_dir.path(), &["de", "fr"]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 2 translated, 1 untranslated (in-process)\n{}: 1 translated, 0 untranslated (in-process)\n",
            temp_dir.path().join("shop-de.mo").display(),
            temp_dir.path().join("shop-fr.mo").display()
        ),
        expected_err: String::new(),
        expected_exit_code: 0,
    });

    let mo = MoFile::read(&fs::read(temp_dir.path().join("shop-fr.mo")).unwrap()).unwrap();
    assert_eq!(mo.gettext("Hello"), Some("Bonjour"));
}

#[test]
fn test_pocompile_missing_locale() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shop-de.po"), SHOP_DE).unwrap();

    // the good locale is still compiled
    run_test(TestPlan {
        cmd: String::from("pocompile"),
        args: pocompile_args(temp_dir.path(), &["de", "it"]),
        stdin_data: String::new(),
        expected_out: format!(
            "{}: 2 translated, 1 untranslated (in-process)\n",
            temp_dir.path().join("shop-de.mo").display()
        ),
        expected_err: String::from("pocompile: it: I/O error: no catalog for locale 'it'\n"),
        expected_exit_code: 1,
    });

    assert!(!temp_dir.path().join("shop-it.mo").exists());
}

#[test]
fn test_pocompile_nothing_translated() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("shop-de.po"),
        "msgid \"Hello\"\nmsgstr \"\"\n",
    )
    .unwrap();

    run_test(TestPlan {
        cmd: String::from("pocompile"),
        args: pocompile_args(temp_dir.path(), &["de"]),
        stdin_data: String::new(),
        expected_out: String::new(),
        expected_err: String::from("pocompile: de: no translated messages, nothing to compile\n"),
        expected_exit_code: 1,
    });

    assert!(!temp_dir.path().join("shop-de.mo").exists());
}

#[test]
fn test_pocompile_verbose_warnings() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("shop-de.po"),
        "msgid \"One file\"\nmsgid_plural \"%d files\"\nmsgstr[0] \"Eine Datei\"\n\nmsgid \"Hello\"\nmsgstr \"Hallo\"\n",
    )
    .unwrap();

    let mut args = pocompile_args(temp_dir.path(), &["de"]);
    args.insert(0, String::from("-v"));

    run_test_with_checker(
        TestPlan {
            cmd: String::from("pocompile"),
            args,
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(0));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("pocompile: de: po: warning: line 2: unsupported keyword 'msgid_plural'"));
            let stdout = String::from_utf8_lossy(&output.stdout);
            assert!(stdout.ends_with("1 translated, 1 untranslated (in-process)\n"));
        },
    );
}

#[test]
fn test_pocompile_failing_tool_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shop-de.po"), SHOP_DE).unwrap();

    run_test_with_checker(
        TestPlan {
            cmd: String::from("pocompile"),
            args: vec![
                String::from("--msgfmt"),
                String::from("/bin/false"),
                String::from("-d"),
                temp_dir.path().to_str().unwrap().to_string(),
                String::from("-D"),
                String::from("shop"),
                String::from("de"),
            ],
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 0,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(0));
            let stdout = String::from_utf8_lossy(&output.stdout);
            assert!(stdout.ends_with("(in-process)\n"));
            // warnings stay quiet without -v
            assert!(output.stderr.is_empty());
        },
    );

    assert!(temp_dir.path().join("shop-de.mo").exists());
}

#[test]
fn test_pocompile_repeated_locale() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shop-de.po"), SHOP_DE).unwrap();

    // a repeated locale is compiled once
    for _ in 0..10 {
        run_test(TestPlan {
            cmd: String::from("pocompile"),
            args: pocompile_args(temp_dir.path(), &["de", "de", "de", "de"]),
            stdin_data: String::new(),
            expected_out: format!(
                "{}: 2 translated, 1 untranslated (in-process)\n",
                temp_dir.path().join("shop-de.mo").display()
            ),
            expected_err: String::new(),
            expected_exit_code: 0,
        });
    }
}

#[test]
fn test_pocompile_oversized_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = pocompile_args(temp_dir.path(), &["de"]);
    args.insert(0, String::from("99999999999999999999h"));
    args.insert(0, String::from("-t"));

    run_test_with_checker(
        TestPlan {
            cmd: String::from("pocompile"),
            args,
            stdin_data: String::new(),
            expected_out: String::new(),
            expected_err: String::new(),
            expected_exit_code: 2,
        },
        |_, output| {
            assert_eq!(output.status.code(), Some(2));
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("invalid duration format '99999999999999999999h'"));
            assert!(!stderr.contains("panicked"));
        },
    );
}
