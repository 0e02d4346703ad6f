//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! pocompile - compile stored translation catalogs
//!
//! Reads `<domain>-<locale>.po` from the catalog directory and writes the
//! matching `<domain>-<locale>.mo`. Locales are compiled in parallel.

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use plib::PROJECT_NAME;
use pomo::catalog_lib::compiler::{
    parse_duration, Compiled, Compiler, Diagnostic, ToolChoice, TranslationContext,
};
use pomo::catalog_lib::store::DirStore;
use pomo::catalog_lib::CompileError;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::exit;
use std::thread;
use std::time::Duration;

/// pocompile - compile stored translation catalogs
#[derive(Parser)]
#[command(version, about = gettext("pocompile - compile stored translation catalogs"))]
struct Args {
    #[arg(short = 'd', long = "directory", default_value = ".", help = gettext("Directory holding the catalogs"))]
    directory: PathBuf,

    #[arg(short = 'D', long = "domain", help = gettext("Text domain (default: $TEXTDOMAIN, then \"messages\")"))]
    domain: Option<String>,

    #[arg(long = "no-external", help = gettext("Never run an external msgfmt"))]
    no_external: bool,

    #[arg(long = "msgfmt", conflicts_with = "no_external", help = gettext("External compiler to try first"))]
    msgfmt: Option<PathBuf>,

    #[arg(short = 't', long = "timeout", default_value = "30s", value_parser = parse_duration, help = gettext("Time limit for the external compiler"))]
    timeout: Duration,

    #[arg(short = 'v', long = "verbose", help = gettext("Print warnings"))]
    verbose: bool,

    #[arg(required = true, help = gettext("Locales to compile"))]
    locales: Vec<String>,
}

type Outcome = (Result<Compiled, CompileError>, Vec<Diagnostic>);

fn main() {
    setlocale(LocaleCategory::LcAll, "");
    let _ = textdomain(PROJECT_NAME);
    let _ = bind_textdomain_codeset(PROJECT_NAME, "UTF-8");
    env_logger::init();

    let mut args = Args::parse();

    // a locale named twice is compiled once, in first-mention order
    let mut seen = HashSet::new();
    args.locales.retain(|locale| seen.insert(locale.clone()));

    let store = DirStore::new(&args.directory, plib::text_domain(args.domain.as_deref()));
    let compiler = Compiler::configured(
        &ToolChoice::from_flags(args.no_external, args.msgfmt.clone()),
        args.timeout,
    );

    // one context per locale; results are reported in argument order
    let outcomes: Vec<Outcome> = thread::scope(|s| {
        let handles: Vec<_> = args
            .locales
            .iter()
            .map(|locale| {
                let (compiler, store) = (&compiler, &store);
                s.spawn(move || {
                    let mut ctx = TranslationContext::new(locale.as_str());
                    let result = compiler.compile_locale(&mut ctx, store);
                    (result, ctx.take_diagnostics())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(outcome) => outcome,
                Err(_) => (
                    Err(CompileError::ToolFailure {
                        tool: String::from("pocompile"),
                        reason: gettext("worker thread panicked"),
                    }),
                    Vec::new(),
                ),
            })
            .collect()
    });

    let mut exit_code = 0;

    for (locale, (result, diagnostics)) in args.locales.iter().zip(outcomes) {
        for diag in &diagnostics {
            if diag.is_error || args.verbose {
                eprintln!("pocompile: {}: {}", locale, diag);
            }
        }

        match result {
            Ok(compiled) => println!(
                "{}: {} translated, {} untranslated ({})",
                store.mo_path(locale).display(),
                compiled.stats.translated,
                compiled.stats.untranslated,
                compiled.strategy
            ),
            Err(e) => {
                eprintln!("pocompile: {}: {}", locale, e);
                exit_code = 1;
            }
        }
    }

    exit(exit_code);
}
