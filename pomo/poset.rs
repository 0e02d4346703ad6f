//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! poset - set a translation and rebuild the catalog
//!
//! Loads the locale's catalog (or seeds it from `<domain>.pot`), sets one
//! translation, then saves the .po and compiles the .mo.

use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use plib::PROJECT_NAME;
use pomo::catalog_lib::compiler::{
    load_catalog, parse_duration, Compiler, ToolChoice, TranslationContext,
};
use pomo::catalog_lib::escape::unescape;
use pomo::catalog_lib::store::DirStore;
use pomo::catalog_lib::CompileError;
use std::error::Error;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

/// poset - set a translation and rebuild the catalog
#[derive(Parser)]
#[command(version, about = gettext("poset - set a translation and rebuild the catalog"))]
struct Args {
    #[arg(short = 'd', long = "directory", default_value = ".", help = gettext("Directory holding the catalogs"))]
    directory: PathBuf,

    #[arg(short = 'D', long = "domain", help = gettext("Text domain (default: $TEXTDOMAIN, then \"messages\")"))]
    domain: Option<String>,

    #[arg(short = 'c', long = "context", help = gettext("Message context (msgctxt)"))]
    context: Option<String>,

    #[arg(short = 'e', help = gettext("Interpret \\n, \\t, \\\" and \\\\ in MSGID and TRANSLATION"))]
    escapes: bool,

    #[arg(long = "no-external", help = gettext("Never run an external msgfmt"))]
    no_external: bool,

    #[arg(long = "msgfmt", conflicts_with = "no_external", help = gettext("External compiler to try first"))]
    msgfmt: Option<PathBuf>,

    #[arg(short = 't', long = "timeout", default_value = "30s", value_parser = parse_duration, help = gettext("Time limit for the external compiler"))]
    timeout: Duration,

    #[arg(help = gettext("Locale of the catalog to edit"))]
    locale: String,

    #[arg(help = gettext("Original string"))]
    msgid: String,

    #[arg(help = gettext("Translation; empty marks the string untranslated"))]
    translation: String,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let store = DirStore::new(&args.directory, plib::text_domain(args.domain.as_deref()));
    let choice = ToolChoice::from_flags(args.no_external, args.msgfmt.clone());
    let compiler = Compiler::configured(&choice, args.timeout);

    let (msgid, translation) = if args.escapes {
        (unescape(&args.msgid), unescape(&args.translation))
    } else {
        (args.msgid.clone(), args.translation.clone())
    };

    // an empty msgid is the header entry and cannot carry a translation
    if msgid.trim().is_empty() {
        return Err(gettext("MSGID must not be empty").into());
    }

    let mut ctx = TranslationContext::new(args.locale.as_str());
    let mut catalog = load_catalog(&mut ctx, &store)?;
    catalog.upsert(args.context.as_deref(), &msgid, &translation);

    let result = compiler.persist(&mut ctx, &store, &catalog);
    for diag in ctx.diagnostics() {
        eprintln!("poset: {}: {}", args.locale, diag);
    }

    match result {
        Ok(compiled) => {
            println!(
                "{}: {} translated, {} untranslated ({})",
                store.mo_path(&args.locale).display(),
                compiled.stats.translated,
                compiled.stats.untranslated,
                compiled.strategy
            );
            Ok(())
        }
        // the .po is saved; an all-untranslated catalog simply has no .mo
        Err(CompileError::NoContent) => {
            println!(
                "{}: 0 translated, {} untranslated ({})",
                store.po_path(&args.locale).display(),
                catalog.stats().untranslated,
                gettext("not compiled")
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn main() {
    setlocale(LocaleCategory::LcAll, "");
    let _ = textdomain(PROJECT_NAME);
    let _ = bind_textdomain_codeset(PROJECT_NAME, "UTF-8");
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("poset: {}: {}", args.locale, e);
        exit(1);
    }
}
