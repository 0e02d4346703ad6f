//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! postats - report translation statistics for .po and .mo files

use byteorder::{ByteOrder, LittleEndian};
use clap::Parser;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use plib::io::read_input;
use plib::PROJECT_NAME;
use pomo::catalog_lib::catalog::CONTEXT_SEPARATOR;
use pomo::catalog_lib::escape::escape;
use pomo::catalog_lib::mo_file::{MoFile, MO_MAGIC, MO_MAGIC_SWAPPED};
use pomo::catalog_lib::po_decode::decode_document;
use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

/// postats - report translation statistics for .po and .mo files
#[derive(Parser)]
#[command(version, about = gettext("postats - report translation statistics for .po and .mo files"))]
struct Args {
    #[arg(short = 'l', long = "list", help = gettext("List translated messages"))]
    list: bool,

    #[arg(short = 'v', long = "verbose", help = gettext("Print parse warnings"))]
    verbose: bool,

    #[arg(required = true, help = gettext("Catalog files (.po or .mo); - reads stdin"))]
    files: Vec<PathBuf>,
}

/// Render a lookup key as `[context] msgid` for display.
fn display_key(key: &str) -> String {
    match key.split_once(CONTEXT_SEPARATOR) {
        Some((ctx, msgid)) => format!("[{}] {}", escape(ctx), escape(msgid)),
        None => escape(key),
    }
}

fn is_mo(data: &[u8]) -> bool {
    data.len() >= 4 && matches!(LittleEndian::read_u32(&data[..4]), MO_MAGIC | MO_MAGIC_SWAPPED)
}

fn stats_file(args: &Args, path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let data = read_input(path)?;
    let name = path.display();

    if is_mo(&data) {
        let mo = MoFile::read(&data)?;
        println!("{}: {} messages", name, mo.message_count());
        if args.list {
            for (key, value) in mo.messages.iter().filter(|(k, _)| !k.is_empty()) {
                println!("  {} => {}", display_key(key), escape(value));
            }
        }
        return Ok(());
    }

    let text = String::from_utf8(data)?;
    let doc = decode_document(&text);
    if args.verbose {
        for warning in &doc.warnings {
            eprintln!("postats: {}: {}", name, warning);
        }
    }

    let stats = doc.catalog.stats();
    print!(
        "{}: {} translated, {} untranslated, {} total",
        name, stats.translated, stats.untranslated, stats.total
    );
    match doc.header.as_ref().and_then(|h| h.language()) {
        Some(language) => println!(" [{}]", language),
        None => println!(),
    }

    if args.list {
        for (key, value) in doc.catalog.to_map() {
            println!("  {} => {}", display_key(&key), escape(&value));
        }
    }

    Ok(())
}

fn main() {
    setlocale(LocaleCategory::LcAll, "");
    let _ = textdomain(PROJECT_NAME);
    let _ = bind_textdomain_codeset(PROJECT_NAME, "UTF-8");
    env_logger::init();

    let args = Args::parse();

    let mut exit_code = 0;

    for path in &args.files {
        if let Err(e) = stats_file(&args, path) {
            eprintln!("postats: {}: {}", path.display(), e);
            exit_code = 1;
        }
    }

    exit(exit_code);
}
