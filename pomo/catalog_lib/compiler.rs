//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Catalog compiler
//!
//! [`Compiler`] turns .po source into .mo bytes by trying an ordered list
//! of [`CompileStrategy`] values until one succeeds. The usual chain is an
//! external `msgfmt` followed by the in-process encoder.
//!
//! All per-run state lives in a [`TranslationContext`]: the locale being
//! compiled and the diagnostics collected along the way. A compiler holds
//! no mutable state, so one instance can serve several locales at once.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::catalog_lib::catalog::{Catalog, CatalogStats};
use crate::catalog_lib::mo_file::{self, MoError};
use crate::catalog_lib::po_decode::decode_document;
use crate::catalog_lib::po_encode;
use crate::catalog_lib::store::CatalogStore;

/// Default time limit for an external compiler run
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the external compiler looked up on `PATH`
pub const MSGFMT: &str = "msgfmt";

/// How often a running tool is polled for completion
const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Nothing is translated; compilation did not run
    #[error("no translated messages, nothing to compile")]
    NoContent,
    #[error("{0}: compiler not available")]
    ToolUnavailable(String),
    #[error("{tool}: {reason}")]
    ToolFailure { tool: String, reason: String },
    #[error("{0}")]
    Encode(MoError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<MoError> for CompileError {
    fn from(e: MoError) -> Self {
        match e {
            MoError::EmptyCatalog => CompileError::NoContent,
            MoError::Io(e) => CompileError::Io(e),
            e => CompileError::Encode(e),
        }
    }
}

/// Warning or error recorded during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What produced it: "po", a strategy name, ...
    pub source: String,
    pub message: String,
    pub is_error: bool,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.source,
            if self.is_error { "error" } else { "warning" },
            self.message
        )
    }
}

/// Locale and diagnostic sink for one compilation
#[derive(Debug, Clone)]
pub struct TranslationContext {
    pub locale: String,
    diagnostics: Vec<Diagnostic>,
}

impl TranslationContext {
    pub fn new(locale: impl Into<String>) -> Self {
        TranslationContext {
            locale: locale.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn warn(&mut self, source: &str, message: impl Into<String>) {
        self.push(source, message.into(), false);
    }

    pub fn error(&mut self, source: &str, message: impl Into<String>) {
        self.push(source, message.into(), true);
    }

    fn push(&mut self, source: &str, message: String, is_error: bool) {
        if is_error {
            log::error!("{}: {}: {}", self.locale, source, message);
        } else {
            log::warn!("{}: {}: {}", self.locale, source, message);
        }
        self.diagnostics.push(Diagnostic {
            source: source.to_string(),
            message,
            is_error,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Input handed to every strategy: the raw text and its decoded catalog
#[derive(Debug, Clone, Copy)]
pub struct CompileInput<'a> {
    pub source: &'a str,
    pub catalog: &'a Catalog,
}

/// One way of producing .mo bytes
pub trait CompileStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn compile(
        &self,
        ctx: &mut TranslationContext,
        input: CompileInput<'_>,
    ) -> Result<Vec<u8>, CompileError>;
}

/// Decode and encode within this process
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcess;

impl CompileStrategy for InProcess {
    fn name(&self) -> &str {
        "in-process"
    }

    fn compile(
        &self,
        _ctx: &mut TranslationContext,
        input: CompileInput<'_>,
    ) -> Result<Vec<u8>, CompileError> {
        Ok(mo_file::encode(input.catalog)?)
    }
}

/// A `msgfmt`-compatible executable, run as `PROGRAM [ARGS] -o OUT.mo IN.po`
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

/// Whether `path` is a regular file with an execute bit set.
fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Search `PATH` for an executable.
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        ExternalTool {
            program: program.into(),
            args: Vec::new(),
            timeout,
        }
    }

    /// Extra arguments placed before `-o OUT IN`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Locate the compiler: `MSGFMT` from the environment, else `msgfmt` on `PATH`.
    pub fn find(timeout: Duration) -> Option<Self> {
        let program = match env::var_os("MSGFMT") {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => find_in_path(MSGFMT)?,
        };
        Some(ExternalTool::new(program, timeout))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn failure(&self, reason: impl Into<String>) -> CompileError {
        CompileError::ToolFailure {
            tool: self.program.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Wait for the child, killing it once the time limit passes.
    fn wait(&self, child: &mut std::process::Child) -> Result<ExitStatus, CompileError> {
        let start = Instant::now();

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }

            if start.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.failure(format!(
                    "timed out after {} ms",
                    self.timeout.as_millis()
                )));
            }

            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl CompileStrategy for ExternalTool {
    fn name(&self) -> &str {
        MSGFMT
    }

    fn compile(
        &self,
        ctx: &mut TranslationContext,
        input: CompileInput<'_>,
    ) -> Result<Vec<u8>, CompileError> {
        let work_dir = tempfile::Builder::new().prefix("pomo-").tempdir()?;
        let po_path = work_dir.path().join("input.po");
        let mo_path = work_dir.path().join("output.mo");
        let out_path = work_dir.path().join("stdout.txt");
        let err_path = work_dir.path().join("stderr.txt");

        fs::write(&po_path, input.source)?;

        // output goes to files: a chatty tool cannot block on a full pipe
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg("-o")
            .arg(&mo_path)
            .arg(&po_path)
            .stdin(Stdio::null())
            .stdout(File::create(&out_path)?)
            .stderr(File::create(&err_path)?)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CompileError::ToolUnavailable(
                    self.program.display().to_string(),
                ))
            }
            Err(e) => return Err(self.failure(e.to_string())),
        };

        log::debug!(
            "{}: running {} (pid {})",
            ctx.locale,
            self.program.display(),
            child.id()
        );
        let status = self.wait(&mut child)?;

        let stderr = fs::read_to_string(&err_path).unwrap_or_default();
        let stderr = stderr.trim();

        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(if stderr.is_empty() {
                self.failure(reason)
            } else {
                self.failure(format!("{}: {}", reason, stderr))
            });
        }

        if !stderr.is_empty() {
            ctx.warn(self.name(), stderr);
        }

        match fs::read(&mo_path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(self.failure("produced no output file"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Result of a successful compilation
#[derive(Debug, Clone)]
pub struct Compiled {
    pub data: Vec<u8>,
    /// Name of the strategy that produced `data`
    pub strategy: String,
    pub stats: CatalogStats,
}

/// Which external compiler to put in front of the in-process encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChoice {
    /// `MSGFMT` or `msgfmt` on `PATH`, if any
    Detect,
    /// In-process encoder only
    Disabled,
    Program(PathBuf),
}

impl ToolChoice {
    /// Map `--no-external` / `--msgfmt PATH` style options to a choice.
    pub fn from_flags(no_external: bool, program: Option<PathBuf>) -> Self {
        match (no_external, program) {
            (true, _) => ToolChoice::Disabled,
            (false, Some(program)) => ToolChoice::Program(program),
            (false, None) => ToolChoice::Detect,
        }
    }
}

/// Ordered chain of compile strategies
pub struct Compiler {
    strategies: Vec<Box<dyn CompileStrategy>>,
}

impl Compiler {
    /// In-process compilation only
    pub fn new() -> Self {
        Compiler {
            strategies: vec![Box::new(InProcess)],
        }
    }

    pub fn with_strategies(strategies: Vec<Box<dyn CompileStrategy>>) -> Self {
        Compiler { strategies }
    }

    /// External `msgfmt` when one is installed, then the in-process encoder.
    pub fn detect(timeout: Duration) -> Self {
        let mut strategies: Vec<Box<dyn CompileStrategy>> = Vec::new();
        if let Some(tool) = ExternalTool::find(timeout) {
            log::debug!("using external compiler {}", tool.program().display());
            strategies.push(Box::new(tool));
        }
        strategies.push(Box::new(InProcess));
        Compiler { strategies }
    }

    /// Build the chain for a command-line tool choice.
    pub fn configured(choice: &ToolChoice, timeout: Duration) -> Self {
        match choice {
            ToolChoice::Detect => Compiler::detect(timeout),
            ToolChoice::Disabled => Compiler::new(),
            ToolChoice::Program(program) => Compiler::with_strategies(vec![
                Box::new(ExternalTool::new(program, timeout)),
                Box::new(InProcess),
            ]),
        }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Compile .po source to .mo bytes.
    pub fn compile(
        &self,
        ctx: &mut TranslationContext,
        po_source: &str,
    ) -> Result<Vec<u8>, CompileError> {
        self.compile_report(ctx, po_source).map(|c| c.data)
    }

    /// Compile .po source, reporting which strategy succeeded.
    ///
    /// Parse warnings are recorded in `ctx`. A catalog without translations
    /// yields [`CompileError::NoContent`] before any strategy runs. When
    /// every strategy fails, the last strategy's error is returned.
    pub fn compile_report(
        &self,
        ctx: &mut TranslationContext,
        po_source: &str,
    ) -> Result<Compiled, CompileError> {
        let doc = decode_document(po_source);
        for warning in &doc.warnings {
            ctx.warn("po", warning.to_string());
        }

        let stats = doc.catalog.stats();
        if stats.translated == 0 {
            return Err(CompileError::NoContent);
        }

        let input = CompileInput {
            source: po_source,
            catalog: &doc.catalog,
        };

        let mut last_error = None;
        for strategy in &self.strategies {
            log::debug!("{}: trying {}", ctx.locale, strategy.name());
            match strategy.compile(ctx, input) {
                Ok(data) => {
                    return Ok(Compiled {
                        data,
                        strategy: strategy.name().to_string(),
                        stats,
                    })
                }
                Err(e) => {
                    ctx.warn(strategy.name(), e.to_string());
                    last_error = Some(e);
                }
            }
        }

        let err = last_error.unwrap_or_else(|| CompileError::ToolUnavailable("none".to_string()));
        ctx.error("compile", "every compile strategy failed");
        Err(err)
    }

    /// Compile the stored catalog of `ctx.locale` and store the .mo.
    pub fn compile_locale(
        &self,
        ctx: &mut TranslationContext,
        store: &dyn CatalogStore,
    ) -> Result<Compiled, CompileError> {
        let source = store.read_po(&ctx.locale)?.ok_or_else(|| {
            io::Error::new(
                ErrorKind::NotFound,
                format!("no catalog for locale '{}'", ctx.locale),
            )
        })?;

        let compiled = self.compile_report(ctx, &source)?;
        store.write_mo(&ctx.locale, &compiled.data)?;
        Ok(compiled)
    }

    /// Write `catalog` as the .po of `ctx.locale`, then compile and write the .mo.
    ///
    /// The .po is written even when compilation fails.
    pub fn persist(
        &self,
        ctx: &mut TranslationContext,
        store: &dyn CatalogStore,
        catalog: &Catalog,
    ) -> Result<Compiled, CompileError> {
        let text = po_encode::encode(&ctx.locale, catalog);
        store.write_po(&ctx.locale, &text)?;

        let compiled = self.compile_report(ctx, &text)?;
        store.write_mo(&ctx.locale, &compiled.data)?;
        Ok(compiled)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the catalog for `ctx.locale`: its .po, else the domain template
/// with translations cleared, else an empty catalog.
pub fn load_catalog(
    ctx: &mut TranslationContext,
    store: &dyn CatalogStore,
) -> Result<Catalog, CompileError> {
    let (source, from_template) = match store.read_po(&ctx.locale)? {
        Some(text) => (text, false),
        None => match store.read_template()? {
            Some(text) => (text, true),
            None => {
                log::debug!("{}: no catalog or template, starting empty", ctx.locale);
                return Ok(Catalog::new());
            }
        },
    };

    let doc = decode_document(&source);
    for warning in &doc.warnings {
        ctx.warn("po", warning.to_string());
    }

    let mut catalog = doc.catalog;
    if from_template {
        catalog.clear_translations();
    }
    Ok(catalog)
}

/// Parse a duration such as "30", "1.5s", "2m".
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let (value, suffix) = s.split_at(
        s.find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(s.len()),
    );

    let value: f64 = value
        .parse()
        .map_err(|_| format!("invalid duration format '{s}'"))?;

    let multiplier = match suffix {
        "s" | "" => 1.0,
        "ms" => 0.001,
        "m" => 60.0,
        "h" => 3600.0,
        _ => return Err(format!("invalid duration format '{s}'")),
    };

    Duration::try_from_secs_f64(value * multiplier)
        .map_err(|_| format!("invalid duration format '{s}'"))
}
