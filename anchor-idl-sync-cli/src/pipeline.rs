//! The sync run: check tools, list programs, then extract, validate and
//! write one program at a time.

use anchor_idl_sync_core::address::Address;
use anchor_idl_sync_core::error::{Result, SyncError};
use anchor_idl_sync_core::extract::AddressExtractor;
use anchor_idl_sync_core::idl::{AddressChange, IdlStore, KeypairChange, SyncReport};
use anchor_idl_sync_core::keypair::Keypair;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::cli::Options;
use crate::toolchain::{CommandRunner, Toolchain};

/// Result of processing a single program that did not abort the run.
#[derive(Debug)]
pub enum ProgramOutcome {
    Synchronized(SyncReport),
    Skipped(SyncError),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub synchronized: Vec<String>,
    pub skipped: Vec<(String, SyncError)>,
}

impl RunSummary {
    /// A run succeeds when at least one IDL file was synchronized.
    pub fn is_success(&self) -> bool {
        !self.synchronized.is_empty()
    }
}

pub struct Pipeline<R> {
    toolchain: Toolchain<R>,
    extractor: AddressExtractor,
    store: IdlStore,
    keypair: Option<PathBuf>,
}

impl<R: CommandRunner> Pipeline<R> {
    pub fn new(runner: R, options: &Options) -> Self {
        Self {
            toolchain: Toolchain::new(runner, options.toolchain.clone()),
            extractor: AddressExtractor::default(),
            store: IdlStore::new(&options.idl_dir).dry_run(options.dry_run),
            keypair: options.keypair.clone(),
        }
    }

    pub fn with_extractor(self, extractor: AddressExtractor) -> Self {
        Self { extractor, ..self }
    }

    /// Run over every program.
    ///
    /// `Err` means the run was aborted: missing tools, missing IDL
    /// directory, nothing to process, or a keypair that belongs to a
    /// different program. Per-program failures land in the summary instead.
    pub fn run(&self) -> Result<RunSummary> {
        self.announce();

        let missing = self.toolchain.missing_tools();
        if !missing.is_empty() {
            return Err(SyncError::ToolUnavailable {
                tool: missing.join(", "),
            });
        }

        let keypair = self.validate_directories()?;

        let programs = self.toolchain.program_names()?;
        if programs.is_empty() {
            return Err(SyncError::NoProgramsFound);
        }
        log::info!(
            "{}",
            format!("📋 Found {} programs: {}", programs.len(), programs.join(", ")).blue()
        );

        let mut summary = RunSummary {
            attempted: programs.len(),
            ..RunSummary::default()
        };
        for program in programs {
            log::info!("\n{}", format!("🔧 Processing program: {}", program).yellow());
            match self.process_program(&program, keypair)? {
                ProgramOutcome::Synchronized(_) => summary.synchronized.push(program),
                ProgramOutcome::Skipped(err) => summary.skipped.push((program, err)),
            }
        }

        log::info!(
            "\n{}",
            format!(
                "🏁 Processing complete! Successfully updated {}/{} programs.",
                summary.synchronized.len(),
                summary.attempted
            )
            .green()
        );
        if self.store.is_dry_run() {
            log::info!("⚠️  Dry run: no IDL files were written.");
        }
        Ok(summary)
    }

    /// Extract, validate and synchronize one program.
    pub fn process_program(
        &self,
        program: &str,
        keypair: Option<&Path>,
    ) -> Result<ProgramOutcome> {
        let source = match self.toolchain.expand_program(program) {
            Ok(source) => source,
            Err(err) => return Ok(skip(program, err)),
        };

        let address = match self.extractor.extract(program, &source) {
            Ok(extracted) => {
                log::debug!("Found pubkey using the {} matcher", extracted.matcher);
                extracted.address
            }
            Err(err) => {
                log::debug!("Tried matchers: {}", self.extractor.matcher_names().join(", "));
                return Ok(skip(program, err));
            }
        };
        log::info!("✅ Extracted address: {}", address);

        let keypair = match keypair {
            Some(path) => load_matching_keypair(program, path, &address)?,
            None => None,
        };

        match self.store.synchronize(program, &address, keypair.as_ref()) {
            Ok(report) => {
                log_report(&report, &address);
                Ok(ProgramOutcome::Synchronized(report))
            }
            Err(err) => Ok(skip(program, err)),
        }
    }

    fn announce(&self) {
        match &self.keypair {
            Some(path) => {
                log::info!(
                    "{}",
                    "🚀 Extracting program addresses from expanded macros, \
                     exporting keypairs, and updating IDL files..."
                        .green()
                );
                log::info!("{}", format!("📄 Using keypair file: {}", path.display()).blue());
            }
            None => {
                log::info!(
                    "{}",
                    "🚀 Extracting program addresses from expanded macros and updating IDL files..."
                        .green()
                );
                log::info!(
                    "{}",
                    "⚠️  Keypair export disabled. \
                     Use --keypair to enable keypair functionality."
                        .yellow()
                );
            }
        }
    }

    /// The IDL directory must exist. A missing keypair file only disables
    /// keypair export for this run.
    fn validate_directories(&self) -> Result<Option<&Path>> {
        if !self.store.dir().is_dir() {
            return Err(SyncError::IdlDirNotFound {
                path: self.store.dir().to_path_buf(),
            });
        }

        Ok(self.keypair.as_deref().filter(|path| {
            let exists = path.exists();
            if !exists {
                log::warn!("⚠️  Keypair file not found: {}", path.display());
            }
            exists
        }))
    }
}

/// Load the keypair and make sure it belongs to `address`.
///
/// An unreadable or malformed file is reported and the program continues
/// without a keypair; a keypair for a different program is fatal.
fn load_matching_keypair(
    program: &str,
    path: &Path,
    address: &Address,
) -> Result<Option<Keypair>> {
    let keypair = match Keypair::load(path) {
        Ok(Some(keypair)) => keypair,
        Ok(None) => {
            log::warn!("⚠️  Keypair file not found: {}", path.display());
            return Ok(None);
        }
        Err(err) => {
            log::error!("❌ {}", err);
            return Ok(None);
        }
    };

    match keypair.verify(address) {
        Ok(()) => {
            log::info!("🔑 Keypair public key matches program address");
            Ok(Some(keypair))
        }
        Err(err) => {
            log::error!("{}", "❌ Keypair public key doesn't match program address".red());
            if let SyncError::KeypairMismatch { expected, actual } = &err {
                log::error!("   📍 Program address: {}", expected);
                log::error!("   🔑 Keypair pubkey:  {}", actual);
            }
            log::error!("❌ Keypair validation failed for {}: {}", program, err);
            Err(err)
        }
    }
}

fn skip(program: &str, err: SyncError) -> ProgramOutcome {
    log::error!("❌ Skipping {}: {}", program, err);
    ProgramOutcome::Skipped(err)
}

fn log_report(report: &SyncReport, address: &Address) {
    match &report.address {
        AddressChange::Unchanged => log::info!("✅ IDL already has correct address: {}", address),
        AddressChange::Updated { previous } => {
            log::info!("🔄 Updating address in IDL from {} to {}", previous, address)
        }
        AddressChange::Added => log::info!("📝 Adding address to IDL: {}", address),
    }
    match report.keypair {
        KeypairChange::Embedded => log::info!("🔑 Adding keypair to IDL"),
        KeypairChange::Removed => log::info!("🗑️  Removed keypair from IDL"),
        KeypairChange::Absent => {}
    }
    if report.written {
        log::info!("✅ Successfully updated IDL file: {}", report.path.display());
    } else {
        log::info!("📝 Dry run, not writing {}", report.path.display());
    }
}
