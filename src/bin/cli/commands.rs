//! Command Execution Logic

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::info;

use identshrink::rename::{NoProgress, ProgressSink};
use identshrink::{Program, ProgramSnapshot, RenameConfig, RenamePass};

use crate::cli::args::{RenameArgs, ValidateConfigArgs};
use crate::cli::progress::SpinnerProgress;

/// Run a full rename over a snapshot and write the renamed documents.
pub async fn rename_command(args: RenameArgs) -> anyhow::Result<()> {
    let config = load_configuration(args.config.as_deref())?;

    let snapshot = ProgramSnapshot::from_file(&args.snapshot)
        .with_context(|| format!("failed to read snapshot {}", args.snapshot.display()))?;
    let (program, model) = snapshot.into_model()?;
    info!(documents = program.len(), "snapshot loaded");

    let spinner = if config.progress.enabled && !args.quiet {
        Some(Arc::new(SpinnerProgress::new("renaming")?))
    } else {
        None
    };
    let progress: Arc<dyn ProgressSink> = match &spinner {
        Some(spinner) => Arc::clone(spinner) as Arc<dyn ProgressSink>,
        None => Arc::new(NoProgress),
    };

    let pass = RenamePass::new(config, Arc::new(model)).with_progress(progress);
    let outcome = match pass.run(&program).await {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Some(spinner) = &spinner {
                spinner.abandon();
            }
            eprintln!("{} {}", "❌ Rename aborted:".red(), err);
            if err.is_rename_failure() {
                eprintln!("   {}", "No document was written.".dimmed());
                std::process::exit(1);
            }
            return Err(err.into());
        }
    };

    if let Some(spinner) = &spinner {
        spinner.finish(format!("{} symbols renamed", outcome.stats.symbols_renamed));
    }

    let written = write_documents(&outcome.program, &args.out)?;

    if !args.quiet {
        println!();
        println!("{}", "✅ Rename complete".bright_green().bold());
        println!(
            "   {} {}",
            "Symbols renamed:".bold(),
            outcome.stats.symbols_renamed.to_string().cyan()
        );
        println!(
            "   {} {}",
            "Edits applied:".bold(),
            outcome.stats.edits_applied.to_string().cyan()
        );
        println!(
            "   {} {} of {}",
            "Documents changed:".bold(),
            outcome.stats.documents_changed.to_string().cyan(),
            written
        );
        println!(
            "   {} {}",
            "Output directory:".bold(),
            args.out.display().to_string().cyan()
        );
    }

    Ok(())
}

/// Print default configuration
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default identshrink configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!(
        "{}",
        "# Usage: identshrink rename --config your-config.yml --snapshot <file> --out <dir>".dimmed()
    );
    println!();

    let config = RenameConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Validate a configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match RenameConfig::from_yaml_file(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", "❌ Failed to load configuration:".red(), err);
            std::process::exit(1);
        }
    };

    if let Err(err) = config.validate() {
        eprintln!("{} {}", "❌ Configuration is invalid:".red(), err);
        std::process::exit(1);
    }

    println!("{}", "✅ Configuration is valid".bright_green().bold());
    println!();
    println!("   {} {}", "Entry type:".bold(), config.policy.entry_type_name);
    println!(
        "   {} {}",
        "Protected types:".bold(),
        config.policy.protected_type_names.join(", ")
    );
    println!(
        "   {} {}",
        "Protected methods:".bold(),
        config.policy.protected_method_names.join(", ")
    );
    println!(
        "   {} {}",
        "Concurrent lookups:".bold(),
        config.concurrency.max_concurrent_lookups
    );

    Ok(())
}

fn load_configuration(path: Option<&Path>) -> anyhow::Result<RenameConfig> {
    match path {
        Some(path) => {
            let config = RenameConfig::from_yaml_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            info!(config = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(RenameConfig::default()),
    }
}

/// Write every document of `program` below `out`, keyed by its name.
///
/// All target paths are checked before the first file is written.
fn write_documents(program: &Program, out: &Path) -> anyhow::Result<usize> {
    let targets = program
        .documents()
        .map(|document| output_path(out, &document.name).map(|target| (target, document)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;

    for (target, document) in &targets {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, document.text.as_bytes())
            .with_context(|| format!("failed to write {}", target.display()))?;
    }
    Ok(targets.len())
}

/// Document names are relative paths; anything escaping `out` is refused.
fn output_path(out: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let relative = Path::new(name);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        anyhow::bail!("document name '{name}' is not a relative path inside the output directory");
    }
    Ok(out.join(relative))
}
