use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use cap_validator::config::{Config, OutputFormat};
use cap_validator::core::{FileLinkResolver, ValidationResult, Validator};
use cap_validator::profile::ProfileRegistry;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("cap-validate: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let registry = ProfileRegistry::with_builtin();
    if config.list_profiles {
        for code in registry.codes() {
            if let Some(profile) = registry.get(code) {
                println!("{code}\t{}\t{}", profile.name(), profile.documentation_url());
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let profiles = registry.select(&config.profiles)?;
    let (input, base) = match &config.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            (text, base)
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            (text, std::env::current_dir().context("Failed to read the current directory")?)
        }
    };

    let validator = Validator::new()
        .with_profiles(profiles)
        .with_link_resolver(Arc::new(FileLinkResolver::new(base)));
    let result = validator.validate(&input)?;

    let mut out = io::stdout().lock();
    match config.format {
        OutputFormat::Text => write_text(&mut out, &result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result).context("Failed to write report")?;
            writeln!(out)?;
        }
    }

    if result.contains_level_or_higher(config.fail_level) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn write_text(out: &mut impl Write, result: &ValidationResult) -> Result<()> {
    for finding in result.findings() {
        let reason = &finding.reason;
        writeln!(
            out,
            "{}: {} [{}] {} ({})",
            finding.line,
            reason.level(),
            reason.source(),
            reason.message(),
            reason.path()
        )?;
    }
    writeln!(
        out,
        "{}: {} finding(s), {} alert(s)",
        result.kind(),
        result.len(),
        result.valid_alerts().len()
    )?;
    Ok(())
}
