use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;
use cwsave_sdk::{CwsaveConfig, Discovery, Roster, SdkError, SystemBrowser};
use serde_json::json;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CwsaveConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CwsaveConfig::default(),
    };
    debug!(?config, "using search names");

    let browser = SystemBrowser::system(&config);
    match cli.command {
        Command::Locate => cmd_locate(&browser, cli.format),
        Command::List(args) => cmd_list(&browser, args, cli.format),
        Command::Show(args) => cmd_show(&browser, args, cli.format),
    }
}

fn cmd_locate(browser: &SystemBrowser, format: OutputFormat) -> anyhow::Result<()> {
    let resolution = browser.locate();
    if format == OutputFormat::Json {
        let value = match &resolution {
            Some(found) => json!({ "found": true, "candidate": found.candidate, "path": found.path }),
            None => json!({ "found": false, "browse_from": browser.browse_start_dir() }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match resolution {
        Some(found) => {
            println!("{} {}", "✓".green().bold(), found.path.display().to_string().bold());
            println!("  Found via: {}", found.candidate.to_string().cyan());
        }
        None => {
            println!("{} Save directory not found.", "✗".red().bold());
            print_browse_hint(browser);
        }
    }
    Ok(())
}

fn cmd_list(browser: &SystemBrowser, args: ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (database, roster) = open_roster(browser, args.db)?;

    if format == OutputFormat::Json {
        let value = json!({ "database": database, "characters": roster });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Characters in {}", database.display().to_string().bold());
    if roster.is_empty() {
        println!("  (none)");
    }
    for character in &roster {
        println!("  {} {}", format!("[{}]", character.index).yellow(), character);
    }
    Ok(())
}

fn cmd_show(browser: &SystemBrowser, args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (_, roster) = open_roster(browser, args.db)?;
    let Some(character) = roster.select(args.index) else {
        bail!(
            "no character at index {}; the database holds {}",
            args.index,
            roster.len()
        );
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(character)?);
        return Ok(());
    }

    println!("{}", character.name.bold());
    println!("  Class:          {}", character.class.to_string().cyan());
    println!("  Specialization: {}", character.specialization);
    println!("  Level:          {}", character.level);
    Ok(())
}

/// Load the roster from `--db`, or from the discovered save directory.
fn open_roster(browser: &SystemBrowser, db: Option<PathBuf>) -> anyhow::Result<(PathBuf, Roster)> {
    if let Some(path) = db {
        let roster = browser
            .load_database(&path)
            .map_err(|err| corrupted(&path.display().to_string(), err))?;
        return Ok((path, roster));
    }

    match browser.discover() {
        Ok(Discovery::Loaded { dir, roster }) => Ok((browser.database_path(&dir), roster)),
        Ok(Discovery::NoDatabase(dir)) => {
            bail!(
                "no character database at {}; pass --db to pick one",
                browser.database_path(&dir).display()
            )
        }
        Ok(Discovery::NotFound) => {
            print_browse_hint(browser);
            bail!("save directory not found; pass --db to pick a database")
        }
        Err(err) => Err(corrupted("the discovered database", err)),
    }
}

fn corrupted(what: &str, err: SdkError) -> anyhow::Error {
    if let Some(reason) = err.load_failure() {
        eprintln!("{}", "Database appears to be corrupted!".red().bold());
        eprintln!("  Reason: {}", reason.to_string().yellow());
    }
    anyhow::Error::new(err).context(format!("loading {what}"))
}

fn print_browse_hint(browser: &SystemBrowser) {
    if let Some(start) = browser.browse_start_dir() {
        println!("  Look for the character database under {}", start.display().to_string().dimmed());
    }
}
