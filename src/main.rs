//! CLI entry point for teamcreds
//!
//! Front-end over the controller: list, show, add, edit, delete, import
//! and export credentials kept in a `.properties` settings file.

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use teamcreds::config::PropertiesFileBackend;
use teamcreds::core::validator::{Confirm, EntryForm, Prompt, ValidationError};
use teamcreds::ui::{Controller, ControllerError};

const MASK: &str = "********";

#[derive(Parser)]
#[command(name = "teamcreds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file holding the credentials
    #[arg(
        short,
        long,
        global = true,
        env = "TEAMCREDS_SETTINGS",
        default_value = "~/.config/teamcreds/settings.properties"
    )]
    settings: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    /// Keep leading/trailing whitespace in entered fields
    #[arg(long, global = true)]
    no_strip: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Targets {
    /// Urls to act on
    #[arg(required_unless_present = "all")]
    urls: Vec<String>,

    /// Act on every stored url
    #[arg(long, conflicts_with = "urls")]
    all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored urls
    List {
        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one entry
    Show {
        url: String,

        /// Print the password instead of a mask
        #[arg(long)]
        reveal: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an entry
    Add {
        url: String,
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Enter an entry manually, optionally remembering it for next time
    Manual {
        url: String,
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Remember this url as the manual entry draft
        #[arg(long)]
        remember: bool,
    },

    /// Show the remembered manual entry
    Recall {
        /// Print the password instead of a mask
        #[arg(long)]
        reveal: bool,
    },

    /// Edit an entry; omitted fields keep their stored values
    Edit {
        url: String,

        /// Move the entry to a new url
        #[arg(long)]
        new_url: Option<String>,

        #[arg(long)]
        username: Option<String>,

        /// New password (use --password without a value to be prompted)
        #[arg(long, num_args = 0..=1)]
        password: Option<Option<String>>,
    },

    /// Delete entries
    Delete {
        #[command(flatten)]
        targets: Targets,
    },

    /// Export entries to a .properties file
    Export {
        file: PathBuf,

        #[command(flatten)]
        targets: Targets,

        /// Delete the entries after a successful export
        #[arg(long)]
        delete: bool,
    },

    /// Merge a .properties file into the store
    Import { file: PathBuf },

    /// List settings backups, newest first
    Backups,
}

/// Confirmation prompts on the terminal
struct TerminalConfirm {
    assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        if self.assume_yes {
            debug!(%prompt, "assuming yes");
            return true;
        }

        dialoguer::Confirm::new()
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

#[derive(Serialize)]
struct EntryView<'a> {
    url: &'a str,
    username: Option<&'a str>,
    password: Option<&'a str>,
    complete: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Tracing initialized with level: {}", level);

    let settings = expand_path(&cli.settings)?;
    let backend = PropertiesFileBackend::open(&settings)?;
    let mut controller = Controller::new(backend).context("Failed to load credentials")?;

    let mut confirm = TerminalConfirm { assume_yes: cli.yes };
    let strip = !cli.no_strip;

    let result = match cli.command {
        Commands::List { desc, json } => list_entries(&mut controller, desc, json),
        Commands::Show { url, reveal, json } => show_entry(&controller, &url, reveal, json),
        Commands::Add { url, username, password } => {
            let password = password_or_prompt(password)?;
            controller
                .add(&EntryForm::new(url, username, password, strip), &mut confirm)
                .map(|entry| println!("{} Added {}", "✓".green(), entry.url.cyan()))
                .map_err(anyhow::Error::from)
        }
        Commands::Manual {
            url,
            username,
            password,
            remember,
        } => {
            let password = password_or_prompt(password)?;
            controller
                .manual_import(&EntryForm::new(url, username, password, strip), remember, &mut confirm)
                .map(|entry| println!("{} Stored {}", "✓".green(), entry.url.cyan()))
                .map_err(anyhow::Error::from)
        }
        Commands::Recall { reveal } => recall_draft(&controller, reveal),
        Commands::Edit {
            url,
            new_url,
            username,
            password,
        } => edit_entry(&mut controller, &url, new_url, username, password, strip, &mut confirm),
        Commands::Delete { targets } => {
            select_targets(&mut controller, &targets)?;
            controller
                .delete_selected(&mut confirm)
                .map(|count| println!("{} Deleted {} entr{}", "✓".green(), count, plural_y(count)))
                .map_err(anyhow::Error::from)
        }
        Commands::Export { file, targets, delete } => {
            select_targets(&mut controller, &targets)?;
            let file = expand_path(&file)?;
            if delete {
                controller
                    .export_then_delete(&file, &mut confirm)
                    .map(|count| {
                        println!(
                            "{} Exported and deleted {} entr{} ({})",
                            "✓".green(),
                            count,
                            plural_y(count),
                            file.display()
                        )
                    })
                    .map_err(anyhow::Error::from)
            } else {
                controller
                    .export_selected(&file)
                    .map(|count| {
                        println!(
                            "{} Exported {} entr{} to {}",
                            "✓".green(),
                            count,
                            plural_y(count),
                            file.display()
                        )
                    })
                    .map_err(anyhow::Error::from)
            }
        }
        Commands::Import { file } => {
            let file = expand_path(&file)?;
            controller
                .import_file(&file)
                .map(|count| println!("{} Imported {} url{}", "✓".green(), count, if count == 1 { "" } else { "s" }))
                .map_err(anyhow::Error::from)
        }
        Commands::Backups => list_backups(controller.store().backend()),
    };

    match result {
        Err(e) if is_cancel(&e) => {
            println!("{} {}", "⚠".yellow(), e.to_string().yellow());
            Ok(())
        }
        other => other,
    }
}

/// Expand tilde in path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(path.to_str().ok_or_else(|| anyhow!("Invalid path encoding"))?);
    Ok(PathBuf::from(expanded.as_ref()))
}

fn is_cancel(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<ControllerError>(),
        Some(ControllerError::Cancelled) | Some(ControllerError::Validation(ValidationError::Declined(_)))
    )
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    password_or_else(password, || {
        dialoguer::Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .context("Failed to read password")
    })
}

/// Given passwords are used as typed, even when empty
fn password_or_else<F>(password: Option<String>, prompt: F) -> anyhow::Result<String>
where
    F: FnOnce() -> anyhow::Result<String>,
{
    match password {
        Some(password) => Ok(password),
        None => prompt(),
    }
}

/// Ticks the requested rows in the list model
fn select_targets(controller: &mut Controller<PropertiesFileBackend>, targets: &Targets) -> anyhow::Result<()> {
    let list = controller.list_mut();

    if targets.all {
        if list.selected_urls().len() != list.len() {
            list.toggle_select_all();
        }
        return Ok(());
    }

    for url in &targets.urls {
        if !list.set_selected(url, true) {
            bail!("No credentials stored for {}", url);
        }
    }
    Ok(())
}

fn list_entries(controller: &mut Controller<PropertiesFileBackend>, desc: bool, json: bool) -> anyhow::Result<()> {
    if desc {
        controller.list_mut().toggle_sort_direction();
    }
    let urls = controller.list().urls();

    if json {
        println!("{}", serde_json::to_string_pretty(&urls)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Credentials from: {}\n", controller.store().backend().path().display()).bold()
    );
    for url in &urls {
        let entry = controller.store().get(url)?;
        let username = entry.as_ref().and_then(|e| e.username.as_deref()).unwrap_or("-");
        let marker = match entry.as_ref().map(|e| e.is_complete()) {
            Some(true) => "✓".green(),
            _ => "!".yellow(),
        };
        println!("{} {} → {}", marker, url.as_str().cyan().bold(), username.green());
    }
    println!("\n{} Total: {} url{}", "✓".green(), urls.len(), if urls.len() == 1 { "" } else { "s" });

    Ok(())
}

fn show_entry(controller: &Controller<PropertiesFileBackend>, url: &str, reveal: bool, json: bool) -> anyhow::Result<()> {
    let entry = controller
        .store()
        .get(url)?
        .ok_or_else(|| anyhow!("No credentials stored for {}", url))?;

    let password = entry.password.as_deref().map(|p| if reveal { p } else { MASK });
    let view = EntryView {
        url: &entry.url,
        username: entry.username.as_deref(),
        password,
        complete: entry.is_complete(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}   {}", "url:".bold(), view.url.cyan());
    println!("{}  {}", "user:".bold(), view.username.unwrap_or("-"));
    println!("{}  {}", "pass:".bold(), view.password.unwrap_or("-"));
    if !view.complete {
        println!("{}", "⚠ Entry is incomplete".yellow());
    }
    Ok(())
}

fn recall_draft(controller: &Controller<PropertiesFileBackend>, reveal: bool) -> anyhow::Result<()> {
    match controller.recall_draft()? {
        Some(entry) => {
            println!("{}   {}", "url:".bold(), entry.url.cyan());
            println!("{}  {}", "user:".bold(), entry.username);
            println!("{}  {}", "pass:".bold(), if reveal { entry.password.as_str() } else { MASK });
        }
        None => println!("{}", "No remembered manual entry".dimmed()),
    }
    Ok(())
}

fn edit_entry(
    controller: &mut Controller<PropertiesFileBackend>,
    url: &str,
    new_url: Option<String>,
    username: Option<String>,
    password: Option<Option<String>>,
    strip: bool,
    confirm: &mut TerminalConfirm,
) -> anyhow::Result<()> {
    if !controller.list_mut().highlight(url) {
        bail!("No credentials stored for {}", url);
    }

    let mut form = controller.load_for_edit(strip)?;
    if let Some(new_url) = new_url {
        form.url = new_url;
    }
    if let Some(username) = username {
        form.username = username;
    }
    // `--password` without a value prompts
    if let Some(password) = password {
        form.password = password_or_prompt(password)?;
    }

    let entry = controller.edit_highlighted(&form, confirm)?;
    println!("{} Saved {}", "✓".green(), entry.url.cyan());
    Ok(())
}

fn list_backups(backend: &PropertiesFileBackend) -> anyhow::Result<()> {
    let backups = backend.list_backups()?;
    if backups.is_empty() {
        println!("{}", format!("No backups in {}", backend.backup_dir().display()).dimmed());
        return Ok(());
    }
    for backup in backups {
        println!("{}", backup.display());
    }
    Ok(())
}
