//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use aireadme_core::{GuidanceOptions, UpdateOptions, collect_guidance, update_section};
use aireadme_shared::{
    GuidanceRequest, GuidanceResponse, UpdateRequest, config_file_path, init_config, load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// aireadme — scoped AI_README guidance and editing.
#[derive(Parser)]
#[command(
    name = "aireadme",
    version,
    about = "Collect and edit scoped AI_README.md guidance across a repository.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Collect guidance from the AI_README scopes governing changed paths.
    Guidance {
        /// Changed file paths (relative to the root, or absolute).
        /// Empty collects every scope.
        paths: Vec<String>,

        /// Repository root (defaults to the working directory).
        #[arg(short, long)]
        root: Option<String>,

        /// Emit raw markdown bodies instead of the wrapped presentation.
        #[arg(long)]
        raw: bool,

        /// Print the full response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Insert or replace a section of a directory's AI_README.md.
    Update {
        /// Directory whose AI_README.md should be updated or created.
        target_dir: String,

        /// Title of the section to upsert.
        #[arg(short, long)]
        section: String,

        /// Markdown body for the section.
        #[arg(short, long)]
        body: Option<String>,

        /// Read the section body from a file instead.
        #[arg(long, conflicts_with = "body")]
        body_file: Option<PathBuf>,

        /// Headline for the top-level heading when creating the file.
        #[arg(long)]
        headline: Option<String>,

        /// Change summary appended as a changelog bullet.
        #[arg(long)]
        change_summary: Option<String>,

        /// Fail if the AI_README.md does not already exist.
        #[arg(long)]
        require_existing: bool,

        /// Print the full response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "aireadme=info",
        1 => "aireadme=debug",
        _ => "aireadme=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Guidance {
            paths,
            root,
            raw,
            json,
        } => cmd_guidance(paths, root, raw, json).await,
        Command::Update {
            target_dir,
            section,
            body,
            body_file,
            headline,
            change_summary,
            require_existing,
            json,
        } => {
            cmd_update(
                target_dir,
                section,
                body,
                body_file,
                headline,
                change_summary,
                require_existing,
                json,
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_guidance(
    paths: Vec<String>,
    root: Option<String>,
    raw: bool,
    json: bool,
) -> Result<()> {
    let config = load_config()?;
    let request = GuidanceRequest {
        changed_paths: paths,
        repository_root: root,
        raw,
    };

    info!(changed = request.changed_paths.len(), "collecting AI_README guidance");
    let response = collect_guidance(&request, &GuidanceOptions::from(&config)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", render_guidance(&response));
    Ok(())
}

/// Render a guidance response the way the tool's consumers expect it:
/// matched scopes, uncovered paths, then the aggregated guidance itself.
fn render_guidance(response: &GuidanceResponse) -> String {
    let mut lines: Vec<String> = Vec::new();

    if response.scopes.is_empty() {
        lines.push("No AI_README files discovered for the requested repository.".into());
    } else {
        lines.push("### Matched AI_README scopes".into());
        for (index, scope) in response.scopes.iter().enumerate() {
            lines.push(format!(
                "{}. `{}` → {}",
                index + 1,
                scope.directory,
                scope.absolute_path.display()
            ));
        }
    }

    if !response.missing_paths.is_empty() {
        lines.push(String::new());
        lines.push("### Paths without scoped AI_README coverage".into());
        for missing in &response.missing_paths {
            lines.push(format!("- {missing}"));
        }
    }

    let aggregated = response.aggregated_guidance.trim();
    let aggregated = if aggregated.is_empty() {
        "No AI_README guidance available. Consider creating AI_README.md files in the repository."
    } else {
        aggregated
    };

    format!("{}\n\n{aggregated}", lines.join("\n"))
}

#[allow(clippy::too_many_arguments)]
async fn cmd_update(
    target_dir: String,
    section: String,
    body: Option<String>,
    body_file: Option<PathBuf>,
    headline: Option<String>,
    change_summary: Option<String>,
    require_existing: bool,
    json: bool,
) -> Result<()> {
    let config = load_config()?;

    let body = match (body, body_file) {
        (Some(inline), None) => inline,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|e| eyre!("cannot read --body-file {}: {e}", path.display()))?,
        (None, None) => return Err(eyre!("one of --body or --body-file is required")),
        (Some(_), Some(_)) => unreachable!("clap rejects --body with --body-file"),
    };

    let request = UpdateRequest {
        target_dir,
        section,
        body,
        headline,
        change_summary,
        require_existing,
    };

    info!(target = %request.target_dir, section = %request.section, "updating AI_README");
    let response = update_section(&request, &UpdateOptions::from(&config)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("File: {}", response.file_path.display());
    println!(
        "Status: {}",
        if response.created { "created" } else { "updated" }
    );
    println!(
        "Sections updated: {}",
        if response.updated_sections.is_empty() {
            "none".to_string()
        } else {
            response.updated_sections.join(", ")
        }
    );
    println!(
        "Changelog appended: {}",
        if response.changelog_appended { "yes" } else { "no" }
    );
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created config at {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    println!("# {}", config_file_path()?.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
