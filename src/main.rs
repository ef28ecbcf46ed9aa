use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bylint::config::BylintConfig;
use bylint::draft::ArticleDraft;
use bylint::logging::{init_logging, LoggingConfig};
use bylint::output::{JsonReportWriter, MarkdownReportWriter, RunMetadata};
use bylint::profile::{load_profile, load_profile_json, StyleProfile, TopicArchive};
use bylint::sanitize::sanitize;
use bylint::ui::{colors_enabled, ReportRenderer};
use bylint::validation::{ArticleValidator, Severity, ValidationReport};

/// Report format for `bylint check`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// Human-readable terminal report
    #[default]
    Text,
    /// JSON document with run metadata
    Json,
    /// Markdown report
    Markdown,
}

#[derive(Parser, Debug)]
#[command(name = "bylint")]
#[command(version)]
#[command(about = "Check article drafts against a publication's style guide")]
struct Cli {
    /// Disable colors (also respects NO_COLOR environment variable)
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a draft against a style guide
    Check {
        /// Publication style guide (Markdown, or JSON for `*.json`)
        #[arg(long, short = 'g', value_name = "FILE")]
        guide: PathBuf,

        /// Article draft (Markdown or plain text)
        #[arg(long, short = 'd', value_name = "FILE")]
        draft: PathBuf,

        /// Headline, replacing any `# Title` line in the draft
        #[arg(long, value_name = "TEXT")]
        headline: Option<String>,

        /// Topic archive JSON (overrides paths.archive from the config)
        #[arg(long, value_name = "FILE")]
        archive: Option<PathBuf>,

        /// Report format
        #[arg(long, short = 'f', default_value = "text", value_enum)]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Configuration file [default: ./bylint.toml if present]
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the profile parsed from a style guide as JSON
    Profile {
        /// Publication style guide (Markdown, or JSON for `*.json`)
        #[arg(long, short = 'g', value_name = "FILE")]
        guide: PathBuf,
    },
    /// Rewrite em dashes and filler phrases in a draft
    Sanitize {
        /// Article draft to rewrite
        #[arg(long, short = 'd', value_name = "FILE")]
        draft: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Process exit codes
mod exit_codes {
    use std::process::ExitCode;

    /// No finding reached the failure threshold
    pub fn passed() -> ExitCode {
        ExitCode::from(0)
    }

    /// At least one finding reached the failure threshold
    pub fn failed() -> ExitCode {
        ExitCode::from(1)
    }

    /// Unreadable input, malformed guide or bad configuration
    pub fn usage_error() -> ExitCode {
        ExitCode::from(2)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let use_color = colors_enabled(cli.no_color);

    init_logging(LoggingConfig::from_flags(cli.verbose, cli.quiet).with_ansi(use_color));

    match run(&cli, use_color) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {}", e);
            exit_codes::usage_error()
        }
    }
}

fn run(cli: &Cli, use_color: bool) -> Result<ExitCode, Box<dyn Error>> {
    match &cli.command {
        Commands::Check {
            guide,
            draft,
            headline,
            archive,
            format,
            output,
            config,
        } => {
            let config = BylintConfig::load(config.as_deref())?;
            let archive = archive.clone().or_else(|| config.paths.archive.clone());
            let profile = read_profile(guide, archive.as_deref())?;
            let draft = read_draft(draft, headline.as_deref())?;

            let validator = ArticleValidator::with_options(config.to_validator_options());
            tracing::debug!(options = ?validator.options(), "validator options");
            let report = validator.validate(&draft, &profile);
            let fail_on = config.validation.fail_on;

            if !cli.quiet || output.is_some() {
                write_report(&report, *format, output.as_deref(), fail_on, use_color)?;
            }

            Ok(if report.passes(fail_on) {
                exit_codes::passed()
            } else {
                exit_codes::failed()
            })
        }
        Commands::Profile { guide } => {
            let profile = read_profile(guide, None)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(exit_codes::passed())
        }
        Commands::Sanitize { draft, output } => {
            let text = read_file(draft, "draft")?;
            let cleaned = sanitize(&text);
            match output {
                Some(path) => {
                    fs::write(path, &cleaned)?;
                    if !cli.quiet {
                        eprintln!("Sanitized draft written to {}", path.display());
                    }
                }
                None => print!("{}", cleaned),
            }
            Ok(exit_codes::passed())
        }
    }
}

fn read_file(path: &Path, what: &str) -> Result<String, Box<dyn Error>> {
    fs::read_to_string(path)
        .map_err(|e| format!("cannot read {} {}: {}", what, path.display(), e).into())
}

fn read_profile(guide: &Path, archive: Option<&Path>) -> Result<StyleProfile, Box<dyn Error>> {
    let text = read_file(guide, "style guide")?;
    let profile = if is_json(guide) {
        load_profile_json(&text, json_publication_hint(guide).as_deref())
    } else {
        load_profile(&text)
    }
    .map_err(|e| format!("{}: {}", guide.display(), e))?;

    let Some(path) = archive else {
        return Ok(profile);
    };
    let archive = TopicArchive::load(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let topics = archive.topics_for(&profile.publication).to_vec();
    tracing::info!(
        publication = %profile.publication,
        topics = topics.len(),
        "merged topic archive"
    );
    Ok(profile.with_archived_topics(topics))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// `fastcompany_style.json` names `fastcompany`.
fn json_publication_hint(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.strip_suffix("_style").unwrap_or(stem);
    Some(name.to_string())
}

fn read_draft(path: &Path, headline: Option<&str>) -> Result<ArticleDraft, Box<dyn Error>> {
    let text = read_file(path, "draft")?;
    let draft = ArticleDraft::from_markdown(&text);
    Ok(match headline {
        Some(headline) => ArticleDraft::new(headline, draft.body),
        None => draft,
    })
}

fn write_report(
    report: &ValidationReport,
    format: ReportFormat,
    output: Option<&Path>,
    fail_on: Severity,
    use_color: bool,
) -> Result<(), Box<dyn Error>> {
    let metadata = RunMetadata::new(report, fail_on);
    match (format, output) {
        (ReportFormat::Json, Some(path)) => {
            JsonReportWriter::write_to_file(report, &metadata, path)?
        }
        (ReportFormat::Json, None) => {
            println!("{}", JsonReportWriter::to_json_string(report, &metadata)?)
        }
        (ReportFormat::Markdown, Some(path)) => {
            MarkdownReportWriter::write_to_file(report, &metadata, path)?
        }
        (ReportFormat::Markdown, None) => {
            print!("{}", MarkdownReportWriter::to_markdown_string(report, &metadata))
        }
        (ReportFormat::Text, Some(path)) => {
            let text = ReportRenderer::new().with_colors(false).render(report, fail_on);
            fs::write(path, text)?
        }
        (ReportFormat::Text, None) => {
            print!(
                "{}",
                ReportRenderer::new()
                    .with_colors(use_color)
                    .render(report, fail_on)
            )
        }
    }
    Ok(())
}
