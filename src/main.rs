use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gcp_samples::config::Config;
use gcp_samples::gcp::format_request_error;
use gcp_samples::{securitycenter, talent, Error};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Run the Cloud Talent Solution and Security Command Center samples
#[derive(Parser, Debug)]
#[command(name = "gcp-samples", version, about, long_about = None)]
struct Args {
    /// Log level for debugging (logs go to stderr)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a company's jobs and print histogram bucket counts
    HistogramSearch {
        /// GCP project to search in
        #[arg(short, long)]
        project: Option<String>,

        /// Company id, or a full `.../companies/{id}` resource name
        #[arg(short, long)]
        company: String,
    },
    /// Create a sample finding under a Security Command Center source
    CreateFinding {
        /// Source resource name, e.g. organizations/111122222444/sources/1234
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Persist defaults used by the other commands
    Configure {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        talent_endpoint: Option<String>,
        #[arg(long)]
        securitycenter_endpoint: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("gcp-samples started with log level: {:?}", level);

    Some(guard)
}

/// User-facing message for a failed command
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<Error>() {
        Some(sample_error) => match sample_error.request_error() {
            Some(request_error) => format_request_error(request_error),
            None => sample_error.to_string(),
        },
        None => format!("{err:#}"),
    }
}

async fn run(command: Command, mut config: Config) -> Result<()> {
    let options = config.client_options();

    match command {
        Command::HistogramSearch { project, company } => {
            let project = project.or_else(|| config.effective_project()).context(
                "No GCP project configured. Set GOOGLE_CLOUD_PROJECT or use --project flag",
            )?;
            let company_id = talent::company_id_from_name(&company).unwrap_or(&company);

            tracing::info!("Searching jobs of company {} in {}", company_id, project);
            let mut stdout = io::stdout().lock();
            talent::histogram_search(&mut stdout, &options, &project, company_id).await?;
            Ok(())
        }
        Command::CreateFinding { source } => {
            let source = source
                .or_else(|| config.source_name.clone())
                .context("No source configured. Use --source or `configure --source`")?;

            let finding = securitycenter::create_finding(&options, &source).await?;
            println!("{}", serde_json::to_string_pretty(&finding)?);
            Ok(())
        }
        Command::Configure {
            project,
            source,
            talent_endpoint,
            securitycenter_endpoint,
        } => {
            config.project_id = project.or(config.project_id);
            config.source_name = source.or(config.source_name);
            config.talent_endpoint = talent_endpoint.or(config.talent_endpoint);
            config.securitycenter_endpoint =
                securitycenter_endpoint.or(config.securitycenter_endpoint);
            config.save().context("Failed to save configuration")?;

            if let Some(path) = Config::config_path() {
                println!("Saved configuration to {}", path.display());
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args.command, Config::load()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            eprintln!("Error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}
