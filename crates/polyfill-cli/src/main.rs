//! polyfill: lobby protocol polyfill tool
//!
//! - `polyfill versions` lists the bundled polyfillers
//! - `polyfill translate` runs a payload through the dispatcher, reading
//!   from a file or stdin and writing the result to stdout

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use polyfill_dispatch::{Direction, Dispatcher, MessageTitle, ProtocolVersion};
use polyfill_protocol::{ProtocolInfo, default_dispatcher};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "polyfill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `info` or `polyfill_dispatch=trace`
    #[arg(short, long, env = "POLYFILL_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered polyfillers and the supported version window
    Versions,

    /// Translate a payload between protocol revisions
    Translate {
        /// Protocol version spoken by the peer
        #[arg(long)]
        from: u32,

        /// Message title, e.g. `ChatMessage`
        #[arg(short, long)]
        message: String,

        /// Whether the payload was received from or is bound for the peer
        #[arg(short, long, value_enum, default_value_t = DirectionArg::Incoming)]
        direction: DirectionArg,

        /// Read the payload from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Incoming,
    Outgoing,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Incoming => Direction::Incoming,
            DirectionArg::Outgoing => Direction::Outgoing,
        }
    }
}

/// List the registry
fn list_versions(dispatcher: &Dispatcher, info: &ProtocolInfo) {
    println!(
        "protocol {} (bridges back to {})",
        info.current, info.min_supported
    );
    for (version, name) in dispatcher.registry().describe() {
        println!("  {} -> {}  {}", version, version.next(), name);
    }
}

/// Read the whole payload from a file or stdin
async fn read_payload(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("reading payload from {}", path.display())),
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("reading payload from stdin")?;
            Ok(buf)
        }
    }
}

async fn translate(
    dispatcher: &Dispatcher,
    info: &ProtocolInfo,
    version: ProtocolVersion,
    title: MessageTitle,
    direction: Direction,
    input: Option<&Path>,
) -> Result<()> {
    if !info.is_supported(version) {
        warn!(
            %version,
            "Peer version outside {}..={}, translating anyway",
            info.min_supported,
            info.current
        );
    }

    let payload = read_payload(input).await?;
    debug!(bytes = payload.len(), %title, %direction, "Read payload");

    let output = dispatcher
        .translate_or_passthrough(direction, version, &title, &payload)
        .with_context(|| format!("translating {} {} payload for {}", direction, title, version))?;

    match &output {
        Cow::Borrowed(_) => info!(%title, %version, "No translation needed"),
        Cow::Owned(_) => info!(%title, %version, "Translated payload"),
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log filter '{}'", args.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dispatcher = default_dispatcher()?;
    let info = ProtocolInfo::default();
    debug!(versions = ?dispatcher.versions(), "Loaded polyfill registry");

    match args.command {
        Command::Versions => list_versions(&dispatcher, &info),
        Command::Translate {
            from,
            message,
            direction,
            input,
        } => {
            translate(
                &dispatcher,
                &info,
                ProtocolVersion::new(from),
                MessageTitle::from(message),
                direction.into(),
                input.as_deref(),
            )
            .await?
        }
    }

    Ok(())
}
