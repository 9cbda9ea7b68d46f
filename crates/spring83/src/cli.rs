//! The `spring83` command line.
//!
//! ```text
//! spring83 get    [--server HOST] [--keypair FILE] [--verify] [PUBKEY]
//! spring83 put    [--server HOST] --keypair FILE [FILE|-]
//! spring83 keygen [--parallelism N] [--out-dir DIR] [--markers 23,24]
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use spring83_client::{Client, ClientConfig, Server};
use spring83_core::protocol::DEFAULT_SERVER;
use spring83_core::{PublicKey, VanityRule};
use spring83_keygen::{search_blocking, KeygenConfig, OsEntropy};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::keyfile::{load_keypair, save_keypair};
use crate::publisher::{read_content, Publisher};

#[derive(Debug, Parser)]
#[command(name = "spring83", version)]
#[command(about = "Publish and fetch Spring '83 boards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a board and print it to stdout
    Get(GetArgs),
    /// Publish a board from a file or stdin
    Put(PutArgs),
    /// Search for a new vanity keypair and write it to a file
    Keygen(KeygenArgs),
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Spring '83 server hostname
    #[arg(long, env = "SPRING83_SERVER", default_value = DEFAULT_SERVER)]
    pub server: Server,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Keypair file whose board to fetch (when PUBKEY is not given)
    #[arg(long, env = "SPRING83_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Check the board's signature against the key before printing
    #[arg(long)]
    pub verify: bool,

    /// Hex public key of the board to fetch
    pub pubkey: Option<String>,
}

#[derive(Debug, Args)]
pub struct PutArgs {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Keypair file to sign with
    #[arg(long, env = "SPRING83_KEYPAIR")]
    pub keypair: PathBuf,

    /// Content file, or `-` for stdin
    #[arg(default_value = "-")]
    pub file: String,
}

#[derive(Debug, Args)]
pub struct KeygenArgs {
    /// Worker threads (defaults to the number of cores)
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Directory to write the keypair file into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Accepted version markers, as two hex digits each
    #[arg(long, value_delimiter = ',', value_parser = parse_marker)]
    pub markers: Vec<u8>,
}

fn parse_marker(s: &str) -> Result<u8, String> {
    if s.len() != 2 {
        return Err(format!("marker must be two hex digits, got {s:?}"));
    }
    u8::from_str_radix(s, 16).map_err(|e| format!("invalid marker {s:?}: {e}"))
}

/// Run a parsed command, writing command output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Command::Get(args) => run_get(args, out).await,
        Command::Put(args) => run_put(args, out).await,
        Command::Keygen(args) => run_keygen(args, out).await,
    }
}

async fn run_get(args: GetArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let pubkey = match (&args.pubkey, &args.keypair) {
        (Some(hex), _) => PublicKey::from_hex(hex).context("parsing public key")?,
        (None, Some(path)) => load_keypair(path)?.public_key(),
        (None, None) => bail!("need a PUBKEY argument or --keypair"),
    };

    let client = Client::new(ClientConfig::default())?;
    let server = &args.server.server;

    let body = if args.verify {
        client
            .get_verified(server, &pubkey)
            .await
            .with_context(|| format!("fetching {} from {}", pubkey, server))?
            .board
            .into_bytes()
    } else {
        client
            .get(server, &pubkey.to_hex())
            .await
            .with_context(|| format!("fetching {} from {}", pubkey, server))?
            .to_vec()
    };

    out.write_all(&body)?;
    out.flush()?;
    Ok(())
}

async fn run_put(args: PutArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let key = load_keypair(&args.keypair)?;

    let content = if args.file == "-" {
        read_content(std::io::stdin().lock())?
    } else {
        let file = std::fs::File::open(&args.file)
            .with_context(|| format!("opening {}", args.file))?;
        read_content(file)?
    };

    let client = Client::new(ClientConfig::default())?;
    let publisher = Publisher::new(key, client, args.server.server)?;
    let board = publisher.publish(&content).await?;

    writeln!(
        out,
        "Published {} bytes to {}/{}",
        board.len(),
        publisher.server(),
        publisher.public_key()
    )?;
    Ok(())
}

async fn run_keygen(args: KeygenArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let parallelism = args
        .parallelism
        .unwrap_or_else(|| KeygenConfig::default().parallelism);
    let rule = if args.markers.is_empty() {
        VanityRule::default()
    } else {
        VanityRule::with_markers(args.markers)
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    info!(parallelism, markers = ?rule.markers(), "starting key generation, this can take some time");
    let outcome = search_blocking(cancel, Arc::new(OsEntropy), Arc::new(rule), parallelism).await?;

    let path = save_keypair(&args.out_dir, &outcome.key, Utc::now().date_naive())?;

    writeln!(out, "Generated key in {:?}", outcome.elapsed)?;
    writeln!(out, "Checked {} candidates", outcome.candidates)?;
    writeln!(out, "Pubkey: {}", outcome.key.public_key())?;
    writeln!(out, "Wrote: {}", path.display())?;
    Ok(())
}
