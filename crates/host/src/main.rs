//! Storybell trigger host.
//!
//! Stands in for the event-trigger infrastructure: seeds an in-memory document
//! store, reads document events as JSON lines and runs each one through the
//! dispatch handlers as an independent invocation.

mod config;
mod error;
mod feed;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use storybell_dispatch::Dispatcher;
use storybell_push::{FcmGateway, LogOnlyGateway, PushGateway};
use storybell_store::MemoryStore;
use storybell_worker::{DrainReport, InvocationPool};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use crate::config::HostConfig;
use crate::error::{HostError, Result};

/// Host command line arguments.
#[derive(Parser, Debug)]
#[command(name = "storybell-host")]
#[command(about = "Feed document events to the story notification handlers")]
struct Args {
	/// TOML config file
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// JSON object mapping document paths to initial documents
	#[arg(short, long, value_name = "PATH")]
	seed: Option<PathBuf>,

	/// Newline-delimited trigger events (defaults to stdin)
	#[arg(short, long, value_name = "PATH")]
	events: Option<PathBuf>,

	/// Accept every push without contacting FCM
	#[arg(long)]
	dry_run: bool,

	/// Print the final store contents as JSON
	#[arg(long)]
	dump: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();
	let config = match &args.config {
		Some(path) => HostConfig::load(path)?,
		None => HostConfig::default(),
	};

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			config.log_level.into()
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	info!("Starting storybell-host");
	let (store, report) = run(&args, &config).await?;
	info!(
		completed = report.completed,
		panicked = report.panicked,
		cancelled = report.cancelled,
		"event feed exhausted"
	);

	if args.dump {
		let dump = serde_json::to_string_pretty(&store.snapshot()).map_err(HostError::Dump)?;
		println!("{dump}");
	}
	Ok(())
}

/// Seeds the store, feeds every event and waits for all invocations.
async fn run(args: &Args, config: &HostConfig) -> Result<(Arc<MemoryStore>, DrainReport)> {
	let store = Arc::new(match &args.seed {
		Some(path) => load_seed(path)?,
		None => MemoryStore::new(),
	});

	let gateway: Arc<dyn PushGateway> = if args.dry_run {
		info!("dry run: pushes are logged, not sent");
		Arc::new(LogOnlyGateway::new())
	} else {
		Arc::new(FcmGateway::new(&config.fcm)?)
	};
	let dispatcher = Dispatcher::new(store.clone(), gateway, config.messages.clone());

	let input: Box<dyn AsyncBufRead + Unpin + Send> = match &args.events {
		Some(path) => {
			let file = tokio::fs::File::open(path).await.map_err(|source| HostError::Io {
				path: path.clone(),
				source,
			})?;
			Box::new(BufReader::new(file))
		}
		None => Box::new(BufReader::new(tokio::io::stdin())),
	};

	let mut pool = InvocationPool::new(config.max_in_flight);
	let mut lines = input.lines();
	let mut line_no = 0;
	while let Some(line) = lines.next_line().await.map_err(HostError::Events)? {
		line_no += 1;
		let Some(event) = feed::parse_line(line_no, &line) else {
			continue;
		};
		let dispatcher = dispatcher.clone();
		pool.submit(async move {
			let outcome = dispatcher.handle(&event).await;
			tracing::debug!(line = line_no, outcome = ?outcome, "invocation finished");
		})
		.await;
	}

	Ok((store, pool.drain().await))
}

fn load_seed(path: &Path) -> Result<MemoryStore> {
	let text = std::fs::read_to_string(path).map_err(|source| HostError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let seed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text).map_err(|source| HostError::SeedJson {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(MemoryStore::from_seed(seed)?)
}

#[cfg(test)]
mod tests;
