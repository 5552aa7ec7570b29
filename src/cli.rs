use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::inbound::{DEFAULT_SCAN_PATH, DEFAULT_SERVE_ADDR};

/// Live dashboard for Preflight system scans
#[derive(Parser, Debug)]
#[command(name = "preflight-dash")]
#[command(version)]
#[command(about = "Live dashboard for Preflight system scans", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Follow a producer and redraw whenever its snapshot changes
    Watch(WatchArgs),
    /// Render a snapshot file once and print the view model as JSON
    Render(RenderArgs),
    /// Serve a scan file over HTTP for `watch` clients
    Serve(ServeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct WatchArgs {
    /// Producer base URL (e.g. http://127.0.0.1:8787)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Polling interval of the freshness probe, in milliseconds
    #[arg(short, long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Path to a config file (defaults to ./preflight-dash.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only print frames and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ClapArgs, Debug)]
pub struct RenderArgs {
    /// Snapshot file to render
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ServeArgs {
    /// Scan file to serve
    #[arg(short, long, default_value = DEFAULT_SCAN_PATH)]
    pub scan: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_SERVE_ADDR)]
    pub addr: String,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
