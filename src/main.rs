use preflight_dash::adapters::inbound;
use preflight_dash::adapters::outbound::console::{StderrSyncReporter, TerminalSurface};
use preflight_dash::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use preflight_dash::adapters::outbound::network::HttpSnapshotSource;
use preflight_dash::application::transition::{display_cell, TransitionScheduler};
use preflight_dash::application::use_cases::{
    PresentSnapshotUseCase, RenderSnapshotUseCase, SyncController,
};
use preflight_dash::cli::{Args, Command, RenderArgs, ServeArgs, WatchArgs};
use preflight_dash::config::{self, Overrides, WatchSettings};
use preflight_dash::ports::outbound::OutputPresenter;
use preflight_dash::shared::error::ExitCode;
use preflight_dash::shared::Result;
use std::process;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_args();

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Render(render) => run_render(render),
        Command::Watch(watch) => runtime()?.block_on(run_watch(watch)),
        Command::Serve(serve) => runtime()?.block_on(run_serve(serve)),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C, shutting down");
    }
}

fn run_render(args: RenderArgs) -> Result<()> {
    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };

    let use_case = RenderSnapshotUseCase::new(
        FileSystemReader::new(),
        presenter,
        StderrSyncReporter::new(),
    );
    use_case.execute(&args.input)?;
    Ok(())
}

async fn run_watch(args: WatchArgs) -> Result<()> {
    let file = match args.config.as_deref() {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    let settings = WatchSettings::resolve(
        file,
        Overrides {
            base_url: args.url,
            poll_interval_ms: args.interval_ms,
        },
    )?;

    let source = HttpSnapshotSource::with_options(
        &settings.base_url,
        &settings.state_path,
        &settings.probe_path,
        settings.request_timeout,
    )?;

    let reporter = if args.quiet {
        StderrSyncReporter::quiet()
    } else {
        StderrSyncReporter::new()
    };
    reporter_banner(&settings, args.quiet);

    let (writer, reader) = display_cell();
    let (transitions, scheduler) = TransitionScheduler::spawn(
        TerminalSurface::new(reader),
        writer,
        settings.transition_delay,
    );

    let controller = Arc::new(
        SyncController::new(
            source,
            PresentSnapshotUseCase::new(transitions.clone()),
            reporter,
        )
        .with_poll_interval(settings.poll_interval),
    );

    controller.run(shutdown_signal()).await;

    transitions.shutdown();
    scheduler.await?;
    eprintln!("👋 Stopped watching {}", settings.base_url);
    Ok(())
}

fn reporter_banner(settings: &WatchSettings, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!(
        "🛫 Watching {}{} every {} ms (Ctrl-C to stop)",
        settings.base_url.trim_end_matches('/'),
        settings.state_path,
        settings.poll_interval.as_millis()
    );
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    inbound::serve(&args.addr, &args.scan, shutdown_signal()).await
}
