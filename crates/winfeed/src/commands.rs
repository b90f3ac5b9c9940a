use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use winfeed_core::capture::StatsSnapshot;
use winfeed_core::config::{
    FeedConfig, PartialCaptureConfig, PartialConfig, PartialServerConfig, PartialWindowConfig,
    ServerConfig, WindowConfig, load_hierarchy,
};
use winfeed_core::errors::WinfeedError;
use winfeed_core::events;
use winfeed_core::window::{WindowError, find_target_window, list_windows};
use winfeed_core::{
    CaptureLoop, CaptureTarget, ControlPage, FrameStore, HttpServer, ServeContext, XcapTarget,
};

use crate::table;

/// How long runtime shutdown waits for blocking work, such as the console read.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("serve", sub_matches)) => handle_serve_command(sub_matches),
        Some(("list", sub_matches)) => handle_list_command(sub_matches),
        _ => {
            eprintln!("Unknown command. Run 'winfeed --help' for usage.");
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_windows_started", json_output = json_output);

    match list_windows() {
        Ok(windows) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&windows)?);
            } else if windows.is_empty() {
                println!("No visible windows found.");
            } else {
                println!("Visible windows:");
                table::print_windows_table(&windows);
            }

            info!(event = "cli.list_windows_completed", count = windows.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list windows: {}", e);
            error!(event = "cli.list_windows_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_serve_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = matches.get_one::<PathBuf>("config");
    let overrides = overrides_from_matches(matches);

    info!(
        event = "cli.serve_started",
        config_path = ?config_path
    );

    print_banner();

    let config = match load_hierarchy(config_path.map(PathBuf::as_path), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            error!(
                event = "cli.serve_config_failed",
                error_code = e.error_code(),
                error = %e
            );
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let target = match find_target_window(&config.window) {
        Ok(target) => target,
        Err(e) => {
            print_window_lookup_failure(&e, &config.window);
            error!(
                event = "cli.serve_window_failed",
                error_code = e.error_code(),
                error = %e
            );
            events::log_app_error(&e);
            return Err(e.into());
        }
    };
    println!("Found window: {} (id {})", target.title(), target.id());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("winfeed-worker")
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            error!(event = "cli.serve_runtime_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let heading = config
        .page
        .heading
        .clone()
        .unwrap_or_else(|| target.title().to_string());
    let report = runtime.block_on(serve(
        config,
        XcapTarget::new(target),
        heading,
        wait_for_stop_request(),
    ));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);

    let stats = report.stats;
    println!(
        "Stopped. {} frames published, {} skipped, {} failed.",
        stats.published, stats.skipped, stats.failed
    );
    info!(
        event = "cli.serve_completed",
        stop = report.stop.as_str(),
        published = stats.published,
        failed = stats.failed
    );
    Ok(())
}

/// What ended a `serve` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopSource {
    Console,
    Interrupt,
    WindowClosed,
}

impl StopSource {
    fn as_str(self) -> &'static str {
        match self {
            StopSource::Console => "console",
            StopSource::Interrupt => "interrupt",
            StopSource::WindowClosed => "window_closed",
        }
    }
}

#[derive(Debug)]
struct ServeReport {
    stats: StatsSnapshot,
    stop: StopSource,
    /// Where the HTTP server listened; `None` if it failed to bind.
    addr: Option<SocketAddr>,
}

/// Run capture and HTTP serving until `stop` resolves or the window closes,
/// then cancel and join both tasks.
///
/// A server that fails to bind is reported, and capture keeps running until
/// the stop.
async fn serve<T, S>(config: FeedConfig, target: T, heading: String, stop: S) -> ServeReport
where
    T: CaptureTarget,
    S: Future<Output = StopSource>,
{
    let shutdown = CancellationToken::new();
    let store = FrameStore::new();

    let capture = CaptureLoop::new(target, store.clone(), &config.capture);
    let capture_task = tokio::spawn(capture.run(shutdown.clone()));

    let page = ControlPage::render(&heading, &config.server.image_path, config.page.refresh_ms);
    let ctx = Arc::new(ServeContext::new(store, page, &config.server));

    let (server_task, addr) = match HttpServer::bind(&config.server).await {
        Ok(server) => {
            let addr = match server.local_addr() {
                Ok(addr) => {
                    print_urls(&config.server, addr);
                    Some(addr)
                }
                Err(e) => {
                    warn!(event = "cli.serve_local_addr_failed", error = %e);
                    None
                }
            };
            (Some(tokio::spawn(server.run(ctx, shutdown.clone()))), addr)
        }
        Err(e) => {
            eprintln!("Failed to start HTTP server: {}", e);
            eprintln!("Capture keeps running, but nothing is being served.");
            error!(
                event = "cli.serve_bind_failed",
                error_code = e.error_code(),
                error = %e
            );
            events::log_app_error(&e);
            (None, None)
        }
    };

    println!("Press Enter to stop...");
    let stop = tokio::select! {
        source = stop => source,
        _ = shutdown.cancelled() => {
            println!("Target window closed.");
            StopSource::WindowClosed
        }
    };
    info!(event = "cli.serve_stop_requested", source = stop.as_str());

    events::log_app_shutdown();
    shutdown.cancel();

    let stats = match capture_task.await {
        Ok(stats) => stats,
        Err(e) => {
            error!(event = "cli.serve_capture_join_failed", error = %e);
            StatsSnapshot::default()
        }
    };
    if let Some(task) = server_task
        && let Err(e) = task.await
    {
        error!(event = "cli.serve_server_join_failed", error = %e);
    }

    ServeReport { stats, stop, addr }
}

/// Resolve on Enter or Ctrl-C.
///
/// A closed stdin is not a stop request; the process then runs until Ctrl-C
/// or the window closes.
async fn wait_for_stop_request() -> StopSource {
    let console = async {
        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            matches!(std::io::stdin().read_line(&mut line), Ok(n) if n > 0)
        });
        match read.await {
            Ok(true) => {}
            _ => std::future::pending::<()>().await,
        }
    };

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(event = "cli.serve_signal_unavailable", error = %e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = console => StopSource::Console,
        _ = interrupt => StopSource::Interrupt,
    }
}

/// CLI flags as a config layer that sits above every file.
fn overrides_from_matches(matches: &ArgMatches) -> PartialConfig {
    let titles: Option<Vec<String>> = matches
        .get_many::<String>("title")
        .map(|values| values.cloned().collect());
    let mut title_match = matches.get_one::<String>("match").cloned();

    // Explicit titles without --match drop the configured fallback substring.
    if titles.is_some() && title_match.is_none() {
        title_match = Some(String::new());
    }

    PartialConfig {
        window: PartialWindowConfig {
            titles,
            title_match,
        },
        capture: PartialCaptureConfig {
            interval_ms: matches.get_one::<u64>("interval-ms").copied(),
            jpeg_quality: matches.get_one::<u8>("quality").copied(),
            ..Default::default()
        },
        server: PartialServerConfig {
            bind: matches.get_one::<String>("bind").cloned(),
            port: matches.get_one::<u16>("port").copied(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn print_banner() {
    println!("=================================");
    println!("winfeed {}", env!("CARGO_PKG_VERSION"));
    println!("=================================");
}

fn print_window_lookup_failure(error: &WindowError, window: &WindowConfig) {
    match error {
        WindowError::WindowNotFound { .. } => {
            eprintln!("Target window not found.");
            eprintln!("Tried exact titles:");
            for title in &window.titles {
                eprintln!("- {}", title);
            }
            if let Some(pattern) = window.title_match.as_deref().filter(|p| !p.is_empty()) {
                eprintln!("and any title containing '{}' (case-insensitive).", pattern);
            }
            eprintln!("Make sure the window is open, or run 'winfeed list' to see what is visible.");
        }
        _ => eprintln!("Failed to look up target window: {}", error),
    }
}

fn print_urls(server: &ServerConfig, addr: SocketAddr) {
    println!("Serving on {}", addr);
    if addr.ip().is_unspecified() {
        println!("Open in a browser: http://localhost:{}/", addr.port());
    } else {
        println!("Open in a browser: http://{}/", addr);
    }
    println!("Latest frame: {}", server.image_path);
}
