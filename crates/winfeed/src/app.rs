use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("winfeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve a live view of one desktop window over HTTP")
        .long_about(
            "winfeed finds a window by title, captures it about 30 times a second, and serves \
             the latest frame as a JPEG together with a small HTML page that keeps refreshing \
             it. Any browser on the network can watch.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // Serve subcommand
        .subcommand(
            Command::new("serve")
                .about("Capture a window and serve it until stopped")
                .arg(
                    Arg::new("title")
                        .long("title")
                        .short('t')
                        .help("Exact window title to look for (repeatable, tried in order)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("match")
                        .long("match")
                        .short('m')
                        .help("Case-insensitive title substring used when no exact title matches"),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .help("TCP port to listen on (default: 8080)")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .help("Address to listen on (default: 0.0.0.0)"),
                )
                .arg(
                    Arg::new("quality")
                        .long("quality")
                        .short('q')
                        .help("JPEG quality (1-100, default: 70)")
                        .value_parser(clap::value_parser!(u8).range(1..=100)),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .help("Milliseconds between captures (default: 33)")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Read configuration from this file on top of the default locations")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        // List subcommand
        .subcommand(
            Command::new("list")
                .about("List visible windows to pick a title from")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}
