//! CLI definitions for castmirror
//!
//! Kept separate from main.rs so the argument structure can be tested
//! without spawning the binary.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

/// Build clap styles: green headers and literals, red errors.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "castmirror")]
#[command(about = "Stream asciinema recordings over a Gemini-style protocol")]
#[command(
    long_about = "castmirror - replay asciinema recordings with their original timing.

Recordings are fetched by id (from asciinema.org by default, or from a local
directory of <id>.cast files), parsed, and streamed to clients chunk by chunk
at the pace they were recorded.

QUICK START:
    castmirror serve                   Listen on 127.0.0.1:1965
    castmirror play 22767              Replay a recording in this terminal
    castmirror meta 22767              Show a recording's metadata
    castmirror config show             Print the effective configuration

Requests are single lines such as gemini://localhost/22767, so plain nc
works as a client:
    printf 'gemini://localhost/22767\\r\\n' | nc localhost 1965"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Path to a config file (default: ~/.config/castmirror/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the protocol server
    #[command(long_about = "Run the protocol server.

Serves the front page, /<id> playback, /meta/<id> metadata, /robots.txt and
the program's own source under /source. Stops on Ctrl+C.

EXAMPLES:
    castmirror serve                        Use configured address
    castmirror serve --port 7000            Override the port
    castmirror serve --dir ~/casts          Serve local <id>.cast files")]
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(long, short)]
        port: Option<u16>,
        /// Serve recordings from this directory instead of over HTTP
        #[arg(long, value_name = "DIR")]
        dir: Option<String>,
        /// Coalescing window for playback chunks, in milliseconds
        #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
        frame_interval_ms: Option<u64>,
    },

    /// Replay a recording to stdout with its original timing
    #[command(long_about = "Replay a recording to stdout with its original timing.

The argument is either a path to a .cast file or a recording id, which is
fetched from the configured source.

EXAMPLES:
    castmirror play 22767                Fetch and replay recording 22767
    castmirror play demo.cast            Replay a local file
    castmirror play 7 --dir ~/casts      Replay ~/casts/7.cast")]
    Play {
        /// Recording id or path to a .cast file
        #[arg(value_name = "ID_OR_FILE")]
        target: String,
        /// Look up ids in this directory instead of over HTTP
        #[arg(long, value_name = "DIR")]
        dir: Option<String>,
    },

    /// Print a recording's metadata as JSON
    #[command(long_about = "Print a recording's metadata as JSON.

For version 1 recordings this is every top-level key except the frame list;
for version 2 recordings it is the header line.

EXAMPLES:
    castmirror meta 22767
    castmirror meta demo.cast")]
    Meta {
        /// Recording id or path to a .cast file
        #[arg(value_name = "ID_OR_FILE")]
        target: String,
        /// Look up ids in this directory instead of over HTTP
        #[arg(long, value_name = "DIR")]
        dir: Option<String>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}
