use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tether_cli::commands::{list_backends_command, open_command, OpenArgs};
use tether_cli::config::EngineConfig;

/// Remote virtual block-IO session driver.
///
/// This CLI is a thin wrapper around `tether-core` (exposed in code as
/// `tether_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "tether",
    version,
    about = "Remote virtual block-IO session driver",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a byte stream through the emscripten:// backend and run commands.
    ///
    /// The stream is served by a file-backed provider: every read the
    /// session issues becomes an asynchronous fetch against the file at the
    /// last notified offset.
    Open {
        /// File whose bytes the provider serves.
        #[arg(long)]
        file: PathBuf,

        /// Optional JSON config file; the flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Target platform name recorded in the session config.
        #[arg(long)]
        platform: Option<String>,

        /// Target architecture recorded in the session config.
        #[arg(long)]
        arch: Option<String>,

        /// Pointer width in bits.
        #[arg(long)]
        bits: Option<u32>,

        /// Wrap command output in an HTML <pre> block.
        #[arg(long, default_value_t = false)]
        html: bool,

        /// Command to execute against the open session (repeatable).
        #[arg(short = 'c', long = "cmd")]
        commands: Vec<String>,
    },

    /// List the IO backends this binary can register.
    Backends {
        /// Emit the list as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Open { file, config, platform, arch, bits, html, commands } => {
            let mut cfg = match config {
                Some(path) => EngineConfig::from_json_file(&path)?,
                None => EngineConfig::default(),
            };
            if let Some(platform) = platform {
                cfg.platform = platform;
            }
            if let Some(arch) = arch {
                cfg.arch = arch;
            }
            if let Some(bits) = bits {
                cfg.bits = bits;
            }
            cfg.html = cfg.html || html;

            open_command(OpenArgs { file, config: cfg, commands })
        }
        Command::Backends { json } => list_backends_command(json),
    }
}
