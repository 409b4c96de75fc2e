use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tether_core::backends::EmscriptenBackend;
use tether_core::io::{BackendRegistry, Permissions};
use tether_core::session::IoSession;

use crate::commands::exec::execute_command;
use crate::config::EngineConfig;
use crate::html_escape;
use crate::provider::FileProvider;

/// Address used at startup. The path portion is empty on purpose: the
/// provider, not the URI, decides what the stream contains.
const BOOT_URI: &str = "emscripten:///";

pub struct OpenArgs {
    pub file: PathBuf,
    pub config: EngineConfig,
    pub commands: Vec<String>,
}

/// Bootstrap a session over a file-backed provider and pass the given
/// commands through it.
pub fn open_command(args: OpenArgs) -> Result<()> {
    // One cooperative context: the only suspension point anywhere below is
    // the provider fetch inside read.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to build IO runtime")?;
    runtime.block_on(run_session(args))
}

async fn run_session(args: OpenArgs) -> Result<()> {
    let config = &args.config;
    info!(
        "bootstrap: platform={} arch={} bits={} cc={}",
        config.platform, config.arch, config.bits, config.calling_convention
    );
    info!(
        "analysis defaults: emulate={} emu_strings={} json_hex_nums={}",
        config.emulate, config.emu_strings, config.json_hex_nums
    );

    let provider = Arc::new(FileProvider::open(&args.file)?);
    info!("serving {} through {BOOT_URI}", provider.path().display());

    let mut registry = BackendRegistry::new();
    registry.register(EmscriptenBackend::new(provider));

    let mut session = IoSession::new(registry);
    let fd = session.open(BOOT_URI, Permissions::all(), 0)?;

    for line in &args.commands {
        let out = execute_command(&mut session, fd, config, line).await?;
        if out.is_empty() {
            continue;
        }
        if config.html {
            println!("<pre>{}</pre>", html_escape(&out));
        } else {
            println!("{out}");
        }
    }

    session.close(fd)?;
    Ok(())
}
