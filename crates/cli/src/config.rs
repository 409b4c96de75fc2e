use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Terminal color depth for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Off,
    Ansi16,
    Ansi256,
    TrueColor,
}

/// Engine configuration applied once at session bootstrap.
///
/// These mirror the startup flags of a hosting analysis engine: target
/// selection (platform/arch/bits), output encoding, and analysis defaults.
/// The IO layer itself never reads them; they are carried by the frontend
/// and applied to its own output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Target OS name (e.g. `linux`, `darwin`, `windows`).
    pub platform: String,
    /// Target architecture (e.g. `x86`, `arm`, `mips`).
    pub arch: String,
    /// Pointer width in bits.
    pub bits: u32,
    /// Color depth for terminal output.
    pub color: ColorMode,
    /// Emit UTF-8 output (affects the hexdump glyph column).
    pub utf8: bool,
    /// Wrap command output for embedding in an HTML page.
    pub html: bool,
    /// Render numbers in JSON output as hex strings.
    pub json_hex_nums: bool,
    /// Emulate instructions while disassembling.
    pub emulate: bool,
    /// Derive strings from emulation.
    pub emu_strings: bool,
    /// Default calling convention assumed by analysis.
    pub calling_convention: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            platform: "linux".to_string(),
            arch: "x86".to_string(),
            bits: 64,
            color: ColorMode::TrueColor,
            utf8: true,
            html: false,
            json_hex_nums: true,
            emulate: true,
            emu_strings: true,
            calling_convention: "cdecl".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file; absent fields keep their
    /// defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
