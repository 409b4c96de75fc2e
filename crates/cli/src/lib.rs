use anyhow::{anyhow, Result};
use sha2::{Digest, Sha256};

pub mod commands;
pub mod config;
pub mod provider;

/// Parse a user-supplied address: `0x`-prefixed hex or plain decimal.
pub fn parse_address(s: &str) -> Result<u64> {
    tether_core::offset::parse_hex_offset(s).map_err(|_| anyhow!("Invalid address: {s:?}"))
}

/// Compute the SHA-256 of a byte slice and return it as a hex string.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

/// Escape text for embedding in an HTML `<pre>` block.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a classic three-column hexdump: offset, hex bytes, printable
/// characters. `base` is the address of the first byte; `utf8` selects the
/// substitute glyph for non-printable bytes and `color` highlights the
/// address column with ANSI escapes.
pub fn hexdump(base: u64, bytes: &[u8], utf8: bool, color: bool) -> String {
    let substitute = if utf8 { '·' } else { '.' };
    let mut out = String::new();

    for (row, chunk) in bytes.chunks(16).enumerate() {
        let addr = base.wrapping_add(row as u64 * 16);
        let addr = if color {
            format!("\x1b[33m{addr:#010x}\x1b[0m")
        } else {
            format!("{addr:#010x}")
        };
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { substitute })
            .collect();
        out.push_str(&format!("{addr}  {:<47}  {ascii}\n", hex.join(" ")));
    }

    out.trim_end_matches('\n').to_string()
}
