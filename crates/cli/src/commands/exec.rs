use anyhow::{bail, Result};
use tether_core::io::{SEEK_CUR, SEEK_END, SEEK_SET};
use tether_core::session::IoSession;

use crate::config::{ColorMode, EngineConfig};
use crate::{hexdump, parse_address, sha256_bytes};

/// Execute one passthrough command against an open session and return its
/// textual output.
///
/// Command set:
/// - `s <addr>`   — seek to an absolute address
/// - `s+ <n>` / `s- <n>` — relative seek
/// - `s end`      — seek to the unbounded-end sentinel
/// - `r <n>`      — read n bytes, print as contiguous hex
/// - `px <n>`     — read n bytes, print as a hexdump
/// - `sha256 <n>` — read n bytes, print their SHA-256 digest
/// - `i`          — session info (URI, offset, backends)
pub async fn execute_command(
    session: &mut IoSession,
    fd: i32,
    config: &EngineConfig,
    line: &str,
) -> Result<String> {
    let mut parts = line.split_whitespace();
    let Some(op) = parts.next() else {
        return Ok(String::new());
    };
    let arg = parts.next();

    match op {
        "s" => {
            let Some(arg) = arg else { bail!("s requires an address or 'end'") };
            let new_off = if arg == "end" {
                session.seek(fd, 0, SEEK_END)?
            } else {
                session.seek(fd, parse_address(arg)?, SEEK_SET)?
            };
            Ok(format!("0x{new_off:x}"))
        }
        "s+" | "s-" => {
            let Some(arg) = arg else { bail!("{op} requires a byte count") };
            let mut delta = parse_address(arg)?;
            if op == "s-" {
                delta = (delta as i64).wrapping_neg() as u64;
            }
            let new_off = session.seek(fd, delta, SEEK_CUR)?;
            Ok(format!("0x{new_off:x}"))
        }
        "r" | "px" | "sha256" => {
            let Some(arg) = arg else { bail!("{op} requires a byte count") };
            let count = parse_address(arg)? as usize;
            let base = session.offset();

            let mut buf = vec![0u8; count];
            let n = session.read(fd, &mut buf).await?;
            if n < 0 {
                bail!("Read failed at 0x{base:x}");
            }
            buf.truncate(n as usize);

            // ANSI coloring makes no sense inside an HTML <pre> wrapper.
            let color = config.color != ColorMode::Off && !config.html;
            Ok(match op {
                "r" => buf.iter().map(|b| format!("{b:02x}")).collect(),
                "px" => hexdump(base, &buf, config.utf8, color),
                _ => sha256_bytes(&buf),
            })
        }
        "i" => Ok(format!(
            "uri: {}\noffset: 0x{:x}\nbackends: {}",
            session.uri(fd)?,
            session.offset(),
            session.backend_names().join(", ")
        )),
        other => bail!("Unknown command: {other}"),
    }
}
