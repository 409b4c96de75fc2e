use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tether_core::backends::EmscriptenBackend;
use tether_core::io::BackendRegistry;
use tether_core::provider::MemoryProvider;

#[derive(Debug, Serialize)]
pub struct BackendInfo {
    pub name: String,
    pub description: String,
}

/// Build the registry this binary ships with.
///
/// There is a single backend today; the registry exists so embedding hosts
/// can add their own schemes next to it.
pub fn default_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(EmscriptenBackend::new(Arc::new(MemoryProvider::new(Vec::new()))));
    registry
}

/// List available IO backends known to this binary.
pub fn list_backends_command(json: bool) -> Result<()> {
    let registry = default_registry();
    let entries: Vec<BackendInfo> = registry
        .names()
        .into_iter()
        .map(|name| {
            let description = match name {
                "emscripten" => {
                    "Remote byte stream served by an external asynchronous provider".to_string()
                }
                other => format!("Backend '{}'", other),
            };
            BackendInfo { name: name.to_string(), description }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Backends: (none)");
        return Ok(());
    }

    println!("Backends:");
    for entry in entries {
        println!("- {}: {}", entry.name, entry.description);
    }

    Ok(())
}
