//! Offline rendering of a saved agent reply.

use crate::render::render_value;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;

/// Render a reply file (or stdin) to HTML on stdout.
pub fn run_render(input: Option<&str>) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let reply: Value = serde_json::from_str(&raw).context("Reply is not valid JSON")?;
    let html = render_value(&reply)
        .ok_or_else(|| anyhow::anyhow!("Reply must be a JSON array of conversation turns"))?;

    println!("{}", html);
    Ok(())
}
