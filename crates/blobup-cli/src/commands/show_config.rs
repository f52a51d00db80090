//! Show-config command - print the resolved configuration

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::MergedConfig;
use crate::output::{OutputContext, OutputFormat};

/// Print the configuration the upload command would use
pub fn show_config(merged: &MergedConfig, source: Option<&Path>, ctx: &OutputContext) -> Result<()> {
    let source = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    match ctx.format {
        OutputFormat::Text => {
            let yaml = merged
                .uploader
                .to_yaml()
                .context("Failed to serialize configuration")?;
            ctx.print_kv(&[
                ("Config file", source),
                ("Output", merged.output.as_str().to_string()),
                ("Color", (!merged.no_color).to_string()),
            ]);
            println!();
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            ctx.print_json(&serde_json::json!({
                "config_file": source,
                "output": merged.output.as_str(),
                "no_color": merged.no_color,
                "uploader": merged.uploader,
            }));
        }
    }

    Ok(())
}
