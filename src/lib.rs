// Copyright 2025 the Glyphforge Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyphforge: a hand-drawn glyph editor core and TrueType font compiler

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub mod boolean;
pub mod canvas;
pub mod compiler;
pub mod config;
pub mod data;
pub mod editing;
pub mod import;
pub mod model;
pub mod sampling;
pub mod settings;
pub mod tools;

use config::EditorConfig;
use data::GlyphEditor;

const USAGE: &str = "\
Usage:
  glyphforge compile <glyphs.json> <out.ttf> [font name]
  glyphforge import <font file> <characters> <glyphs.json>";

/// Entry point for the Glyphforge command line
pub fn run() -> Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("glyphforge=info")),
        )
        .init();

    let config = EditorConfig::load_or_default(Path::new(config::CONFIG_FILE_NAME))?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    handle_command_line_args(&args, config)
}

/// Dispatch a subcommand
fn handle_command_line_args(args: &[String], config: EditorConfig) -> Result<()> {
    match args {
        [cmd, glyphs, out, rest @ ..] if cmd == "compile" && rest.len() <= 1 => {
            let name = rest.first().map_or("Glyphforge", String::as_str);
            compile(Path::new(glyphs), Path::new(out), name, config)
        }
        [cmd, font, chars, glyphs] if cmd == "import" => {
            import(Path::new(font), chars, PathBuf::from(glyphs), config)
        }
        _ => bail!("{USAGE}"),
    }
}

fn compile(glyphs: &Path, out: &Path, name: &str, config: EditorConfig) -> Result<()> {
    let mut editor = GlyphEditor::load(glyphs, config)?;
    let bytes = editor
        .compile(name)
        .with_context(|| format!("Failed to compile {}", glyphs.display()))?;
    std::fs::write(out, &bytes).with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Wrote {} ({} bytes)", out.display(), bytes.len());
    Ok(())
}

/// Import characters from a font into a glyph map, creating it if needed
fn import(font: &Path, chars: &str, glyphs: PathBuf, config: EditorConfig) -> Result<()> {
    let data =
        std::fs::read(font).with_context(|| format!("Failed to read font {}", font.display()))?;
    let mut editor = if glyphs.exists() {
        GlyphEditor::load(&glyphs, config)?
    } else {
        GlyphEditor::new(Default::default(), config)
    };
    let missing = editor
        .import_font(&data, chars)
        .with_context(|| format!("Failed to import from {}", font.display()))?;
    if !missing.is_empty() {
        let missing: String = missing.into_iter().collect();
        tracing::warn!("No outline in {} for: {}", font.display(), missing);
    }
    editor.save(&glyphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unknown_commands_print_usage() {
        let err = handle_command_line_args(&args(&["draw"]), EditorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Usage"));
        assert!(handle_command_line_args(&args(&[]), EditorConfig::default()).is_err());
    }

    #[test]
    fn compile_reports_missing_input() {
        let err = handle_command_line_args(
            &args(&["compile", "/nonexistent/glyphs.json", "/nonexistent/out.ttf"]),
            EditorConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("glyphs.json"));
    }
}
