use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use ht_core::config::{DitherOverrides, HalftoneConfig};

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider l'entrée
    let input = cli.validate_input()?;

    // 4. Résoudre la config : défauts < fichier TOML < flags
    let config = resolve_config(&cli, input)?;

    // 5. Pipeline
    pipeline::run(&config)?;
    Ok(())
}

/// Merge defaults, the optional TOML file and CLI flags into a validated config.
fn resolve_config(cli: &cli::Cli, input: &Path) -> Result<HalftoneConfig> {
    let from_file = match cli.config.as_deref() {
        Some(path) => ht_core::config::load_config(path)?,
        None => DitherOverrides::default(),
    };
    HalftoneConfig::builder()
        .input(input)
        .output(cli.output_path(input))
        .dither(from_file)
        .dither(cli.overrides())
        .build()
        .context("Options invalides")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let toml = dir.path().join("halftone.toml");
        std::fs::write(&toml, "[dither]\nthreshold = 150\ndot_size = 5\n").unwrap();

        let cli = cli::Cli::try_parse_from([
            "halftone",
            "photo.jpg",
            "--config",
            toml.to_str().unwrap(),
            "--dot-size",
            "2",
        ])
        .unwrap();
        let config = resolve_config(&cli, Path::new("photo.jpg")).unwrap();
        assert_eq!(config.dither.threshold(), 150);
        assert_eq!(config.dither.dot_size(), 2);
        assert_eq!(config.output, Path::new("output.jpg"));
    }

    #[test]
    fn zero_dot_size_is_invalid() {
        let cli = cli::Cli::try_parse_from(["halftone", "in.png", "--dot-size", "0"]).unwrap();
        let err = resolve_config(&cli, Path::new("in.png")).unwrap_err();
        assert!(format!("{err:#}").contains("Taille de point invalide"));
    }

    #[test]
    fn empty_output_is_invalid() {
        let cli = cli::Cli::try_parse_from(["halftone", "in.png", "-o", ""]).unwrap();
        assert!(resolve_config(&cli, Path::new("in.png")).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli =
            cli::Cli::try_parse_from(["halftone", "in.png", "-c", "/nonexistent/halftone.toml"])
                .unwrap();
        assert!(resolve_config(&cli, Path::new("in.png")).is_err());
    }
}
