use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use ht_core::config::DitherOverrides;

/// Motif de sortie par défaut ; `%s` reçoit l'extension de l'entrée.
pub const DEFAULT_OUTPUT_PATTERN: &str = "output%s";

/// halftone — Bayer ordered-dither halftoning (white / gray / black dots).
#[derive(Parser, Debug)]
#[command(name = "halftone", version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF). Format détecté d'après le contenu.
    pub input: Option<PathBuf>,

    /// Fichier de sortie (toujours PNG). Chaque `%s` est remplacé par l'extension de l'entrée.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATTERN)]
    pub output: String,

    /// Fichier de configuration TOML (section [dither]).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seuil blanc : moyenne > seuil → blanc. Défaut 132.
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Côté d'un point en pixels (>= 1). Défaut 3.
    #[arg(long)]
    pub dot_size: Option<u32>,

    /// Largeur de la bande grise sous le seuil. Défaut 12.
    #[arg(long)]
    pub gray_threshold: Option<u8>,

    /// Intensité du gris intermédiaire. Défaut 128.
    #[arg(long)]
    pub gray_color: Option<u8>,

    /// Rendu parallèle par bandes (rayon).
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that the input argument names an existing, non-directory path.
    ///
    /// # Errors
    /// Returns an error if the argument is missing, the path cannot be
    /// inspected, or it is a directory.
    pub fn validate_input(&self) -> anyhow::Result<&Path> {
        let Some(input) = self.input.as_deref() else {
            anyhow::bail!("Fichier d'entrée requis : halftone <INPUT> [--output <PATTERN>]");
        };
        let meta = std::fs::metadata(input)
            .with_context(|| format!("Impossible d'accéder à {}", input.display()))?;
        if meta.is_dir() {
            anyhow::bail!("Le chemin d'entrée est un répertoire : {}", input.display());
        }
        Ok(input)
    }

    /// Dither options given on the command line; unset flags stay `None`.
    #[must_use]
    pub fn overrides(&self) -> DitherOverrides {
        DitherOverrides {
            threshold: self.threshold,
            dot_size: self.dot_size,
            gray_threshold: self.gray_threshold,
            gray_color: self.gray_color,
            parallel: self.parallel.then_some(true),
        }
    }

    /// Output path for `input` after pattern substitution.
    #[must_use]
    pub fn output_path(&self, input: &Path) -> PathBuf {
        resolve_output(&self.output, input)
    }
}

/// Remplace chaque `%s` du motif par l'extension de `input`, point inclus.
///
/// An input without extension substitutes the empty string.
#[must_use]
pub fn resolve_output(pattern: &str, input: &Path) -> PathBuf {
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    PathBuf::from(pattern.replace("%s", &ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("halftone").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn default_output_takes_input_extension() {
        let cli = parse(&["foo.png"]);
        assert_eq!(cli.output, DEFAULT_OUTPUT_PATTERN);
        assert_eq!(cli.output_path(Path::new("foo.png")), PathBuf::from("output.png"));
        assert_eq!(
            resolve_output(DEFAULT_OUTPUT_PATTERN, Path::new("dir/photo.jpg")),
            PathBuf::from("output.jpg")
        );
    }

    #[test]
    fn input_without_extension_drops_placeholder() {
        assert_eq!(
            resolve_output(DEFAULT_OUTPUT_PATTERN, Path::new("scan")),
            PathBuf::from("output")
        );
    }

    #[test]
    fn explicit_output_is_kept() {
        let cli = parse(&["in.jpg", "-o", "out/result.png"]);
        assert_eq!(cli.output_path(Path::new("in.jpg")), PathBuf::from("out/result.png"));
        let cli = parse(&["in.jpg", "--output", "dither%s"]);
        assert_eq!(cli.output_path(Path::new("in.jpg")), PathBuf::from("dither.jpg"));
    }

    #[test]
    fn flags_become_overrides() {
        let cli = parse(&["in.png", "--threshold", "140", "--dot-size", "4", "--parallel"]);
        let o = cli.overrides();
        assert_eq!(o.threshold, Some(140));
        assert_eq!(o.dot_size, Some(4));
        assert_eq!(o.gray_threshold, None);
        assert_eq!(o.parallel, Some(true));

        assert_eq!(parse(&["in.png"]).overrides(), DitherOverrides::default());
    }

    #[test]
    fn out_of_range_flag_is_a_usage_error() {
        assert!(Cli::try_parse_from(["halftone", "in.png", "--threshold", "300"]).is_err());
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = parse(&[]).validate_input().unwrap_err();
        assert!(err.to_string().contains("requis"));
    }

    #[test]
    fn directory_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&[dir.path().to_str().unwrap()]);
        let err = cli.validate_input().unwrap_err();
        assert!(err.to_string().contains("répertoire"));
    }

    #[test]
    fn unreadable_input_is_rejected() {
        let cli = parse(&["/nonexistent/halftone/in.png"]);
        assert!(cli.validate_input().is_err());
    }

    #[test]
    fn existing_file_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        std::fs::write(&path, b"x").unwrap();
        let cli = parse(&[path.to_str().unwrap()]);
        assert_eq!(cli.validate_input().unwrap(), path.as_path());
    }
}
