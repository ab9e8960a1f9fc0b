use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CoreError;

/// Seuil blanc par défaut.
pub const DEFAULT_THRESHOLD: u8 = 132;
/// Largeur par défaut de la bande grise sous le seuil.
pub const DEFAULT_GRAY_THRESHOLD: u8 = 12;
/// Côté par défaut d'un point (bloc), en pixels.
pub const DEFAULT_DOT_SIZE: u32 = 3;
/// Intensité par défaut du gris intermédiaire.
pub const DEFAULT_GRAY_COLOR: u8 = 128;

/// Paramètres validés du moteur de tramage. Immuables après construction.
///
/// Only obtainable through [`DitherOptions::default`] or
/// [`DitherOverrides::resolve`], so `dot_size >= 1` and
/// `gray_threshold <= threshold` always hold.
///
/// # Example
/// ```
/// use ht_core::config::DitherOptions;
/// let opts = DitherOptions::default();
/// assert_eq!(opts.threshold(), 132);
/// assert_eq!(opts.dot_size(), 3);
/// assert_eq!(opts.black_below(), 120);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DitherOptions {
    threshold: u8,
    dot_size: u32,
    gray_threshold: u8,
    gray_color: u8,
    parallel: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            dot_size: DEFAULT_DOT_SIZE,
            gray_threshold: DEFAULT_GRAY_THRESHOLD,
            gray_color: DEFAULT_GRAY_COLOR,
            parallel: false,
        }
    }
}

impl DitherOptions {
    /// Block averages strictly above this value are painted white.
    #[inline(always)]
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    #[inline(always)]
    #[must_use]
    pub fn dot_size(&self) -> u32 {
        self.dot_size
    }

    #[inline(always)]
    #[must_use]
    pub fn gray_threshold(&self) -> u8 {
        self.gray_threshold
    }

    #[inline(always)]
    #[must_use]
    pub fn gray_color(&self) -> u8 {
        self.gray_color
    }

    #[inline(always)]
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Lower edge of the gray band: averages strictly below it are black.
    #[inline(always)]
    #[must_use]
    pub fn black_below(&self) -> u8 {
        // gray_threshold <= threshold is checked in resolve()
        self.threshold - self.gray_threshold
    }
}

/// Valeurs optionnelles pour surcharge partielle (fichier TOML, flags CLI).
///
/// Unset fields fall back to the defaults in [`DitherOverrides::resolve`].
///
/// # Example
/// ```
/// use ht_core::config::DitherOverrides;
/// let opts = DitherOverrides { dot_size: Some(4), ..Default::default() }
///     .resolve()
///     .unwrap();
/// assert_eq!(opts.dot_size(), 4);
/// assert_eq!(opts.threshold(), 132);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DitherOverrides {
    pub threshold: Option<u8>,
    pub dot_size: Option<u32>,
    pub gray_threshold: Option<u8>,
    pub gray_color: Option<u8>,
    pub parallel: Option<bool>,
}

impl DitherOverrides {
    /// Layer `over` on top of `self`: every field set in `over` wins.
    #[must_use]
    pub fn merge(self, over: Self) -> Self {
        Self {
            threshold: over.threshold.or(self.threshold),
            dot_size: over.dot_size.or(self.dot_size),
            gray_threshold: over.gray_threshold.or(self.gray_threshold),
            gray_color: over.gray_color.or(self.gray_color),
            parallel: over.parallel.or(self.parallel),
        }
    }

    /// Apply defaults for unset fields, then validate.
    ///
    /// # Errors
    /// [`CoreError::ZeroDotSize`] for `dot_size == 0`,
    /// [`CoreError::GrayBandOverflow`] when `gray_threshold > threshold`.
    pub fn resolve(self) -> Result<DitherOptions, CoreError> {
        let opts = DitherOptions {
            threshold: self.threshold.unwrap_or(DEFAULT_THRESHOLD),
            dot_size: self.dot_size.unwrap_or(DEFAULT_DOT_SIZE),
            gray_threshold: self.gray_threshold.unwrap_or(DEFAULT_GRAY_THRESHOLD),
            gray_color: self.gray_color.unwrap_or(DEFAULT_GRAY_COLOR),
            parallel: self.parallel.unwrap_or(false),
        };
        if opts.dot_size == 0 {
            return Err(CoreError::ZeroDotSize);
        }
        if opts.gray_threshold > opts.threshold {
            return Err(CoreError::GrayBandOverflow {
                threshold: opts.threshold,
                gray_threshold: opts.gray_threshold,
            });
        }
        Ok(opts)
    }
}

/// Configuration complète d'une exécution : chemins + paramètres de tramage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HalftoneConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dither: DitherOptions,
}

impl HalftoneConfig {
    /// Start a builder with every field unset.
    ///
    /// # Example
    /// ```
    /// use ht_core::config::HalftoneConfig;
    /// let cfg = HalftoneConfig::builder()
    ///     .input("photo.jpg")
    ///     .output("output.jpg")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(cfg.dither.gray_color(), 128);
    /// ```
    #[must_use]
    pub fn builder() -> HalftoneConfigBuilder {
        HalftoneConfigBuilder::default()
    }
}

/// Builder pour [`HalftoneConfig`]. Validation unique dans `build()`.
#[derive(Clone, Debug, Default)]
pub struct HalftoneConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    dither: DitherOverrides,
}

impl HalftoneConfigBuilder {
    #[must_use]
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Layer dither overrides; later calls win field by field.
    #[must_use]
    pub fn dither(mut self, overrides: DitherOverrides) -> Self {
        self.dither = self.dither.merge(overrides);
        self
    }

    /// Resolve defaults and validate.
    ///
    /// # Errors
    /// [`CoreError::MissingPath`] for an unset or empty path, plus anything
    /// [`DitherOverrides::resolve`] rejects.
    pub fn build(self) -> Result<HalftoneConfig, CoreError> {
        let input = non_empty(self.input, "input")?;
        let output = non_empty(self.output, "output")?;
        let dither = self.dither.resolve()?;
        Ok(HalftoneConfig {
            input,
            output,
            dither,
        })
    }
}

fn non_empty(path: Option<PathBuf>, role: &'static str) -> Result<PathBuf, CoreError> {
    match path {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        _ => Err(CoreError::MissingPath { role }),
    }
}

/// Structure TOML intermédiaire, toutes les sections optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    dither: Option<DitherOverrides>,
}

/// Charge un fichier TOML et retourne les surcharges qu'il contient.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ht_core::config::load_config;
/// use std::path::Path;
/// let overrides = load_config(Path::new("halftone.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DitherOverrides> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let overrides = parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {overrides:?}", path.display());
    Ok(overrides)
}

fn parse_config(content: &str) -> Result<DitherOverrides> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.dither.unwrap_or_default())
}
