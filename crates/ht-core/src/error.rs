use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Input or output path resolved to an empty string.
    #[error("Chemin {role} vide")]
    MissingPath {
        /// Which side of the pipeline: "input" or "output".
        role: &'static str,
    },

    /// A dot size of zero would leave every block without samples.
    #[error("Taille de point invalide : 0 (minimum 1)")]
    ZeroDotSize,

    /// The gray band would start below zero.
    #[error("gray_threshold ({gray_threshold}) supérieur à threshold ({threshold})")]
    GrayBandOverflow {
        /// White threshold.
        threshold: u8,
        /// Width of the gray band below it.
        gray_threshold: u8,
    },

    /// Buffer length does not match the announced dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
