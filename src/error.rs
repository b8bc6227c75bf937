//! # Errors
//!
//! A single error type is shared by every module in the crate. Drawing errors raised by
//! `plotters` are flattened into [`ChartError::Render`] so callers never have to name a
//! backend-specific error type.

use plotters::drawing::DrawingAreaErrorKind;
use std::error::Error;
use thiserror::Error;

/// Errors produced while resolving palettes, building charts or rendering them.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A palette name that is not in the registry. Non-fatal for chart entry points.
    #[error("Palette '{name}' not found. Available palettes: {}", available.join(", "))]
    UnknownPalette { name: String, available: Vec<String> },

    #[error("a gradient needs at least one color")]
    EmptyPalette,

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("invalid format template '{template}': {reason}")]
    InvalidFormat { template: String, reason: String },

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("no data to plot: {0}")]
    EmptyData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cannot parse '{0}' as a date")]
    InvalidDate(String),

    #[error("no documentation for '{0}'")]
    UnknownTopic(String),

    #[error("font family '{0}' not found")]
    FontNotFound(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ChartError {
    fn from(e: tokio::task::JoinError) -> Self {
        ChartError::Task(e.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ChartError>;
