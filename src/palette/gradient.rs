use super::Rgb;
use crate::error::{ChartError, Result};

/// A continuous color scale over `[0, 1]`, linearly interpolated between evenly spaced stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    name: String,
    stops: Vec<Rgb>,
}

impl Gradient {
    /// Build a gradient from one or more colors.
    pub fn new(name: impl Into<String>, stops: Vec<Rgb>) -> Result<Self> {
        if stops.is_empty() {
            return Err(ChartError::EmptyPalette);
        }
        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Color at fraction `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Rgb {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * last as f64;
        let idx = (pos.floor() as usize).min(last - 1);
        self.stops[idx].lerp(self.stops[idx + 1], pos - idx as f64)
    }

    /// Color for `value` mapped linearly from `[min, max]`.
    pub fn map(&self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.at(0.5);
        }
        self.at((value - min) / span)
    }
}
