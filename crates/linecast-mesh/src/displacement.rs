//! Displacement sources and ranges.
//!
//! A displacement source is a 2D scalar field sampled by texture
//! coordinate. The sampled magnitude pushes a vertex along its normal.

use linecast_math::Point2;

use crate::error::{MeshError, Result};

/// A 2D scalar field giving a displacement magnitude per texture coordinate.
///
/// Sampling must be pure: the same `uv` always yields the same value.
pub trait DisplacementSource {
    /// Displacement magnitude at `uv`.
    fn sample(&self, uv: &Point2) -> f64;
}

/// The same displacement everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDisplacement(pub f64);

impl DisplacementSource for ConstantDisplacement {
    fn sample(&self, _uv: &Point2) -> f64 {
        self.0
    }
}

/// A grid of texels sampled bilinearly, like a height texture.
///
/// Texel `(x, y)` is stored at `values[y * width + x]`; row 0 sits at
/// `v = 0`. Texel centers are at `((x + 0.5) / width, (y + 0.5) / height)`
/// and lookups outside `[0, 1]` clamp to the edge. The magnitude of a
/// sample is `texel * scale + bias`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
    scale: f64,
    bias: f64,
    /// Smallest and largest texel, before scale and bias.
    texel_bounds: (f64, f64),
}

impl DisplacementMap {
    /// Create a map from row-major texel values.
    pub fn new(
        width: usize,
        height: usize,
        values: Vec<f32>,
        scale: f64,
        bias: f64,
    ) -> Result<Self> {
        if width == 0 || height == 0 || values.len() != width * height {
            return Err(MeshError::DisplacementMapSize {
                width,
                height,
                len: values.len(),
            });
        }
        let texel_bounds = values
            .iter()
            .map(|&v| v as f64)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        Ok(Self {
            width,
            height,
            values,
            scale,
            bias,
            texel_bounds,
        })
    }

    /// Width in texels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Range of magnitudes this map can produce.
    ///
    /// Bilinear filtering never leaves the span of the stored texels, so
    /// the bounds are the smallest and largest texel mapped through scale
    /// and bias.
    pub fn range(&self) -> DisplacementRange {
        let (lo, hi) = self.texel_bounds;
        DisplacementRange::new(lo * self.scale + self.bias, hi * self.scale + self.bias)
    }

    fn texel(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x] as f64
    }

    /// Bilinear texel lookup, before scale and bias.
    fn filtered(&self, uv: &Point2) -> f64 {
        let fx = (uv.x * self.width as f64 - 0.5).clamp(0.0, (self.width - 1) as f64);
        let fy = (uv.y * self.height as f64 - 0.5).clamp(0.0, (self.height - 1) as f64);
        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let top = self.texel(x0, y0) * (1.0 - tx) + self.texel(x1, y0) * tx;
        let bottom = self.texel(x0, y1) * (1.0 - tx) + self.texel(x1, y1) * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

impl DisplacementSource for DisplacementMap {
    fn sample(&self, uv: &Point2) -> f64 {
        self.filtered(uv) * self.scale + self.bias
    }
}

/// Bounds on the displacement magnitude applied during one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementRange {
    /// Smallest magnitude.
    pub min: f64,
    /// Largest magnitude.
    pub max: f64,
}

impl DisplacementRange {
    /// Create a range; the bounds are ordered if given reversed.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The range containing only zero.
    pub fn zero() -> Self {
        Self { min: 0.0, max: 0.0 }
    }

    /// True if `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for DisplacementRange {
    fn default() -> Self {
        Self::zero()
    }
}

/// Supplies the displacement range in effect for the current draw.
///
/// Queried once per raycast.
pub trait DisplacementRangeProvider {
    /// The current range.
    fn displacement_range(&self) -> DisplacementRange;
}

impl DisplacementRangeProvider for DisplacementRange {
    fn displacement_range(&self) -> DisplacementRange {
        *self
    }
}

impl<F> DisplacementRangeProvider for F
where
    F: Fn() -> DisplacementRange,
{
    fn displacement_range(&self) -> DisplacementRange {
        self()
    }
}
