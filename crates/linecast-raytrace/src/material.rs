//! The material inputs the engine reads.

use std::sync::Arc;

use linecast_mesh::DisplacementSource;

/// What the engine needs to know about a line material.
pub trait LineMaterial {
    /// Width of the line body, in world units.
    fn line_width(&self) -> f64;

    /// Width of the outline drawn around the line, in world units.
    fn outline_width(&self) -> f64;

    /// The displacement source, if the material displaces vertices.
    ///
    /// `None` both for materials that cannot displace and for displacing
    /// materials that currently have no source bound.
    fn displacement(&self) -> Option<&dyn DisplacementSource>;

    /// How far from the centerline a ray may pass and still hit.
    fn threshold(&self) -> f64 {
        self.line_width() + self.outline_width()
    }
}

/// A plain line material.
#[derive(Clone, Default)]
pub struct LineStyle {
    /// Width of the line body.
    pub line_width: f64,
    /// Width of the outline.
    pub outline_width: f64,
    /// Displacement source, if any.
    pub displacement: Option<Arc<dyn DisplacementSource>>,
}

impl LineStyle {
    /// An undisplaced line material.
    pub fn new(line_width: f64, outline_width: f64) -> Self {
        Self {
            line_width,
            outline_width,
            displacement: None,
        }
    }

    /// Attach a displacement source.
    pub fn with_displacement(mut self, source: impl DisplacementSource + 'static) -> Self {
        self.displacement = Some(Arc::new(source));
        self
    }
}

impl LineMaterial for LineStyle {
    fn line_width(&self) -> f64 {
        self.line_width
    }

    fn outline_width(&self) -> f64 {
        self.outline_width
    }

    fn displacement(&self) -> Option<&dyn DisplacementSource> {
        self.displacement.as_deref()
    }
}

impl std::fmt::Debug for LineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineStyle")
            .field("line_width", &self.line_width)
            .field("outline_width", &self.outline_width)
            .field("displaced", &self.displacement.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linecast_math::Point2;
    use linecast_mesh::ConstantDisplacement;

    #[test]
    fn test_threshold_sums_widths() {
        let style = LineStyle::new(2.0, 0.5);
        assert_eq!(style.threshold(), 2.5);
        assert!(style.displacement().is_none());
    }

    #[test]
    fn test_with_displacement() {
        let style = LineStyle::new(1.0, 0.0).with_displacement(ConstantDisplacement(3.0));
        let source = style.displacement().unwrap();
        assert_eq!(source.sample(&Point2::origin()), 3.0);
        assert!(format!("{style:?}").contains("displaced: true"));
    }
}
