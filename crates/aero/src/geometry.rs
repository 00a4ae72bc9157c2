//! Trapezoidal wing planform derived from weight, wing loading, and aspect ratio.

use serde::Serialize;
use uav_core::{DomainError, ensure_positive, ensure_within};

/// Straight-tapered wing planform. All lengths in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WingGeometry {
    pub area_m2: f64,
    pub span_m: f64,
    pub semi_span_m: f64,
    pub mean_chord_m: f64,
    pub root_chord_m: f64,
    pub tip_chord_m: f64,
    pub aspect_ratio: f64,
    pub taper_ratio: f64,
}

impl WingGeometry {
    /// Planform with the given area, aspect ratio, and tip/root chord ratio.
    pub fn from_area(
        area_m2: f64,
        aspect_ratio: f64,
        taper_ratio: f64,
    ) -> Result<Self, DomainError> {
        ensure_positive("wing area", area_m2)?;
        ensure_positive("aspect ratio", aspect_ratio)?;
        ensure_within("taper ratio", taper_ratio, 0.0, 1.0)?;

        let span_m = (aspect_ratio * area_m2).sqrt();
        let mean_chord_m = area_m2 / span_m;
        let root_chord_m = 2.0 * mean_chord_m / (1.0 + taper_ratio);
        Ok(Self {
            area_m2,
            span_m,
            semi_span_m: 0.5 * span_m,
            mean_chord_m,
            root_chord_m,
            tip_chord_m: taper_ratio * root_chord_m,
            aspect_ratio,
            taper_ratio,
        })
    }

    /// Planform sized so that `weight_n / area == wing_loading_n_m2`.
    pub fn from_weight(
        weight_n: f64,
        wing_loading_n_m2: f64,
        aspect_ratio: f64,
        taper_ratio: f64,
    ) -> Result<Self, DomainError> {
        ensure_positive("weight", weight_n)?;
        ensure_positive("wing loading", wing_loading_n_m2)?;
        Self::from_area(weight_n / wing_loading_n_m2, aspect_ratio, taper_ratio)
    }

    /// Wing loading carried by this planform at the given weight (N/m²).
    pub fn wing_loading(&self, weight_n: f64) -> f64 {
        weight_n / self.area_m2
    }

    /// Local chord at spanwise station `y_m` measured from the root, clamped to the semi-span.
    pub fn chord_at(&self, y_m: f64) -> f64 {
        let eta = (y_m / self.semi_span_m).clamp(0.0, 1.0);
        self.root_chord_m + (self.tip_chord_m - self.root_chord_m) * eta
    }
}
