//! Spherical Mercator projection from longitude/latitude degrees to
//! screen coordinates.

use std::f64::consts::FRAC_PI_4;

use geo::{BoundingRect, Coord, MultiPolygon};

/// Latitudes are clamped to this bound so the projection stays finite.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A Mercator projection with a uniform scale and a screen translation.
///
/// A point projects to `scale * (lambda, -ln(tan(pi/4 + phi/2))) + translate`
/// with both angles in radians, so north is up on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    /// Pixels per radian of longitude.
    pub scale: f64,
    /// Screen position of longitude 0, latitude 0.
    pub translate: [f64; 2],
}

impl Mercator {
    /// Creates a projection with an explicit scale and translation.
    #[must_use]
    pub const fn new(scale: f64, translate: [f64; 2]) -> Self {
        Self { scale, translate }
    }

    /// Fits the projection so `geometry` fills a `width` x `height`
    /// canvas, leaving `padding` pixels on every side and centering the
    /// shorter axis.
    ///
    /// Returns `None` for empty or degenerate geometry.
    #[must_use]
    pub fn fit(
        geometry: &MultiPolygon<f64>,
        width: f64,
        height: f64,
        padding: f64,
    ) -> Option<Self> {
        let rect = geometry.bounding_rect()?;
        let min = raw(rect.min());
        let max = raw(rect.max());

        // Projected y is flipped, so min latitude maps to the larger y.
        let (x0, x1) = (min.x, max.x);
        let (y0, y1) = (max.y, min.y);

        let dx = x1 - x0;
        let dy = y1 - y0;
        if dx <= 0.0 || dy <= 0.0 {
            return None;
        }

        let scale = ((width - 2.0 * padding) / dx).min((height - 2.0 * padding) / dy);
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }

        let translate = [
            scale.mul_add(-(x0 + x1) / 2.0, width / 2.0),
            scale.mul_add(-(y0 + y1) / 2.0, height / 2.0),
        ];

        Some(Self { scale, translate })
    }

    /// Projects a longitude/latitude coordinate in degrees to screen space.
    #[must_use]
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let raw = raw(coord);
        Coord {
            x: self.scale.mul_add(raw.x, self.translate[0]),
            y: self.scale.mul_add(raw.y, self.translate[1]),
        }
    }
}

/// Unscaled, untranslated projection in radians with y pointing down.
fn raw(coord: Coord<f64>) -> Coord<f64> {
    let lambda = coord.x.to_radians();
    let phi = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    Coord {
        x: lambda,
        y: -(FRAC_PI_4 + phi / 2.0).tan().ln(),
    }
}
