use crate::board::model::RelPoint;

/// On-screen pixel point, origin at the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Surface dimensions in pixels, read from the host on every pointer event and
/// resize. The mapper never caches a size; a stale dimension cannot survive a
/// resize because each call receives the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

pub fn to_pixel(rel: RelPoint, size: SurfaceSize) -> PixelPoint {
    PixelPoint::new(rel.x * size.width.max(0.0), rel.y * size.height.max(0.0))
}

/// Inverse of [`to_pixel`], clamped into `[0, 1]` on both axes. A zero or
/// negative dimension maps to 0.0 on that axis rather than NaN/Infinity.
pub fn to_relative(px: PixelPoint, size: SurfaceSize) -> RelPoint {
    let x = if size.width > 0.0 {
        px.x / size.width
    } else {
        0.0
    };
    let y = if size.height > 0.0 {
        px.y / size.height
    } else {
        0.0
    };
    RelPoint::new(x, y).clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_within_epsilon() {
        let size = SurfaceSize::new(800.0, 600.0);
        for &(x, y) in &[(0.0, 0.0), (1.0, 1.0), (0.3, 0.4), (0.999, 0.001)] {
            let rel = RelPoint::new(x, y);
            let back = to_relative(to_pixel(rel, size), size);
            assert!((back.x - rel.x).abs() < 1e-6, "x {x}");
            assert!((back.y - rel.y).abs() < 1e-6, "y {y}");
        }
    }

    #[test]
    fn out_of_bounds_pixels_clamp() {
        let size = SurfaceSize::new(400.0, 400.0);
        let rel = to_relative(PixelPoint::new(-50.0, 900.0), size);
        assert_eq!(rel, RelPoint::new(0.0, 1.0));
    }

    #[test]
    fn degenerate_size_yields_zero_not_nan() {
        let rel = to_relative(PixelPoint::new(100.0, 100.0), SurfaceSize::new(0.0, 600.0));
        assert_eq!(rel.x, 0.0);
        assert!((rel.y - 100.0 / 600.0).abs() < 1e-6);

        let rel = to_relative(PixelPoint::new(100.0, 100.0), SurfaceSize::new(-1.0, 0.0));
        assert_eq!(rel, RelPoint::new(0.0, 0.0));
    }

    #[test]
    fn resize_uses_the_size_supplied_per_call() {
        let rel = RelPoint::new(0.5, 0.5);
        assert_eq!(to_pixel(rel, SurfaceSize::new(800.0, 600.0)), PixelPoint::new(400.0, 300.0));
        assert_eq!(to_pixel(rel, SurfaceSize::new(1600.0, 900.0)), PixelPoint::new(800.0, 450.0));
    }
}
