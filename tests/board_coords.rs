use touchline::board::coords::{to_pixel, to_relative, PixelPoint, SurfaceSize};
use touchline::board::model::RelPoint;

#[test]
fn round_trip_holds_across_sizes_and_positions() {
    let sizes = [
        SurfaceSize::new(800.0, 600.0),
        SurfaceSize::new(1.0, 1.0),
        SurfaceSize::new(1920.0, 1080.0),
        SurfaceSize::new(333.0, 777.0),
    ];
    let coords = [0.0, 0.001, 0.25, 0.3, 0.5, 0.75, 0.999, 1.0];
    for size in sizes {
        for &x in &coords {
            for &y in &coords {
                let rel = RelPoint::new(x, y);
                let back = to_relative(to_pixel(rel, size), size);
                assert!(
                    (back.x - rel.x).abs() < 1e-6 && (back.y - rel.y).abs() < 1e-6,
                    "round trip failed for ({x}, {y}) on {size:?}: got {back:?}"
                );
            }
        }
    }
}

#[test]
fn pixels_outside_the_surface_clamp_into_unit_square() {
    let size = SurfaceSize::new(800.0, 600.0);
    let probes = [
        PixelPoint::new(-100.0, -100.0),
        PixelPoint::new(900.0, 700.0),
        PixelPoint::new(-1.0, 300.0),
        PixelPoint::new(400.0, 1e9),
    ];
    for px in probes {
        let rel = to_relative(px, size);
        assert!((0.0..=1.0).contains(&rel.x), "{px:?} -> {rel:?}");
        assert!((0.0..=1.0).contains(&rel.y), "{px:?} -> {rel:?}");
    }
}

#[test]
fn zero_and_negative_dimensions_never_produce_nan() {
    let degenerate = [
        SurfaceSize::new(0.0, 0.0),
        SurfaceSize::new(0.0, 600.0),
        SurfaceSize::new(800.0, -5.0),
    ];
    for size in degenerate {
        let rel = to_relative(PixelPoint::new(123.0, 456.0), size);
        assert!(rel.x.is_finite() && rel.y.is_finite(), "{size:?} -> {rel:?}");
        assert!((0.0..=1.0).contains(&rel.x));
        assert!((0.0..=1.0).contains(&rel.y));
    }
}

#[test]
fn resize_between_calls_takes_effect_immediately() {
    let rel = RelPoint::new(0.3, 0.4);
    let before = to_pixel(rel, SurfaceSize::new(800.0, 600.0));
    assert_eq!(before, PixelPoint::new(240.0, 240.0));

    // Same relative point after a resize lands elsewhere on screen but maps
    // back to the same normalized coordinate.
    let after = to_pixel(rel, SurfaceSize::new(400.0, 300.0));
    assert_eq!(after, PixelPoint::new(120.0, 120.0));
    let back = to_relative(after, SurfaceSize::new(400.0, 300.0));
    assert!((back.x - rel.x).abs() < 1e-6);
    assert!((back.y - rel.y).abs() < 1e-6);
}
