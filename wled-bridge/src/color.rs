//! Color model conversions.
//!
//! Callers see hue/saturation in HSL terms; the device takes an RGB
//! triple derived from HSV. Both conversions are the standard
//! formulas, but the rounding is pinned down: `rgb_to_hsl` truncates
//! every output toward zero and `hsv_to_rgb` rounds channels to the
//! nearest integer. No clamping happens here; callers guarantee the
//! input ranges.

/// Converts an RGB triple (each channel 0-255) to HSL with h in
/// [0,360] and s, l in [0,100], truncated toward zero. The
/// achromatic case (max == min) yields h = 0, s = 0.

pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    // The scaled results can land just under an integer (the exact
    // hue of (0, 51, 153) is 220 but the arithmetic yields
    // 219.999...); nudging before truncation keeps exact values
    // exact. The smallest genuine fractional gap for 8-bit inputs is
    // around 1e-6, so the nudge can never cross it.
    const SNAP: f64 = 1e-9;

    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0, 0, (l * 100.0 + SNAP) as u8);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (
        (h / 6.0 * 360.0 + SNAP) as u16,
        (s * 100.0 + SNAP) as u8,
        (l * 100.0 + SNAP) as u8,
    )
}

/// Converts HSV coordinates (h in [0,360], s and v in [0,100]) to an
/// RGB triple with each channel rounded to the nearest value in
/// [0,255]. h = 360 wraps to 0.

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = (h % 360.0) / 60.0;
    let s = s / 100.0;
    let v = v / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_achromatic() {
        assert_eq!(rgb_to_hsl(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsl(255, 255, 255), (0, 0, 100));
        assert_eq!(rgb_to_hsl(128, 128, 128), (0, 0, 50));
    }

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsl(255, 0, 0), (0, 100, 50));
        assert_eq!(rgb_to_hsl(0, 255, 0), (120, 100, 50));
        assert_eq!(rgb_to_hsl(0, 0, 255), (240, 100, 50));
        assert_eq!(rgb_to_hsl(255, 255, 0), (60, 100, 50));
        assert_eq!(rgb_to_hsl(0, 255, 255), (180, 100, 50));
        assert_eq!(rgb_to_hsl(255, 0, 255), (300, 100, 50));
    }

    #[test]
    fn test_hsv_to_rgb() {
        assert_eq!(hsv_to_rgb(0.0, 0.0, 0.0), (0, 0, 0));
        assert_eq!(hsv_to_rgb(0.0, 0.0, 100.0), (255, 255, 255));
        assert_eq!(hsv_to_rgb(0.0, 100.0, 100.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 100.0, 100.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 100.0, 100.0), (0, 0, 255));
        assert_eq!(hsv_to_rgb(360.0, 100.0, 100.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(30.0, 100.0, 80.0), (204, 102, 0));
    }

    // Hues whose exact value is an integer degree must not lose a
    // degree to floating-point noise on the way to truncation.

    #[test]
    fn test_exact_hues_stay_exact() {
        assert_eq!(rgb_to_hsl(0, 51, 153), (220, 100, 30));
        assert_eq!(rgb_to_hsl(51, 0, 153), (260, 100, 30));
        assert_eq!(rgb_to_hsl(153, 51, 0), (20, 100, 30));
    }

    // Round-trip law. HSL and HSV saturation only agree when the
    // smallest channel is zero (or the color is achromatic), so the
    // grid is restricted to that family, with channel values in 20%
    // steps so the truncated percentages are exact.

    #[test]
    fn test_round_trip() {
        const STEPS: [u8; 6] = [0, 51, 102, 153, 204, 255];

        for &r in &STEPS {
            for &g in &STEPS {
                for &b in &STEPS {
                    if r.min(g).min(b) != 0 {
                        continue;
                    }

                    let (h, s, _) = rgb_to_hsl(r, g, b);
                    let v =
                        f64::from(u16::from(r.max(g).max(b))) / 255.0
                            * 100.0;
                    let (r2, g2, b2) =
                        hsv_to_rgb(f64::from(h), f64::from(s), v);

                    assert!(
                        i16::from(r).abs_diff(i16::from(r2)) <= 1
                            && i16::from(g).abs_diff(i16::from(g2)) <= 1
                            && i16::from(b).abs_diff(i16::from(b2)) <= 1,
                        "({}, {}, {}) round-tripped to ({}, {}, {})",
                        r,
                        g,
                        b,
                        r2,
                        g2,
                        b2
                    );
                }
            }
        }
    }
}
