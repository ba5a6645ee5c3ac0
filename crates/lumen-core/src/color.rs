/// Clamp an f32 channel value to [0,255] and quantize to a byte.
///
/// Every per-pixel stage routes its writes through this so no combination of
/// settings can wrap a channel.
pub fn clamp_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Unweighted mean of R, G, B, used as the brightness proxy for tonal
/// banding and the dramatic remap. Distinct from the Rec. 709 luminance
/// weights the color matrices use.
pub fn mean_luminance(r: u8, g: u8, b: u8) -> f32 {
    (r as f32 + g as f32 + b as f32) / 3.0
}

// ── Color matrix primitives ─────────────────────────────────────────────
//
// The base adjustment stage is a chain of standard filter primitives
// (CSS/SVG filter effects, W3C Filter Effects Module Level 1):
//
//   brightness -> contrast -> saturate -> sepia -> hue-rotate -> grayscale
//
// Each primitive is an affine map on the RGB vector: v' = M*v + o, with o
// in channel units (0..255). Affine maps compose, so the whole chain
// collapses to a single 3x3 matrix plus offset applied in one pass.

/// Affine color transform: `v' = m * v + offset`, channels in 0..255.
#[derive(Clone, Copy, Debug)]
pub struct ColorMatrix {
    pub m: [f32; 9],
    pub offset: [f32; 3],
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        offset: [0.0, 0.0, 0.0],
    };

    /// Compose so that `self` is applied first, then `next`.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let mut m = [0.0_f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = next.m[row * 3] * self.m[col]
                    + next.m[row * 3 + 1] * self.m[3 + col]
                    + next.m[row * 3 + 2] * self.m[6 + col];
            }
        }
        let mut offset = [0.0_f32; 3];
        for row in 0..3 {
            offset[row] = next.m[row * 3] * self.offset[0]
                + next.m[row * 3 + 1] * self.offset[1]
                + next.m[row * 3 + 2] * self.offset[2]
                + next.offset[row];
        }
        ColorMatrix { m, offset }
    }

    pub fn apply(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        [
            clamp_u8(self.m[0] * rf + self.m[1] * gf + self.m[2] * bf + self.offset[0]),
            clamp_u8(self.m[3] * rf + self.m[4] * gf + self.m[5] * bf + self.offset[1]),
            clamp_u8(self.m[6] * rf + self.m[7] * gf + self.m[8] * bf + self.offset[2]),
        ]
    }

    pub fn is_identity(&self) -> bool {
        let id = ColorMatrix::IDENTITY;
        self.m
            .iter()
            .zip(id.m.iter())
            .all(|(a, b)| (a - b).abs() < 1e-6)
            && self.offset.iter().all(|o| o.abs() < 1e-6)
    }
}

/// brightness(amount): plain channel scale, 1.0 = identity.
pub fn brightness(amount: f32) -> ColorMatrix {
    ColorMatrix {
        m: [amount, 0.0, 0.0, 0.0, amount, 0.0, 0.0, 0.0, amount],
        offset: [0.0, 0.0, 0.0],
    }
}

/// contrast(amount): scale around mid-gray, 1.0 = identity.
pub fn contrast(amount: f32) -> ColorMatrix {
    let intercept = 127.5 * (1.0 - amount);
    ColorMatrix {
        m: [amount, 0.0, 0.0, 0.0, amount, 0.0, 0.0, 0.0, amount],
        offset: [intercept, intercept, intercept],
    }
}

/// saturate(amount): 1.0 = identity, 0.0 = grayscale via the legacy
/// NTSC-ish weights the filter-effects spec defines for this primitive.
pub fn saturate(s: f32) -> ColorMatrix {
    ColorMatrix {
        m: [
            0.213 + 0.787 * s,
            0.715 - 0.715 * s,
            0.072 - 0.072 * s,
            0.213 - 0.213 * s,
            0.715 + 0.285 * s,
            0.072 - 0.072 * s,
            0.213 - 0.213 * s,
            0.715 - 0.715 * s,
            0.072 + 0.928 * s,
        ],
        offset: [0.0, 0.0, 0.0],
    }
}

/// sepia(amount): linear blend toward the full sepia matrix, 0.0 = identity.
pub fn sepia(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount;
    ColorMatrix {
        m: [
            0.393 + 0.607 * k,
            0.769 - 0.769 * k,
            0.189 - 0.189 * k,
            0.349 - 0.349 * k,
            0.686 + 0.314 * k,
            0.168 - 0.168 * k,
            0.272 - 0.272 * k,
            0.534 - 0.534 * k,
            0.131 + 0.869 * k,
        ],
        offset: [0.0, 0.0, 0.0],
    }
}

/// hue-rotate(degrees): rotation around the luminance axis.
pub fn hue_rotate(degrees: f32) -> ColorMatrix {
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    ColorMatrix {
        m: [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
        offset: [0.0, 0.0, 0.0],
    }
}

/// grayscale(amount): blend toward Rec. 709 luminance, 1.0 = full gray.
pub fn grayscale(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount;
    ColorMatrix {
        m: [
            0.2126 + 0.7874 * k,
            0.7152 - 0.7152 * k,
            0.0722 - 0.0722 * k,
            0.2126 - 0.2126 * k,
            0.7152 + 0.2848 * k,
            0.0722 - 0.0722 * k,
            0.2126 - 0.2126 * k,
            0.7152 - 0.7152 * k,
            0.0722 + 0.9278 * k,
        ],
        offset: [0.0, 0.0, 0.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_u8_bounds() {
        assert_eq!(clamp_u8(-10.0), 0);
        assert_eq!(clamp_u8(0.0), 0);
        assert_eq!(clamp_u8(127.4), 127);
        assert_eq!(clamp_u8(127.6), 128);
        assert_eq!(clamp_u8(255.0), 255);
        assert_eq!(clamp_u8(400.0), 255);
    }

    #[test]
    fn mean_luminance_is_unweighted() {
        assert_eq!(mean_luminance(255, 0, 0), 85.0);
        assert_eq!(mean_luminance(128, 128, 128), 128.0);
        assert_eq!(mean_luminance(0, 0, 0), 0.0);
    }

    #[test]
    fn neutral_primitives_are_identity() {
        assert!(brightness(1.0).is_identity());
        assert!(contrast(1.0).is_identity());
        assert!(saturate(1.0).is_identity());
        assert!(sepia(0.0).is_identity());
        assert!(hue_rotate(0.0).is_identity());
        assert!(grayscale(0.0).is_identity());
    }

    #[test]
    fn brightness_scales_channels() {
        let m = brightness(1.5);
        assert_eq!(m.apply(128, 128, 128), [192, 192, 192]);
        assert_eq!(m.apply(200, 200, 200), [255, 255, 255]);
    }

    #[test]
    fn contrast_pivots_on_mid_gray() {
        let m = contrast(2.0);
        // 127.5 is the fixed point; 128 barely moves.
        let [r, _, _] = m.apply(128, 128, 128);
        assert!((r as i32 - 128).abs() <= 1, "pivot drifted: {r}");
        // Dark values are pushed down, bright values up.
        assert!(m.apply(64, 64, 64)[0] < 64);
        assert!(m.apply(192, 192, 192)[0] > 192);
    }

    #[test]
    fn full_grayscale_of_red_is_luminance_gray() {
        let m = grayscale(1.0);
        let [r, g, b] = m.apply(255, 0, 0);
        assert_eq!(r, g);
        assert_eq!(g, b);
        // 0.2126 * 255 = 54.2
        assert!((r as i32 - 54).abs() <= 1, "expected ~54, got {r}");
    }

    #[test]
    fn full_sepia_of_white() {
        let m = sepia(1.0);
        let [r, g, b] = m.apply(255, 255, 255);
        // Row sums 1.351 / 1.203 / 0.937 against white: R and G clip, B does not.
        assert_eq!(r, 255);
        assert_eq!(g, 255);
        assert!((b as i32 - 239).abs() <= 1, "expected ~239, got {b}");
    }

    #[test]
    fn hue_rotation_full_circle_is_identity() {
        let m = hue_rotate(360.0);
        for rgb in [[255, 0, 0], [10, 200, 70], [128, 128, 128]] {
            let out = m.apply(rgb[0], rgb[1], rgb[2]);
            for ch in 0..3 {
                assert!(
                    (out[ch] as i32 - rgb[ch] as i32).abs() <= 1,
                    "360 degree rotation should be identity: {rgb:?} -> {out:?}"
                );
            }
        }
    }

    #[test]
    fn hue_rotation_preserves_gray() {
        let m = hue_rotate(90.0);
        let out = m.apply(100, 100, 100);
        for ch in out {
            assert!(
                (ch as i32 - 100).abs() <= 1,
                "gray should be on the rotation axis, got {out:?}"
            );
        }
    }

    #[test]
    fn composition_matches_sequential_application() {
        let first = brightness(1.3);
        let second = contrast(1.4);
        let composed = first.then(&second);

        for rgb in [[10_u8, 60, 200], [128, 128, 128], [255, 0, 90]] {
            let step = first.apply(rgb[0], rgb[1], rgb[2]);
            // Sequential application quantizes in between; allow 1 count.
            let sequential = second.apply(step[0], step[1], step[2]);
            let direct = composed.apply(rgb[0], rgb[1], rgb[2]);
            for ch in 0..3 {
                assert!(
                    (sequential[ch] as i32 - direct[ch] as i32).abs() <= 1,
                    "compose mismatch for {rgb:?}: {sequential:?} vs {direct:?}"
                );
            }
        }
    }

    #[test]
    fn composition_order_matters() {
        let a = brightness(2.0);
        let b = contrast(0.5);
        let ab = a.then(&b);
        let ba = b.then(&a);
        // Offsets differ because contrast's intercept is scaled by brightness
        // in one order but not the other.
        assert!((ab.offset[0] - ba.offset[0]).abs() > 1.0);
    }
}
