//! Blackbody color science: temperature → CIE chromaticity → linear sRGB → 8-bit display color.

/// Magnitude mapped to the dimmest display shade.
const DIM_MAGNITUDE: f64 = 5.0;
/// Magnitude mapped to full brightness.
const BRIGHT_MAGNITUDE: f64 = -3.0;
/// Floor for the brightness factor so faint stars stay visible.
const MIN_BRIGHTNESS: f64 = 0.1;

/// A color in linear (not gamma-compressed) sRGB.
///
/// Channels are unbounded: a blackbody normalized to luminance `Y = 1` commonly has
/// one channel above 1.0 and, for very hot or cool temperatures, one below 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A gamma-compressed sRGB color quantized to 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const WHITE: DisplayColor = DisplayColor {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// CIE 1931 XYZ to linear sRGB (D65).
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            r: 3.2406 * x - 1.5372 * y - 0.4986 * z,
            g: -0.9689 * x + 1.8758 * y + 0.0415 * z,
            b: 0.0557 * x - 0.2040 * y + 1.0570 * z,
        }
    }

    /// Color of a blackbody at `kelvin`, normalized to luminance `Y = 1`.
    ///
    /// Uses a rational-polynomial approximation of the Planckian locus in
    /// CIE 1960 UCS (u, v), converted to CIE 1931 (x, y).
    pub fn from_temperature(kelvin: f64) -> Self {
        let t = kelvin;
        let t2 = t * t;
        let u = (0.860117757 + 1.5411825e-4 * t + 1.28641212e-7 * t2)
            / (1.0 + 8.42420235e-4 * t + 7.08145163e-7 * t2);
        let v = (0.317398726 + 4.22806245e-5 * t + 4.20481691e-8 * t2)
            / (1.0 - 2.89741816e-5 * t + 1.61456053e-7 * t2);

        let denom = 2.0 * u - 8.0 * v + 4.0;
        let x = 3.0 * u / denom;
        let y = 2.0 * v / denom;
        let z = 1.0 - x - y;

        let lum = 1.0_f64;
        Self::from_xyz((lum / y * x) as f32, lum as f32, (lum / y * z) as f32)
    }

    /// Multiply all linear channels by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Apply the sRGB transfer curve to each channel (no clamping).
    pub fn gamma_corrected(self) -> [f32; 3] {
        [
            apply_gamma(self.r),
            apply_gamma(self.g),
            apply_gamma(self.b),
        ]
    }

    /// Gamma-compress and quantize for display.
    ///
    /// When the brightest compressed channel exceeds 1.0 all three channels are divided
    /// by it, preserving hue instead of clipping. Negative channels clamp to 0.
    pub fn to_display(self) -> DisplayColor {
        let [mut r, mut g, mut b] = self.gamma_corrected();
        let max = r.max(g).max(b);
        if max > 1.0 {
            r /= max;
            g /= max;
            b /= max;
        }
        DisplayColor {
            r: to_8bit(r),
            g: to_8bit(g),
            b: to_8bit(b),
        }
    }
}

fn apply_gamma(c: f32) -> f32 {
    if c < 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn to_8bit(c: f32) -> u8 {
    if c > 1.0 {
        255
    } else if c < 0.0 {
        0
    } else {
        (c * 255.0) as u8
    }
}

/// Display brightness factor for a visual magnitude.
///
/// Magnitude 5 maps to 0.1 and magnitude −3 to 1.0, linearly; fainter stars stay at 0.1.
pub fn magnitude_brightness(vmag: f64) -> f32 {
    let factor = (DIM_MAGNITUDE - vmag) / (DIM_MAGNITUDE - BRIGHT_MAGNITUDE);
    (factor.max(0.0) * (1.0 - MIN_BRIGHTNESS) + MIN_BRIGHTNESS) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunlike_color_is_hue_preserving() {
        let linear = Color::from_temperature(5778.0);
        let gamma = linear.gamma_corrected();
        let display = linear.to_display();

        // all channels are representable u8 values; the Sun is a warm white
        assert!(display.r >= display.b);
        assert!(display.g > 200);

        let max = gamma[0].max(gamma[1]).max(gamma[2]);
        let scale = if max > 1.0 { max } else { 1.0 };
        let channels = display.to_array();
        for (c8, c) in channels.iter().zip(gamma.iter()) {
            let expected = (c / scale).clamp(0.0, 1.0) * 255.0;
            assert!(
                (*c8 as f32 - expected).abs() <= 1.0,
                "channel {} vs expected {}",
                c8,
                expected
            );
        }
    }

    #[test]
    fn overexposed_color_scales_down_instead_of_clipping() {
        let bright = Color::new(4.0, 2.0, 1.0);
        let gamma = bright.gamma_corrected();
        let display = bright.to_display();
        assert_eq!(display.r, 255);
        let expected_ratio = gamma[1] / gamma[0];
        let ratio = display.g as f32 / display.r as f32;
        assert!((ratio - expected_ratio).abs() < 0.01);
        assert!(display.g < 255 && display.b < display.g);
    }

    #[test]
    fn negative_channels_clamp_to_zero() {
        let display = Color::new(-0.5, 0.5, 0.2).to_display();
        assert_eq!(display.r, 0);
        assert!(display.g > 0);
    }

    #[test]
    fn hot_stars_are_blue_cool_stars_are_red() {
        let hot = Color::from_temperature(30000.0).to_display();
        let cool = Color::from_temperature(3000.0).to_display();
        assert!(hot.b > hot.r);
        assert!(cool.r > cool.b);
    }

    #[test]
    fn brightness_factor_range() {
        assert!((magnitude_brightness(-3.0) - 1.0).abs() < 1e-6);
        assert!((magnitude_brightness(5.0) - 0.1).abs() < 1e-6);
        assert!((magnitude_brightness(12.0) - 0.1).abs() < 1e-6);
        let mid = magnitude_brightness(1.0);
        assert!(mid > 0.1 && mid < 1.0);
    }
}
