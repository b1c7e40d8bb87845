use crate::error::ViewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packed 32-bit ARGB color, most-significant byte first.
///
/// The packed integer is the only state; channel accessors extract from it,
/// so the two views can never disagree. Equality and hashing go through the
/// packed value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0);
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::from_rgb(0xff, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 0xff, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 0xff);

    pub const fn new(argb: u32) -> Color {
        Color(argb)
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from_argb(0xff, r, g, b)
    }

    /// Builds an opaque color from hue in degrees and saturation/lightness
    /// in percent.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
        Color::from_hsla(hue, saturation, lightness, 0xff)
    }

    /// Like [`Color::from_hsl`] with an explicit alpha channel.
    ///
    /// Inputs are not range checked; values outside [0,360) and [0,100]
    /// still map to a deterministic (if out-of-gamut) color. Channel values
    /// are narrowed with a truncating cast, not rounded.
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: u8) -> Color {
        let h = hue / 360.0;
        let s = saturation / 100.0;
        let l = lightness / 100.0;

        if s.abs() <= 0.001 {
            let v = (l * 255.0) as u8;
            return Color::from_argb(alpha, v, v, v);
        }

        let v2 = if l < 0.5 { l * (1.0 + s) } else { (l + s) - (s * l) };
        let v1 = 2.0 * l - v2;

        let r = (255.0 * hue_to_channel(v1, v2, h + 1.0 / 3.0)) as u8;
        let g = (255.0 * hue_to_channel(v1, v2, h)) as u8;
        let b = (255.0 * hue_to_channel(v1, v2, h - 1.0 / 3.0)) as u8;
        Color::from_argb(alpha, r, g, b)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_a(self, a: u8) -> Color {
        Color((self.0 & 0x00ff_ffff) | ((a as u32) << 24))
    }

    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Hue in degrees, saturation and lightness in percent.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let r = self.r() as f32 / 255.0;
        let g = self.g() as f32 / 255.0;
        let b = self.b() as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        if max == min {
            return (0.0, 0.0, l * 100.0);
        }
        let delta = max - min;
        let s = if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (h * 60.0, s * 100.0, l * 100.0)
    }
}

// Corrects a single wrap cycle only; hue more than one cycle outside the
// unit range stays uncorrected.
fn hue_to_channel(v1: f32, v2: f32, vh: f32) -> f32 {
    let mut vh = vh;
    if vh < 0.0 {
        vh += 1.0;
    }
    if vh > 1.0 {
        vh -= 1.0;
    }
    if 6.0 * vh < 1.0 {
        v1 + (v2 - v1) * 6.0 * vh
    } else if 2.0 * vh < 1.0 {
        v2
    } else if 3.0 * vh < 2.0 {
        v1 + (v2 - v1) * (2.0 / 3.0 - vh) * 6.0
    } else {
        v1
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.r(),
            self.g(),
            self.b(),
            self.a()
        )
    }
}

impl FromStr for Color {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Color, ViewError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let value = u32::from_str_radix(hex, 16).map_err(|_| ViewError::InvalidColor)?;
        match hex.len() {
            3 => {
                let r = (((value >> 8) & 0xf) * 0x11) as u8;
                let g = (((value >> 4) & 0xf) * 0x11) as u8;
                let b = ((value & 0xf) * 0x11) as u8;
                Ok(Color::from_rgb(r, g, b))
            }
            6 => Ok(Color::from_argb(
                0xff,
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )),
            8 => Ok(Color::from_argb(
                value as u8,
                (value >> 24) as u8,
                (value >> 16) as u8,
                (value >> 8) as u8,
            )),
            _ => Err(ViewError::InvalidColor),
        }
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::new(value)
    }
}

impl From<Color> for skia_safe::Color {
    fn from(value: Color) -> Self {
        skia_safe::Color::new(value.0)
    }
}

impl From<skia_safe::Color> for Color {
    fn from(value: skia_safe::Color) -> Self {
        Color::from_argb(value.a(), value.r(), value.g(), value.b())
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use std::str::FromStr;

    #[test]
    fn test_channel_round_trip() {
        let color = Color::from_argb(0x44, 0x11, 0x22, 0x33);
        assert_eq!(0x44, color.a());
        assert_eq!(0x11, color.r());
        assert_eq!(0x22, color.g());
        assert_eq!(0x33, color.b());
    }

    #[test]
    fn test_packed_extraction() {
        for value in [0u32, 0x11223344, 0xffffffff, 0x80000001] {
            let color = Color::new(value);
            assert_eq!(((value >> 24) & 0xff) as u8, color.a());
            assert_eq!(((value >> 16) & 0xff) as u8, color.r());
            assert_eq!(((value >> 8) & 0xff) as u8, color.g());
            assert_eq!((value & 0xff) as u8, color.b());
            assert_eq!(value, color.argb());
        }
    }

    #[test]
    fn test_packing_matches_packed_constructor() {
        let color = Color::from_argb(4, 3, 2, 1);
        assert_eq!(Color::new(0x04030201), color);
    }

    #[test]
    fn test_default_alpha_is_opaque() {
        assert_eq!(Color::from_argb(0xff, 10, 20, 30), Color::from_rgb(10, 20, 30));
        assert_eq!(
            Color::from_hsla(200.0, 75.0, 40.0, 0xff),
            Color::from_hsl(200.0, 75.0, 40.0)
        );
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Color::RED, Color::from_hsl(0.0, 100.0, 50.0));
        assert_eq!(Color::GREEN, Color::from_hsl(120.0, 100.0, 50.0));
        assert_eq!(Color::BLUE, Color::from_hsl(240.0, 100.0, 50.0));
        assert_eq!(Color::BLACK, Color::from_hsl(0.0, 0.0, 0.0));
        assert_eq!(Color::WHITE, Color::from_hsl(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_hsl_achromatic_ignores_hue() {
        for hue in [0.0, 90.0, 255.5, 720.0, -45.0] {
            let color = Color::from_hsl(hue, 0.0, 50.0);
            // 0.5 * 255 truncates to 127; the conversion deliberately does
            // not round.
            assert_eq!(Color::from_rgb(127, 127, 127), color);
        }
        // saturation magnitude up to 0.001 (normalized) counts as gray
        assert_eq!(
            Color::from_rgb(127, 127, 127),
            Color::from_hsl(300.0, 0.05, 50.0)
        );
    }

    #[test]
    fn test_hsl_truncates_chromatic_channels() {
        // rounding would give (128, 128, 0)
        assert_eq!(Color::from_rgb(127, 127, 0), Color::from_hsl(60.0, 100.0, 25.0));
    }

    #[test]
    fn test_hsl_out_of_range_is_deterministic() {
        // the wrap step corrects one cycle, so one extra turn lands on the
        // same color
        assert_eq!(
            Color::from_hsl(180.0, 100.0, 50.0),
            Color::from_hsl(540.0, 100.0, 50.0)
        );
        assert_eq!(
            Color::from_hsl(240.0, 100.0, 50.0),
            Color::from_hsl(-120.0, 100.0, 50.0)
        );
        // out-of-range lightness saturates instead of wrapping
        assert_eq!(Color::WHITE, Color::from_hsl(0.0, 0.0, 150.0));
        assert_eq!(Color::BLACK, Color::from_hsl(0.0, 0.0, -50.0));
    }

    #[test]
    fn test_to_hsl() {
        assert_eq!((0.0, 100.0, 50.0), Color::RED.to_hsl());
        assert_eq!((120.0, 100.0, 50.0), Color::GREEN.to_hsl());
        assert_eq!((240.0, 100.0, 50.0), Color::BLUE.to_hsl());
        let (h, s, l) = Color::from_rgb(128, 128, 128).to_hsl();
        assert_eq!(0.0, h);
        assert_eq!(0.0, s);
        assert!(l > 50.0 && l < 50.4);
    }

    #[test]
    fn test_with_a() {
        let color = Color::from_rgb(1, 2, 3).with_a(0x80);
        assert_eq!(Color::from_argb(0x80, 1, 2, 3), color);
        assert!(!color.is_transparent());
        assert!(color.with_a(0).is_transparent());
        assert!(Color::TRANSPARENT.is_transparent());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::from_rgb(0xff, 0x80, 0), "#ff8000".parse().unwrap());
        assert_eq!(Color::from_rgb(0xff, 0x80, 0), "ff8000".parse().unwrap());
        assert_eq!(Color::from_rgb(0xaa, 0xbb, 0xcc), "#abc".parse().unwrap());
        assert_eq!(
            Color::from_argb(0x44, 0x11, 0x22, 0x33),
            "#11223344".parse().unwrap()
        );
        assert!(Color::from_str("#12345").is_err());
        assert!(Color::from_str("xyz").is_err());
        assert!(Color::from_str("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let color = Color::from_argb(0x44, 0x11, 0x22, 0x33);
        assert_eq!("#11223344", color.to_string());
        assert_eq!(color, color.to_string().parse().unwrap());
    }

    #[test]
    fn test_skia_conversion() {
        let color = Color::from_argb(0x44, 0x11, 0x22, 0x33);
        let skia: skia_safe::Color = color.into();
        assert_eq!(0x44, skia.a());
        assert_eq!(0x11, skia.r());
        assert_eq!(0x22, skia.g());
        assert_eq!(0x33, skia.b());
        assert_eq!(color, Color::from(skia));
    }

    #[test]
    fn test_serde_round_trip() {
        let color = Color::from_argb(1, 2, 3, 4);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(color.argb().to_string(), json);
        assert_eq!(color, serde_json::from_str(&json).unwrap());
    }
}
