use derive_more::{From, Into};
use palette::{Mix, Srgba};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A packed `0xAARRGGBB` color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, From, Into, SerializeDisplay, DeserializeFromStr,
)]
pub struct Argb(u32);

impl Argb {
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    pub const MAGENTA: Argb = Argb(0xFFFF_00FF);

    pub const fn new(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        Srgba::new(self.red(), self.green(), self.blue(), self.alpha()).into_format()
    }

    pub fn from_srgba(color: Srgba<f64>) -> Self {
        let c: Srgba<u8> = color.into_format();
        Self::from_channels(c.alpha, c.red, c.green, c.blue)
    }

    /// Straight per-channel blend of the encoded sRGB values, alpha included.
    pub fn lerp(self, target: Argb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::from_srgba(self.to_srgba().mix(target.to_srgba(), t))
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color '{0}' must look like #AARRGGBB or #RRGGBB")]
    Format(String),
}

impl FromStr for Argb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let parsed = u32::from_str_radix(hex, 16)
            .ok()
            .filter(|_| hex.chars().all(|c| c.is_ascii_hexdigit()));

        match (hex.len(), parsed) {
            (8, Some(v)) => Ok(Self(v)),
            (6, Some(v)) => Ok(Self(0xFF00_0000 | v)),
            _ => Err(ColorParseError::Format(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Argb::new(0x80FF_4020);
        assert_eq!((c.alpha(), c.red(), c.green(), c.blue()), (0x80, 0xFF, 0x40, 0x20));
        assert_eq!(Argb::from_channels(0x80, 0xFF, 0x40, 0x20), c);
        assert_eq!(c.with_alpha(64).value(), 0x40FF_4020);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let from = Argb::new(0xFF00_0000);
        let to = Argb::new(0x00FF_FF00);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);

        let mid = from.lerp(to, 0.5);
        for channel in [mid.alpha(), mid.red(), mid.green(), mid.blue()] {
            assert!(channel == 0 || (127..=128).contains(&channel), "{mid}");
        }
        assert_eq!(mid.blue(), 0);
    }

    #[test]
    fn test_srgba_conversion_is_lossless() {
        let c = Argb::new(0x12345678);
        assert_eq!(Argb::from_srgba(c.to_srgba()), c);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("#FF00FF00".parse::<Argb>(), Ok(Argb::new(0xFF00_FF00)));
        assert_eq!("00ff00".parse::<Argb>(), Ok(Argb::new(0xFF00_FF00)));
        assert_eq!("0x40ff00ff".parse::<Argb>(), Ok(Argb::new(0x40FF_00FF)));
        assert!("#12345".parse::<Argb>().is_err());
        assert!("#+1234567".parse::<Argb>().is_err());
        assert_eq!(Argb::MAGENTA.to_string(), "#FFFF00FF");
    }

    #[test]
    fn test_serde_uses_hex_form() {
        let c: Argb = serde_json::from_str("\"#80112233\"").unwrap();
        assert_eq!(c, Argb::new(0x8011_2233));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#80112233\"");
    }
}
