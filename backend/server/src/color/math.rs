use std::{fmt, str::FromStr};

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex length")]
    InvalidLength,

    #[error("invalid hex digits")]
    InvalidHex,
}

/// An sRGB color with 8-bit channels.
///
/// The canonical text form is `#` followed by six lowercase hex digits, which
/// is what [`Rgb::to_hex`] and the `Display` impl produce and what the store
/// persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
    pub fn parse_hex(input: &str) -> Result<Self, ColorError> {
        use ColorError::*;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Empty);
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed).as_bytes();
        if digits.len() != 6 {
            return Err(InvalidLength);
        }

        let nibble = |c: u8| -> Result<u8, ColorError> {
            match c {
                b'0'..=b'9' => Ok(c - b'0'),
                b'a'..=b'f' => Ok(c - b'a' + 10),
                b'A'..=b'F' => Ok(c - b'A' + 10),
                _ => Err(InvalidHex),
            }
        };
        let channel = |i: usize| -> Result<u8, ColorError> {
            Ok(nibble(digits[i])? << 4 | nibble(digits[i + 1])?)
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Componentwise mean with truncating division. `None` for an empty slice.
    pub fn average(colors: &[Rgb]) -> Option<Rgb> {
        let mut sums = ChannelSums::default();
        for color in colors {
            sums.add(*color);
        }

        sums.average().map(|(color, _)| color)
    }

    pub fn squared_distance(&self, other: &Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = i32::from(a) - i32::from(b);
            (diff * diff) as u32
        };

        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }

    /// Hue, lightness and saturation, each in `[0, 1)` / `[0, 1]`.
    ///
    /// Follows the classic HLS decomposition: achromatic colors report hue and
    /// saturation of zero, and the saturation denominator switches at
    /// lightness 0.5.
    pub fn to_hls(&self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;

        if range == 0.0 {
            return (0.0, l, 0.0);
        }

        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - sum)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        ((h / 6.0).rem_euclid(1.0), l, s)
    }

    /// A visually blue sample: r in 0..=100, g in 0..=200, b in 150..=255.
    pub fn random_blue<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.gen_range(0..=100),
            rng.gen_range(0..=200),
            rng.gen_range(150..=255),
        )
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Lowercase `#rrggbb` form of any accepted hex spelling.
pub fn normalize_hex(input: &str) -> Result<String, ColorError> {
    Rgb::parse_hex(input).map(|color| color.to_hex())
}

/// Running per-channel totals of a set of colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSums {
    pub r: u64,
    pub g: u64,
    pub b: u64,
    pub count: u64,
}

impl ChannelSums {
    pub fn add(&mut self, color: Rgb) {
        self.r += u64::from(color.r);
        self.g += u64::from(color.g);
        self.b += u64::from(color.b);
        self.count += 1;
    }

    /// The truncated mean color and how many colors went into it.
    pub fn average(&self) -> Option<(Rgb, u64)> {
        if self.count == 0 {
            return None;
        }

        // each channel mean is bounded by 255
        let mean = |sum: u64| (sum / self.count) as u8;

        Some((
            Rgb::new(mean(self.r), mean(self.g), mean(self.b)),
            self.count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!(Rgb::parse_hex("#0000ff"), Ok(Rgb::new(0, 0, 255)));
        assert_eq!(Rgb::parse_hex("0000FF"), Ok(Rgb::new(0, 0, 255)));
        assert_eq!(Rgb::parse_hex("  #12AbCd "), Ok(Rgb::new(0x12, 0xab, 0xcd)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Rgb::parse_hex(""), Err(ColorError::Empty));
        assert_eq!(Rgb::parse_hex("#fff"), Err(ColorError::InvalidLength));
        assert_eq!(Rgb::parse_hex("#0000ff0"), Err(ColorError::InvalidLength));
        assert_eq!(Rgb::parse_hex("#00zz00"), Err(ColorError::InvalidHex));
        assert_eq!(Rgb::parse_hex("##00000"), Err(ColorError::InvalidHex));
    }

    #[test]
    fn test_hex_round_trip() {
        for color in [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(1, 16, 171),
            Rgb::new(100, 200, 150),
        ] {
            let hex = color.to_hex();
            assert_eq!(Rgb::parse_hex(&hex).unwrap().to_hex(), hex);
        }
        assert_eq!(Rgb::new(1, 2, 3).to_hex(), "#010203");
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("ABCDEF").unwrap(), "#abcdef");
        assert!(normalize_hex("#abcd").is_err());
    }

    #[test]
    fn test_average_single_color_is_identity() {
        let color = Rgb::new(12, 34, 56);
        assert_eq!(Rgb::average(&[color]), Some(color));
        assert_eq!(Rgb::average(&[]), None);
    }

    #[test]
    fn test_average_truncates() {
        let colors = [Rgb::new(0, 0, 255), Rgb::new(0, 0, 0x99)];
        // (255 + 153) / 2 = 204
        assert_eq!(Rgb::average(&colors), Some(Rgb::new(0, 0, 204)));

        let colors = [Rgb::new(1, 0, 0), Rgb::new(2, 0, 0)];
        assert_eq!(Rgb::average(&colors), Some(Rgb::new(1, 0, 0)));
    }

    #[test]
    fn test_average_is_order_independent() {
        let colors = [
            Rgb::new(10, 200, 3),
            Rgb::new(99, 1, 250),
            Rgb::new(0, 77, 180),
        ];
        let mut reversed = colors;
        reversed.reverse();
        let rotated = [colors[1], colors[2], colors[0]];

        assert_eq!(Rgb::average(&colors), Rgb::average(&reversed));
        assert_eq!(Rgb::average(&colors), Rgb::average(&rotated));
    }

    #[test]
    fn test_channel_sums_count() {
        let mut sums = ChannelSums::default();
        assert_eq!(sums.average(), None);

        sums.add(Rgb::new(0, 0, 255));
        sums.add(Rgb::new(0, 0, 0x99));
        assert_eq!(sums.average(), Some((Rgb::new(0, 0, 204), 2)));
    }

    #[test]
    fn test_hls() {
        let (h, l, s) = Rgb::new(0, 0, 255).to_hls();
        assert!((h * 360.0 - 240.0).abs() < 1e-9);
        assert!((l - 0.5).abs() < 1e-9);
        assert!((s - 1.0).abs() < 1e-9);

        let (h, l, s) = Rgb::new(128, 128, 128).to_hls();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-9);

        // red with a touch of blue wraps to the top of the hue circle
        let (h, _, _) = Rgb::new(255, 0, 10).to_hls();
        assert!(h * 360.0 > 357.0);
    }

    #[test]
    fn test_random_blue_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let color = Rgb::random_blue(&mut rng);
            assert!(color.r <= 100);
            assert!(color.g <= 200);
            assert!(color.b >= 150);
        }
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(Rgb::new(0, 0, 0).squared_distance(&Rgb::new(3, 4, 0)), 25);
        assert_eq!(Rgb::new(9, 9, 9).squared_distance(&Rgb::new(9, 9, 9)), 0);
    }
}
