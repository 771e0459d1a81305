//! 8-bit RGBA color type

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A straight-alpha 8-bit RGBA color.
///
/// Alpha 0 marks a fully transparent pixel. The quantizer treats those
/// pixels specially; every other alpha value is flattened to opaque when
/// sampled into the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = opaque)
    pub a: u8,
}

impl Rgba8 {
    /// The color stored in a reserved transparency slot.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    ///
    /// # Example
    /// ```
    /// use median_cut::Rgba8;
    /// let red = Rgba8::opaque(255, 0, 0);
    /// assert_eq!(red.a, 255);
    /// ```
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color from a byte array [R, G, B, A].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a byte array [R, G, B, A].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The RGB channels packed as `0xRRGGBB`.
    #[inline]
    pub const fn rgb24(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// The same RGB with alpha forced to 255.
    #[inline]
    pub const fn to_opaque(self) -> Self {
        Self::opaque(self.r, self.g, self.b)
    }

    /// Squared Euclidean distance between the RGB channels of two colors.
    #[inline]
    pub fn distance_sq(self, other: Self) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    ///
    /// # Example
    /// ```
    /// use median_cut::Rgba8;
    /// assert_eq!(Rgba8::opaque(255, 128, 0).to_hex(), "#ff8000");
    /// assert_eq!(Rgba8::TRANSPARENT.to_hex(), "#00000000");
    /// ```
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{}", hex::encode([self.r, self.g, self.b]))
        } else {
            format!("#{}", hex::encode(self.to_bytes()))
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Rgba8 {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RGB`, `#RRGGBB` and `#RRGGBBAA`, with or without the
    /// leading hash. Colors without an alpha component are opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return Err(ParseColorError::InvalidLength),
        };
        let bytes = hex::decode(expanded)?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Self::opaque(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
