use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;

/// Channel weights shared by relative and perceived luminance.
pub(crate) const WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Straight 8-bit sRGB color.
///
/// `Display` renders the CSS functional form `rgb(r, g, b)`, which is the
/// exact text written into label markup. `FromStr` accepts that form plus
/// `#rgb` and `#rrggbb`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Reads the low 24 bits of `value` as `0xRRGGBB`. Higher bits are ignored.
    #[inline]
    pub const fn from_u24(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// WCAG relative luminance in `[0, 1]`.
    ///
    /// Channels are linearized with the 0.03928 threshold of the WCAG 2.0
    /// text, not the 0.04045 of the sRGB standard. The difference only shows
    /// for channel values 10 and below, and the label colors depend on it.
    pub fn relative_luminance(self) -> f64 {
        let [r, g, b] = self.channels().map(linearize);
        WEIGHTS[0] * r + WEIGHTS[1] * g + WEIGHTS[2] * b
    }

    /// Weighted channel sum on raw `0..=255` values, without linearization.
    ///
    /// A cheap brightness estimate used only to size darkening steps; the
    /// contrast decision itself always goes through [`relative_luminance`].
    ///
    /// [`relative_luminance`]: Self::relative_luminance
    #[inline]
    pub fn perceived_luminance(self) -> f64 {
        WEIGHTS[0] * self.r as f64 + WEIGHTS[1] * self.g as f64 + WEIGHTS[2] * self.b as f64
    }
}

#[inline]
fn linearize(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            parse_functional(args)
        } else {
            Err(ColorParseError::new(s, "expected `#rgb`, `#rrggbb` or `rgb(r, g, b)`"))
        }
    }
}

fn parse_hex(hex: &str) -> Result<Rgb, ColorParseError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::new(hex, "non-hex digit in color literal"));
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        n => {
            return Err(ColorParseError::new(
                hex,
                format!("hex color must have 3 or 6 digits, got {n}"),
            ));
        }
    };
    let value = u32::from_str_radix(&expanded, 16)
        .map_err(|e| ColorParseError::new(hex, e.to_string()))?;
    Ok(Rgb::from_u24(value))
}

fn parse_functional(args: &str) -> Result<Rgb, ColorParseError> {
    let mut channels = [0u8; 3];
    let mut parts = args.split(',');
    for slot in channels.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| ColorParseError::new(args, "rgb() needs three channels"))?
            .trim();
        *slot = part
            .parse::<u8>()
            .map_err(|_| ColorParseError::new(part, "channel must be an integer in 0..=255"))?;
    }
    if parts.next().is_some() {
        return Err(ColorParseError::new(args, "rgb() takes exactly three channels"));
    }
    Ok(Rgb::from(channels))
}
