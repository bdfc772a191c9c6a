use crate::rgb::Rgb;

/// HSL color with every component on a `0..=1` scale.
///
/// `h` is a fraction of a full turn in `[0, 1)`. Conversion back to [`Rgb`]
/// rounds each channel half-up and clamps, so lightness values outside
/// `[0, 1]` never wrap.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        let [r, g, b] = self.to_rgb_f64();
        Rgb::new(round_channel(r), round_channel(g), round_channel(b))
    }

    /// Unrounded channels on a `0..=255` scale.
    pub fn to_rgb_f64(self) -> [f64; 3] {
        let Hsl { h, s, l } = self;
        if s == 0.0 {
            return [l * 255.0; 3];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        [
            hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_channel(p, q, h) * 255.0,
            hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
        ]
    }
}

impl From<Rgb> for Hsl {
    fn from(c: Rgb) -> Self {
        let r = c.r as f64 / 255.0;
        let g = c.g as f64 / 255.0;
        let b = c.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h / 6.0, s, l)
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Half-up rounding (`floor(x + 0.5)`), matching what browsers do for CSS
/// channel values. `f64::round` rounds halves away from zero instead, which
/// differs for negative inputs.
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[inline]
fn round_channel(x: f64) -> u8 {
    round_half_up(x).clamp(0.0, 255.0) as u8
}
