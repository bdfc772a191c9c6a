use crate::contrast::ensure_contrast;
use crate::hash::seed_color;
use crate::hsl::Hsl;
use crate::rgb::Rgb;

/// Parameters of the tag → color derivation.
///
/// The defaults produce the published label colors. Changing any field
/// changes every derived color, so custom palettes are for experiments and
/// tests rather than for deployments that must match existing labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Multiplier applied to the seed color's saturation.
    pub saturation_scale: f64,
    /// Multiplier applied to the seed color's lightness, before the cap.
    pub lightness_scale: f64,
    /// Upper bound for the scaled lightness (0–1 scale).
    pub lightness_cap: f64,
    /// Minimum contrast ratio against white text.
    pub min_contrast: f64,
    /// Upper bound on darkening steps.
    pub max_darken_steps: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            saturation_scale: 0.6,
            lightness_scale: 1.2,
            lightness_cap: 0.9,
            min_contrast: 4.5,
            max_darken_steps: 64,
        }
    }
}

impl Palette {
    pub fn with_min_contrast(mut self, ratio: f64) -> Self {
        self.min_contrast = ratio;
        self
    }

    pub fn with_max_darken_steps(mut self, steps: u32) -> Self {
        self.max_darken_steps = steps;
        self
    }

    /// Softens a color: same hue, less saturation, more lightness.
    pub fn pastel(&self, hsl: Hsl) -> Hsl {
        Hsl::new(
            hsl.h,
            hsl.s * self.saturation_scale,
            (hsl.l * self.lightness_scale).min(self.lightness_cap),
        )
    }

    /// Pastel candidate for `text` before contrast enforcement.
    pub fn candidate(&self, text: &str) -> Rgb {
        self.pastel(Hsl::from(seed_color(text))).to_rgb()
    }

    /// Background color for the label of `text`.
    pub fn derive(&self, text: &str) -> Rgb {
        ensure_contrast(self.candidate(text), self.min_contrast, self.max_darken_steps)
    }
}
