//! WCAG contrast ratio and the darkening rule that enforces it.

use crate::hsl::round_half_up;
use crate::rgb::{Rgb, WEIGHTS};

/// WCAG contrast ratio between two colors, in `[1, 21]`.
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`; argument order does not matter.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// One darkening step towards better contrast with white text.
///
/// The step size comes from the raw [`perceived_luminance`]: each channel
/// moves by `round(weight * (1 - perceived))`, so bright colors drop fast
/// and green, the heaviest weight, drops the most. Channels clamp at 0.
///
/// [`perceived_luminance`]: Rgb::perceived_luminance
pub fn darken_step(color: Rgb) -> Rgb {
    let delta = 1.0 - color.perceived_luminance();
    let shift = |channel: u8, weight: f64| -> u8 {
        (channel as f64 + round_half_up(delta * weight)).clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        shift(color.r, WEIGHTS[0]),
        shift(color.g, WEIGHTS[1]),
        shift(color.b, WEIGHTS[2]),
    )
}

/// Darkens `color` until its contrast against white reaches `min_ratio`.
///
/// Stops early, keeping the current color, when a step no longer changes any
/// channel or after `max_steps` steps. Either case is logged at debug level
/// and is not an error.
pub fn ensure_contrast(color: Rgb, min_ratio: f64, max_steps: u32) -> Rgb {
    let mut current = color;
    let mut steps = 0;

    while contrast_ratio(current, Rgb::WHITE) < min_ratio {
        if steps == max_steps {
            log::debug!(
                "contrast: step cap {max_steps} reached for {color}, keeping {current} ({:.2}:1)",
                contrast_ratio(current, Rgb::WHITE)
            );
            break;
        }
        let next = darken_step(current);
        if next == current {
            log::debug!(
                "contrast: {current} cannot be darkened further ({:.2}:1)",
                contrast_ratio(current, Rgb::WHITE)
            );
            break;
        }
        current = next;
        steps += 1;
    }

    current
}
