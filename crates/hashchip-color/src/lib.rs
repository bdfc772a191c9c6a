//! Deterministic label colors for `#tags`.
//!
//! Every tag string maps to one RGB background color. The mapping is a pure
//! function of the tag's characters, softened towards pastel, and darkened
//! until white text on it reaches a 4.5:1 contrast ratio.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`hash`] | `tag_hash`, `seed_color` |
//! | [`rgb`] | `Rgb`, luminance, CSS formatting and parsing |
//! | [`hsl`] | `Hsl` and conversions |
//! | [`contrast`] | `contrast_ratio`, `darken_step`, `ensure_contrast` |
//! | [`palette`] | `Palette`, the derivation parameters |
//! | [`error`] | `ColorParseError` |
//!
//! # Quick start
//!
//! ```rust
//! use hashchip_color::{contrast_ratio, derive_color, Rgb};
//!
//! let bg = derive_color("urgent");
//! assert_eq!(bg.to_string(), "rgb(58, 76, 101)");
//! assert!(contrast_ratio(bg, Rgb::WHITE) >= 4.5);
//! ```

pub mod contrast;
pub mod error;
pub mod hash;
pub mod hsl;
pub mod palette;
pub mod rgb;

pub use contrast::{contrast_ratio, darken_step, ensure_contrast};
pub use error::ColorParseError;
pub use hash::{seed_color, tag_hash};
pub use hsl::Hsl;
pub use palette::Palette;
pub use rgb::Rgb;

/// Label background for `text` with the default [`Palette`].
pub fn derive_color(text: &str) -> Rgb {
    Palette::default().derive(text)
}
