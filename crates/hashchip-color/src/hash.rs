use crate::rgb::Rgb;

/// 32-bit string hash over UTF-16 code units.
///
/// Each step computes `unit + ((hash << 5) - hash)` with two's-complement
/// wrapping, i.e. `hash * 31 + unit` mod 2^32. Iterating UTF-16 units rather
/// than `char`s keeps the value identical to the browser-side `charCodeAt`
/// loop, so characters outside the BMP contribute two surrogate units.
///
/// Every derived color depends on this value; it must never change.
pub fn tag_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| {
        (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    })
}

/// Seed color for `text`: the low 24 bits of [`tag_hash`] read as `0xRRGGBB`.
#[inline]
pub fn seed_color(text: &str) -> Rgb {
    Rgb::from_u24(tag_hash(text) as u32 & 0x00FF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(tag_hash(""), 0);
        assert_eq!(seed_color(""), Rgb::BLACK);
    }

    #[test]
    fn single_char_is_its_code_unit() {
        assert_eq!(tag_hash("x"), 120);
        assert_eq!(tag_hash("#"), 35);
    }

    #[test]
    fn reference_values() {
        assert_eq!(tag_hash("urgent"), -836_906_175);
        assert_eq!(tag_hash("groceries"), -2_007_578_005);
        assert_eq!(tag_hash("work"), 3_655_441);
        assert_eq!(tag_hash("hello world"), 1_794_106_052);
    }

    #[test]
    fn seed_masks_to_24_bits() {
        assert_eq!(seed_color("urgent"), Rgb::new(0x1d, 0xd3, 0x41));
        assert_eq!(seed_color("groceries"), Rgb::new(0x56, 0xca, 0x6b));
    }

    #[test]
    fn long_input_wraps_repeatedly() {
        let long = "a".repeat(1000);
        assert_eq!(tag_hash(&long), 904_019_584);
    }

    #[test]
    fn non_ascii_hashes_utf16_units() {
        assert_eq!(tag_hash("café"), 3_045_921);
        // U+1F389 is the surrogate pair D83C DF89.
        assert_eq!(tag_hash("\u{1F389}"), 1_773_261);
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(tag_hash("Urgent"), tag_hash("urgent"));
    }
}
