//! Virtual number synthesis
//!
//! Numbers look like `+55 (11) 9XXXX-YYYY`. They are not routable and no
//! registry exists, so collisions are never checked.

use rand::Rng;
use std::ops::{Range, RangeInclusive};

pub const COUNTRY_CODE: &str = "55";
pub const AREA_CODE: &str = "11";

/// First block after the mobile `9` prefix
pub const FIRST_BLOCK: Range<u16> = 8000..9999;
/// Second block
pub const SECOND_BLOCK: RangeInclusive<u16> = 1000..=9999;

pub fn format_virtual_number(first: u16, second: u16) -> String {
    format!("+{COUNTRY_CODE} ({AREA_CODE}) 9{first}-{second}")
}

/// Draw a fresh number from two independent uniform draws
pub fn draw_virtual_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = rng.gen_range(FIRST_BLOCK);
    let second = rng.gen_range(SECOND_BLOCK);
    format_virtual_number(first, second)
}

/// Check the `+<cc> (<2 digits>) 9<4 digits>-<4 digits>` shape
pub fn is_virtual_number(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('+') else {
        return false;
    };
    let Some((country, rest)) = rest.split_once(" (") else {
        return false;
    };
    let Some((area, rest)) = rest.split_once(") 9") else {
        return false;
    };
    let Some((first, second)) = rest.split_once('-') else {
        return false;
    };

    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());

    !country.is_empty()
        && country.bytes().all(|b| b.is_ascii_digit())
        && digits(area, 2)
        && digits(first, 4)
        && digits(second, 4)
}
