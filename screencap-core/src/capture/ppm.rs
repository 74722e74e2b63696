//! Binary portable pixmap header

use core::fmt::Write as _;

use heapless::String;

/// Longest possible header: "P6\n65535 65535\n255\n"
const MAX_HEADER_LEN: usize = 24;

/// Build the ASCII `P6` header
pub fn ppm_header(width: u16, height: u16) -> String<MAX_HEADER_LEN> {
    let mut header = String::new();
    // Cannot overflow: both dimensions are at most five digits
    let _ = write!(header, "P6\n{} {}\n255\n", width, height);
    header
}

/// Total encoded size for a `width` x `height` image
pub fn ppm_size(width: u16, height: u16) -> usize {
    ppm_header(width, height).len() + 3 * usize::from(width) * usize::from(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_text() {
        assert_eq!(ppm_header(320, 240).as_str(), "P6\n320 240\n255\n");
        assert_eq!(ppm_header(1, 1).as_str(), "P6\n1 1\n255\n");
    }

    #[test]
    fn test_widest_header_fits() {
        assert_eq!(ppm_header(u16::MAX, u16::MAX).as_str(), "P6\n65535 65535\n255\n");
    }

    #[test]
    fn test_size() {
        assert_eq!(ppm_size(1, 1), 11 + 3);
        assert_eq!(ppm_size(320, 240), 15 + 230_400);
    }
}
