//! Windows bitmap header
//!
//! Layout is the classic BITMAPFILEHEADER (14 bytes) followed by a
//! BITMAPINFOHEADER (40 bytes), all little-endian. Pixel rows follow
//! bottom-up as BGR888, each row padded to a multiple of four bytes.

/// Size of the combined file and info headers
pub const BMP_HEADER_LEN: usize = 54;

/// Zero bytes appended to each row of `width` pixels
pub fn row_padding(width: u16) -> usize {
    (4 - (3 * usize::from(width)) % 4) % 4
}

/// Total file size for a `width` x `height` image
pub fn bmp_file_size(width: u16, height: u16) -> usize {
    BMP_HEADER_LEN + (3 * usize::from(width) + row_padding(width)) * usize::from(height)
}

/// Build the 54-byte header
///
/// The image-size and resolution fields are left zero, which every
/// decoder accepts for uncompressed images. Images over 4 GiB do not fit
/// the 32-bit size field; it saturates at `u32::MAX`.
pub fn bmp_header(width: u16, height: u16) -> [u8; BMP_HEADER_LEN] {
    let mut header = [0u8; BMP_HEADER_LEN];
    let file_size = u32::try_from(bmp_file_size(width, height)).unwrap_or(u32::MAX);

    header[0..2].copy_from_slice(b"BM");
    header[2..6].copy_from_slice(&file_size.to_le_bytes());
    // 6..10 reserved
    header[10..14].copy_from_slice(&(BMP_HEADER_LEN as u32).to_le_bytes());

    header[14..18].copy_from_slice(&40u32.to_le_bytes());
    header[18..22].copy_from_slice(&u32::from(width).to_le_bytes());
    header[22..26].copy_from_slice(&u32::from(height).to_le_bytes());
    header[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    header[28..30].copy_from_slice(&24u16.to_le_bytes()); // bits per pixel
    // 30..54: no compression, size and resolution unset, no palette

    header
}
