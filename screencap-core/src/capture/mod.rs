//! Framebuffer-to-image streaming
//!
//! Both formats share one skeleton: write the header, then for each row
//! read one scanline from the panel into a stack buffer, fix it up in
//! place and hand it to the sink. Memory use is one scanline regardless of
//! the panel height.
//!
//! ```text
//! Framebuffer ──read_line──► [scanline] ──swap/pad──► embedded_io::Write
//! ```

pub mod bmp;
pub mod ppm;

use embedded_io::{Error as _, ErrorKind, Write};
use screencap_hal::{DisplayError, Framebuffer, Storage, StorageError};

pub use bmp::{bmp_file_size, bmp_header, row_padding, BMP_HEADER_LEN};
pub use ppm::{ppm_header, ppm_size};

/// Widest panel the encoder can stream
pub const MAX_WIDTH: usize = 480;

/// Scanline buffer capacity: RGB888 pixels plus worst-case BMP padding
pub const MAX_LINE_BYTES: usize = MAX_WIDTH * 3 + 3;

/// Errors while streaming an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError<E> {
    /// Panel reports zero width or height
    EmptyFrame,
    /// Panel is wider than [`MAX_WIDTH`]
    TooWide,
    /// Reading a scanline failed
    Display(DisplayError),
    /// The sink rejected a write; the image is incomplete
    Sink(E),
}

impl<E> CaptureError<E> {
    /// Convert the sink error, keeping every other variant
    pub fn map_sink<F>(self, f: impl FnOnce(E) -> F) -> CaptureError<F> {
        match self {
            CaptureError::EmptyFrame => CaptureError::EmptyFrame,
            CaptureError::TooWide => CaptureError::TooWide,
            CaptureError::Display(e) => CaptureError::Display(e),
            CaptureError::Sink(e) => CaptureError::Sink(f(e)),
        }
    }
}

impl<E> From<DisplayError> for CaptureError<E> {
    fn from(e: DisplayError) -> Self {
        CaptureError::Display(e)
    }
}

/// Errors while saving an image to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaveError {
    /// The file could not be created; nothing was written
    Open(StorageError),
    /// Streaming stopped part way; the file is truncated
    Capture(CaptureError<ErrorKind>),
}

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageFormat {
    /// 24-bit uncompressed Windows bitmap, bottom-up, BGR
    Bmp,
    /// Binary portable pixmap (P6), top-down, RGB
    Ppm,
}

impl ImageFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Ppm => "ppm",
        }
    }

    /// Exact number of bytes an image of this size encodes to
    pub fn encoded_size(self, width: u16, height: u16) -> usize {
        match self {
            ImageFormat::Bmp => bmp_file_size(width, height),
            ImageFormat::Ppm => ppm_size(width, height),
        }
    }

    /// Stream the current panel content into `sink`
    ///
    /// Returns the number of bytes written. On error the sink has received
    /// a prefix of the image and nothing more.
    pub fn encode<F, W>(self, fb: &mut F, sink: &mut W) -> Result<usize, CaptureError<W::Error>>
    where
        F: Framebuffer + ?Sized,
        W: Write + ?Sized,
    {
        let (width, height) = fb.size();
        if width == 0 || height == 0 {
            return Err(CaptureError::EmptyFrame);
        }
        if usize::from(width) > MAX_WIDTH {
            return Err(CaptureError::TooWide);
        }

        let mut written = match self {
            ImageFormat::Bmp => {
                let header = bmp_header(width, height);
                sink.write_all(&header).map_err(CaptureError::Sink)?;
                header.len()
            }
            ImageFormat::Ppm => {
                let header = ppm_header(width, height);
                sink.write_all(header.as_bytes())
                    .map_err(CaptureError::Sink)?;
                header.len()
            }
        };

        // Zeroed once: read_line never touches the padding tail
        let mut line = [0u8; MAX_LINE_BYTES];
        let pixel_bytes = usize::from(width) * 3;

        match self {
            ImageFormat::Bmp => {
                let row_len = pixel_bytes + row_padding(width);
                // Bottom-up: first row in the file is the last panel row
                for y in (0..height).rev() {
                    fb.read_line(y, &mut line[..pixel_bytes])?;
                    swap_red_blue(&mut line[..pixel_bytes]);
                    sink.write_all(&line[..row_len])
                        .map_err(CaptureError::Sink)?;
                    written += row_len;
                }
            }
            ImageFormat::Ppm => {
                for y in 0..height {
                    fb.read_line(y, &mut line[..pixel_bytes])?;
                    sink.write_all(&line[..pixel_bytes])
                        .map_err(CaptureError::Sink)?;
                    written += pixel_bytes;
                }
            }
        }

        Ok(written)
    }
}

/// Turn packed RGB888 into BGR888 in place
pub fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}

/// Capture the panel into a file on `storage`
///
/// An existing file at `path` is replaced. The file is flushed before it
/// is released.
pub fn save<S, F>(
    storage: &mut S,
    fb: &mut F,
    path: &str,
    format: ImageFormat,
) -> Result<usize, SaveError>
where
    S: Storage + ?Sized,
    F: Framebuffer + ?Sized,
{
    let mut file = storage.create(path).map_err(SaveError::Open)?;
    let written = format
        .encode(fb, &mut file)
        .map_err(|e| SaveError::Capture(e.map_sink(|e| e.kind())))?;
    file.flush()
        .map_err(|e| SaveError::Capture(CaptureError::Sink(e.kind())))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFramebuffer, MockStorage, VecSink};
    use proptest::prelude::*;

    /// The 2x2 panel used throughout: (1,2,3) (4,5,6) / (7,8,9) (10,11,12)
    fn two_by_two() -> MockFramebuffer {
        MockFramebuffer::from_pixels(2, 2, &[[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]])
    }

    #[test]
    fn test_bmp_two_by_two() {
        let mut fb = two_by_two();
        let mut sink = VecSink::new();
        let n = ImageFormat::Bmp.encode(&mut fb, &mut sink).unwrap();

        assert_eq!(n, 70);
        assert_eq!(sink.data.len(), 70);
        assert_eq!(
            &sink.data[54..],
            &[9, 8, 7, 12, 11, 10, 0, 0, 3, 2, 1, 6, 5, 4, 0, 0]
        );
    }

    #[test]
    fn test_ppm_one_pixel() {
        let mut fb = MockFramebuffer::from_pixels(1, 1, &[[255, 0, 128]]);
        let mut sink = VecSink::new();
        ImageFormat::Ppm.encode(&mut fb, &mut sink).unwrap();
        assert_eq!(sink.data, b"P6\n1 1\n255\n\xff\x00\x80".to_vec());
    }

    #[test]
    fn test_ppm_is_top_down() {
        let mut fb = two_by_two();
        let mut sink = VecSink::new();
        ImageFormat::Ppm.encode(&mut fb, &mut sink).unwrap();
        let header_len = "P6\n2 2\n255\n".len();
        assert_eq!(
            &sink.data[header_len..],
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_bmp_top_left_pixel_round_trip() {
        let mut fb = MockFramebuffer::gradient(5, 3);
        let top_left = fb.pixel(0, 0);
        let mut sink = VecSink::new();
        ImageFormat::Bmp.encode(&mut fb, &mut sink).unwrap();

        // Top-left of the picture is the first pixel of the last stored row
        let stride = 5 * 3 + row_padding(5);
        let offset = BMP_HEADER_LEN + 2 * stride;
        let bgr = &sink.data[offset..offset + 3];
        assert_eq!([bgr[2], bgr[1], bgr[0]], top_left);
    }

    #[test]
    fn test_sink_failure_stops_stream() {
        let mut fb = MockFramebuffer::gradient(4, 4);
        let mut sink = VecSink::failing_after(60);
        let result = ImageFormat::Bmp.encode(&mut fb, &mut sink);
        assert!(matches!(result, Err(CaptureError::Sink(_))));
        // Header went out, the first row did not fit
        assert_eq!(sink.data.len(), BMP_HEADER_LEN);
    }

    #[test]
    fn test_display_failure() {
        let mut fb = MockFramebuffer::gradient(4, 4);
        fb.fail_reads = true;
        let mut sink = VecSink::new();
        assert_eq!(
            ImageFormat::Ppm.encode(&mut fb, &mut sink),
            Err(CaptureError::Display(DisplayError::Communication))
        );
    }

    #[test]
    fn test_rejects_empty_and_wide_frames() {
        let mut sink = VecSink::new();
        let mut empty = MockFramebuffer::gradient(0, 10);
        assert_eq!(
            ImageFormat::Bmp.encode(&mut empty, &mut sink),
            Err(CaptureError::EmptyFrame)
        );
        let mut wide = MockFramebuffer::gradient(MAX_WIDTH as u16 + 1, 1);
        assert_eq!(
            ImageFormat::Bmp.encode(&mut wide, &mut sink),
            Err(CaptureError::TooWide)
        );
        assert!(sink.data.is_empty());
    }

    #[test]
    fn test_max_width_fits() {
        let mut fb = MockFramebuffer::gradient(MAX_WIDTH as u16, 2);
        let mut sink = VecSink::new();
        let n = ImageFormat::Bmp.encode(&mut fb, &mut sink).unwrap();
        assert_eq!(n, bmp_file_size(MAX_WIDTH as u16, 2));
    }

    #[test]
    fn test_save_to_storage() {
        let mut fb = two_by_two();
        let mut storage = MockStorage::new();
        storage.put("/gauge_0.bmp", b"stale contents that are longer than the image ... ".repeat(4));

        let n = save(&mut storage, &mut fb, "/gauge_0.bmp", ImageFormat::Bmp).unwrap();
        assert_eq!(n, 70);
        assert_eq!(storage.file("/gauge_0.bmp").unwrap().len(), 70);
        assert_eq!(storage.flushes, 1);
    }

    #[test]
    fn test_save_open_failure() {
        let mut fb = two_by_two();
        let mut storage = MockStorage::new();
        storage.fail_open = true;
        assert_eq!(
            save(&mut storage, &mut fb, "/gauge_0.bmp", ImageFormat::Bmp),
            Err(SaveError::Open(StorageError::OpenFailed))
        );
        assert!(storage.file("/gauge_0.bmp").is_none());
    }

    #[test]
    fn test_swap_red_blue_ignores_partial_pixel() {
        let mut px = [1, 2, 3, 4, 5];
        swap_red_blue(&mut px);
        assert_eq!(px, [3, 2, 1, 4, 5]);
    }

    proptest! {
        #[test]
        fn prop_bmp_length(width in 1u16..=64, height in 1u16..=16) {
            let mut fb = MockFramebuffer::gradient(width, height);
            let mut sink = VecSink::new();
            let n = ImageFormat::Bmp.encode(&mut fb, &mut sink).unwrap();
            let w = usize::from(width);
            let pad = (4 - (3 * w) % 4) % 4;
            prop_assert_eq!(n, 54 + (3 * w + pad) * usize::from(height));
            prop_assert_eq!(sink.data.len(), n);
            prop_assert_eq!(ImageFormat::Bmp.encoded_size(width, height), n);
        }

        #[test]
        fn prop_ppm_length(width in 1u16..=64, height in 1u16..=16) {
            let mut fb = MockFramebuffer::gradient(width, height);
            let mut sink = VecSink::new();
            let n = ImageFormat::Ppm.encode(&mut fb, &mut sink).unwrap();
            let header = format!("P6\n{} {}\n255\n", width, height);
            prop_assert_eq!(n, header.len() + 3 * usize::from(width) * usize::from(height));
            prop_assert_eq!(&sink.data[..header.len()], header.as_bytes());
            prop_assert_eq!(ImageFormat::Ppm.encoded_size(width, height), n);
        }

        #[test]
        fn prop_bmp_row_order(width in 1u16..=16, height in 1u16..=8) {
            let mut fb = MockFramebuffer::gradient(width, height);
            let mut sink = VecSink::new();
            ImageFormat::Bmp.encode(&mut fb, &mut sink).unwrap();

            let stride = usize::from(width) * 3 + row_padding(width);
            // Stored row 0 is panel row H-1
            let row = &sink.data[BMP_HEADER_LEN..BMP_HEADER_LEN + stride];
            for x in 0..width {
                let [r, g, b] = fb.pixel(x, height - 1);
                let i = usize::from(x) * 3;
                prop_assert_eq!(&row[i..i + 3], &[b, g, r]);
            }
            prop_assert!(row[usize::from(width) * 3..].iter().all(|&p| p == 0));
        }
    }
}
