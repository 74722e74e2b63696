//! Response status lines and headers
//!
//! Responses are written straight into the client stream: status line,
//! one `Content-type` header, a blank line, the body, and a trailing blank
//! line. There is no `Content-Length`; the end of the body is signalled by
//! closing the connection.

use embedded_io::Write;

use crate::route::Route;

/// Body of the 404 page
pub const NOT_FOUND_BODY: &[u8] = b"404 Page not found.<br>";

const CRLF: &[u8] = b"\r\n";

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ok,
    NotFound,
}

impl Status {
    /// Full status line without terminator
    pub fn line(self) -> &'static str {
        match self {
            Status::Ok => "HTTP/1.1 200 OK",
            Status::NotFound => "HTTP/1.1 404 Not Found",
        }
    }
}

/// Media type of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContentType {
    Html,
    Icon,
    Jpeg,
    Png,
    Bmp,
}

impl ContentType {
    /// MIME type string
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Html => "text/html",
            ContentType::Icon => "image/x-icon",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Png => "image/png",
            ContentType::Bmp => "image/bmp",
        }
    }
}

impl Route {
    /// Status and media type used to answer this route
    pub fn response_head(self) -> (Status, ContentType) {
        match self {
            Route::Unknown => (Status::NotFound, ContentType::Html),
            Route::Index => (Status::Ok, ContentType::Html),
            Route::Favicon => (Status::Ok, ContentType::Icon),
            Route::Logo => (Status::Ok, ContentType::Jpeg),
            Route::Screenshot => (Status::Ok, ContentType::Bmp),
            Route::RefreshImage | Route::ButtonImage => (Status::Ok, ContentType::Png),
        }
    }
}

/// Write the status line, content type and the blank line
pub fn write_head<W: Write>(
    out: &mut W,
    status: Status,
    content_type: ContentType,
) -> Result<(), W::Error> {
    out.write_all(status.line().as_bytes())?;
    out.write_all(CRLF)?;
    out.write_all(b"Content-type:")?;
    out.write_all(content_type.mime().as_bytes())?;
    out.write_all(CRLF)?;
    out.write_all(CRLF)
}

/// Write the blank line that follows every body
pub fn write_trailer<W: Write>(out: &mut W) -> Result<(), W::Error> {
    out.write_all(CRLF)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_of(route: Route) -> Vec<u8> {
        let (status, content_type) = route.response_head();
        let mut buf = [0u8; 64];
        let mut out: &mut [u8] = &mut buf;
        write_head(&mut out, status, content_type).unwrap();
        let remaining = out.len();
        buf[..64 - remaining].to_vec()
    }

    #[test]
    fn test_index_head() {
        assert_eq!(
            head_of(Route::Index),
            b"HTTP/1.1 200 OK\r\nContent-type:text/html\r\n\r\n".to_vec()
        );
    }

    #[test]
    fn test_not_found_head() {
        assert_eq!(
            head_of(Route::Unknown),
            b"HTTP/1.1 404 Not Found\r\nContent-type:text/html\r\n\r\n".to_vec()
        );
    }

    #[test]
    fn test_content_types() {
        assert_eq!(Route::Favicon.response_head().1.mime(), "image/x-icon");
        assert_eq!(Route::Logo.response_head().1.mime(), "image/jpeg");
        assert_eq!(Route::RefreshImage.response_head().1.mime(), "image/png");
        assert_eq!(Route::ButtonImage.response_head().1.mime(), "image/png");
        assert_eq!(Route::Screenshot.response_head().1.mime(), "image/bmp");
    }

    #[test]
    fn test_head_into_short_buffer_fails() {
        let mut buf = [0u8; 8];
        let mut out: &mut [u8] = &mut buf;
        assert!(write_head(&mut out, Status::Ok, ContentType::Html).is_err());
    }
}
