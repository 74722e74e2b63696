//! Route table and request-line classification

use screencap_hal::Button;

/// What a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Not in the route table (404)
    #[default]
    Unknown,
    /// Status page
    Index,
    /// Browser tab icon
    Favicon,
    /// Vendor logo shown on the status page
    Logo,
    /// Live capture of the display
    Screenshot,
    /// Refresh icon
    RefreshImage,
    /// Control button icon
    ButtonImage,
}

/// A classified `GET` request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    /// Resource to serve
    pub route: Route,
    /// Remote button press carried by the request
    pub press: Option<Button>,
}

/// Request-line prefixes understood by the server
///
/// Prefixes are matched against the whole request line, so `"GET / "` (with
/// the trailing space) only matches the bare root.
pub const ROUTES: &[(&str, Route, Option<Button>)] = &[
    ("GET / ", Route::Index, None),
    ("GET /favicon.ico", Route::Favicon, None),
    ("GET /electric-idea_100x100.jpg", Route::Logo, None),
    ("GET /refresh-40x30.png", Route::RefreshImage, None),
    ("GET /button.png", Route::ButtonImage, None),
    ("GET /screenshot.bmp", Route::Screenshot, None),
    ("GET /button-A", Route::Index, Some(Button::A)),
    ("GET /button-B", Route::Index, Some(Button::B)),
    ("GET /button-C", Route::Index, Some(Button::C)),
];

const GET_PREFIX: &[u8] = b"GET /";

/// Classify a request line
///
/// Returns `None` for lines that are not `GET` requests (headers, other
/// methods). A `GET` for a target outside [`ROUTES`] classifies as
/// [`Route::Unknown`]. The longest matching prefix wins.
pub fn classify(line: &[u8]) -> Option<Request> {
    if !line.starts_with(GET_PREFIX) {
        return None;
    }

    let best = ROUTES
        .iter()
        .filter(|(prefix, _, _)| line.starts_with(prefix.as_bytes()))
        .max_by_key(|(prefix, _, _)| prefix.len());

    Some(match best {
        Some(&(_, route, press)) => Request { route, press },
        None => Request {
            route: Route::Unknown,
            press: None,
        },
    })
}
