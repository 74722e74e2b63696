//! Static HTTP assets

use screencap_http::Route;

/// Bodies for the routes that serve fixed content
///
/// Contents are provided by the platform; the core only knows which route
/// maps to which blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assets<'a> {
    pub index_html: &'a [u8],
    pub favicon: &'a [u8],
    pub logo: &'a [u8],
    pub refresh_image: &'a [u8],
    pub button_image: &'a [u8],
}

impl<'a> Assets<'a> {
    /// Fixed body for `route`, or `None` if it is generated or unknown
    pub fn body(&self, route: Route) -> Option<&'a [u8]> {
        match route {
            Route::Index => Some(self.index_html),
            Route::Favicon => Some(self.favicon),
            Route::Logo => Some(self.logo),
            Route::RefreshImage => Some(self.refresh_image),
            Route::ButtonImage => Some(self.button_image),
            Route::Screenshot | Route::Unknown => None,
        }
    }
}
