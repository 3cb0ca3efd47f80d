//! Gift link syntax check.

use url::Url;

/// Whether `link` parses as an absolute URL.
///
/// This is the check the browser runs before submitting a gift. The server only
/// applies it when strict link checking is configured.
pub fn is_valid_link(link: &str) -> bool {
    Url::parse(link).is_ok()
}
