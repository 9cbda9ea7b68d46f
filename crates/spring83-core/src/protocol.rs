//! Protocol constants for Spring '83.

/// Maximum board length in bytes, timestamp tag included.
pub const MAX_BOARD_LEN: usize = 2217;

/// Value of the version header for this protocol revision.
pub const PROTOCOL_VERSION: &str = "83";

/// Header carrying [`PROTOCOL_VERSION`] on every request.
pub const VERSION_HEADER: &str = "Spring-Version";

/// Header carrying the hex-encoded board signature.
pub const SIGNATURE_HEADER: &str = "Spring-Signature";

/// Content type of every published board.
pub const BOARD_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Server contacted when none is configured.
pub const DEFAULT_SERVER: &str = "bogbody.biz";

/// strftime pattern for `If-Unmodified-Since` (IMF-fixdate).
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a UTC instant as an HTTP date.
pub fn http_date(now: chrono::DateTime<chrono::Utc>) -> String {
    now.format(HTTP_DATE_FORMAT).to_string()
}
