//! Character encoding for template, dependency and page text.
//!
//! Labels follow the WHATWG Encoding Standard, so `ISO-8859-1`, `latin1` and
//! `windows-1252` all name the same decoder. Undecodable bytes become U+FFFD
//! and characters the target encoding cannot represent are written as HTML
//! numeric character references; both cases are logged, neither fails.

use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use std::path::Path;
use tracing::warn;

/// Looks up the encoding named by `label`, ignoring case and surrounding
/// whitespace. Returns `None` for labels the Encoding Standard does not know.
///
/// # Examples
///
/// ```rust
/// use specrunner_cli::utils::fs::resolve_encoding;
///
/// assert_eq!(resolve_encoding("latin1"), resolve_encoding("ISO-8859-1"));
/// assert!(resolve_encoding("as9du20asd xanadu").is_none());
/// ```
pub fn resolve_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Like [`resolve_encoding`], falling back to UTF-8 for unknown labels.
pub fn resolve_encoding_or_utf8(label: &str) -> &'static Encoding {
    resolve_encoding(label).unwrap_or_else(|| {
        warn!("Unknown encoding '{}', reading and writing files as UTF-8", label);
        UTF_8
    })
}

/// Decodes file content read from `path`. A leading byte order mark selects
/// its own encoding and is stripped.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding, path: &Path) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "{} is not valid {}; malformed bytes were replaced",
            path.display(),
            used.name()
        );
    }
    text.into_owned()
}

/// Encodes `text` for writing to `path`.
///
/// UTF-16 encodings cannot be produced by the encoder and yield UTF-8.
pub fn encode_text<'a>(text: &'a str, encoding: &'static Encoding, path: &Path) -> Cow<'a, [u8]> {
    let (bytes, used, unmappable) = encoding.encode(text);
    if used != encoding {
        warn!("{} cannot be written as {}; using {}", path.display(), encoding.name(), used.name());
    }
    if unmappable {
        warn!(
            "{} contains characters outside {}; they were written as character references",
            path.display(),
            used.name()
        );
    }
    bytes
}
