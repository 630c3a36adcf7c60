//! Filesystem-safe path segments.
//!
//! Segments must be stable and distinct on case-insensitive filesystems:
//! upper-case letters are encoded as `-` followed by the lower-case letter,
//! so `Foo` and `foo` map to `-foo` and `foo`.

use quire_pages::{Page, PageKind};

/// Segment used for a page with an empty name.
pub const ROOT_FILENAME: &str = "--root--";

/// Final segment of the path of a page that has child pages.
pub const PAGE_WITH_CHILDREN_SUFFIX: &str = "index";

/// Names that are never emitted bare: device names reserved by some
/// filesystems, and the page-with-children suffix.
pub const RESERVED_FILENAMES: [&str; 9] = [
    "index", "con", "aux", "lst", "prn", "nul", "eof", "inp", "out",
];

/// Strategy turning a page into its path segment.
pub trait SegmentEscaper: Send + Sync {
    /// Path segment of `page` below its parent.
    fn segment(&self, page: &Page) -> String;
}

/// Standard escaping: [`identifier_to_filename`] for every page except
/// packages, whose dotted names are used verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEscaper;

impl SegmentEscaper for DefaultEscaper {
    fn segment(&self, page: &Page) -> String {
        if page.kind == PageKind::Package && !page.name.is_empty() {
            page.name.clone()
        } else {
            identifier_to_filename(&page.name)
        }
    }
}

/// Escape an identifier into a filename.
///
/// # Examples
///
/// ```
/// use quire_location::identifier_to_filename;
///
/// assert_eq!(identifier_to_filename("Plus"), "-plus");
/// assert_eq!(identifier_to_filename("List<T>"), "-list--t-");
/// assert_eq!(identifier_to_filename(""), "--root--");
/// assert_eq!(identifier_to_filename("con"), "--con--");
/// ```
#[must_use]
pub fn identifier_to_filename(name: &str) -> String {
    if name.is_empty() {
        return ROOT_FILENAME.to_owned();
    }

    let mut escaped = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '<' | '>' => escaped.push('-'),
            c if c.is_ascii_uppercase() => {
                escaped.push('-');
                escaped.push(c.to_ascii_lowercase());
            }
            c => escaped.push(c),
        }
    }

    if RESERVED_FILENAMES.contains(&escaped.as_str()) {
        format!("--{escaped}--")
    } else {
        escaped
    }
}
