//! Shade-run wrapping for SVG text lines.
//!
//! A line is only rewritten when it carries a `<text x=...>` element. The text
//! content between the opening tag and the last `</text>` is split into runs of
//! the marker glyph and runs of everything else; marker runs are wrapped in
//! `<tspan class="shade">` and the rest is copied through. Any `<tspan>` already
//! present in the content is unwrapped first, so running the pass twice gives
//! the same result as running it once.
//!
//! Lines that do not have the expected `prefix <text ...> content </text> suffix`
//! shape are returned untouched.

use memchr::{memchr, memmem};
use std::borrow::Cow;

/// LIGHT SHADE (U+2591), the block glyph the logo art is drawn with.
pub const DEFAULT_MARKER: char = '░';
pub const DEFAULT_CLASS: &str = "shade";

/* ================================ Style ================================== */

/// Markup literals matched and emitted by [`process_line`].
///
/// `ShadeStyle::default()` matches `<text x=` lines and wraps `░` runs in
/// `<tspan class="shade">`.
#[derive(Clone, Debug)]
pub struct ShadeStyle {
    marker: char,
    signature: String,
    text_open: String,
    text_close: String,
    wrap_open: String,
    wrap_close: String,
    wrap_start_tag: String,
}

impl Default for ShadeStyle {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER, DEFAULT_CLASS)
    }
}

impl ShadeStyle {
    pub fn new(marker: char, class: &str) -> Self {
        Self::with_elements(marker, class, "text", "tspan")
    }

    /// Same as [`ShadeStyle::new`] with custom element names for the text
    /// element and the wrapper.
    pub fn with_elements(marker: char, class: &str, text: &str, wrapper: &str) -> Self {
        Self {
            marker,
            signature: format!("<{text} x="),
            text_open: format!("<{text}"),
            text_close: format!("</{text}>"),
            wrap_open: format!("<{wrapper}"),
            wrap_close: format!("</{wrapper}>"),
            wrap_start_tag: format!("<{wrapper} class=\"{class}\">"),
        }
    }

    pub fn marker(&self) -> char {
        self.marker
    }
}

/* =============================== Segments ================================ */

/// Maximal run of characters that are all marker or all non-marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub shaded: bool,
}

/// Split `content` into alternating marker / non-marker runs, in order.
/// Empty input gives no segments.
pub fn segments(content: &str, marker: char) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut current: Option<bool> = None;

    for (i, c) in content.char_indices() {
        let shaded = c == marker;
        if let Some(prev) = current {
            if prev != shaded {
                out.push(Segment {
                    text: &content[start..i],
                    shaded: prev,
                });
                start = i;
            }
        }
        current = Some(shaded);
    }

    if let Some(shaded) = current {
        out.push(Segment {
            text: &content[start..],
            shaded,
        });
    }
    out
}

fn render_segments(segments: &[Segment<'_>], style: &ShadeStyle, out: &mut String) {
    for seg in segments {
        if seg.shaded {
            out.push_str(&style.wrap_start_tag);
            out.push_str(seg.text);
            out.push_str(&style.wrap_close);
        } else {
            out.push_str(seg.text);
        }
    }
}

/* ============================ Normalization ============================== */

/// Replace every `<tspan ...>inner</tspan>` in `content` by `inner`.
///
/// The opening tag ends at the first `>`; the inner text ends at the nearest
/// `</tspan>`. Nested wrappers are only unwrapped one level, and a wrapper
/// without a closing tag is left as is.
pub fn strip_wrappers<'a>(content: &'a str, style: &ShadeStyle) -> Cow<'a, str> {
    let bytes = content.as_bytes();
    let open = style.wrap_open.as_bytes();
    let close = style.wrap_close.as_bytes();

    let mut out = String::new();
    let mut copied = 0usize;

    while let Some(off) = memmem::find(&bytes[copied..], open) {
        let start = copied + off;
        let after_name = start + open.len();
        let Some(gt) = memchr(b'>', &bytes[after_name..]).map(|o| after_name + o) else {
            break;
        };
        let inner = gt + 1;
        let Some(end) = memmem::find(&bytes[inner..], close).map(|o| inner + o) else {
            break;
        };
        out.push_str(&content[copied..start]);
        out.push_str(&content[inner..end]);
        copied = end + close.len();
    }

    if copied == 0 {
        return Cow::Borrowed(content);
    }
    out.push_str(&content[copied..]);
    Cow::Owned(out)
}

/* ============================ Line splitting ============================= */

/// Split a line into `(prefix, content, suffix)`.
///
/// The suffix starts at the last `</text>` and runs to the end of the line,
/// line terminator included. The prefix ends with the `>` of the rightmost
/// `<text` tag that closes before the suffix.
fn split_text_element<'a>(line: &'a str, style: &ShadeStyle) -> Option<(&'a str, &'a str, &'a str)> {
    let bytes = line.as_bytes();
    let close = memmem::rfind(bytes, style.text_close.as_bytes())?;

    for open in memmem::rfind_iter(&bytes[..close], style.text_open.as_bytes()) {
        let after_name = open + style.text_open.len();
        let Some(gt) = memchr(b'>', &bytes[after_name..]).map(|o| after_name + o) else {
            continue;
        };
        if gt < close {
            return Some((&line[..=gt], &line[gt + 1..close], &line[close..]));
        }
    }
    None
}

/* ================================ Lines ================================== */

/// Rewrite one line, wrapping marker runs inside its text element.
///
/// Never fails: lines without a `<text x=` element, or whose element can't be
/// split cleanly, come back borrowed and unchanged. A line whose rewrite equals
/// the input also comes back borrowed.
pub fn process_line<'a>(line: &'a str, style: &ShadeStyle) -> Cow<'a, str> {
    if memmem::find(line.as_bytes(), style.signature.as_bytes()).is_none() {
        return Cow::Borrowed(line);
    }
    let Some((prefix, content, suffix)) = split_text_element(line, style) else {
        return Cow::Borrowed(line);
    };

    let clean = strip_wrappers(content, style);
    let segs = segments(&clean, style.marker);
    let wrapped = segs.iter().filter(|s| s.shaded).count();

    let mut out = String::with_capacity(
        line.len() + wrapped * (style.wrap_start_tag.len() + style.wrap_close.len()),
    );
    out.push_str(prefix);
    render_segments(&segs, style, &mut out);
    out.push_str(suffix);

    if out == line {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(out)
    }
}
