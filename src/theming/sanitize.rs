//! Output sanitization for plain-text and limited-markup values

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Comments, including one left open at the end of the input
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").expect("comment pattern"));

/// A tag opener followed by anything up to `>`, skipping quoted attribute values
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[A-Za-z/!?](?:"[^"]*"|'[^']*'|[^"'>])*(?:>|\z)"#).expect("tag pattern")
});

/// Attribute-free inline tags kept verbatim by [`escape_html`]
static ALLOWED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)(b|i|u|em|strong|br)\s*(/?)>").expect("allowed tag pattern")
});

/// Remove every markup tag and comment, keeping the text between them
///
/// A `<` that cannot start a tag (e.g. `a < b`) is kept as text.
pub fn strip_tags(input: &str) -> String {
    let without_comments = COMMENT_RE.replace_all(input, "");
    TAG_RE.replace_all(&without_comments, "").into_owned()
}

/// Escape HTML special characters, except attribute-free allow-listed tags
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in ALLOWED_TAG_RE.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(tag) = normalized_tag(&caps) else { continue };

        escape_text(&input[last..whole.start()], &mut out);
        out.push_str(&tag);
        last = whole.end();
    }

    escape_text(&input[last..], &mut out);
    out
}

fn normalized_tag(caps: &Captures<'_>) -> Option<String> {
    let closing = !caps[1].is_empty();
    let slash = !caps[3].is_empty();
    if closing && slash {
        return None;
    }

    let name = caps[2].to_ascii_lowercase();
    Some(match (closing, slash || name == "br") {
        (true, _) => format!("</{}>", name),
        (false, true) => format!("<{}/>", name),
        (false, false) => format!("<{}>", name),
    })
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}
