//! Plain-text extraction from the HTML fragments produced by the renderer.

/// Strip tags, turn `<br>` and closing `</div>` into line breaks, decode the
/// entities emitted by the template escaper, and drop blank lines.
#[must_use]
pub fn text_content(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;

    for ch in html.chars() {
        match (in_tag, ch) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (false, other) => text.push(other),
            (true, '>') => {
                in_tag = false;
                let name = tag.trim().trim_end_matches('/').to_ascii_lowercase();
                if name == "br" || name == "/div" {
                    text.push('\n');
                }
            }
            (true, other) => tag.push(other),
        }
    }

    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
