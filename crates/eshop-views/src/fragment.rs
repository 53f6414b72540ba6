//! Rendered HTML fragments.

use std::fmt;

/// A piece of rendered HTML.
///
/// Fragments are only built by the render functions in this crate, which
/// escape every interpolated value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// Concatenate fragments in order.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a Fragment>) -> Fragment {
        Fragment(parts.into_iter().map(|f| f.0.as_str()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether the markup contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// Readable text with tags stripped and entities decoded, one block per
    /// line. Used by terminal surfaces.
    pub fn to_plain_text(&self) -> String {
        let mut text = String::with_capacity(self.0.len() / 2);
        let mut in_tag = false;
        for c in self.0.chars() {
            match c {
                '<' => {
                    in_tag = true;
                    text.push('\n');
                }
                '>' => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }

        html_unescape(&text)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn html_unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_plain_text() {
        let f = Fragment::new("<div>\n  <h2>Cart &amp; more</h2><p>2 items</p>\n</div>".into());
        assert_eq!(f.to_plain_text(), "Cart & more\n2 items");
    }

    #[test]
    fn test_concat() {
        let a = Fragment::new("<a>".into());
        let b = Fragment::new("</a>".into());
        assert_eq!(Fragment::concat([&a, &b]).as_str(), "<a></a>");
    }
}
