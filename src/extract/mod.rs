pub mod api;
pub mod page;

use regex::Regex;

use crate::snippets::SnippetList;

// Escaped paragraph tags as they appear in raw payload text. The site
// serializes answer HTML inside JSON, so angle brackets arrive as literal
// backslash-u escape sequences. The static page and the answers API use
// different casings and a different closing-tag encoding, which is why the
// trim widths differ (13/19 vs 13/14). Widths fall out of the literals.
pub(crate) const PAGE_P_OPEN: &str = r"\u003Cp\u003E";
pub(crate) const PAGE_P_CLOSE: &str = r"\u003C\u002Fp\u003E";
pub(crate) const API_P_OPEN: &str = r"\u003cp\u003e";
pub(crate) const API_P_CLOSE: &str = r"\u003c/p\u003e";

/// Non-greedy matcher for one escaped paragraph, `open` through `close`.
pub(crate) fn paragraph_re(open: &str, close: &str) -> Regex {
    Regex::new(&format!("{}.*?{}", regex::escape(open), regex::escape(close))).unwrap()
}

/// Scan `raw` for escaped paragraph fragments and insert the inner text of
/// each into `jokes`, subject to the list's length and dedup gates.
/// Returns how many fragments were newly stored.
pub(crate) fn scan_paragraphs(
    raw: &str,
    re: &Regex,
    open: &str,
    close: &str,
    jokes: &mut SnippetList,
) -> usize {
    let mut added = 0;
    for m in re.find_iter(raw) {
        let text = m.as_str();
        // The escape literals are pure ASCII, so byte offsets equal char offsets.
        let inner = &text[open.len()..text.len() - close.len()];
        if jokes.insert(inner) {
            added += 1;
        }
    }
    added
}
