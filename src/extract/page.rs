use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};

use super::{paragraph_re, scan_paragraphs, PAGE_P_CLOSE, PAGE_P_OPEN};
use crate::snippets::SnippetList;

/// Script block the site embeds its serialized initial state in.
const DATA_ISLAND_SELECTOR: &str = "script#js-initialData";

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static DATA_ISLAND_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(DATA_ISLAND_SELECTOR).unwrap());
static PARA_RE: LazyLock<Regex> = LazyLock::new(|| paragraph_re(PAGE_P_OPEN, PAGE_P_CLOSE));

/// Extract the question title and answer paragraphs from a statically
/// rendered question page. The title text is pushed verbatim as the list's
/// first element. Answers in the visible body duplicate the ones in the
/// data island, so only the island is scanned. A page without a title or
/// without the island fails this question; the caller decides what that
/// means for the rest of the run. Returns the number of snippets stored.
pub fn extract(html: &str, jokes: &mut SnippetList) -> Result<usize> {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE_SEL)
        .next()
        .context("page has no <title> element")?
        .text()
        .collect::<String>();
    jokes.push_title(title);

    let island = doc
        .select(&DATA_ISLAND_SEL)
        .next()
        .with_context(|| format!("page has no {} block", DATA_ISLAND_SELECTOR))?;
    let raw = island.text().collect::<String>();

    Ok(scan_paragraphs(&raw, &PARA_RE, PAGE_P_OPEN, PAGE_P_CLOSE, jokes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, island: &str) -> String {
        format!(
            "<html><head><title>{}</title></head><body>\
             <script id=\"js-initialData\" type=\"text/json\">{}</script>\
             </body></html>",
            title, island
        )
    }

    #[test]
    fn title_and_paragraph() {
        let html = page("Test Q", r"\u003Cp\u003EHello world\u003C\u002Fp\u003E");
        let mut jokes = SnippetList::new();
        let added = extract(&html, &mut jokes).unwrap();
        assert_eq!(added, 1);
        let all: Vec<&str> = jokes.iter().collect();
        assert_eq!(all, vec!["Test Q", "Hello world"]);
    }

    #[test]
    fn missing_title_is_an_error() {
        let mut jokes = SnippetList::new();
        assert!(extract("<html><body></body></html>", &mut jokes).is_err());
    }

    #[test]
    fn missing_data_island_is_an_error() {
        let html = "<html><head><title>Test Q</title></head><body></body></html>";
        let mut jokes = SnippetList::new();
        assert!(extract(html, &mut jokes).is_err());
        // The title was already seen before the island lookup failed.
        assert_eq!(jokes.title(), Some("Test Q"));
    }

    #[test]
    fn lowercase_escapes_are_not_matched_on_pages() {
        let html = page("Test Q", r"\u003cp\u003e这里是小写转义的段落\u003c/p\u003e");
        let mut jokes = SnippetList::new();
        assert_eq!(extract(&html, &mut jokes).unwrap(), 0);
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("tests/fixtures/question.html").unwrap();
        let mut jokes = SnippetList::new();
        let added = extract(&html, &mut jokes).unwrap();
        assert_eq!(jokes.title(), Some("有哪些让人笑到头掉的笑话？ - 知乎"));
        // Duplicate and too-short fragments are rejected during the scan.
        assert_eq!(added, 2);
        assert_eq!(jokes.len(), 3);
    }
}
