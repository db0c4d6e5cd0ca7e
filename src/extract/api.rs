use std::sync::LazyLock;

use regex::Regex;

use super::{paragraph_re, scan_paragraphs, API_P_CLOSE, API_P_OPEN};
use crate::snippets::SnippetList;

static PARA_RE: LazyLock<Regex> = LazyLock::new(|| paragraph_re(API_P_OPEN, API_P_CLOSE));

/// Extract answer paragraphs from one paginated answers API response. The
/// body is scanned as raw text; the escape casing differs from the static
/// page variant. Returns the number of snippets stored.
pub fn extract(json: &str, jokes: &mut SnippetList) -> usize {
    scan_paragraphs(json, &PARA_RE, API_P_OPEN, API_P_CLOSE, jokes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_escapes_are_matched() {
        let body = r#"{"content":"\u003cp\u003e接口返回的一个笑话\u003c/p\u003e"}"#;
        let mut jokes = SnippetList::new();
        assert_eq!(extract(body, &mut jokes), 1);
        let all: Vec<&str> = jokes.iter().collect();
        assert_eq!(all, vec!["接口返回的一个笑话"]);
    }

    #[test]
    fn uppercase_escapes_are_left_alone() {
        let body = r"\u003Cp\u003E大写转义不属于接口变体\u003C\u002Fp\u003E";
        let mut jokes = SnippetList::new();
        assert_eq!(extract(body, &mut jokes), 0);
    }

    #[test]
    fn dedup_runs_against_the_whole_collection() {
        let mut jokes = SnippetList::new();
        jokes.push_title("标题");
        assert!(jokes.insert("已经在列表里的笑话"));
        let body = format!("{}已经在列表里的笑话{}", API_P_OPEN, API_P_CLOSE);
        assert_eq!(extract(&body, &mut jokes), 0);
        assert_eq!(jokes.len(), 2);
    }

    #[test]
    fn fixture_answers() {
        let body = std::fs::read_to_string("tests/fixtures/answers.json").unwrap();
        let mut jokes = SnippetList::new();
        assert_eq!(extract(&body, &mut jokes), 2);
        let all: Vec<&str> = jokes.iter().collect();
        assert_eq!(all, vec!["这是接口返回的第一个笑话", "这是第二个足够长的笑话"]);
    }
}
