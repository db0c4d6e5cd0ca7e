/// Minimum trimmed character count a snippet must exceed to be kept.
pub const MIN_SNIPPET_CHARS: usize = 5;

/// Ordered collection of unique snippets for one question. The question
/// title is always the first element; everything after it is a joke
/// candidate in extraction order. One list is built per question and
/// consumed by the writer.
#[derive(Debug, Default)]
pub struct SnippetList {
    items: Vec<String>,
}

impl SnippetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the question title. Unconditional: no length or dedup gate.
    /// Must be called before any `insert`.
    pub fn push_title(&mut self, title: impl Into<String>) {
        self.items.push(title.into());
    }

    /// Insert a candidate snippet. Rejected when its trimmed character
    /// count is too short or an identical string is already stored.
    /// Returns whether the snippet was stored.
    pub fn insert(&mut self, fragment: &str) -> bool {
        if fragment.trim().chars().count() <= MIN_SNIPPET_CHARS {
            return false;
        }
        // Exact-match linear scan; lists stay small (a hundred-odd entries).
        if self.items.iter().any(|s| s == fragment) {
            return false;
        }
        self.items.push(fragment.to_string());
        true
    }

    pub fn title(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_first_and_ungated() {
        let mut list = SnippetList::new();
        list.push_title("短");
        assert!(list.insert("一个足够长的笑话"));
        assert_eq!(list.title(), Some("短"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut list = SnippetList::new();
        assert!(list.insert("同一个笑话讲两遍"));
        assert!(!list.insert("同一个笑话讲两遍"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn short_fragments_are_rejected() {
        let mut list = SnippetList::new();
        assert!(!list.insert("12345"));
        assert!(list.insert("123456"));
        assert!(!list.insert("哈哈哈哈哈"));
        assert!(list.insert("哈哈哈哈哈哈"));
    }

    #[test]
    fn length_gate_uses_trimmed_text() {
        let mut list = SnippetList::new();
        assert!(!list.insert("   abc   "));
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut list = SnippetList::new();
        list.push_title("标题");
        list.insert("第一个完整笑话");
        list.insert("第二个完整笑话");
        let all: Vec<&str> = list.iter().collect();
        assert_eq!(all, vec!["标题", "第一个完整笑话", "第二个完整笑话"]);
    }
}
