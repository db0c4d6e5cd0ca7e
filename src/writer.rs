use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use crate::snippets::{SnippetList, MIN_SNIPPET_CHARS};

// Escape fragments the cleanup pass looks for. Payload text keeps HTML
// serialized as backslash-u escape literals, same as at extraction time.
// The site emits line breaks and italics in lowercase only; bold shows up
// in both casings.
const ANCHOR_OPEN_UPPER: &str = r"\u003Ca";
const ANCHOR_OPEN_LOWER: &str = r"\u003ca";
const BR_ESCAPE: &str = r"\u003cbr/\u003e";
const BOLD_OPEN_LOWER: &str = r"\u003cb\u003e";
const BOLD_OPEN_UPPER: &str = r"\u003Cb\u003E";
const BOLD_CLOSE_LOWER: &str = r"\u003c/b\u003e";
const BOLD_CLOSE_UPPER: &str = r"\u003C\u002Fb\u003E";
const ITALIC_OPEN: &str = r"\u003ci\u003e";
const ITALIC_CLOSE: &str = r"\u003c/i\u003e";
const ENTITY_PREFIX: &str = r"\u0026";

/// Characters not allowed in filenames on common filesystems.
static ILLEGAL_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/:*?"<>|]"#).unwrap());

/// Entity escapes: `\u0026amp;`, `\u0026#39;` and friends.
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{}[#\w]+;", regex::escape(ENTITY_PREFIX))).unwrap());

/// Leading list markers: `1、`, `12.`, `3 `.
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+(?:\s*[、.]|[ \t])\s*").unwrap());

pub struct WriteSummary {
    pub path: PathBuf,
    pub snippets: usize,
}

/// Strip characters that are illegal in filenames on common filesystems.
pub fn sanitize_filename(name: &str) -> String {
    ILLEGAL_FILENAME_RE.replace_all(name, "").into_owned()
}

/// Cleanup pass applied to every snippet at write time. Returns None when
/// the snippet should not be written at all: anchor escapes mean the
/// fragment is a hyperlink rather than joke text, and anything that cleans
/// down to a handful of characters is noise.
pub fn clean_snippet(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.contains(ANCHOR_OPEN_UPPER) || s.contains(ANCHOR_OPEN_LOWER) {
        return None;
    }
    let s = s.replace(BR_ESCAPE, "\n");
    let s = s
        .replace(BOLD_OPEN_LOWER, "")
        .replace(BOLD_OPEN_UPPER, "")
        .replace(BOLD_CLOSE_LOWER, "")
        .replace(BOLD_CLOSE_UPPER, "")
        .replace(ITALIC_OPEN, "")
        .replace(ITALIC_CLOSE, "");
    let s = ENTITY_RE.replace_all(&s, "");
    let s = LIST_MARKER_RE.replace_all(&s, "");
    let s = s.trim();
    if s.chars().count() > MIN_SNIPPET_CHARS {
        Some(s.to_string())
    } else {
        None
    }
}

/// Write one question's snippets to `<out_dir>/<sanitized title>.txt`, one
/// cleaned snippet per line. The title is the first element and goes
/// through the same cleanup as everything else, so it lands in the file as
/// the first line. Consuming the list is the reset for the next question.
/// Filesystem errors here are fatal for the whole run.
pub fn write_and_reset(jokes: SnippetList, out_dir: &Path) -> Result<WriteSummary> {
    let title = jokes
        .title()
        .context("snippet list is empty, nothing to write")?;
    let path = out_dir.join(format!("{}.txt", sanitize_filename(title)));

    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let mut snippets = 0;
    for raw in jokes.iter() {
        if let Some(cleaned) = clean_snippet(raw) {
            writeln!(out, "{}", cleaned)
                .with_context(|| format!("failed to write {}", path.display()))?;
            snippets += 1;
        }
    }
    out.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    info!("Wrote {} snippets to {}", snippets, path.display());
    Ok(WriteSummary { path, snippets })
}
