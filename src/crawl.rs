use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::extract::{api, page};
use crate::fetch::Fetcher;
use crate::snippets::SnippetList;
use crate::writer::{self, WriteSummary};

const QUESTION_BASE: &str = "https://zhihu.com/question/";
const ANSWERS_BASE: &str = "https://www.zhihu.com/api/v4/questions/";

/// Answer fields requested from the API, URL-encoded the way the web client
/// sends them. The interesting one is `content`; the rest keeps the endpoint
/// from trimming its response shape.
const ANSWERS_INCLUDE: &str = "data%5B%2A%5D.is_normal%2Cadmin_closed_comment%2Creward_info%2Cis_collapsed%2Cannotation_action%2Cannotation_detail%2Ccollapse_reason%2Cis_sticky%2Ccollapsed_by%2Csuggest_edit%2Ccomment_count%2Ccan_comment%2Ccontent%2Ceditable_content%2Cvoteup_count%2Creshipment_settings%2Ccomment_permission%2Ccreated_time%2Cupdated_time%2Creview_info%2Crelevant_info%2Cquestion%2Cexcerpt%2Crelationship.is_authorized%2Cis_author%2Cvoting%2Cis_thanked%2Cis_nothelp%2Cis_labeled%2Cis_recognized%2Cpaid_info%2Cpaid_info_content%3Bdata%5B%2A%5D.mark_infos%5B%2A%5D.url%3Bdata%5B%2A%5D.author.follower_count%2Cbadge%5B%2A%5D.topics";

pub const PAGE_SIZE: usize = 5;
pub const ANSWER_PAGES: usize = 20;

pub fn question_url(id: u64) -> String {
    format!("{}{}", QUESTION_BASE, id)
}

/// Paginated answers URL for `page` in 1..=ANSWER_PAGES, i.e. offsets
/// 5, 10, …, 100.
pub fn answers_url(id: u64, page: usize) -> String {
    format!(
        "{}{}/answers?include={}&limit={}&offset={}&platform=desktop&sort_by=default",
        ANSWERS_BASE,
        id,
        ANSWERS_INCLUDE,
        PAGE_SIZE,
        page * PAGE_SIZE
    )
}

pub struct CrawlStats {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Crawl every configured question in order, strictly sequentially, writing
/// one joke file per question. A question whose static page cannot be
/// fetched or parsed is skipped with a warning; a failed answers page only
/// loses that page. Writer errors abort the run.
pub async fn run(settings: &Settings) -> Result<CrawlStats> {
    let fetcher = Fetcher::new(&settings.cookie)?;
    let total = settings.questions.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut written = 0;
    let mut skipped = 0;
    for (n, &id) in settings.questions.iter().enumerate() {
        pb.set_message(format!("question {}", id));
        match crawl_question(&fetcher, id, &settings.out_dir).await? {
            Some(summary) => {
                written += 1;
                pb.println(format!(
                    "[{}/{}] question {} -> {} ({} snippets)",
                    n + 1,
                    total,
                    id,
                    summary.path.display(),
                    summary.snippets
                ));
            }
            None => skipped += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(CrawlStats {
        total,
        written,
        skipped,
    })
}

/// Fetch, extract and write a single question. Returns Ok(None) when the
/// question was skipped for a non-fatal reason; only writer failures
/// propagate as errors.
async fn crawl_question(
    fetcher: &Fetcher,
    id: u64,
    out_dir: &Path,
) -> Result<Option<WriteSummary>> {
    let mut jokes = SnippetList::new();

    info!("Fetching question {}", id);
    let html = match fetcher.get_text(&question_url(id)).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Skipping question {}: {}", id, e);
            return Ok(None);
        }
    };
    match page::extract(&html, &mut jokes) {
        Ok(count) => debug!("Question {}: {} snippets from static page", id, count),
        Err(e) => {
            warn!("Skipping question {}: {}", id, e);
            return Ok(None);
        }
    }

    for page_no in 1..=ANSWER_PAGES {
        match fetcher.get_text(&answers_url(id, page_no)).await {
            Ok(body) => {
                let count = api::extract(&body, &mut jokes);
                debug!(
                    "Question {}: {} snippets at offset {}",
                    id,
                    count,
                    page_no * PAGE_SIZE
                );
            }
            Err(e) => warn!("Answer page {} of question {} failed: {}", page_no, id, e),
        }
    }

    debug!("Question {}: {} snippets collected", id, jokes.len());
    writer::write_and_reset(jokes, out_dir).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_url_is_the_bare_page() {
        assert_eq!(question_url(341002197), "https://zhihu.com/question/341002197");
    }

    #[test]
    fn answer_urls_cover_offsets_5_through_100() {
        let urls: Vec<String> = (1..=ANSWER_PAGES).map(|p| answers_url(42, p)).collect();
        assert_eq!(urls.len(), 20);
        assert!(urls[0].contains("offset=5&"));
        assert!(urls[19].contains("offset=100&"));
        for url in &urls {
            assert!(url.starts_with("https://www.zhihu.com/api/v4/questions/42/answers?"));
            assert!(url.contains("limit=5&"));
            assert!(url.contains("sort_by=default"));
        }
    }
}
