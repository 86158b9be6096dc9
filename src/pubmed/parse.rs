//! Best-effort HTML heuristics for PubMed result and article pages.
//!
//! Pure functions over fetched markup so each strategy can be tested against
//! saved fixture pages. Every extractor is an ordered strategy list:
//! structural selectors first, looser text/regex scans as fallback. None of
//! this is a correctness contract against the live site; callers must expect
//! empty results when the page structure drifts.

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::sync::OnceLock;

/// Minimum text length for an accepted abstract candidate.
const MIN_ABSTRACT_LEN: usize = 50;

/// Minimum link-text length for the fallback result-link heuristic.
const MIN_LINK_TEXT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

fn article_id_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/\d+/?$").unwrap())
}

fn abstract_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(Abstract|Background|Objective|Methods|Results|Conclusion|Introduction):\s*")
            .unwrap()
    })
}

fn abstract_body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)(?:abstract|background)[\s:]+(.+?)(?:\n\n|introduction|methods|results|conclusion|\z)")
            .unwrap()
    })
}

fn page_of_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:page|of)\s+(\d+)").unwrap())
}

fn normalize_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{base_url}{href}")
    } else {
        format!("{base_url}/{href}")
    }
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn body_text(doc: &Html) -> String {
    let body = Selector::parse("body").unwrap();
    doc.select(&body).next().map(element_text).unwrap_or_default()
}

/// Extract title/URL pairs from a search result page.
///
/// Primary structure: `article.docsum` entries with an `a.docsum-title` link.
/// Fallback: any anchor whose href ends in a numeric article id and whose
/// text is long enough to be a title. De-duplicated by URL, order kept.
pub fn parse_search_results(html: &str, base_url: &str) -> Vec<SearchHit> {
    let doc = Html::parse_document(html);
    let mut hits: Vec<SearchHit> = Vec::new();

    let docsum = Selector::parse("article.docsum").unwrap();
    let title_link = Selector::parse("a.docsum-title").unwrap();

    let entries: Vec<_> = doc.select(&docsum).collect();
    if !entries.is_empty() {
        for entry in entries {
            let Some(link) = entry.select(&title_link).next() else {
                continue;
            };
            let title = element_text(link).trim().to_string();
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if title.is_empty() || href.is_empty() {
                continue;
            }
            hits.push(SearchHit { title, url: normalize_url(href, base_url) });
        }
    } else {
        let anchor = Selector::parse("a[href]").unwrap();
        for link in doc.select(&anchor) {
            let href = link.value().attr("href").unwrap_or_default();
            let text = element_text(link).trim().to_string();
            if article_id_href_re().is_match(href) && text.len() > MIN_LINK_TEXT_LEN {
                let url = normalize_url(href, base_url);
                if !hits.iter().any(|hit| hit.url == url) {
                    hits.push(SearchHit { title: text, url });
                }
            }
        }
    }

    // distinct by url, first occurrence wins
    let mut seen = std::collections::HashSet::new();
    hits.retain(|hit| seen.insert(hit.url.clone()));
    hits
}

/// Extract the abstract text from an article page.
///
/// Tries an ordered list of selectors, accepting the first whose text (after
/// stripping a leading section label) is substantial; falls back to a regex
/// scan of the whole page text.
pub fn parse_abstract(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let selectors = [
        "#abstract",
        ".abstract",
        ".abstract-content",
        "div.abstract-text",
        "section#abstract",
        "[data-abstract]",
        ".abstract-text-content",
        "div[class*='abstract']",
    ];

    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = doc.select(&selector).next() {
            let text = element_text(element);
            let text = abstract_label_re().replace(text.trim(), "");
            let text = text.trim();
            if text.len() > MIN_ABSTRACT_LEN {
                return Some(text.to_string());
            }
        }
    }

    // Fallback: scan the page text between an abstract marker and the next
    // section heading (or end of text).
    let text = body_text(&doc);
    abstract_body_re()
        .captures(&text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|found| found.len() > MIN_ABSTRACT_LEN)
}

/// Largest page number advertised by the result page, floored at 1.
pub fn parse_total_pages(html: &str) -> u32 {
    let doc = Html::parse_document(html);
    let mut max_page = 1u32;

    let pagination = Selector::parse(".pagination, .page-numbers, [class*='page']").unwrap();
    let clickable = Selector::parse("a, button").unwrap();

    for element in doc.select(&pagination) {
        for link in element.select(&clickable) {
            if let Ok(page) = element_text(link).trim().parse::<u32>() {
                max_page = max_page.max(page);
            }
        }
    }

    // "page N" / "of N" phrasing anywhere in the page text
    if let Some(caps) = page_of_re().captures(&body_text(&doc)) {
        if let Ok(page) = caps[1].parse::<u32>() {
            max_page = max_page.max(page);
        }
    }

    max_page.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_relative_hrefs() {
        let base = "https://pubmed.ncbi.nlm.nih.gov";
        assert_eq!(normalize_url("/12345/", base), "https://pubmed.ncbi.nlm.nih.gov/12345/");
        assert_eq!(normalize_url("12345/", base), "https://pubmed.ncbi.nlm.nih.gov/12345/");
        assert_eq!(normalize_url("https://x.test/9", base), "https://x.test/9");
    }

    #[test]
    fn numeric_id_pattern() {
        assert!(article_id_href_re().is_match("/38412345/"));
        assert!(article_id_href_re().is_match("/38412345"));
        assert!(!article_id_href_re().is_match("/about/"));
        assert!(!article_id_href_re().is_match("/12345/extra"));
    }

    #[test]
    fn strips_leading_section_label() {
        let stripped = abstract_label_re().replace("Background: text follows", "");
        assert_eq!(stripped, "text follows");
        let untouched = abstract_label_re().replace("No label here", "");
        assert_eq!(untouched, "No label here");
    }
}
