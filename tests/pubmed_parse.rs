//! Parsing heuristics exercised against saved fixture pages.

use phytomine::pubmed::parse::{parse_abstract, parse_search_results, parse_total_pages};

const BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";

const SEARCH_RESULTS: &str = include_str!("fixtures/search_results.html");
const SEARCH_FALLBACK: &str = include_str!("fixtures/search_fallback.html");
const ARTICLE_PAGE: &str = include_str!("fixtures/article_page.html");
const ARTICLE_PLAIN: &str = include_str!("fixtures/article_plain.html");

#[test]
fn docsum_entries_are_extracted_and_deduplicated() {
    let hits = parse_search_results(SEARCH_RESULTS, BASE);

    // four docsum entries, one a duplicate URL
    assert_eq!(hits.len(), 3);
    assert_eq!(
        hits[0].title,
        "Curcumin attenuates inflammation in a murine model of colitis."
    );
    assert_eq!(hits[0].url, "https://pubmed.ncbi.nlm.nih.gov/38412345/");
    assert_eq!(hits[1].url, "https://pubmed.ncbi.nlm.nih.gov/38412777/");
    // absolute hrefs pass through unchanged
    assert_eq!(hits[2].url, "https://pubmed.ncbi.nlm.nih.gov/38413001/");
}

#[test]
fn anchor_fallback_keeps_only_plausible_article_links() {
    let hits = parse_search_results(SEARCH_FALLBACK, BASE);

    // duplicate collapsed, short link text and non-numeric hrefs dropped
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Resveratrol supplementation and endothelial function");
    assert_eq!(hits[0].url, "https://pubmed.ncbi.nlm.nih.gov/31122334/");
    assert_eq!(hits[1].url, "https://pubmed.ncbi.nlm.nih.gov/29887766");
}

#[test]
fn no_results_page_yields_empty_list() {
    let hits = parse_search_results("<html><body><p>No results found.</p></body></html>", BASE);
    assert!(hits.is_empty());
}

#[test]
fn abstract_found_via_selector_with_label_stripped() {
    let text = parse_abstract(ARTICLE_PAGE).unwrap();
    assert!(text.starts_with("Curcuma longa (turmeric) contains curcumin"));
    assert!(text.ends_with("treated mice."));
}

#[test]
fn abstract_found_via_text_scan_fallback() {
    let text = parse_abstract(ARTICLE_PLAIN).unwrap();
    assert!(text.starts_with("Standardized Ginkgo biloba leaf extract"));
    assert!(text.contains("methodological quality."));
    // the scan stops at the next section heading
    assert!(!text.contains("double-blind"));
}

#[test]
fn short_or_missing_abstract_is_absent() {
    assert_eq!(parse_abstract(r#"<div id="abstract">Too short.</div>"#), None);
    assert_eq!(parse_abstract("<html><body><p>Unrelated page.</p></body></html>"), None);
}

#[test]
fn total_pages_prefers_the_advertised_result_count_phrase() {
    // pagination buttons top out at 5, "of 38" wins
    assert_eq!(parse_total_pages(SEARCH_RESULTS), 38);
}

#[test]
fn total_pages_reads_pagination_numbers() {
    let html = r#"
        <div class="pagination">
          <a href="?page=1">1</a>
          <a href="?page=2">2</a>
          <button>7</button>
          <button>Next</button>
        </div>
    "#;
    assert_eq!(parse_total_pages(html), 7);
}

#[test]
fn total_pages_floors_at_one() {
    assert_eq!(parse_total_pages("<html><body><p>nothing here</p></body></html>"), 1);
    assert_eq!(parse_total_pages(SEARCH_FALLBACK), 1);
}
