use crate::parsers::{ExtractOptions, extract, panic_message, try_extract};
use crate::error::ExtractError;
use crate::results::{ExtractionResult, NO_TITLE, PageRecord};

const BASE: &str = "https://x.test/dir/page.html";

const SAMPLE_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>  Sample   Page </title>
  <style>body { color: red; }</style>
  <script>var tracking = "do not index";</script>
</head>
<body>
  <h1>Welcome</h1>
  <p>First    paragraph</p>
  <a href="../a/b">Up and over</a>
  <a href="//cdn.x.test/lib.js">CDN</a>
  <a href="#section">Jump</a>
  <a href="/absolute">  Padded text  </a>
  <a name="no-href">Anchor without href</a>
  <img src="pic.png" alt="A picture">
  <img src="https://images.test/logo.svg">
  <img alt="no source">
  <script>document.write("hidden");</script>
</body>
</html>
"##;

fn success(result: ExtractionResult) -> PageRecord {
    match result {
        ExtractionResult::Success(page) => page,
        ExtractionResult::Failure(failed) => panic!("expected success, got: {}", failed.error),
    }
}

#[test]
fn test_extracts_sample_page() {
    let page = success(extract(SAMPLE_PAGE, BASE, &ExtractOptions::default()));

    assert_eq!(page.url, BASE);
    assert_eq!(page.title, "Sample   Page");
    assert_eq!(
        page.content,
        "Sample Page Welcome First paragraph Up and over CDN Jump Padded text Anchor without href"
    );

    let urls = page.links.iter().map(|l| l.url.as_str()).collect::<Vec<_>>();
    assert_eq!(
        urls,
        vec![
            "https://x.test/a/b",
            "https://cdn.x.test/lib.js",
            "https://x.test/dir/page.html#section",
            "https://x.test/absolute",
        ]
    );
    assert_eq!(page.links[0].text, "Up and over");
    assert_eq!(page.links[3].text, "Padded text");

    assert_eq!(page.images.len(), 2);
    assert_eq!(page.images[0].url, "https://x.test/dir/pic.png");
    assert_eq!(page.images[0].alt, "A picture");
    assert_eq!(page.images[1].url, "https://images.test/logo.svg");
    assert_eq!(page.images[1].alt, "");
}

#[test]
fn test_script_and_style_are_not_visible_text() {
    let page = success(extract(SAMPLE_PAGE, BASE, &ExtractOptions::default()));

    assert!(!page.content.contains("tracking"));
    assert!(!page.content.contains("hidden"));
    assert!(!page.content.contains("color"));
}

#[test]
fn test_noscript_children_are_ordinary_elements() {
    let html = r#"<html><head><title>T</title></head>
<body>
<p>Hello</p>
<noscript><img height="1" src="/px.gif" alt="pixel"><a href="/nojs">Enable JS</a></noscript>
</body></html>"#;
    let page = success(extract(html, BASE, &ExtractOptions::default()));

    assert!(!page.content.contains('<'));
    assert!(page.content.contains("Enable JS"));

    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].url, "https://x.test/nojs");
    assert_eq!(page.links[0].text, "Enable JS");

    assert_eq!(page.images.len(), 1);
    assert_eq!(page.images[0].url, "https://x.test/px.gif");
    assert_eq!(page.images[0].alt, "pixel");
}

#[test]
fn test_relative_link_round_trip() {
    let html = r#"<a href="../a/b">x</a>"#;
    let page = success(extract(html, BASE, &ExtractOptions::default()));
    assert_eq!(page.links[0].url, "https://x.test/a/b");
}

#[test]
fn test_reference_forms_resolve() {
    let html = r#"
<a href="other.html">sibling</a>
<a href="/root">root</a>
<a href="?q=1">query</a>
<a href="https://elsewhere.test/">absolute</a>
<a href="mailto:someone@x.test">mail</a>
"#;
    let page = success(extract(html, BASE, &ExtractOptions::default()));
    let urls = page.links.iter().map(|l| l.url.as_str()).collect::<Vec<_>>();
    assert_eq!(
        urls,
        vec![
            "https://x.test/dir/other.html",
            "https://x.test/root",
            "https://x.test/dir/page.html?q=1",
            "https://elsewhere.test/",
            "mailto:someone@x.test",
        ]
    );
}

#[test]
fn test_missing_title_uses_sentinel() {
    let page = success(extract(
        "<html><body><p>No head here</p></body></html>",
        BASE,
        &ExtractOptions::default(),
    ));
    assert_eq!(page.title, NO_TITLE);
    assert_eq!(page.title, "No Title");
}

#[test]
fn test_blank_title_uses_sentinel() {
    let page = success(extract(
        "<html><head><title>   </title></head><body>x</body></html>",
        BASE,
        &ExtractOptions::default(),
    ));
    assert_eq!(page.title, NO_TITLE);
}

#[test]
fn test_title_entities_are_decoded() {
    let page = success(extract(
        "<title>Fish &amp; Chips</title>",
        BASE,
        &ExtractOptions::default(),
    ));
    assert_eq!(page.title, "Fish & Chips");
}

#[test]
fn test_no_anchors_or_images_yield_empty_sequences() {
    let page = success(extract(
        "<html><body><p>Just text</p></body></html>",
        BASE,
        &ExtractOptions::default(),
    ));
    assert!(page.links.is_empty());
    assert!(page.images.is_empty());

    let value = serde_json::to_value(ExtractionResult::Success(page)).unwrap();
    assert_eq!(value["links"], serde_json::json!([]));
    assert_eq!(value["images"], serde_json::json!([]));
}

#[test]
fn test_empty_anchor_text_is_kept() {
    let html = r#"<a href="/photo"><img src="/thumb.png"></a><a href="/blank">   </a>"#;
    let page = success(extract(html, BASE, &ExtractOptions::default()));

    assert_eq!(page.links.len(), 2);
    assert_eq!(page.links[0].url, "https://x.test/photo");
    assert_eq!(page.links[0].text, "");
    assert_eq!(page.links[1].text, "");
}

#[test]
fn test_duplicates_are_not_removed() {
    let html = r#"
<a href="/same">one</a>
<a href="/same">one</a>
<img src="dup.png" alt="d">
<img src="dup.png" alt="d">
"#;
    let page = success(extract(html, BASE, &ExtractOptions::default()));
    assert_eq!(page.links.len(), 2);
    assert_eq!(page.links[0], page.links[1]);
    assert_eq!(page.images.len(), 2);
    assert_eq!(page.images[0], page.images[1]);
}

#[test]
fn test_truncation_keeps_exact_prefix() {
    let html = "<body>\n<p>abcdefghijklmnopqrstuvwxyz</p>\n<p>second  part</p>\n</body>";

    let full = success(extract(html, BASE, &ExtractOptions::default())).content;
    assert!(full.chars().count() > 10);

    let options = ExtractOptions::default().with_max_content_length(10);
    let truncated = success(extract(html, BASE, &options)).content;

    assert_eq!(truncated.chars().count(), 10);
    assert_eq!(truncated, full.chars().take(10).collect::<String>());
    assert_eq!(truncated, "abcdefghij");
}

#[test]
fn test_truncation_leaves_short_text_alone() {
    let options = ExtractOptions::default().with_max_content_length(5000);
    let page = success(extract("<p>short</p>", BASE, &options));
    assert_eq!(page.content, "short");
}

#[test]
fn test_extract_is_idempotent_apart_from_timestamp() {
    let options = ExtractOptions::default();
    let mut first = success(extract(SAMPLE_PAGE, BASE, &options));
    let second = success(extract(SAMPLE_PAGE, BASE, &options));

    first.scraped_at = second.scraped_at;
    assert_eq!(first, second);
}

#[test]
fn test_malformed_markup_still_returns_a_result() {
    let html = "<html><body><p>Unclosed <a href='/x'>link<div><img src=pic.png alt=broken";
    let result = extract(html, BASE, &ExtractOptions::default());

    // html5ever recovers from unclosed tags, so this degrades to a success
    let page = success(result);
    assert_eq!(page.title, NO_TITLE);
    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].url, "https://x.test/x");
    assert!(page.content.starts_with("Unclosed link"));
}

#[test]
fn test_garbage_input_still_returns_a_result() {
    let inputs = ["", "<<<>>>", "</div></div></p>", "<a href=", "\u{0}\u{1}binary"];
    for input in inputs {
        let result = extract(input, BASE, &ExtractOptions::default());
        assert_eq!(result.url(), BASE, "input {:?}", input);
    }
}

#[test]
fn test_invalid_base_url_is_a_failure_record() {
    let result = extract("<title>x</title>", "not a url", &ExtractOptions::default());

    match result {
        ExtractionResult::Failure(failed) => {
            assert_eq!(failed.url, "not a url");
            assert!(failed.error.contains("invalid base URL"), "{}", failed.error);
        }
        ExtractionResult::Success(_) => panic!("expected a failure record"),
    }
}

#[test]
fn test_unresolvable_reference_fails_the_whole_page() {
    let html = r#"<title>Fine</title><a href="/ok">ok</a><a href="http://[oops">bad</a>"#;
    let result = extract(html, BASE, &ExtractOptions::default());

    assert!(!result.is_success());
    assert!(result.as_page().is_none());
    assert!(result.error().unwrap().contains("http://[oops"));
}

#[test]
fn test_try_extract_exposes_typed_error() {
    let err = try_extract("<p>x</p>", "", &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidBaseUrl { .. }));
}

#[test]
fn test_panic_payloads_become_messages() {
    assert_eq!(panic_message(Box::new("boom")), "boom");
    assert_eq!(panic_message(Box::new(String::from("kaboom"))), "kaboom");
    assert_eq!(panic_message(Box::new(42_u8)), "unknown panic");
}

#[test]
fn test_caught_panic_is_reported_as_failure() {
    let payload = std::panic::catch_unwind(|| panic!("parser blew up {}", 7)).unwrap_err();
    let result = ExtractionResult::failure(BASE, ExtractError::Panicked(panic_message(payload)));

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("extraction aborted: parser blew up 7"));
}
