use crate::error::ExtractError;
use crate::results::{Image, Link, NO_TITLE};
use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{Html, HtmlTreeSink, Selector};
use url::Url;

/// Compiles one of the fixed selectors used below
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Parses a full document with scripting turned off.
///
/// `<noscript>` children are then built as ordinary elements, so their text,
/// links and images are picked up like the rest of the page instead of
/// surfacing as one raw markup string.
pub fn parse_document(markup: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(markup)
}

/// Detaches every element matching `css` from the document tree.
///
/// Returns the number of elements removed.
pub fn remove_elements(doc: &mut Html, css: &'static str) -> usize {
    let matcher = selector(css);
    let ids = doc.select(&matcher).map(|e| e.id()).collect::<Vec<_>>();

    for id in &ids {
        if let Some(mut node) = doc.tree.get_mut(*id) {
            node.detach();
        }
    }

    ids.len()
}

/// Text of the first `<title>` element, trimmed, or [`NO_TITLE`]
pub fn title(doc: &Html) -> String {
    let title_selector = selector("title");
    let title = doc
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>())
        .unwrap_or_default();

    match title.trim() {
        "" => NO_TITLE.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Every text node left in the document, concatenated in document order
pub fn raw_text(doc: &Html) -> String {
    doc.root_element().text().collect()
}

/// Every `<a href>` in the document, resolved against `base`
pub fn links(doc: &Html, base: &Url) -> Result<Vec<Link>, ExtractError> {
    let link_selector = selector("a[href]");
    let links = doc
        .select(&link_selector)
        .map(|anchor| -> Result<Link, ExtractError> {
            let href = anchor.value().attr("href").unwrap_or_default();
            Ok(Link {
                url: resolve(base, href)?,
                text: anchor.text().collect::<String>().trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).map(|l| &l.url).collect::<Vec<_>>()
        );
    }

    Ok(links)
}

/// Every `<img src>` in the document, resolved against `base`
pub fn images(doc: &Html, base: &Url) -> Result<Vec<Image>, ExtractError> {
    let image_selector = selector("img[src]");
    let images = doc
        .select(&image_selector)
        .map(|img| -> Result<Image, ExtractError> {
            let src = img.value().attr("src").unwrap_or_default();
            Ok(Image {
                url: resolve(base, src)?,
                alt: img.value().attr("alt").unwrap_or_default().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ::log::debug!("HTML parser found {} images", images.len());
    Ok(images)
}

/// Joins a possibly relative reference onto `base`
pub fn resolve(base: &Url, reference: &str) -> Result<String, ExtractError> {
    base.join(reference)
        .map(String::from)
        .map_err(|source| ExtractError::UnresolvableReference {
            reference: reference.to_string(),
            source,
        })
}
