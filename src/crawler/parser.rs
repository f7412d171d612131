//! HTML link extraction
//!
//! The traversal engine consumes links through the `LinkExtractor` trait;
//! `HtmlLinkExtractor` is the html5ever-backed implementation used for real
//! crawls.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

/// Turns raw page content into the link targets it contains
pub trait LinkExtractor: Send + Sync {
    /// Returns the href values of the page's anchors, verbatim and in
    /// document order
    ///
    /// Each call starts a fresh, finite sequence.
    fn extract_links<'a>(&self, content: &'a [u8]) -> Box<dyn Iterator<Item = String> + 'a>;
}

/// Extracts `<a href>` targets from HTML
///
/// Works on the token stream rather than a parsed tree, so every anchor is
/// reported exactly once, where it appears in the markup. Broken documents
/// yield whatever start tags the tokenizer can recover instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links<'a>(&self, content: &'a [u8]) -> Box<dyn Iterator<Item = String> + 'a> {
        let html = String::from_utf8_lossy(content);
        Box::new(extract_hrefs(&html).into_iter())
    }
}

/// Collects href attributes from anchor start tags
#[derive(Default)]
struct HrefSink {
    hrefs: Vec<String>,
}

impl TokenSink for HrefSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        if tag.kind != StartTag {
            return TokenSinkResult::Continue;
        }

        match &*tag.name {
            "a" => {
                if let Some(href) = tag.attrs.iter().find(|attr| &*attr.name.local == "href") {
                    self.hrefs.push(href.value.to_string());
                }
                TokenSinkResult::Continue
            }
            // Text content of these elements is not markup
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Collects the href attribute of every anchor start tag
///
/// # Example
///
/// ```
/// use sumi_sitemap::crawler::extract_hrefs;
///
/// let html = r#"<p><a href="/one">1</a> <a href="two/">2</a></p>"#;
/// assert_eq!(extract_hrefs(html), vec!["/one", "two/"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(HrefSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.hrefs
}
