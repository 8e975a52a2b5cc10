//! HTML tag counting
//!
//! Pages are not parsed into a DOM. The body is streamed through an HTML
//! tokenizer and every start tag (self-closing included) is checked by name:
//! `<a>` counts as a link and `<img>` counts as an image. Attributes are never
//! looked at, and end tags are ignored.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::str::Utf8Error;
use thiserror::Error;

/// Link and image counts for a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
    /// Number of `<a>` start tags
    pub links: u64,

    /// Number of `<img>` start tags
    pub images: u64,
}

/// Problems found while counting tags
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("body is not valid UTF-8 after byte {valid_up_to}: {source}")]
    Encoding {
        /// Counts over the whole body, invalid sequences replaced
        counted: TagCounts,
        valid_up_to: usize,
        source: Utf8Error,
    },
}

impl ExtractError {
    /// Counts gathered despite the error
    pub fn counts(&self) -> TagCounts {
        match self {
            Self::Encoding { counted, .. } => *counted,
        }
    }
}

/// Counts `<a>` and `<img>` start tags in an HTML body
///
/// An empty body is not an error and yields zero counts. Malformed markup is
/// tolerated the way a browser tolerates it. A body containing invalid UTF-8
/// (a Latin-1 page, say) is still counted in full, with each invalid sequence
/// replaced by U+FFFD, and reported as [`ExtractError::Encoding`] carrying
/// those counts.
///
/// # Example
///
/// ```
/// use page_fetch::crawler::extract_tag_counts;
///
/// let counts = extract_tag_counts(br#"<a href="/">home</a><img src="logo.png">"#).unwrap();
/// assert_eq!(counts.links, 1);
/// assert_eq!(counts.images, 1);
/// ```
pub fn extract_tag_counts(body: &[u8]) -> Result<TagCounts, ExtractError> {
    match std::str::from_utf8(body) {
        Ok(text) => Ok(count_tags(text)),
        Err(source) => Err(ExtractError::Encoding {
            counted: count_tags(&String::from_utf8_lossy(body)),
            valid_up_to: source.valid_up_to(),
            source,
        }),
    }
}

/// Runs the tokenizer over the whole input and returns the tally
fn count_tags(html: &str) -> TagCounts {
    let mut tokenizer = Tokenizer::new(TagCounter::default(), TokenizerOpts::default());

    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.counts
}

/// Token sink that tallies tag names
#[derive(Default)]
struct TagCounter {
    counts: TagCounts,
}

impl TokenSink for TagCounter {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                match &*tag.name {
                    "a" => self.counts.links += 1,
                    "img" => self.counts.images += 1,
                    _ => {}
                }
                return raw_text_state(&tag);
            }
            Token::ParseError(message) => {
                tracing::trace!("HTML parse error on line {}: {}", line_number, message);
            }
            _ => {}
        }

        TokenSinkResult::Continue
    }
}

/// Picks the tokenizer state for an element whose content is not markup
///
/// Without a tree builder the tokenizer cannot tell that `<script>` content is
/// text, so the sink switches states itself. Self-closing forms have no content.
fn raw_text_state(tag: &Tag) -> TokenSinkResult<()> {
    if tag.self_closing {
        return TokenSinkResult::Continue;
    }

    match &*tag.name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}
