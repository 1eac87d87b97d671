//! Lazy markup token stream
//!
//! Wraps the html5ever tokenizer in a pull-style iterator. The tokenizer is
//! paused after every tag it emits, so a consumer that stops iterating early
//! never pays for tokenizing the rest of the document.
//!
//! Adjacent character data is coalesced into one [`MarkupEvent::Text`], so a
//! text event always covers a whole run of text between two tags, comments,
//! or doctypes.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag as RawTag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts, TokenizerResult,
};
use std::collections::VecDeque;

/// A tag with its name and attributes in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased tag name
    pub name: String,

    /// Attribute (key, value) pairs, duplicates preserved
    pub attrs: Vec<(String, String)>,
}

impl Tag {
    /// Returns the value of the last attribute named `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A single event of the markup stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    StartTag(Tag),
    EndTag(String),
    SelfClosingTag(Tag),
    Text(String),
    Comment(String),
    Doctype,
    /// Terminal event; the stream yields nothing after it
    End,
}

/// Collects tokenizer output into events and decides when to pause
#[derive(Default)]
struct EventSink {
    events: VecDeque<MarkupEvent>,
    text: String,
    draining: bool,
}

impl EventSink {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.events.push_back(MarkupEvent::Text(text));
        }
    }
}

/// Content mode the tokenizer must switch to after a start tag, if any
///
/// `plaintext` never ends: everything after it is text.
fn content_mode(name: &str) -> Option<TokenSinkResult<()>> {
    match name {
        "script" => Some(TokenSinkResult::RawData(RawKind::ScriptData)),
        "title" | "textarea" => Some(TokenSinkResult::RawData(RawKind::Rcdata)),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            Some(TokenSinkResult::RawData(RawKind::Rawtext))
        }
        "plaintext" => Some(TokenSinkResult::Plaintext),
        _ => None,
    }
}

fn convert_tag(tag: RawTag) -> Tag {
    Tag {
        name: tag.name.to_string(),
        attrs: tag
            .attrs
            .into_iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
    }
}

impl TokenSink for EventSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => self.text.push_str(&chars),
            Token::NullCharacterToken => self.text.push('\u{FFFD}'),
            Token::TagToken(tag) => {
                self.flush_text();

                let mode = match tag.kind {
                    TagKind::StartTag if !tag.self_closing => content_mode(&tag.name),
                    _ => None,
                };

                let event = match (tag.kind, tag.self_closing) {
                    (TagKind::EndTag, _) => MarkupEvent::EndTag(tag.name.to_string()),
                    (TagKind::StartTag, true) => MarkupEvent::SelfClosingTag(convert_tag(tag)),
                    (TagKind::StartTag, false) => MarkupEvent::StartTag(convert_tag(tag)),
                };
                self.events.push_back(event);

                // Only tag emission may suspend the tokenizer.
                if let Some(mode) = mode {
                    return mode;
                }
                if !self.draining {
                    return TokenSinkResult::Script(());
                }
            }
            Token::CommentToken(comment) => {
                self.flush_text();
                self.events
                    .push_back(MarkupEvent::Comment(comment.to_string()));
            }
            Token::DoctypeToken(_) => {
                self.flush_text();
                self.events.push_back(MarkupEvent::Doctype);
            }
            Token::EOFToken => {
                self.flush_text();
                self.events.push_back(MarkupEvent::End);
            }
            Token::ParseError(_) => {}
        }

        TokenSinkResult::Continue
    }
}

/// Forward-only iterator of [`MarkupEvent`]s over a page body
///
/// Each extractor builds its own stream over the same bytes; streams never
/// share position.
pub struct TokenStream {
    tokenizer: Tokenizer<EventSink>,
    input: BufferQueue,
    finished: bool,
}

impl TokenStream {
    /// Creates a stream over a raw body, decoding it as UTF-8 (lossily)
    pub fn new(body: &[u8]) -> Self {
        let mut input = BufferQueue::new();
        input.push_back(StrTendril::from_slice(&String::from_utf8_lossy(body)));

        Self {
            tokenizer: Tokenizer::new(EventSink::default(), TokenizerOpts::default()),
            input,
            finished: false,
        }
    }
}

impl Iterator for TokenStream {
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<MarkupEvent> {
        loop {
            if let Some(event) = self.tokenizer.sink.events.pop_front() {
                return Some(event);
            }
            if self.finished {
                return None;
            }

            if let TokenizerResult::Done = self.tokenizer.feed(&mut self.input) {
                // end() must run to completion without suspending
                self.tokenizer.sink.draining = true;
                self.tokenizer.end();
                self.finished = true;
            }
        }
    }
}
