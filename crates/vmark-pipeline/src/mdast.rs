//! Intermediate markdown tree.

use pulldown_cmark::{Event, Options, Parser};

/// Parser output before lowering.
///
/// Holds the owned pulldown-cmark event stream. Start/end events nest, so the
/// stream is a flattened tree that markdown plugins may rewrite in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mdast {
    /// Event stream in document order.
    pub events: Vec<Event<'static>>,
}

impl Mdast {
    /// Parse markdown text with the given parser options.
    #[must_use]
    pub fn parse(markdown: &str, options: Options) -> Self {
        Self {
            events: Parser::new_ext(markdown, options)
                .map(Event::into_static)
                .collect(),
        }
    }
}
