//! Interactive inline elements and what activating them does.
//!
//! The view highlights elements by their position in [`interactions`], and the
//! state layer activates them by the same index, so both sides must iterate
//! through [`InlineSpan::interaction`].

use super::block::Block;
use super::inline::{InlineSpan, LinkTarget};
use crate::model::CardId;

/// Effect of activating an interactive span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// In-body cross reference to another card.
    FollowCard(CardId),
    /// Hand a URL to the system browser; no application state changes.
    OpenExternal { url: String, label: String },
    /// Show the image overlay.
    ViewImage { src: String, alt: String },
}

impl InlineSpan {
    /// Interaction for this span, if it is interactive.
    ///
    /// Card links whose target does not resolve are inactive and return `None`.
    pub fn interaction(&self, resolves: impl Fn(&CardId) -> bool) -> Option<Interaction> {
        match self {
            InlineSpan::Link {
                target: LinkTarget::Card(id),
                ..
            } => resolves(id).then(|| Interaction::FollowCard(id.clone())),
            InlineSpan::Link {
                text,
                target: LinkTarget::External(url),
            } => Some(Interaction::OpenExternal {
                url: url.clone(),
                label: text.clone(),
            }),
            InlineSpan::Image { alt, src } => Some(Interaction::ViewImage {
                src: src.clone(),
                alt: alt.clone(),
            }),
            InlineSpan::LinkedImage { alt, href, .. } => Some(Interaction::OpenExternal {
                url: href.clone(),
                label: alt.clone(),
            }),
            _ => None,
        }
    }
}

/// All interactive elements of a body, in reading order.
pub fn interactions(blocks: &[Block], resolves: impl Fn(&CardId) -> bool) -> Vec<Interaction> {
    blocks
        .iter()
        .flat_map(Block::spans)
        .filter_map(|span| span.interaction(&resolves))
        .collect()
}
