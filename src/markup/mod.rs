//! Card markup dialect (pure).
//!
//! A deliberately small grammar: bullets, nested bullets and numbered items at
//! line level; bold, italic, inline code, links, images and linked images
//! inline. It is not CommonMark.

pub mod block;
pub mod inline;
pub mod interaction;

pub use block::{parse_block_line, render_blocks, Block, BlockKind};
pub use inline::{is_external_url, parse_inline, InlineSpan, LinkTarget};
pub use interaction::{interactions, Interaction};
