//! `#tag` → label chip rewriting for mixed text/markup blocks.
//!
//! A block is scanned for `#` followed by non-whitespace; each tag becomes an
//! inline `<label>` whose background comes from [`hashchip_color`]. Labels
//! emitted by an earlier pass are reverted to `#tag` first, so repeated
//! passes over the same block converge instead of nesting.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`lexer`] | `Lexer`, `TagToken`, `LabelToken`, `is_space` |
//! | [`rewriter`] | `Rewriter`, `LabelStyle`, `rewrite`, `revert`, `inspect` |
//!
//! # Quick start
//!
//! ```rust
//! use hashchip_markup::{revert, rewrite};
//!
//! let html = rewrite("Buy milk #groceries");
//! assert!(html.starts_with("Buy milk <label style=\"background-color: rgb("));
//! assert_eq!(rewrite(&html), html);
//! assert_eq!(revert(&html), "Buy milk #groceries");
//! ```
//!
//! The output contains literal markup. Hosts that enforce a trusted-content
//! policy must route it through that policy before inserting it.

pub mod lexer;
pub mod rewriter;

pub use lexer::{LabelSpan, LabelToken, Lexer, TagToken};
pub use rewriter::{
    find_tags, inspect, render_label, revert, rewrite, LabelInfo, LabelStyle, Rewriter,
};
