use std::borrow::Cow;

use hashchip_color::{Palette, Rgb};

use crate::lexer::{LABEL_CLOSE, LABEL_OPEN, LabelToken, Lexer, TagToken};

// ── LabelStyle ────────────────────────────────────────────────────────────

/// Fixed presentation of a label chip. Only the background and border
/// colors vary per tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStyle {
    pub border_radius: String,
    pub padding: String,
    pub text_color: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            border_radius: "4px".to_string(),
            padding: "0 4px 0 4px".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

// ── Rewriter ──────────────────────────────────────────────────────────────

/// Turns `#tags` in a content block into colored label markup.
///
/// [`rewrite`](Self::rewrite) first reverts existing labels to `#tag`, so
/// running it on its own output changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    pub palette: Palette,
    pub style: LabelStyle,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    /// Markup for one tag, colored with this rewriter's palette.
    pub fn label(&self, tag: &str) -> String {
        render_label(tag, self.palette.derive(tag), &self.style)
    }

    pub fn rewrite(&self, content: &str) -> String {
        let plain = revert(content);
        let tokens = Lexer::new(&plain).tags();

        let mut out = String::with_capacity(plain.len());
        let mut tags = 0usize;
        for token in tokens {
            match token {
                TagToken::Text(text) => out.push_str(text),
                TagToken::Tag(tag) => {
                    out.push_str(&self.label(tag));
                    tags += 1;
                }
            }
        }

        log::trace!("rewrite: {tags} tag(s) in {} bytes", content.len());
        out
    }
}

// ── Free functions ────────────────────────────────────────────────────────

/// Rewrites `content` with the default palette and style.
pub fn rewrite(content: &str) -> String {
    Rewriter::default().rewrite(content)
}

/// Writes the label element for `tag`. The tag text goes in verbatim.
pub fn render_label(tag: &str, background: Rgb, style: &LabelStyle) -> String {
    format!(
        "{LABEL_OPEN} style=\"background-color: {background}; border-color: {background}; \
         border-radius: {}; padding: {}; color: {}\">{tag}{LABEL_CLOSE}",
        style.border_radius, style.padding, style.text_color,
    )
}

/// Replaces every label span with `#` + its token, dropping its attributes.
///
/// Borrows when there is nothing to revert.
pub fn revert(content: &str) -> Cow<'_, str> {
    let tokens = Lexer::new(content).labels();
    if !tokens.iter().any(|t| matches!(t, LabelToken::Label(_))) {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    for token in tokens {
        match token {
            LabelToken::Text(text) => out.push_str(text),
            LabelToken::Label(span) => {
                out.push('#');
                out.push_str(span.tag);
            }
        }
    }
    Cow::Owned(out)
}

/// Tags in `content`, left to right, without their `#`. Existing labels are
/// not reverted first.
pub fn find_tags(content: &str) -> Vec<&str> {
    Lexer::new(content)
        .tags()
        .into_iter()
        .filter_map(|t| match t {
            TagToken::Tag(tag) => Some(tag),
            TagToken::Text(_) => None,
        })
        .collect()
}

// ── Inspection ────────────────────────────────────────────────────────────

/// A label found in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInfo {
    pub tag: String,
    /// Parsed `background-color`, if present and readable.
    pub background: Option<Rgb>,
}

/// Lists the labels currently present in `content`.
pub fn inspect(content: &str) -> Vec<LabelInfo> {
    Lexer::new(content)
        .labels()
        .into_iter()
        .filter_map(|t| match t {
            LabelToken::Label(span) => Some(LabelInfo {
                tag: span.tag.to_string(),
                background: style_property(span.attrs, "background-color")
                    .and_then(|v| v.parse().ok()),
            }),
            LabelToken::Text(_) => None,
        })
        .collect()
}

/// Value of `name` inside an inline `style` attribute, if any.
fn style_property<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let key = format!("{name}:");
    let start = attrs.find(&key)? + key.len();
    let rest = &attrs[start..];
    let end = rest.find([';', '"', '\'']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}
