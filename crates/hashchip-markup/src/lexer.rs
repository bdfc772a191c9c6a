//! Tokenizers for the two grammars the rewriter works with.
//!
//! * label grammar: `<label` attrs `>` TOKEN `</label>`, where attrs contain no
//!   `<`, `>` or line terminator, and TOKEN is a non-empty non-whitespace run.
//! * tag grammar: `#` followed by a non-empty run of non-whitespace,
//!   greedy up to the next whitespace or end of input.
//!
//! Both scans are single left-to-right passes over byte offsets. Anything
//! that does not match a grammar is passed through as text, byte for byte.

pub const LABEL_OPEN: &str = "<label";
pub const LABEL_CLOSE: &str = "</label>";

// ── Tokens ────────────────────────────────────────────────────────────────

/// A `<label ...>token</label>` span found in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSpan<'s> {
    /// Everything between `<label` and the first `>`, e.g. ` style="..."`.
    pub attrs: &'s str,
    /// The label's visible token.
    pub tag: &'s str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelToken<'s> {
    Text(&'s str),
    Label(LabelSpan<'s>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagToken<'s> {
    Text(&'s str),
    /// Tag token without its leading `#`.
    Tag(&'s str),
}

// ── Character classes ─────────────────────────────────────────────────────

/// ECMAScript `\s`: white space plus line terminators.
///
/// Differs from [`char::is_whitespace`], which includes U+0085 and omits
/// U+FEFF. Tag boundaries have to agree with browser-side tooling.
pub fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Length in bytes of the non-whitespace run at the start of `s`.
fn run_len(s: &str) -> usize {
    s.find(is_space).unwrap_or(s.len())
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    /// Start of the pending text run not yet emitted.
    text_start: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, text_start: 0 }
    }

    /// Splits the source into text and label spans.
    pub fn labels(mut self) -> Vec<LabelToken<'s>> {
        let mut tokens = Vec::new();
        while let Some(offset) = self.rest().find(LABEL_OPEN) {
            let start = self.pos + offset;
            self.pos = start;
            match self.lex_label() {
                Some(span) => {
                    if let Some(text) = self.take_text(start) {
                        tokens.push(LabelToken::Text(text));
                    }
                    tokens.push(LabelToken::Label(span));
                    self.text_start = self.pos;
                }
                // `<label` is ASCII, so skipping it keeps `pos` on a char boundary.
                None => self.pos = start + LABEL_OPEN.len(),
            }
        }
        if let Some(text) = self.take_text(self.src.len()) {
            tokens.push(LabelToken::Text(text));
        }
        tokens
    }

    /// Splits the source into text and `#tag` tokens.
    pub fn tags(mut self) -> Vec<TagToken<'s>> {
        let mut tokens = Vec::new();
        while let Some(offset) = self.rest().find('#') {
            let hash = self.pos + offset;
            self.pos = hash + 1;
            let len = run_len(self.rest());
            if len == 0 {
                continue;
            }
            if let Some(text) = self.take_text(hash) {
                tokens.push(TagToken::Text(text));
            }
            tokens.push(TagToken::Tag(&self.src[self.pos..self.pos + len]));
            self.pos += len;
            self.text_start = self.pos;
        }
        if let Some(text) = self.take_text(self.src.len()) {
            tokens.push(TagToken::Text(text));
        }
        tokens
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn take_text(&self, end: usize) -> Option<&'s str> {
        (end > self.text_start).then(|| &self.src[self.text_start..end])
    }

    /// Tries to read a label span at `pos`, which must point at `<label`.
    /// Advances past `</label>` on success and leaves `pos` alone otherwise.
    fn lex_label(&mut self) -> Option<LabelSpan<'s>> {
        let attrs_start = self.pos + LABEL_OPEN.len();
        let after_open = &self.src[attrs_start..];

        // The opening tag ends at the first `>`; a line break before it means
        // this is not a label.
        let gt = after_open.find(|c: char| c == '>' || is_line_terminator(c))?;
        if !after_open[gt..].starts_with('>') {
            return None;
        }
        let attrs = &after_open[..gt];
        // A `<` means the opening tag never closed and a later tag began.
        if attrs.contains('<') {
            return None;
        }
        let body_start = attrs_start + gt + 1;

        // The token is the longest non-empty prefix of the following run that
        // is directly followed by `</label>`.
        let body = &self.src[body_start..];
        let run = &body[..run_len(body)];
        let close = run.rfind(LABEL_CLOSE).filter(|&i| i > 0)?;

        self.pos = body_start + close + LABEL_CLOSE.len();
        Some(LabelSpan { attrs, tag: &run[..close] })
    }
}
