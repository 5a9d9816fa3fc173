//! Markdown syntax tagging
//!
//! Splits markdown source into tagged char ranges. The text itself is never
//! rewritten; styling is applied on top by [`super::style::StyleSet`].

use std::ops::Range;

/// Syntax class of a span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Plain,
    Heading1,
    Heading2,
    Heading3,
    Strong,
    Emphasis,
    Link,
    Url,
    Quote,
    List,
    Code,
    CodeFence,
    Rule,
}

/// A char range of one line carrying an inline tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSpan {
    pub range: Range<usize>,
    pub tag: Tag,
}

/// Block tag for the whole line plus inline spans inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSyntax {
    pub block: Tag,
    pub spans: Vec<TaggedSpan>,
}

impl LineSyntax {
    /// Innermost inline tag at `col`, if any
    pub fn inline_at(&self, col: usize) -> Option<Tag> {
        self.spans.iter().find(|s| s.range.contains(&col)).map(|s| s.tag)
    }
}

/// Block-level classification of a single line
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum LineKind {
    Normal,
    Heading(u8),
    Fence,
    BlockQuote,
    List,
    HorizontalRule,
    Empty,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return LineKind::Empty;
        }
        if is_horizontal_rule(trimmed) {
            return LineKind::HorizontalRule;
        }
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            return LineKind::Fence;
        }
        if let Some(level) = heading_level(trimmed) {
            return LineKind::Heading(level);
        }
        if trimmed.starts_with('>') {
            return LineKind::BlockQuote;
        }
        if is_list_item(trimmed) {
            return LineKind::List;
        }
        LineKind::Normal
    }

    fn block_tag(self) -> Tag {
        match self {
            LineKind::Heading(1) => Tag::Heading1,
            LineKind::Heading(2) => Tag::Heading2,
            LineKind::Heading(_) => Tag::Heading3,
            LineKind::Fence => Tag::CodeFence,
            LineKind::BlockQuote => Tag::Quote,
            LineKind::List => Tag::List,
            LineKind::HorizontalRule => Tag::Rule,
            LineKind::Normal | LineKind::Empty => Tag::Plain,
        }
    }
}

fn heading_level(s: &str) -> Option<u8> {
    let hashes = s.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    match s[hashes..].chars().next() {
        None | Some(' ') | Some('\t') => Some(hashes as u8),
        _ => None,
    }
}

fn is_horizontal_rule(s: &str) -> bool {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() < 3 {
        return false;
    }
    let first = chars[0];
    matches!(first, '-' | '*' | '_') && chars.iter().all(|&c| c == first)
}

fn is_list_item(s: &str) -> bool {
    if s.starts_with("- ") || s.starts_with("* ") || s.starts_with("+ ") {
        return true;
    }
    let digits = s.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && (s[digits..].starts_with(". ") || s[digits..].starts_with(") "))
}

/// Tags every line of a document, tracking fenced code blocks across lines
pub fn highlight_document<S: AsRef<str>>(lines: &[S]) -> Vec<LineSyntax> {
    let mut in_fence = false;
    lines
        .iter()
        .map(|line| {
            let (syntax, next) = highlight_line(line.as_ref(), in_fence);
            in_fence = next;
            syntax
        })
        .collect()
}

/// Tags one line. Returns the syntax and whether a fence is open after it.
pub fn highlight_line(line: &str, in_fence: bool) -> (LineSyntax, bool) {
    let kind = LineKind::classify(line);

    if kind == LineKind::Fence {
        return (LineSyntax { block: Tag::CodeFence, spans: Vec::new() }, !in_fence);
    }
    if in_fence {
        return (LineSyntax { block: Tag::Code, spans: Vec::new() }, true);
    }

    let spans = match kind {
        LineKind::HorizontalRule | LineKind::Empty => Vec::new(),
        _ => inline_spans(line),
    };
    (LineSyntax { block: kind.block_tag(), spans }, false)
}

fn find_closing(chars: &[char], from: usize, delim: &[char]) -> Option<usize> {
    let n = delim.len();
    (from..=chars.len().saturating_sub(n)).find(|&i| i > from && chars[i..i + n] == *delim)
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == target)
}

/// Inline spans: code, strong, emphasis, links with their URL, autolinks
pub fn inline_spans(line: &str) -> Vec<TaggedSpan> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        // snake_case words never open emphasis
        let opens = c == '*' || !i.checked_sub(1).is_some_and(|p| chars[p].is_alphanumeric());

        if c == '`' {
            if let Some(end) = find_char(&chars, i + 1, '`') {
                spans.push(TaggedSpan { range: i..end + 1, tag: Tag::Code });
                i = end + 1;
                continue;
            }
        }

        if (c == '*' || c == '_') && opens && next == Some(c) {
            let delim = [c, c];
            if let Some(end) = find_closing(&chars, i + 2, &delim) {
                spans.push(TaggedSpan { range: i..end + 2, tag: Tag::Strong });
                i = end + 2;
                continue;
            }
        }

        if (c == '*' || c == '_') && opens && next.is_some_and(|n| !n.is_whitespace()) {
            if let Some(end) = find_closing(&chars, i + 1, &[c]) {
                spans.push(TaggedSpan { range: i..end + 1, tag: Tag::Emphasis });
                i = end + 1;
                continue;
            }
        }

        if c == '[' {
            if let Some(close) = find_char(&chars, i + 1, ']') {
                if chars.get(close + 1) == Some(&'(') {
                    if let Some(paren) = find_char(&chars, close + 2, ')') {
                        spans.push(TaggedSpan { range: i..close + 1, tag: Tag::Link });
                        spans.push(TaggedSpan { range: close + 1..paren + 1, tag: Tag::Url });
                        i = paren + 1;
                        continue;
                    }
                }
            }
        }

        if c == '<' {
            if let Some(end) = find_char(&chars, i + 1, '>') {
                let inner: String = chars[i + 1..end].iter().collect();
                if inner.contains("://") || inner.starts_with("mailto:") {
                    spans.push(TaggedSpan { range: i..end + 1, tag: Tag::Url });
                    i = end + 1;
                    continue;
                }
            }
        }

        i += 1;
    }

    spans
}

/// Link target under `col`, from `[text](target)` or `<target>`
pub fn link_target_at(line: &str, col: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let spans = inline_spans(line);

    for (idx, span) in spans.iter().enumerate() {
        let url_span = match span.tag {
            Tag::Link => spans.get(idx + 1).filter(|next| next.tag == Tag::Url),
            Tag::Url => Some(span),
            _ => None,
        };
        let Some(url_span) = url_span else { continue };
        if !(span.range.start..url_span.range.end).contains(&col) {
            continue;
        }
        let inner = &chars[url_span.range.start + 1..url_span.range.end - 1];
        let target: String = inner.iter().collect();
        // Drop an optional title: [x](path "title")
        let target = target.split_whitespace().next().unwrap_or("").to_string();
        return (!target.is_empty()).then_some(target);
    }
    None
}
