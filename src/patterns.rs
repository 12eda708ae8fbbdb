//! Matchers used by the lexer.
//!
//! Every matcher takes the remaining source (or, for the tag-start
//! scan, the whole source) and returns either nothing or the matched
//! length with its captured parts. Parts borrow from the input, so a
//! caller can turn them into tokens without re-slicing.
//!
//! Matchers that depend on [`LexerConfig`] are compiled once by
//! [`PatternSet::compile`]. The fixed ones (names, numbers,
//! whitespace) are shared statics.

use std::cmp::Reverse;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::{ConfigError, LexerConfig};

/// Whitespace accepted between tokens inside tags.
const WHITESPACE_CLASS: &str = r"[ \r\n\t\x0B\x0C]";

/// One line separator, longest alternative first.
const LINE_SEPARATOR: &str = r"(?:\r\n|\r|\n)";

lazy_static! {
    static ref NAME: Regex =
        Regex::new(r"^[a-zA-Z_\x{7f}-\x{10FFFF}][a-zA-Z0-9_\x{7f}-\x{10FFFF}]*")
            .expect("name pattern is valid");
    static ref NUMBER: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid");
    static ref WHITESPACE: Regex =
        Regex::new(&format!("^{WHITESPACE_CLASS}+")).expect("whitespace pattern is valid");
}

/// Opening brackets and the closer each one expects.
pub const BRACKETS: [(&str, &str); 3] = [("(", ")"), ("[", "]"), ("{", "}")];

/// Single-character punctuation that opens no scope.
pub const PUNCTUATION: [char; 5] = ['?', ':', '.', ',', '|'];

/// Length of an identifier at the start of `rest`.
#[must_use]
pub fn name(rest: &str) -> Option<usize> {
    NAME.find(rest).map(|m| m.end())
}

/// Length of a decimal number at the start of `rest`.
#[must_use]
pub fn number(rest: &str) -> Option<usize> {
    NUMBER.find(rest).map(|m| m.end())
}

/// Length of the whitespace run at the start of `rest`, zero if none.
#[must_use]
pub fn whitespace(rest: &str) -> usize {
    WHITESPACE.find(rest).map_or(0, |m| m.end())
}

/// Closer expected for an opening bracket.
#[must_use]
pub fn closer_for(open: &str) -> Option<&'static str> {
    BRACKETS
        .iter()
        .find(|(opener, _)| *opener == open)
        .map(|(_, closer)| *closer)
}

#[must_use]
pub fn is_closing_bracket(candidate: &str) -> bool {
    BRACKETS.iter().any(|(_, closer)| *closer == candidate)
}

/// Which of the three tags a tag start opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Variable,
    Block,
    Comment,
}

/// A tag opening located in the source, as byte offsets.
///
/// The delimiter spans `start..modifier_start`; a trim modifier, when
/// present, spans `modifier_start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagStart {
    pub tag: Tag,
    pub start: usize,
    pub modifier_start: usize,
    pub end: usize,
}

/// A block or print tag closing: optional trim modifier, then the
/// delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEnd<'s> {
    pub modifier: &'s str,
    pub delimiter: &'s str,
}

/// A comment closing found `offset` bytes into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentEnd<'s> {
    pub offset: usize,
    pub whitespace: &'s str,
    pub modifier: &'s str,
    pub delimiter: &'s str,
}

/// A complete `{% verbatim %}` or `{% endverbatim %}` tag found
/// `offset` bytes into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbatimTag<'s> {
    pub offset: usize,
    pub start: &'s str,
    pub open_modifier: &'s str,
    pub leading_whitespace: &'s str,
    pub name: &'s str,
    pub trailing_whitespace: &'s str,
    pub close_modifier: &'s str,
    pub end: &'s str,
}

/// An interpolation marker with the whitespace on its inner side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpolationMarker<'s> {
    pub marker: &'s str,
    pub whitespace: &'s str,
}

/// A complete quoted string with no interpolation in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedString<'s> {
    pub quote: &'s str,
    pub body: &'s str,
}

#[derive(Debug, Clone)]
enum OperatorPattern {
    Literal(String),
    /// Operators with inner spaces accept any whitespace run there.
    Spaced(Regex),
}

#[derive(Debug, Clone)]
struct Operator {
    pattern: OperatorPattern,
    /// Ends in a letter, so it must be followed by whitespace or `(`.
    word: bool,
}

impl Operator {
    fn compile(operator: &str) -> Result<Self, regex::Error> {
        let pattern = if operator.contains(char::is_whitespace) {
            let words: Vec<String> = operator.split_whitespace().map(regex::escape).collect();
            OperatorPattern::Spaced(Regex::new(&format!(r"^{}", words.join(r"\s+")))?)
        } else {
            OperatorPattern::Literal(operator.to_string())
        };

        Ok(Self {
            pattern,
            word: operator.ends_with(|c: char| c.is_ascii_alphabetic()),
        })
    }

    fn find(&self, rest: &str) -> Option<usize> {
        let len = match &self.pattern {
            OperatorPattern::Literal(literal) => {
                rest.starts_with(literal.as_str()).then_some(literal.len())?
            }
            OperatorPattern::Spaced(regex) => regex.find(rest)?.end(),
        };

        if self.word && !rest[len..].starts_with(|c: char| c.is_whitespace() || c == '(') {
            return None;
        }

        Some(len)
    }
}

/// Configured matchers, compiled once and shared by every run of a
/// lexer.
#[derive(Debug, Clone)]
pub struct PatternSet {
    variable_start: String,
    block_start: String,
    interpolation_start: String,
    interpolation_end: String,
    tag_start: Regex,
    block_end: Regex,
    variable_end: Regex,
    comment_end: Regex,
    verbatim_open: Regex,
    verbatim_close: Regex,
    interpolation_open: Regex,
    interpolation_close: Regex,
    quoted_string: Regex,
    operators: Vec<Operator>,
}

impl PatternSet {
    /// Compile every configured matcher.
    pub fn compile(config: &LexerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let trim = regex::escape(&config.whitespace_trim.to_string());
        let line_trim = regex::escape(&config.line_whitespace_trim.to_string());
        let modifier = format!("{trim}|{line_trim}?");
        let ws = WHITESPACE_CLASS;

        let mut starts = config.tag_starts().to_vec();
        starts.sort_by_key(|start| Reverse(start.len()));
        let starts: Vec<String> = starts.into_iter().map(regex::escape).collect();

        let block_start = regex::escape(&config.block_pair.0);
        let block_end = regex::escape(&config.block_pair.1);
        let verbatim = |name: &str| {
            format!(
                "({block_start})({modifier})({ws}*)({name})({ws}*)({modifier})({block_end})"
            )
        };

        let excluded = config
            .interpolation_pair
            .0
            .chars()
            .next()
            .map(|c| regex::escape(&c.to_string()))
            .unwrap_or_default();

        // Assignment is always an operator, whatever the vocabulary.
        let mut operators: Vec<&str> = config.operators.iter().map(String::as_str).collect();
        if !operators.contains(&"=") {
            operators.push("=");
        }
        operators.sort_by_key(|operator| Reverse(operator.len()));

        Ok(Self {
            variable_start: config.variable_pair.0.clone(),
            block_start: config.block_pair.0.clone(),
            interpolation_start: config.interpolation_pair.0.clone(),
            interpolation_end: config.interpolation_pair.1.clone(),
            tag_start: Regex::new(&format!(
                "({})({trim}|{line_trim})?",
                starts.join("|")
            ))?,
            block_end: Regex::new(&format!("^({modifier})({block_end}{LINE_SEPARATOR}?)"))?,
            variable_end: Regex::new(&format!(
                "^({modifier})({})",
                regex::escape(&config.variable_pair.1)
            ))?,
            comment_end: Regex::new(&format!(
                "({ws}*)({modifier})({}{LINE_SEPARATOR}?)",
                regex::escape(&config.comment_pair.1)
            ))?,
            verbatim_open: Regex::new(&format!("^{}", verbatim("verbatim")))?,
            verbatim_close: Regex::new(&verbatim("endverbatim"))?,
            interpolation_open: Regex::new(&format!(
                "^({})({ws}*)",
                regex::escape(&config.interpolation_pair.0)
            ))?,
            interpolation_close: Regex::new(&format!(
                "^({ws}*)({})",
                regex::escape(&config.interpolation_pair.1)
            ))?,
            quoted_string: Regex::new(&format!(
                r#"(?s)^(")([^{excluded}"\\]*(?:\\.[^{excluded}"\\]*)*)(")|^(')([^'\\]*(?:\\.[^'\\]*)*)(')"#
            ))?,
            operators: operators
                .into_iter()
                .map(Operator::compile)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Every tag start in `source`, in order.
    #[must_use]
    pub fn tag_starts(&self, source: &str) -> Vec<TagStart> {
        self.tag_start
            .captures_iter(source)
            .filter_map(|caps| self.classify(&caps))
            .collect()
    }

    /// First tag start in `source` at or after byte `from`.
    #[must_use]
    pub fn tag_start_at(&self, source: &str, from: usize) -> Option<TagStart> {
        self.tag_start
            .captures_at(source, from)
            .and_then(|caps| self.classify(&caps))
    }

    fn classify(&self, caps: &Captures<'_>) -> Option<TagStart> {
        let delimiter = caps.get(1)?;
        let tag = if delimiter.as_str() == self.variable_start {
            Tag::Variable
        } else if delimiter.as_str() == self.block_start {
            Tag::Block
        } else {
            Tag::Comment
        };

        Some(TagStart {
            tag,
            start: delimiter.start(),
            modifier_start: delimiter.end(),
            end: caps.get(0)?.end(),
        })
    }

    /// Block closing at the start of `rest`, absorbing one following
    /// line separator.
    #[must_use]
    pub fn block_end<'s>(&self, rest: &'s str) -> Option<TagEnd<'s>> {
        let caps = self.block_end.captures(rest)?;
        Some(TagEnd {
            modifier: group(&caps, 1),
            delimiter: group(&caps, 2),
        })
    }

    /// Print closing at the start of `rest`.
    #[must_use]
    pub fn variable_end<'s>(&self, rest: &'s str) -> Option<TagEnd<'s>> {
        let caps = self.variable_end.captures(rest)?;
        Some(TagEnd {
            modifier: group(&caps, 1),
            delimiter: group(&caps, 2),
        })
    }

    /// First comment closing anywhere in `rest`.
    #[must_use]
    pub fn comment_end<'s>(&self, rest: &'s str) -> Option<CommentEnd<'s>> {
        let caps = self.comment_end.captures(rest)?;
        Some(CommentEnd {
            offset: caps.get(0)?.start(),
            whitespace: group(&caps, 1),
            modifier: group(&caps, 2),
            delimiter: group(&caps, 3),
        })
    }

    /// `{% verbatim %}` tag at the start of `rest`.
    #[must_use]
    pub fn verbatim_open<'s>(&self, rest: &'s str) -> Option<VerbatimTag<'s>> {
        verbatim_tag(&self.verbatim_open, rest)
    }

    /// First `{% endverbatim %}` tag anywhere in `rest`.
    #[must_use]
    pub fn verbatim_close<'s>(&self, rest: &'s str) -> Option<VerbatimTag<'s>> {
        verbatim_tag(&self.verbatim_close, rest)
    }

    /// Interpolation opening at the start of `rest`, with the
    /// whitespace that follows it.
    #[must_use]
    pub fn interpolation_open<'s>(&self, rest: &'s str) -> Option<InterpolationMarker<'s>> {
        let caps = self.interpolation_open.captures(rest)?;
        Some(InterpolationMarker {
            marker: group(&caps, 1),
            whitespace: group(&caps, 2),
        })
    }

    /// Interpolation closing at the start of `rest`, with the
    /// whitespace that precedes it.
    #[must_use]
    pub fn interpolation_close<'s>(&self, rest: &'s str) -> Option<InterpolationMarker<'s>> {
        let caps = self.interpolation_close.captures(rest)?;
        Some(InterpolationMarker {
            whitespace: group(&caps, 1),
            marker: group(&caps, 2),
        })
    }

    /// The interpolation opening marker.
    #[must_use]
    pub fn interpolation_marker(&self) -> &str {
        &self.interpolation_start
    }

    /// The interpolation closing marker.
    #[must_use]
    pub fn interpolation_end(&self) -> &str {
        &self.interpolation_end
    }

    /// Single- or double-quoted string at the start of `rest`.
    ///
    /// Double-quoted strings only match here when they cannot hold an
    /// interpolation; the others go through [`Self::string_body`].
    #[must_use]
    pub fn quoted_string<'s>(&self, rest: &'s str) -> Option<QuotedString<'s>> {
        let caps = self.quoted_string.captures(rest)?;
        let (quote, body) = if caps.get(1).is_some() { (1, 2) } else { (4, 5) };
        Some(QuotedString {
            quote: group(&caps, quote),
            body: group(&caps, body),
        })
    }

    /// Length of double-quoted string content at the start of `rest`,
    /// stopping at an unescaped `"` or interpolation opening.
    #[must_use]
    pub fn string_body(&self, rest: &str) -> usize {
        let mut chars = rest.char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => return i,
                '\\' => {
                    chars.next();
                }
                _ if rest[i..].starts_with(self.interpolation_start.as_str()) => return i,
                _ => {}
            }
        }

        rest.len()
    }

    /// Length of the longest operator at the start of `rest`.
    #[must_use]
    pub fn operator(&self, rest: &str) -> Option<usize> {
        self.operators.iter().find_map(|operator| operator.find(rest))
    }
}

fn verbatim_tag<'s>(regex: &Regex, rest: &'s str) -> Option<VerbatimTag<'s>> {
    let caps = regex.captures(rest)?;
    Some(VerbatimTag {
        offset: caps.get(0)?.start(),
        start: group(&caps, 1),
        open_modifier: group(&caps, 2),
        leading_whitespace: group(&caps, 3),
        name: group(&caps, 4),
        trailing_whitespace: group(&caps, 5),
        close_modifier: group(&caps, 6),
        end: group(&caps, 7),
    })
}

fn group<'s>(caps: &Captures<'s>, index: usize) -> &'s str {
    caps.get(index).map_or("", |m| m.as_str())
}
