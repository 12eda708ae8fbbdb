/// Operators recognised inside tags by default.
pub const DEFAULT_OPERATORS: &[&str] = &[
    "=",
    "or",
    "and",
    "b-or",
    "b-xor",
    "b-and",
    "==",
    "!=",
    "<",
    "<=",
    ">",
    ">=",
    "is",
    "is not",
    "not",
    "in",
    "not in",
    "matches",
    "starts with",
    "ends with",
    "..",
    "+",
    "-",
    "~",
    "*",
    "/",
    "//",
    "%",
    "**",
    "??",
];

/// Error produced when a [`LexerConfig`] cannot drive a lexer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A delimiter is the empty string.
    #[error("{0} delimiter must not be empty")]
    EmptyDelimiter(&'static str),
    /// Two tag openings are identical, so tags cannot be told apart.
    #[error("tag start delimiter '{0}' is used more than once")]
    DuplicateTagStart(String),
    /// Both trim modifiers are the same character.
    #[error("whitespace trim markers must differ, got '{0}' twice")]
    DuplicateTrimMarker(char),
    /// The operator vocabulary contains `""`.
    #[error("operators must not be empty")]
    EmptyOperator,
    /// A matcher failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Delimiters, trim markers and operator vocabulary of a lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    pub variable_pair: (String, String),
    pub block_pair: (String, String),
    pub comment_pair: (String, String),
    pub interpolation_pair: (String, String),
    pub whitespace_trim: char,
    pub line_whitespace_trim: char,
    pub operators: Vec<String>,
}

impl LexerConfig {
    /// Twig's stock syntax: `{{ }}`, `{% %}`, `{# #}`, `#{ }`, `-`, `~`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variable_pair: pair("{{", "}}"),
            block_pair: pair("{%", "%}"),
            comment_pair: pair("{#", "#}"),
            interpolation_pair: pair("#{", "}"),
            whitespace_trim: '-',
            line_whitespace_trim: '~',
            operators: DEFAULT_OPERATORS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Set the print tag delimiters.
    #[must_use]
    pub fn variable_pair(mut self, start: &str, end: &str) -> Self {
        self.variable_pair = pair(start, end);
        self
    }

    /// Set the block tag delimiters.
    #[must_use]
    pub fn block_pair(mut self, start: &str, end: &str) -> Self {
        self.block_pair = pair(start, end);
        self
    }

    /// Set the comment tag delimiters.
    #[must_use]
    pub fn comment_pair(mut self, start: &str, end: &str) -> Self {
        self.comment_pair = pair(start, end);
        self
    }

    /// Set the string interpolation delimiters.
    #[must_use]
    pub fn interpolation_pair(mut self, start: &str, end: &str) -> Self {
        self.interpolation_pair = pair(start, end);
        self
    }

    /// Set the whitespace trimming modifier.
    #[must_use]
    pub fn whitespace_trim(mut self, marker: char) -> Self {
        self.whitespace_trim = marker;
        self
    }

    /// Set the line whitespace trimming modifier.
    #[must_use]
    pub fn line_whitespace_trim(mut self, marker: char) -> Self {
        self.line_whitespace_trim = marker;
        self
    }

    /// Replace the operator vocabulary.
    #[must_use]
    pub fn operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = operators.into_iter().map(Into::into).collect();
        self
    }

    /// Add one operator to the vocabulary.
    #[must_use]
    pub fn operator(mut self, operator: &str) -> Self {
        self.operators.push(operator.to_string());
        self
    }

    /// Check that the configuration can drive a lexer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delimiters = [
            ("print start", &self.variable_pair.0),
            ("print end", &self.variable_pair.1),
            ("block start", &self.block_pair.0),
            ("block end", &self.block_pair.1),
            ("comment start", &self.comment_pair.0),
            ("comment end", &self.comment_pair.1),
            ("interpolation start", &self.interpolation_pair.0),
            ("interpolation end", &self.interpolation_pair.1),
        ];

        for (name, delimiter) in delimiters {
            if delimiter.is_empty() {
                return Err(ConfigError::EmptyDelimiter(name));
            }
        }

        let starts = self.tag_starts();
        for (i, start) in starts.iter().enumerate() {
            if starts[i + 1..].contains(start) {
                return Err(ConfigError::DuplicateTagStart((*start).to_string()));
            }
        }

        if self.whitespace_trim == self.line_whitespace_trim {
            return Err(ConfigError::DuplicateTrimMarker(self.whitespace_trim));
        }

        if self.operators.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyOperator);
        }

        Ok(())
    }

    /// Print, block and comment openings.
    pub(crate) fn tag_starts(&self) -> [&str; 3] {
        [
            self.variable_pair.0.as_str(),
            self.block_pair.0.as_str(),
            self.comment_pair.0.as_str(),
        ]
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn pair(start: &str, end: &str) -> (String, String) {
    (start.to_string(), end.to_string())
}
