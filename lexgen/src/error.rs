use thiserror::Error;

/// A limit defined in [`crate::limits`] was exceeded while compiling a regex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("regex source is {0} bytes long, exceeding the {max} byte limit", max = crate::limits::MAX_REGEXP_STRING_LENGTH)]
    RegexTooLong(usize),
    #[error("regex tokenizes to {0} tokens, exceeding the {max} token limit", max = crate::limits::MAX_REGEXP_TOKENS)]
    TooManyTokens(usize),
    #[error("AST node has {0} children, exceeding the {max} child limit", max = crate::limits::MAX_NUM_REGEXP_CHILDREN)]
    TooManyChildren(usize),
    #[error("combined NFA would need {0} states, exceeding the {max} state limit", max = crate::limits::MAX_NUM_NFA_STATES)]
    TooManyNfaStates(usize),
    #[error("DFA would need {0} states, exceeding the {max} state limit", max = crate::limits::MAX_NUM_DFA_STATES)]
    TooManyDfaStates(usize),
}

/// A malformed regex source string, rejected during tokenizing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexSyntaxError {
    #[error("unexpected token at byte offset {offset} in regex {source:?}")]
    UnexpectedToken { source: String, offset: usize },
    #[error("unterminated group starting at byte offset {offset} in regex {source:?}")]
    UnterminatedGroup { source: String, offset: usize },
    #[error("unterminated character class starting at byte offset {offset} in regex {source:?}")]
    UnterminatedClass { source: String, offset: usize },
    #[error("range endpoint is not a single character at byte offset {offset} in regex {source:?}")]
    RangeEndpointNotSingleChar { source: String, offset: usize },
    #[error("range {lo} > {hi} is reversed in regex {source:?}")]
    RangeReversed { source: String, lo: u8, hi: u8 },
    #[error("unexpected end of regex {source:?}")]
    UnexpectedEnd { source: String },
}

/// Either stage a single regex's parse can fail at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexCompileError {
    #[error(transparent)]
    Syntax(#[from] RegexSyntaxError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// The error type returned by [`crate::driver::compile`]: wraps whichever
/// stage failed, naming the offending regex's position in the input list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("regex #{index} ({source_text:?}): {source}")]
    Syntax {
        index: usize,
        source_text: String,
        #[source]
        source: RegexSyntaxError,
    },
    #[error("regex #{index} ({source_text:?}): {source}")]
    Capacity {
        index: usize,
        source_text: String,
        #[source]
        source: CapacityError,
    },
    #[error("combined automaton: {0}")]
    Combined(#[source] CapacityError),
}
