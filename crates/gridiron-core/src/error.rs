// Parse errors for the fixed vocabularies used by game records and filters.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown week token `{0}`")]
    Week(String),

    #[error("unknown primetime slot `{0}`")]
    Primetime(String),

    #[error("unknown spread result `{0}`")]
    SpreadResult(String),

    #[error("unknown over/under result `{0}`")]
    OuResult(String),

    #[error("unknown timezone `{0}`")]
    Timezone(String),

    #[error("unknown {kind} `{value}`")]
    Vocabulary { kind: &'static str, value: String },
}
