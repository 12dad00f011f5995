use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Malformed grammar: {0}")]
    MalformedGrammar(String),
    #[error("Line {line}: {reason}")]
    Syntax { line: usize, reason: String },
    #[error("Grammar has no start symbol")]
    NoStartSymbol,
    #[error("No unused name left for fresh symbol `{0}`")]
    NameCollision(String),
    #[error("Not in Chomsky normal form: {0}")]
    NotChomskyNormalForm(String),
}

pub type Result<T> = std::result::Result<T, Error>;
