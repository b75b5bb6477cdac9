use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("unexpected character `{found}` at position {position}")]
    UnexpectedToken { found: char, position: usize },

    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}
