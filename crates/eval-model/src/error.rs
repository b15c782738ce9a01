use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unsupported model '{name}' (expected one of: gpt-o1, llama3-8b, qwen-14b)")]
    UnknownModel { name: String },
    #[error("unknown experiment kind '{name}' (expected class or association)")]
    UnknownKind { name: String },
}

pub type Result<T> = std::result::Result<T, EvalError>;
