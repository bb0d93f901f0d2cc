use thiserror::Error;

use crate::compiler::SyntaxError;

/// Error type produced while compiling or running a rule.
///
/// Every failure mode of the evaluator collapses into this taxonomy; the
/// rendered message is what the HTTP boundary reports to the caller.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("Symbol '{0}' is not bound")]
    Binding(String),

    #[error("'{0}' is not callable")]
    NotCallable(String),

    #[error("{0}")]
    InvalidOp(String),

    #[error("{0}")]
    Argument(String),

    #[error("{0}")]
    Value(String),

    #[error("{0}")]
    Runtime(String),

    #[error("La regla no devolvió un resultado válido.")]
    InvalidResult,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    pub fn binding(name: &str) -> EvalError {
        EvalError::Binding(name.to_owned())
    }

    pub fn not_callable(name: &str) -> EvalError {
        EvalError::NotCallable(name.to_owned())
    }

    pub fn invalid_op(msg: &str) -> EvalError {
        EvalError::InvalidOp(msg.to_owned())
    }

    pub fn argument(msg: &str) -> EvalError {
        EvalError::Argument(msg.to_owned())
    }

    pub fn value(msg: &str) -> EvalError {
        EvalError::Value(msg.to_owned())
    }

    pub fn runtime(msg: &str) -> EvalError {
        EvalError::Runtime(msg.to_owned())
    }

    pub fn internal(msg: &str) -> EvalError {
        EvalError::Internal(msg.to_owned())
    }

    pub fn type_string(&self) -> &'static str {
        use EvalError::*;

        match self {
            Syntax(_) => "SYNTAX",
            Binding(_) => "BINDING",
            NotCallable(_) => "NOT_CALLABLE",
            InvalidOp(_) => "INVALID_OP",
            Argument(_) => "ARGUMENT",
            Value(_) => "VALUE",
            Runtime(_) => "RUNTIME",
            InvalidResult => "INVALID_RESULT",
            Internal(_) => "INTERNAL",
        }
    }
}
