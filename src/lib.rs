//! A sandboxed rule evaluation engine with an HTTP front end.
//!
//! Rules are single expressions compiled to bytecode and run by a small
//! stack interpreter against a set of data bindings and a whitelist of
//! helper functions. The language has no loops, no assignment and no
//! attribute access, so a rule can only compute over what its context
//! provides.
//!
//! ```
//! use ruleval::Environment;
//!
//! let mut env = Environment::new();
//! env.bind_param("age", 21.into());
//!
//! let result = env.eval_rule("age >= 18").unwrap();
//! assert_eq!(result, true.into());
//! ```

pub mod compiler;
pub mod config;
mod context;
pub mod interp;
pub mod program;
pub mod server;
mod types;

#[cfg(test)]
mod tests;

pub use compiler::{RuleCompiler, StringTokenizer, SyntaxError, Tokenizer};
pub use context::{Environment, RuleFunction};
pub use program::Program;
pub use types::{EvalError, EvalResult, RuleValue};
