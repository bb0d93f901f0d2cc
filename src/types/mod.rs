pub mod eval_error;
pub mod rule_value;

pub use eval_error::{EvalError, EvalResult};
pub use rule_value::RuleValue;
