mod default_funcs;
mod type_funcs;

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    interp::Interpreter,
    program::Program,
    EvalError, EvalResult, RuleValue,
};

/// Functions callable from rules. Plain function pointers keep the
/// whitelist a closed set that cannot capture outside state.
pub type RuleFunction = fn(&[RuleValue]) -> EvalResult<RuleValue>;

/// The bindings a rule runs against: data parameters on one side and the
/// callable whitelist on the other.
///
/// The two maps are deliberately separate. Context merges only ever touch
/// the parameter side, so no request payload can replace or extend the
/// functions reachable from a rule.
#[derive(Clone)]
pub struct Environment {
    params: HashMap<String, RuleValue>,
    funcs: HashMap<String, RuleFunction>,
}

impl Environment {
    /// An environment with the default function whitelist and type tags
    /// bound.
    pub fn new() -> Environment {
        let mut env = Environment {
            params: HashMap::new(),
            funcs: HashMap::new(),
        };

        for (name, func) in default_funcs::DEFAULT_FUNCS {
            env.funcs.insert((*name).to_owned(), *func);
        }

        type_funcs::load_type_tags(&mut env);

        env
    }

    pub fn bind_param(&mut self, name: &str, value: RuleValue) {
        self.params.insert(name.to_owned(), value);
    }

    /// Merges a JSON object into the parameter bindings, last writer wins.
    pub fn merge_json_object(&mut self, object: &serde_json::Map<String, Value>) {
        for (name, value) in object.iter() {
            self.bind_param(name, RuleValue::from(value));
        }
    }

    pub fn get_param(&self, name: &str) -> Option<&RuleValue> {
        self.params.get(name)
    }

    pub fn get_func(&self, name: &str) -> Option<RuleFunction> {
        self.funcs.get(name).copied()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.params.contains_key(name) || self.funcs.contains_key(name)
    }

    /// Compiles and runs a rule against this environment. The result must
    /// be a primitive (bool, int, float or string).
    pub fn eval_rule(&self, source: &str) -> EvalResult<RuleValue> {
        let prog = Program::from_source(source)?;

        self.run_program(&prog)
    }

    /// Runs an already compiled rule, applying the same primitive result
    /// check as [`Environment::eval_rule`].
    pub fn run_program(&self, prog: &Program) -> EvalResult<RuleValue> {
        let result = Interpreter::new(self).run_raw(prog.bytecode())?;

        if result.is_primitive() {
            Ok(result)
        } else {
            Err(EvalError::InvalidResult)
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
