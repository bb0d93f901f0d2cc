use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    compiler::{RuleCompiler, StringTokenizer, SyntaxError},
    interp::ByteCode,
};

/// Source text plus the identifiers the compiled rule references. The
/// identifier set is what callers can use to check a context for missing
/// bindings before running anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramDetails {
    source: String,
    params: HashSet<String>,
}

impl ProgramDetails {
    pub fn new(source: String) -> ProgramDetails {
        ProgramDetails {
            source,
            params: HashSet::new(),
        }
    }

    pub fn add_param(&mut self, name: &str) {
        self.params.insert(name.to_owned());
    }

    pub fn params(&self) -> Vec<&str> {
        self.params.iter().map(|x| x.as_str()).collect()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A compiled rule: immutable bytecode ready to run against any context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    details: ProgramDetails,
    bytecode: Vec<ByteCode>,
}

impl Program {
    pub fn new(details: ProgramDetails, bytecode: Vec<ByteCode>) -> Program {
        Program { details, bytecode }
    }

    pub fn from_source(source: &str) -> Result<Program, SyntaxError> {
        let mut tokenizer = StringTokenizer::with_input(source);
        RuleCompiler::with_tokenizer(&mut tokenizer).compile()
    }

    pub fn params(&self) -> Vec<&str> {
        self.details.params()
    }

    pub fn source(&self) -> &str {
        self.details.source()
    }

    pub fn bytecode(&self) -> &[ByteCode] {
        &self.bytecode
    }

    pub fn dumps_bc(&self) -> String {
        let lines: Vec<String> = self.bytecode.iter().map(|c| format!("{:?}", c)).collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod test {
    use super::Program;

    #[test]
    fn test_from_source() {
        let prog = Program::from_source("a + 3").unwrap();

        assert_eq!(prog.source(), "a + 3");
        assert_eq!(prog.params(), vec!["a"]);
    }

    #[test]
    fn test_from_source_syntax_error() {
        assert!(Program::from_source("a +").is_err());
    }
}
