use std::collections::HashSet;

use crate::{
    interp::{ByteCode, JmpWhen},
    program::{Program, ProgramDetails},
};

/// Intermediate result of compiling one grammar production: the bytecode
/// for that production plus the set of identifiers it references.
#[derive(Debug, Clone)]
pub struct ParseResult {
    bytecode: Vec<ByteCode>,
    idents: HashSet<String>,
}

impl ParseResult {
    pub fn new() -> ParseResult {
        ParseResult {
            bytecode: Vec::new(),
            idents: HashSet::new(),
        }
    }

    pub fn with_bytecode(bytecode: Vec<ByteCode>) -> ParseResult {
        ParseResult {
            bytecode,
            idents: HashSet::new(),
        }
    }

    pub fn bytecode(&self) -> &[ByteCode] {
        &self.bytecode
    }

    pub fn idents(&self) -> &HashSet<String> {
        &self.idents
    }

    pub fn add_ident(mut self, name: &str) -> ParseResult {
        self.idents.insert(name.to_owned());
        self
    }

    pub fn append_result(mut self, other: ParseResult) -> ParseResult {
        self.bytecode.extend(other.bytecode);
        self.idents.extend(other.idents);
        self
    }

    pub fn append_bytecode(mut self, bytecode: Vec<ByteCode>) -> ParseResult {
        self.bytecode.extend(bytecode);
        self
    }

    pub fn consume_children(self, children: Vec<ParseResult>) -> ParseResult {
        let mut curr = self;

        for child in children.into_iter() {
            curr = curr.append_result(child);
        }

        curr
    }

    pub fn into_turnary(
        self,
        true_clause: ParseResult,
        false_clause: ParseResult,
    ) -> ParseResult {
        let mut bytecode = self.bytecode;
        let mut idents = self.idents;

        bytecode.push(ByteCode::JmpCond {
            when: JmpWhen::False,
            // extra jump to hop over the true clause's trailing Jmp
            dist: (true_clause.bytecode.len() + 1) as u32,
            leave_val: false,
        });
        bytecode.extend(true_clause.bytecode);
        bytecode.push(ByteCode::Jmp(false_clause.bytecode.len() as u32));
        bytecode.extend(false_clause.bytecode);

        idents.extend(true_clause.idents);
        idents.extend(false_clause.idents);

        ParseResult { bytecode, idents }
    }

    pub fn into_program(self, source: String) -> Program {
        let mut details = ProgramDetails::new(source);

        for ident in self.idents.iter() {
            details.add_param(ident);
        }

        Program::new(details, self.bytecode)
    }
}

impl Default for ParseResult {
    fn default() -> Self {
        Self::new()
    }
}
