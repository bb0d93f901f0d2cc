use super::{
    parse_result::ParseResult,
    syntax_error::SyntaxError,
    tokenizer::Tokenizer,
    tokens::Token,
};
use crate::{
    interp::{ByteCode, JmpWhen},
    program::Program,
    RuleValue,
};

/// Recursive descent compiler from rule source to flat bytecode.
///
/// The grammar is expressions only: there are no statements, no
/// assignment, no loops and no attribute access, so anything outside a
/// single expression fails here with a syntax error before any code runs.
pub struct RuleCompiler<'l, T: Tokenizer> {
    tokenizer: &'l mut T,
}

impl<'l, T: Tokenizer> RuleCompiler<'l, T> {
    pub fn with_tokenizer(tokenizer: &'l mut T) -> RuleCompiler<'l, T> {
        RuleCompiler { tokenizer }
    }

    pub fn compile(mut self) -> Result<Program, SyntaxError> {
        let result = self.parse_expression()?;

        if let Some(unexpected) = self.tokenizer.next()? {
            return Err(self
                .error(format!("Unexpected token {:?} after expression", unexpected)));
        }

        let prog = result.into_program(self.tokenizer.source().to_owned());

        #[cfg(feature = "debug_output")]
        {
            println!("[compiler]: compiled: {}", prog.dumps_bc());
        }

        Ok(prog)
    }

    fn parse_expression(&mut self) -> Result<ParseResult, SyntaxError> {
        let condition = self.parse_or()?;

        match self.tokenizer.peek()? {
            Some(Token::Question) => {
                self.tokenizer.next()?;

                let true_clause = self.parse_expression()?;

                match self.tokenizer.next()? {
                    Some(Token::Colon) => {}
                    _ => return Err(self.error("Expected ':' in conditional".to_string())),
                }

                let false_clause = self.parse_expression()?;

                Ok(condition.into_turnary(true_clause, false_clause))
            }
            _ => Ok(condition),
        }
    }

    fn parse_or(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = self.parse_and()?;

        while let Some(Token::OrOr) = self.tokenizer.peek()? {
            self.tokenizer.next()?;

            let rhs = self.parse_and()?;

            // Short circuit over the right operand when the left is truthy
            current = current
                .append_bytecode(vec![ByteCode::JmpCond {
                    when: JmpWhen::True,
                    dist: (rhs.bytecode().len() + 1) as u32,
                    leave_val: true,
                }])
                .append_result(rhs)
                .append_bytecode(vec![ByteCode::Or]);
        }

        Ok(current)
    }

    fn parse_and(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = self.parse_relation()?;

        while let Some(Token::AndAnd) = self.tokenizer.peek()? {
            self.tokenizer.next()?;

            let rhs = self.parse_relation()?;

            current = current
                .append_bytecode(vec![ByteCode::JmpCond {
                    when: JmpWhen::False,
                    dist: (rhs.bytecode().len() + 1) as u32,
                    leave_val: true,
                }])
                .append_result(rhs)
                .append_bytecode(vec![ByteCode::And]);
        }

        Ok(current)
    }

    fn parse_relation(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = self.parse_addition()?;

        loop {
            let op = match self.tokenizer.peek()? {
                Some(Token::LessThan) => ByteCode::Lt,
                Some(Token::LessEqual) => ByteCode::Le,
                Some(Token::EqualEqual) => ByteCode::Eq,
                Some(Token::NotEqual) => ByteCode::Ne,
                Some(Token::GreaterEqual) => ByteCode::Ge,
                Some(Token::GreaterThan) => ByteCode::Gt,
                Some(Token::In) => ByteCode::In,
                _ => break,
            };
            self.tokenizer.next()?;

            let rhs = self.parse_addition()?;

            current = current.append_result(rhs).append_bytecode(vec![op]);
        }

        Ok(current)
    }

    fn parse_addition(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = self.parse_multiplication()?;

        loop {
            let op = match self.tokenizer.peek()? {
                Some(Token::Add) => ByteCode::Add,
                Some(Token::Minus) => ByteCode::Sub,
                _ => break,
            };
            self.tokenizer.next()?;

            let rhs = self.parse_multiplication()?;

            current = current.append_result(rhs).append_bytecode(vec![op]);
        }

        Ok(current)
    }

    fn parse_multiplication(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = self.parse_unary()?;

        loop {
            let op = match self.tokenizer.peek()? {
                Some(Token::Multiply) => ByteCode::Mul,
                Some(Token::Divide) => ByteCode::Div,
                Some(Token::Mod) => ByteCode::Mod,
                _ => break,
            };
            self.tokenizer.next()?;

            let rhs = self.parse_unary()?;

            current = current.append_result(rhs).append_bytecode(vec![op]);
        }

        Ok(current)
    }

    fn parse_unary(&mut self) -> Result<ParseResult, SyntaxError> {
        match self.tokenizer.peek()? {
            Some(Token::Not) => {
                self.tokenizer.next()?;

                Ok(self.parse_unary()?.append_bytecode(vec![ByteCode::Not]))
            }
            Some(Token::Minus) => {
                self.tokenizer.next()?;

                Ok(self.parse_unary()?.append_bytecode(vec![ByteCode::Neg]))
            }
            _ => self.parse_member(),
        }
    }

    fn parse_member(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = self.parse_primary()?;

        loop {
            match self.tokenizer.peek()? {
                Some(Token::LParen) => {
                    self.tokenizer.next()?;

                    let mut n_args: u32 = 0;

                    if let Some(Token::RParen) = self.tokenizer.peek()? {
                        // fallthrough, no arguments
                    } else {
                        loop {
                            current = current.append_result(self.parse_expression()?);
                            n_args += 1;

                            match self.tokenizer.peek()? {
                                Some(Token::Comma) => {
                                    self.tokenizer.next()?;
                                }
                                _ => break,
                            }
                        }
                    }

                    match self.tokenizer.next()? {
                        Some(Token::RParen) => {}
                        _ => {
                            return Err(
                                self.error("Expected ')' to close call".to_string())
                            )
                        }
                    }

                    current = current.append_bytecode(vec![ByteCode::Call(n_args)]);
                }
                Some(Token::LBracket) => {
                    self.tokenizer.next()?;

                    current = current.append_result(self.parse_expression()?);

                    match self.tokenizer.next()? {
                        Some(Token::RBracket) => {}
                        _ => {
                            return Err(
                                self.error("Expected ']' to close index".to_string())
                            )
                        }
                    }

                    current = current.append_bytecode(vec![ByteCode::Index]);
                }
                Some(Token::Dot) => {
                    return Err(self.error("Attribute access is not supported".to_string()))
                }
                _ => break,
            }
        }

        Ok(current)
    }

    fn parse_primary(&mut self) -> Result<ParseResult, SyntaxError> {
        match self.tokenizer.next()? {
            Some(Token::Ident(name)) => {
                let result = ParseResult::with_bytecode(vec![ByteCode::Push(
                    RuleValue::from_ident(&name),
                )]);

                // A name immediately followed by '(' is a call target and
                // resolves through the function table, not the bindings
                if let Some(Token::LParen) = self.tokenizer.peek()? {
                    Ok(result)
                } else {
                    Ok(result.add_ident(&name))
                }
            }
            Some(Token::IntLit(val)) => Ok(ParseResult::with_bytecode(vec![
                ByteCode::Push(RuleValue::from_int(val)),
            ])),
            Some(Token::FloatLit(val)) => Ok(ParseResult::with_bytecode(vec![
                ByteCode::Push(RuleValue::from_float(val)),
            ])),
            Some(Token::BoolLit(val)) => Ok(ParseResult::with_bytecode(vec![
                ByteCode::Push(RuleValue::from_bool(val)),
            ])),
            Some(Token::StringLit(val)) => Ok(ParseResult::with_bytecode(vec![
                ByteCode::Push(RuleValue::from_string(val)),
            ])),
            Some(Token::Null) => Ok(ParseResult::with_bytecode(vec![ByteCode::Push(
                RuleValue::Null,
            )])),
            Some(Token::LParen) => {
                let inner = self.parse_expression()?;

                match self.tokenizer.next()? {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("Expected ')' to close group".to_string())),
                }
            }
            Some(Token::LBracket) => self.parse_list_literal(),
            Some(Token::LBrace) => self.parse_map_literal(),
            Some(other) => Err(self.error(format!("Unexpected token {:?}", other))),
            None => Err(self.error("Unexpected end of expression".to_string())),
        }
    }

    fn parse_list_literal(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = ParseResult::new();
        let mut n_elems: u32 = 0;

        if let Some(Token::RBracket) = self.tokenizer.peek()? {
            self.tokenizer.next()?;
            return Ok(current.append_bytecode(vec![ByteCode::MkList(0)]));
        }

        loop {
            current = current.append_result(self.parse_expression()?);
            n_elems += 1;

            match self.tokenizer.next()? {
                Some(Token::Comma) => {}
                Some(Token::RBracket) => break,
                _ => return Err(self.error("Expected ']' to close list".to_string())),
            }
        }

        Ok(current.append_bytecode(vec![ByteCode::MkList(n_elems)]))
    }

    fn parse_map_literal(&mut self) -> Result<ParseResult, SyntaxError> {
        let mut current = ParseResult::new();
        let mut n_entries: u32 = 0;

        if let Some(Token::RBrace) = self.tokenizer.peek()? {
            self.tokenizer.next()?;
            return Ok(current.append_bytecode(vec![ByteCode::MkDict(0)]));
        }

        loop {
            let key = self.parse_expression()?;

            match self.tokenizer.next()? {
                Some(Token::Colon) => {}
                _ => return Err(self.error("Expected ':' in map entry".to_string())),
            }

            let value = self.parse_expression()?;

            // MkDict pops each key before its value
            current = current.append_result(value).append_result(key);
            n_entries += 1;

            match self.tokenizer.next()? {
                Some(Token::Comma) => {}
                Some(Token::RBrace) => break,
                _ => return Err(self.error("Expected '}' to close map".to_string())),
            }
        }

        Ok(current.append_bytecode(vec![ByteCode::MkDict(n_entries)]))
    }

    fn error(&self, message: String) -> SyntaxError {
        SyntaxError::from_location(self.tokenizer.location()).with_message(message)
    }
}

#[cfg(test)]
mod test {
    use super::RuleCompiler;
    use crate::compiler::string_tokenizer::StringTokenizer;
    use test_case::test_case;

    #[test_case("1 + 2"; "addition")]
    #[test_case("-4.5"; "negation")]
    #[test_case("!true"; "logical not")]
    #[test_case("a < b && b < c"; "chained comparison")]
    #[test_case("cond ? 'yes' : 'no'"; "conditional")]
    #[test_case("len([1, 2, 3])"; "call with list literal")]
    #[test_case("{'a': 1, 'b': 2}"; "map literal")]
    #[test_case("items[0]"; "index")]
    #[test_case("'x' in name"; "membership")]
    #[test_case("substring(name, 0, 3) == 'abc'"; "nested call")]
    fn test_compile_ok(input: &str) {
        let mut tokenizer = StringTokenizer::with_input(input);

        assert!(
            RuleCompiler::with_tokenizer(&mut tokenizer).compile().is_ok(),
            "failed to compile {}",
            input
        );
    }

    #[test_case("1 +"; "dangling operator")]
    #[test_case("(1 + 2"; "unclosed group")]
    #[test_case("a.b"; "attribute access")]
    #[test_case("x = 3"; "assignment")]
    #[test_case("import os"; "two idents")]
    #[test_case("[1, 2"; "unclosed list")]
    #[test_case("{'a' 1}"; "map missing colon")]
    #[test_case("cond ? 1"; "conditional missing else")]
    fn test_compile_err(input: &str) {
        let mut tokenizer = StringTokenizer::with_input(input);

        assert!(
            RuleCompiler::with_tokenizer(&mut tokenizer).compile().is_err(),
            "expected compile error for {}",
            input
        );
    }

    #[test]
    fn test_params_collected() {
        let mut tokenizer = StringTokenizer::with_input("len(name) + offset");
        let prog = RuleCompiler::with_tokenizer(&mut tokenizer)
            .compile()
            .unwrap();

        let params = prog.params();
        assert!(params.contains(&"name"));
        assert!(params.contains(&"offset"));
        assert!(!params.contains(&"len"));
    }
}
