use super::{
    source_location::SourceLocation,
    string_scanner::StringScanner,
    syntax_error::SyntaxError,
    tokenizer::Tokenizer,
    tokens::Token,
};

pub struct StringTokenizer<'l> {
    scanner: StringScanner<'l>,

    current: Option<Token>,

    eof: bool,
}

impl<'l> StringTokenizer<'l> {
    pub fn with_input(input: &'l str) -> StringTokenizer<'l> {
        StringTokenizer {
            scanner: StringScanner::from_input(input),
            current: None,
            eof: false,
        }
    }

    fn collect_next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        let mut tmp = [0; 4];
        let mut curr_char = self.scanner.next();

        if self.eof {
            return Ok(None);
        }

        'outer: loop {
            match curr_char {
                Some(' ') | Some('\t') | Some('\n') | Some('\r') => {
                    curr_char = self.scanner.next();
                }
                _ => break 'outer,
            };
        }

        let res = if let Some(input_char) = curr_char {
            match input_char {
                '?' => Ok(Some(Token::Question)),
                ':' => Ok(Some(Token::Colon)),
                '+' => Ok(Some(Token::Add)),
                '-' => Ok(Some(Token::Minus)),
                '*' => Ok(Some(Token::Multiply)),
                '/' => Ok(Some(Token::Divide)),
                '%' => Ok(Some(Token::Mod)),
                '!' => match self.scanner.peek() {
                    Some('=') => {
                        self.scanner.next();
                        Ok(Some(Token::NotEqual))
                    }
                    _ => Ok(Some(Token::Not)),
                },
                '.' => {
                    if let Some(v) = self.scanner.peek() {
                        if v.is_ascii_digit() {
                            self.parse_number(input_char.encode_utf8(&mut tmp))
                        } else {
                            Ok(Some(Token::Dot))
                        }
                    } else {
                        Ok(Some(Token::Dot))
                    }
                }
                ',' => Ok(Some(Token::Comma)),
                '[' => Ok(Some(Token::LBracket)),
                ']' => Ok(Some(Token::RBracket)),
                '{' => Ok(Some(Token::LBrace)),
                '}' => Ok(Some(Token::RBrace)),
                '(' => Ok(Some(Token::LParen)),
                ')' => Ok(Some(Token::RParen)),
                '<' => match self.scanner.peek() {
                    Some('=') => {
                        self.scanner.next();
                        Ok(Some(Token::LessEqual))
                    }
                    _ => Ok(Some(Token::LessThan)),
                },
                '>' => match self.scanner.peek() {
                    Some('=') => {
                        self.scanner.next();
                        Ok(Some(Token::GreaterEqual))
                    }
                    _ => Ok(Some(Token::GreaterThan)),
                },
                '=' => match self.scanner.peek() {
                    Some('=') => {
                        self.scanner.next();
                        Ok(Some(Token::EqualEqual))
                    }
                    // Assignment is a disallowed construct, period.
                    _ => Err(SyntaxError::from_location(self.scanner.location())
                        .with_message("Token = is not supported".to_string())),
                },
                '|' => match self.scanner.peek() {
                    Some('|') => {
                        self.scanner.next();
                        Ok(Some(Token::OrOr))
                    }
                    _ => Err(SyntaxError::from_location(self.scanner.location())
                        .with_message("Token | is not supported".to_string())),
                },
                '&' => match self.scanner.peek() {
                    Some('&') => {
                        self.scanner.next();
                        Ok(Some(Token::AndAnd))
                    }
                    _ => Err(SyntaxError::from_location(self.scanner.location())
                        .with_message("Token & is not supported".to_string())),
                },
                'f' => self.parse_keywords_or_ident("f", &[("false", Token::BoolLit(false))]),
                'i' => self.parse_keywords_or_ident("i", &[("in", Token::In)]),
                'n' => self.parse_keywords_or_ident("n", &[("null", Token::Null)]),
                'r' => {
                    if let Some('\'') = self.scanner.peek() {
                        self.scanner.next();
                        self.parse_string_literal('\'', true)
                    } else if let Some('"') = self.scanner.peek() {
                        self.scanner.next();
                        self.parse_string_literal('"', true)
                    } else {
                        self.parse_keywords_or_ident("r", &[])
                    }
                }
                't' => self.parse_keywords_or_ident("t", &[("true", Token::BoolLit(true))]),
                '0'..='9' => self.parse_number(input_char.encode_utf8(&mut tmp)),
                '\'' | '"' => self.parse_string_literal(input_char, false),
                '_' | 'A'..='Z' | 'a'..='z' => {
                    return self.parse_keywords_or_ident(&input_char.to_string(), &[]);
                }
                other => {
                    return Err(SyntaxError::from_location(self.scanner.location())
                        .with_message(format!("Unexpected symbol: '{}'", other)));
                }
            }
        } else {
            self.eof = true;
            Ok(None)
        };

        #[cfg(feature = "debug_output")]
        {
            if let Ok(Some(ref val)) = res {
                println!("[tokenizer]: collect {:?}", val);
            } else if let Ok(None) = res {
                println!("[tokenizer]: EOF");
            } else if let Err(ref err) = res {
                println!("[tokenizer]: {:?}", err);
            }
        }

        res
    }

    fn parse_string_literal(
        &mut self,
        starting: char,
        is_raw: bool,
    ) -> Result<Option<Token>, SyntaxError> {
        let mut working = String::new();

        'outer: loop {
            let curr = if let Some(curr) = self.scanner.next() {
                curr
            } else {
                return Err(SyntaxError::from_location(self.scanner.location())
                    .with_message("Unterminated string literal".to_string()));
            };

            if curr == starting {
                break 'outer;
            } else if curr == '\\' && !is_raw {
                let escaped = if let Some(curr) = self.scanner.next() {
                    curr
                } else {
                    return Err(SyntaxError::from_location(self.scanner.location())
                        .with_message("Unterminated string literal".to_string()));
                };

                match escaped {
                    'n' => working.push('\n'),
                    'r' => working.push('\r'),
                    't' => working.push('\t'),
                    '\\' => working.push('\\'),
                    '\'' => working.push('\''),
                    '"' => working.push('"'),
                    other => working.push(other),
                }
            } else {
                working.push(curr);
            }
        }

        Ok(Some(Token::StringLit(working)))
    }

    fn parse_keywords_or_ident(
        &mut self,
        starting: &str,
        options: &[(&str, Token)],
    ) -> Result<Option<Token>, SyntaxError> {
        let mut working = starting.to_owned();

        'outer: loop {
            if let Some(next) = self.scanner.peek() {
                match next {
                    'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => {
                        working.push(next);
                        self.scanner.next();
                    }
                    _ => break 'outer,
                }
            } else {
                break 'outer;
            }
        }

        if let Some(ident) = options.iter().find(|x| x.0 == working) {
            Ok(Some(ident.1.clone()))
        } else {
            Ok(Some(Token::Ident(working)))
        }
    }

    fn parse_number(&mut self, starting: &str) -> Result<Option<Token>, SyntaxError> {
        let mut working = starting.to_owned();
        let mut is_float = starting.contains('.');
        let mut is_exp = false;
        let mut base = 10;

        'outer: loop {
            if let Some(next) = self.scanner.peek() {
                match next {
                    '0'..='9' => {
                        working.push(next);
                        self.scanner.next();
                    }
                    'e' | 'E' | '.' => {
                        if base == 16 && (next == 'e' || next == 'E') {
                            working.push(next);
                            self.scanner.next();
                            continue 'outer;
                        }

                        if next == '.' && is_float {
                            break 'outer;
                        } else if is_exp {
                            break 'outer;
                        }

                        is_float = true;

                        if next == 'e' || next == 'E' {
                            is_exp = true;
                        }
                        working.push(next);

                        self.scanner.next();
                        if let Some(p) = self.scanner.peek() {
                            match p {
                                '+' | '-' => {
                                    self.scanner.next();
                                    working.push(p);
                                }
                                _ => {
                                    continue 'outer;
                                }
                            }
                        }
                    }
                    'a'..='d' | 'f' | 'A'..='D' | 'F' => {
                        if base != 16 {
                            break 'outer;
                        }
                        working.push(next);
                        self.scanner.next();
                    }
                    'x' | 'X' => {
                        if working == "0" && base == 10 {
                            working.push('x');
                            self.scanner.next();
                            base = 16;
                        } else {
                            break 'outer;
                        }
                    }
                    _ => break 'outer,
                };
            } else {
                break 'outer;
            }
        }

        let fixedup_str = match base {
            10 => working.as_str(),
            16 => working.trim_start_matches("0x"),
            _ => return Err(SyntaxError::from_location(self.scanner.location())),
        };

        if is_float {
            match working.parse::<f64>() {
                Ok(val) => Ok(Some(Token::FloatLit(val))),
                Err(_) => Err(SyntaxError::from_location(self.scanner.location())
                    .with_message(format!("Failed to parse float literal {}", working))),
            }
        } else {
            match i64::from_str_radix(fixedup_str, base) {
                Ok(val) => Ok(Some(Token::IntLit(val))),
                Err(_) => Err(SyntaxError::from_location(self.scanner.location())
                    .with_message(format!("Failed to parse int literal {}", working))),
            }
        }
    }
}

impl Tokenizer for StringTokenizer<'_> {
    fn peek(&mut self) -> Result<Option<Token>, SyntaxError> {
        if self.current.is_none() {
            match self.collect_next_token() {
                Ok(token) => self.current = token,
                Err(err) => return Err(err),
            };
        }
        Ok(self.current.clone())
    }

    fn next(&mut self) -> Result<Option<Token>, SyntaxError> {
        if self.current.is_none() {
            self.collect_next_token()
        } else {
            Ok(self.current.take())
        }
    }

    fn source<'a>(&'a self) -> &'a str {
        self.scanner.input()
    }

    fn location(&self) -> SourceLocation {
        self.scanner.location()
    }
}

#[cfg(test)]
mod test {
    use super::{StringTokenizer, Token, Tokenizer};

    fn collect_all(input: &str) -> Vec<Token> {
        let mut tokenizer = StringTokenizer::with_input(input);
        let mut tokens = Vec::new();

        while let Some(token) = tokenizer.next().unwrap() {
            tokens.push(token);
        }

        tokens
    }

    #[test]
    fn tokenize_arithmetic() {
        assert_eq!(
            collect_all("1 + 2"),
            vec![Token::IntLit(1), Token::Add, Token::IntLit(2)]
        );
    }

    #[test]
    fn tokenize_call() {
        assert_eq!(
            collect_all("upper(name)"),
            vec![
                Token::Ident("upper".to_string()),
                Token::LParen,
                Token::Ident("name".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn tokenize_keywords() {
        assert_eq!(
            collect_all("true in null"),
            vec![Token::BoolLit(true), Token::In, Token::Null]
        );
    }

    #[test]
    fn tokenize_string_escapes() {
        assert_eq!(
            collect_all(r#""a\nb""#),
            vec![Token::StringLit("a\nb".to_string())]
        );
        assert_eq!(
            collect_all(r"r'a\nb'"),
            vec![Token::StringLit("a\\nb".to_string())]
        );
    }

    #[test]
    fn tokenize_floats() {
        assert_eq!(collect_all("2.5"), vec![Token::FloatLit(2.5)]);
        assert_eq!(collect_all(".5"), vec![Token::FloatLit(0.5)]);
        assert_eq!(collect_all("1e3"), vec![Token::FloatLit(1000.0)]);
    }

    #[test]
    fn tokenize_hex() {
        assert_eq!(collect_all("0xff"), vec![Token::IntLit(255)]);
    }

    #[test]
    fn assignment_is_rejected() {
        let mut tokenizer = StringTokenizer::with_input("x = 3");

        assert!(tokenizer.next().is_ok());
        assert!(tokenizer.next().is_err());
    }

    #[test]
    fn lone_pipe_is_rejected() {
        let mut tokenizer = StringTokenizer::with_input("a | b");

        assert!(tokenizer.next().is_ok());
        assert!(tokenizer.next().is_err());
    }
}
