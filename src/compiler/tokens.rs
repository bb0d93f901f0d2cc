#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Question,          // ?
    Colon,             // :
    Add,               // +
    Minus,             // -
    Multiply,          // *
    Divide,            // /
    Mod,               // %
    Not,               // !
    Dot,               // .
    Comma,             // ,
    LBracket,          // [
    RBracket,          // ]
    LBrace,            // {
    RBrace,            // }
    LParen,            // (
    RParen,            // )
    LessThan,          // <
    GreaterThan,       // >
    OrOr,              // ||
    AndAnd,            // &&
    LessEqual,         // <=
    GreaterEqual,      // >=
    EqualEqual,        // ==
    NotEqual,          // !=
    In,                // 'in'
    Null,              // 'null'
    BoolLit(bool),     // true | false
    IntLit(i64),       // [0-9]+ | 0x[0-9a-fA-F]+
    FloatLit(f64),     // [0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?
    StringLit(String), // r?('|")[^\n]*('|")
    Ident(String),     // [_A-Za-z][_A-Za-z0-9]*
}
