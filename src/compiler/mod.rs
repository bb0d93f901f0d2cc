pub mod compiler;
pub mod parse_result;
pub mod source_location;
pub mod string_scanner;
pub mod string_tokenizer;
pub mod syntax_error;
pub mod tokenizer;
pub mod tokens;

pub use compiler::RuleCompiler;
pub use string_tokenizer::StringTokenizer;
pub use syntax_error::SyntaxError;
pub use tokenizer::Tokenizer;
