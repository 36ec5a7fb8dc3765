pub mod links;
pub mod query_parser;

pub use links::*;
pub use query_parser::*;
