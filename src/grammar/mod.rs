pub mod cnf;
pub mod cyk;
pub mod eliminate_epsilon;
pub mod eliminate_unit;
pub mod eliminate_useless;
pub mod error;
pub mod grammar;
pub mod names;
pub mod nullable;
pub mod parse;
pub mod pretty_print;

pub use cnf::{CnfGrammar, Normalization};
pub use cyk::{CykRecognizer, CykTable, Recognition};
pub use error::{Error, Result};
pub use grammar::{Grammar, NonTerminal, Production, Symbol};
pub use names::NameAllocator;

pub const EPSILON: &str = "ε";
/// Spellings of the empty production accepted by the grammar reader.
pub const EPSILON_ALIASES: [&str; 3] = [EPSILON, "ϵ", "epsilon"];
