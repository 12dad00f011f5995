extern crate wasm_bindgen;

use serde_json::json;
use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{CnfGrammar, Error, Grammar, Symbol};

fn error_to_json(e: Error) -> String {
    json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn cnf_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar).and_then(|g| g.to_cnf()) {
        Ok(cnf) => json!({
            "accepts_empty": cnf.accepts_empty,
            "grammar": cnf.grammar.to_production_output_vec(),
        })
        .to_string(),
        Err(e) => error_to_json(e),
    }
}

#[wasm_bindgen]
pub fn cyk_to_json(grammar: &str, input: &str) -> String {
    let cnf = match Grammar::parse(grammar).and_then(|g| g.to_cnf()) {
        Ok(cnf) => cnf,
        Err(e) => return error_to_json(e),
    };
    let tokens: Vec<&str> = input.split_whitespace().collect();
    match cnf.recognize(&tokens) {
        Ok(r) => json!(r.to_table_output(&cnf.grammar, &tokens)).to_string(),
        Err(e) => error_to_json(e),
    }
}
