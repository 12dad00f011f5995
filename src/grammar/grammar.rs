use std::collections::HashMap;
use std::fmt;

use super::{Error, Result, EPSILON, EPSILON_ALIASES};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    Epsilon,
}

impl Symbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(name.into())
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Symbol::NonTerminal(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name.as_str(),
            Symbol::Epsilon => EPSILON,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn as_non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Right-hand side of a rule. The empty production is `[Symbol::Epsilon]`.
pub type Production = Vec<Symbol>;

pub fn is_epsilon_production(production: &[Symbol]) -> bool {
    matches!(production, [Symbol::Epsilon])
}

pub fn is_unit_production(production: &[Symbol]) -> bool {
    matches!(production, [Symbol::NonTerminal(_)])
}

pub fn production_to_string(left: &str, production: &[Symbol]) -> String {
    let right = production
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} -> {}", left, right)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub productions: Vec<Production>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    NonTerminal(usize),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grammar {
    pub non_terminals: Vec<NonTerminal>,
    pub terminals: Vec<String>,
    pub symbol_table: HashMap<String, SymbolKind>,
    pub start_symbol: Option<usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty grammar whose start symbol is already fixed. Used by the
    /// rewriting stages so the start symbol survives every transformation.
    pub(crate) fn with_start_symbol(name: &str) -> Self {
        let mut g = Self::new();
        let idx = g.insert_non_terminal(name);
        g.start_symbol = Some(idx);
        g
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminals.iter()
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.iter()
    }

    pub fn get_non_terminal(&self, name: &str) -> Option<&NonTerminal> {
        match self.symbol_table.get(name) {
            Some(SymbolKind::NonTerminal(idx)) => Some(&self.non_terminals[*idx]),
            _ => None,
        }
    }

    pub fn start(&self) -> Result<&NonTerminal> {
        self.start_symbol
            .map(|idx| &self.non_terminals[idx])
            .ok_or(Error::NoStartSymbol)
    }

    pub fn start_symbol_name(&self) -> Option<&str> {
        self.start_symbol
            .map(|idx| self.non_terminals[idx].name.as_str())
    }

    pub fn production_count(&self) -> usize {
        self.non_terminals.iter().map(|nt| nt.productions.len()).sum()
    }

    /// Records `left -> alt` for every alternative. The first left side ever
    /// recorded becomes the start symbol.
    pub fn add_rule<I>(&mut self, left: &str, alternatives: I) -> Result<()>
    where
        I: IntoIterator<Item = Production>,
    {
        self.declare_non_terminal(left)?;
        for production in alternatives {
            self.add_production(left, production)?;
        }
        Ok(())
    }

    /// Records a single production, returning whether it was new.
    pub fn add_production(&mut self, left: &str, production: Production) -> Result<bool> {
        self.declare_non_terminal(left)?;

        let production = if production.is_empty() {
            vec![Symbol::Epsilon]
        } else {
            production
        };
        if production.len() > 1 && production.iter().any(|s| s.is_epsilon()) {
            return Err(Error::MalformedGrammar(format!(
                "`{}` mixes {} with other symbols",
                production_to_string(left, &production),
                EPSILON
            )));
        }
        for symbol in &production {
            self.check_symbol(symbol)?;
            match symbol {
                Symbol::Terminal(name) => self.insert_terminal(name),
                Symbol::NonTerminal(name) => {
                    self.insert_non_terminal(name);
                }
                Symbol::Epsilon => {}
            }
        }

        Ok(self.insert_production(left, production))
    }

    pub(crate) fn declare_non_terminal(&mut self, left: &str) -> Result<()> {
        self.check_symbol(&Symbol::non_terminal(left))?;
        let idx = self.insert_non_terminal(left);
        if self.start_symbol.is_none() {
            self.start_symbol = Some(idx);
        }
        Ok(())
    }

    fn check_symbol(&self, symbol: &Symbol) -> Result<()> {
        let (name, terminal) = match symbol {
            Symbol::Epsilon => return Ok(()),
            Symbol::Terminal(name) => (name, true),
            Symbol::NonTerminal(name) => (name, false),
        };

        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::MalformedGrammar(format!("invalid symbol name {:?}", name)));
        }
        if EPSILON_ALIASES.contains(&name.as_str()) {
            return Err(Error::MalformedGrammar(format!(
                "`{}` is reserved for the empty production",
                name
            )));
        }
        match self.symbol_table.get(name) {
            Some(SymbolKind::Terminal) if !terminal => Err(Error::MalformedGrammar(format!(
                "`{}` is already used as a terminal",
                name
            ))),
            Some(SymbolKind::NonTerminal(_)) if terminal => Err(Error::MalformedGrammar(
                format!("`{}` is already used as a non-terminal", name),
            )),
            _ => Ok(()),
        }
    }

    pub(crate) fn insert_non_terminal(&mut self, name: &str) -> usize {
        if let Some(SymbolKind::NonTerminal(idx)) = self.symbol_table.get(name) {
            return *idx;
        }
        let idx = self.non_terminals.len();
        self.non_terminals
            .push(NonTerminal::new(idx, name.to_string()));
        self.symbol_table
            .insert(name.to_string(), SymbolKind::NonTerminal(idx));
        idx
    }

    fn insert_terminal(&mut self, name: &str) {
        if !self.symbol_table.contains_key(name) {
            self.terminals.push(name.to_string());
            self.symbol_table
                .insert(name.to_string(), SymbolKind::Terminal);
        }
    }

    /// Unchecked insertion for productions taken from an already valid grammar
    /// or built from allocator names.
    pub(crate) fn insert_production(&mut self, left: &str, production: Production) -> bool {
        let left = self.insert_non_terminal(left);
        for symbol in &production {
            match symbol {
                Symbol::Terminal(name) => self.insert_terminal(name),
                Symbol::NonTerminal(name) => {
                    self.insert_non_terminal(name);
                }
                Symbol::Epsilon => {}
            }
        }

        let productions = &mut self.non_terminals[left].productions;
        if productions.contains(&production) {
            false
        } else {
            productions.push(production);
            true
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nt in &self.non_terminals {
            if nt.productions.is_empty() {
                continue;
            }
            let rights = nt
                .productions
                .iter()
                .map(|p| p.iter().map(|s| s.name()).collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{} -> {}", nt.name, rights)?;
        }
        Ok(())
    }
}
