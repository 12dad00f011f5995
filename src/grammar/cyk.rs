use std::collections::{BTreeSet, HashMap};

use super::{Grammar, Result, Symbol};

/// `cells[len - 1][pos]` holds the indices of the non-terminals deriving
/// `tokens[pos..pos + len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CykTable {
    cells: Vec<Vec<BTreeSet<usize>>>,
}

impl CykTable {
    fn new(n: usize) -> Self {
        Self {
            cells: (1..=n).map(|len| vec![BTreeSet::new(); n - len + 1]).collect(),
        }
    }

    /// Number of tokens the table was built for.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, len: usize, pos: usize) -> Option<&BTreeSet<usize>> {
        self.cells.get(len.checked_sub(1)?)?.get(pos)
    }

    /// Names of the non-terminals in a cell. Indices unknown to `g` are skipped.
    pub fn names<'g>(&self, g: &'g Grammar, len: usize, pos: usize) -> Vec<&'g str> {
        self.cell(len, pos)
            .map(|cell| {
                cell.iter()
                    .filter_map(|&idx| g.non_terminals.get(idx))
                    .map(|nt| nt.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub accepted: bool,
    pub table: CykTable,
}

pub struct CykRecognizer<'a> {
    grammar: &'a Grammar,
    start: usize,
    accepts_empty: bool,
    terminal_rules: HashMap<&'a str, Vec<usize>>,
    binary_rules: HashMap<(usize, usize), Vec<usize>>,
}

impl<'a> CykRecognizer<'a> {
    /// Indexes the productions of a CNF grammar. `accepts_empty` answers the
    /// empty input, which has no cell in the table.
    pub fn new(grammar: &'a Grammar, accepts_empty: bool) -> Result<Self> {
        let start = grammar.start()?.index;
        grammar.check_cnf()?;

        let mut terminal_rules: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut binary_rules: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for nt in grammar.non_terminal_iter() {
            for production in &nt.productions {
                match production.as_slice() {
                    [Symbol::Terminal(t)] => {
                        terminal_rules.entry(t.as_str()).or_default().push(nt.index)
                    }
                    [Symbol::NonTerminal(b), Symbol::NonTerminal(c)] => {
                        if let (Some(b), Some(c)) =
                            (grammar.get_non_terminal(b), grammar.get_non_terminal(c))
                        {
                            binary_rules
                                .entry((b.index, c.index))
                                .or_default()
                                .push(nt.index);
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(Self {
            grammar,
            start,
            accepts_empty,
            terminal_rules,
            binary_rules,
        })
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    pub fn recognize<S: AsRef<str>>(&self, tokens: &[S]) -> Recognition {
        let n = tokens.len();
        let mut table = CykTable::new(n);
        if n == 0 {
            return Recognition {
                accepted: self.accepts_empty,
                table,
            };
        }

        for (pos, token) in tokens.iter().enumerate() {
            if let Some(lefts) = self.terminal_rules.get(token.as_ref()) {
                table.cells[0][pos].extend(lefts.iter().copied());
            }
        }

        for len in 2..=n {
            for pos in 0..=n - len {
                let mut cell: BTreeSet<usize> = BTreeSet::new();
                for split in 1..len {
                    let left = &table.cells[split - 1][pos];
                    let right = &table.cells[len - split - 1][pos + split];
                    for &b in left {
                        for &c in right {
                            if let Some(lefts) = self.binary_rules.get(&(b, c)) {
                                cell.extend(lefts.iter().copied());
                            }
                        }
                    }
                }
                table.cells[len - 1][pos] = cell;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(tokens = n, top = table.cells[n - 1][0].len(), "filled cyk table");

        Recognition {
            accepted: table.cells[n - 1][0].contains(&self.start),
            table,
        }
    }
}
