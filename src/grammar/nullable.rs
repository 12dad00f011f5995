use std::collections::HashSet;

use super::{Grammar, Symbol};

impl Grammar {
    /// Non-terminals that derive the empty string.
    pub fn calculate_nullable(&self) -> HashSet<String> {
        let mut nullable: HashSet<String> = HashSet::new();

        let mut changed = true;
        while changed {
            changed = false;
            for nt in self.non_terminal_iter() {
                if nullable.contains(&nt.name) {
                    continue;
                }
                let is_nullable = nt.productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::Epsilon => true,
                        Symbol::Terminal(_) => false,
                        Symbol::NonTerminal(name) => nullable.contains(name),
                    })
                });

                if is_nullable {
                    nullable.insert(nt.name.clone());
                    changed = true;
                }
            }
        }

        nullable
    }

    /// Whether the start symbol derives the empty string.
    pub fn accepts_empty(&self) -> bool {
        self.start_symbol_name()
            .map_or(false, |start| self.calculate_nullable().contains(start))
    }
}
