use std::collections::HashSet;

use super::{Grammar, Production, Symbol};

/// Every production obtainable from `production` by deleting any subset of
/// its nullable occurrences, the original included. Variants may be empty.
fn nullable_variants(production: &[Symbol], nullable: &HashSet<String>) -> Vec<Production> {
    let mut variants: Vec<Production> = vec![Vec::new()];
    for symbol in production {
        match symbol {
            Symbol::Epsilon => {}
            Symbol::NonTerminal(name) if nullable.contains(name) => {
                let dropped = variants.clone();
                for v in &mut variants {
                    v.push(symbol.clone());
                }
                variants.extend(dropped);
            }
            _ => {
                for v in &mut variants {
                    v.push(symbol.clone());
                }
            }
        }
    }
    variants
}

impl Grammar {
    /// Removes every epsilon production. The start symbol keeps a single
    /// `ε` production if it is nullable.
    pub fn eliminate_epsilon(&self, nullable: &HashSet<String>) -> Grammar {
        let start = match self.start_symbol_name() {
            Some(start) => start,
            None => return Grammar::new(),
        };
        let mut g = Grammar::with_start_symbol(start);

        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                for variant in nullable_variants(production, nullable) {
                    if !variant.is_empty() {
                        g.insert_production(&nt.name, variant);
                    }
                }
            }
        }

        if nullable.contains(start) {
            g.insert_production(start, vec![Symbol::Epsilon]);
        }

        g
    }
}

#[cfg(test)]
mod tests {
    use super::nullable_variants;
    use crate::grammar::{Grammar, Symbol};

    fn rights(g: &Grammar, name: &str) -> Vec<String> {
        g.get_non_terminal(name)
            .unwrap()
            .productions
            .iter()
            .map(|p| p.iter().map(|s| s.name()).collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn all_subsets_of_nullable_positions() {
        let g = Grammar::parse("A -> B B\nB -> b | ε").unwrap();
        let nullable = g.calculate_nullable();
        let production = &g.start().unwrap().productions[0];
        let variants = nullable_variants(production, &nullable);
        assert_eq!(variants.len(), 4);
        assert!(variants.contains(&vec![]));

        let e = g.eliminate_epsilon(&nullable);
        assert_eq!(rights(&e, "A"), vec!["B B", "B", "ε"]);
        assert_eq!(rights(&e, "B"), vec!["b"]);
    }

    #[test]
    fn only_start_keeps_epsilon() {
        let g = Grammar::parse("S -> a S b | A\nA -> ε").unwrap();
        let e = g.eliminate_epsilon(&g.calculate_nullable());
        assert_eq!(rights(&e, "S"), vec!["a S b", "a b", "A", "ε"]);
        assert!(rights(&e, "A").is_empty());
        for nt in e.non_terminal_iter() {
            for p in &nt.productions {
                assert!(nt.name == "S" || !p.contains(&Symbol::Epsilon));
            }
        }
    }

    #[test]
    fn non_nullable_grammar_is_unchanged() {
        let g = Grammar::parse("S -> a S | b").unwrap();
        let e = g.eliminate_epsilon(&g.calculate_nullable());
        assert_eq!(e, g);
    }

    #[test]
    fn emptied_non_terminal_is_dropped() {
        let g = Grammar::parse("S -> a | b\nA -> ε").unwrap();
        let e = g.eliminate_epsilon(&g.calculate_nullable());
        assert!(e.get_non_terminal("A").is_none());
        assert_eq!(e.non_terminal_iter().map(|nt| nt.name.as_str()).collect::<Vec<_>>(), vec!["S"]);
    }

    #[test]
    fn start_symbol_is_preserved() {
        let g = Grammar::parse("S -> A\nA -> a | ε").unwrap();
        let e = g.eliminate_epsilon(&g.calculate_nullable());
        assert_eq!(e.start_symbol_name(), Some("S"));
        assert_eq!(rights(&e, "S"), vec!["A", "ε"]);
    }
}
