use std::collections::{HashSet, VecDeque};

use super::{Grammar, Symbol};

impl Grammar {
    /// Non-terminals that derive at least one terminal string (possibly empty).
    pub fn calculate_generating(&self) -> HashSet<String> {
        let mut generating: HashSet<String> = HashSet::new();

        let mut changed = true;
        while changed {
            changed = false;
            for nt in self.non_terminal_iter() {
                if generating.contains(&nt.name) {
                    continue;
                }
                let is_generating = nt.productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::Terminal(_) | Symbol::Epsilon => true,
                        Symbol::NonTerminal(name) => generating.contains(name),
                    })
                });

                if is_generating {
                    generating.insert(nt.name.clone());
                    changed = true;
                }
            }
        }

        generating
    }

    /// Non-terminals reachable from the start symbol, in breadth-first order.
    pub fn calculate_reachable(&self) -> Vec<String> {
        let start = match self.start_symbol_name() {
            Some(start) => start,
            None => return Vec::new(),
        };

        let mut reachable: Vec<String> = vec![start.to_string()];
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(start);
        let mut q: VecDeque<&str> = VecDeque::new();
        q.push_back(start);

        while let Some(current) = q.pop_front() {
            let nt = match self.get_non_terminal(current) {
                Some(nt) => nt,
                None => continue,
            };
            for symbol in nt.productions.iter().flatten() {
                if let Some(name) = symbol.as_non_terminal() {
                    if seen.insert(name) {
                        reachable.push(name.to_string());
                        q.push_back(name);
                    }
                }
            }
        }

        reachable
    }

    /// Drops non-generating symbols, then symbols unreachable from the start
    /// symbol. The start symbol is kept even when it generates nothing.
    pub fn eliminate_useless(&self) -> Grammar {
        let start = match self.start_symbol_name() {
            Some(start) => start,
            None => return Grammar::new(),
        };

        let generating = self.calculate_generating();
        let mut productive = Grammar::with_start_symbol(start);
        for nt in self.non_terminal_iter() {
            if !generating.contains(&nt.name) {
                continue;
            }
            productive.insert_non_terminal(&nt.name);
            for production in &nt.productions {
                let keep = production.iter().all(|s| match s {
                    Symbol::NonTerminal(name) => generating.contains(name),
                    _ => true,
                });
                if keep {
                    productive.insert_production(&nt.name, production.clone());
                }
            }
        }

        let reachable: HashSet<String> = productive.calculate_reachable().into_iter().collect();
        let mut g = Grammar::with_start_symbol(start);
        for nt in productive.non_terminal_iter() {
            if reachable.contains(&nt.name) {
                g.insert_non_terminal(&nt.name);
            }
        }
        for nt in productive.non_terminal_iter() {
            if !reachable.contains(&nt.name) {
                continue;
            }
            for production in &nt.productions {
                g.insert_production(&nt.name, production.clone());
            }
        }

        g
    }
}

#[cfg(test)]
mod tests {
    use crate::Grammar;

    fn names(g: &Grammar) -> Vec<&str> {
        g.non_terminal_iter().map(|nt| nt.name.as_str()).collect()
    }

    #[test]
    fn non_generating_is_removed() {
        let g = Grammar::parse("S -> a S | b | A\nA -> a A").unwrap();
        assert!(!g.calculate_generating().contains("A"));

        let r = g.eliminate_useless();
        assert_eq!(names(&r), vec!["S"]);
        assert_eq!(r.start().unwrap().productions.len(), 2);
    }

    #[test]
    fn unreachable_is_removed() {
        let g = Grammar::parse("S -> a B\nB -> b\nC -> c B").unwrap();
        assert_eq!(g.calculate_reachable(), vec!["S", "B"]);

        let r = g.eliminate_useless();
        assert_eq!(names(&r), vec!["S", "B"]);
        assert_eq!(r.terminal_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn generating_runs_before_reachable() {
        // B is reachable only through the non-generating A.
        let g = Grammar::parse("S -> a | A B\nA -> a A\nB -> b").unwrap();
        let r = g.eliminate_useless();
        assert_eq!(names(&r), vec!["S"]);
    }

    #[test]
    fn non_generating_start_is_kept_empty() {
        let g = Grammar::parse("S -> a S").unwrap();
        let r = g.eliminate_useless();
        assert_eq!(r.start_symbol_name(), Some("S"));
        assert!(r.start().unwrap().productions.is_empty());
        assert_eq!(r.production_count(), 0);
    }

    #[test]
    fn epsilon_start_is_generating() {
        let g = Grammar::parse("S -> ε").unwrap();
        let r = g.eliminate_useless();
        assert_eq!(r, g);
    }
}
