use std::collections::VecDeque;

use super::grammar::{is_epsilon_production, is_unit_production};
use super::Grammar;

impl Grammar {
    /// Non-terminals reachable from `name` through unit productions, `name`
    /// itself first. Each one is visited once, so unit cycles terminate.
    pub fn unit_closure(&self, name: &str) -> Vec<String> {
        let mut closure: Vec<String> = vec![name.to_string()];
        let mut q: VecDeque<String> = VecDeque::new();
        q.push_back(name.to_string());

        while let Some(current) = q.pop_front() {
            let nt = match self.get_non_terminal(&current) {
                Some(nt) => nt,
                None => continue,
            };
            for production in &nt.productions {
                if !is_unit_production(production) {
                    continue;
                }
                if let Some(target) = production[0].as_non_terminal() {
                    if !closure.iter().any(|c| c == target) {
                        closure.push(target.to_string());
                        q.push_back(target.to_string());
                    }
                }
            }
        }

        closure
    }

    /// Replaces unit productions by the non-unit productions of every
    /// non-terminal in the unit closure.
    pub fn eliminate_unit_productions(&self) -> Grammar {
        let start = match self.start_symbol_name() {
            Some(start) => start,
            None => return Grammar::new(),
        };
        let mut g = Grammar::with_start_symbol(start);

        for nt in self.non_terminal_iter() {
            for target in self.unit_closure(&nt.name) {
                let target = match self.get_non_terminal(&target) {
                    Some(target) => target,
                    None => continue,
                };
                for production in &target.productions {
                    if is_unit_production(production) {
                        continue;
                    }
                    // `ε` belongs to the start symbol alone and is not inherited.
                    if is_epsilon_production(production) && target.name != nt.name {
                        continue;
                    }
                    g.insert_production(&nt.name, production.clone());
                }
            }
        }

        g
    }
}
