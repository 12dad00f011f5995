use std::collections::HashSet;

use super::{Error, Grammar, Result};

/// Hands out non-terminal names that are unused by any grammar it has seen and
/// by every name it produced before. One allocator belongs to one
/// normalization run, so separate runs produce the same names.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
    counter: usize,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_grammar(g: &Grammar) -> Self {
        let mut names = Self::new();
        names.reserve_grammar(g);
        names
    }

    /// Marks every terminal and non-terminal name of `g` as taken.
    pub fn reserve_grammar(&mut self, g: &Grammar) {
        self.used.extend(g.symbol_table.keys().cloned());
    }

    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Returns `<prefix><n>` for the smallest counter value whose name is free.
    pub fn fresh(&mut self, prefix: &str) -> Result<String> {
        loop {
            self.counter = self
                .counter
                .checked_add(1)
                .ok_or_else(|| Error::NameCollision(prefix.to_string()))?;
            let name = format!("{}{}", prefix, self.counter);
            if self.used.insert(name.clone()) {
                return Ok(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NameAllocator;
    use crate::grammar::{Error, Grammar};

    #[test]
    fn skips_names_in_use() {
        let g = Grammar::parse("S -> X1 X3 | a\nX1 -> b\nX3 -> X2\nX2 -> c").unwrap();
        let mut names = NameAllocator::for_grammar(&g);
        assert_eq!(names.fresh("X").unwrap(), "X4");
        assert_eq!(names.fresh("X").unwrap(), "X5");
    }

    #[test]
    fn terminal_names_are_reserved() {
        let g = Grammar::parse("S -> t1 S | t2").unwrap();
        let mut names = NameAllocator::for_grammar(&g);
        assert_eq!(names.fresh("t").unwrap(), "t3");
    }

    #[test]
    fn never_repeats() {
        let mut names = NameAllocator::new();
        let a = names.fresh("T").unwrap();
        names.reserve("X2");
        let b = names.fresh("X").unwrap();
        assert_eq!(a, "T1");
        assert_eq!(b, "X3");
        assert!(names.is_used("X2"));
    }

    #[test]
    fn exhausted_counter_is_a_collision() {
        let mut names = NameAllocator {
            counter: usize::MAX,
            ..NameAllocator::new()
        };
        assert_eq!(names.fresh("X"), Err(Error::NameCollision("X".to_string())));
    }
}
