use std::collections::{HashMap, HashSet};

use super::grammar::production_to_string;
use super::{CykRecognizer, Error, Grammar, NameAllocator, Production, Recognition, Result, Symbol};

/// Prefix of non-terminals standing for a single terminal.
const TERMINAL_PREFIX: &str = "T";
/// Prefix of non-terminals standing for the first two symbols of a long production.
const PAIR_PREFIX: &str = "X";

/// A grammar in Chomsky normal form together with whether its language
/// contains the empty string, which the grammar alone cannot express to CYK.
#[derive(Debug, Clone, PartialEq)]
pub struct CnfGrammar {
    pub grammar: Grammar,
    pub accepts_empty: bool,
}

impl CnfGrammar {
    pub fn recognizer(&self) -> Result<CykRecognizer<'_>> {
        CykRecognizer::new(&self.grammar, self.accepts_empty)
    }

    pub fn recognize<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Recognition> {
        Ok(self.recognizer()?.recognize(tokens))
    }
}

/// Every intermediate grammar of one normalization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub nullable: HashSet<String>,
    pub epsilon_free: Grammar,
    pub unit_free: Grammar,
    pub reduced: Grammar,
    pub cnf: CnfGrammar,
}

impl Normalization {
    pub fn into_cnf(self) -> CnfGrammar {
        self.cnf
    }
}

impl Grammar {
    /// Isolates terminals of productions longer than one symbol and splits
    /// productions longer than two symbols. Expects a grammar without unit
    /// productions and without `ε` outside the start symbol.
    pub fn binarize(&self, names: &mut NameAllocator) -> Result<Grammar> {
        let start = match self.start_symbol_name() {
            Some(start) => start,
            None => return Ok(Grammar::new()),
        };
        names.reserve_grammar(self);

        let mut g = Grammar::with_start_symbol(start);
        for nt in self.non_terminal_iter() {
            g.insert_non_terminal(&nt.name);
        }

        let mut terminal_rules: HashMap<String, String> = HashMap::new();
        let mut pair_rules: HashMap<(Symbol, Symbol), String> = HashMap::new();

        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                if production.len() == 1 {
                    g.insert_production(&nt.name, production.clone());
                    continue;
                }

                let mut symbols: Production = Vec::with_capacity(production.len());
                for symbol in production {
                    match symbol {
                        Symbol::Terminal(t) => {
                            let name = match terminal_rules.get(t) {
                                Some(name) => name.clone(),
                                None => {
                                    let name = names.fresh(TERMINAL_PREFIX)?;
                                    g.insert_production(&name, vec![symbol.clone()]);
                                    terminal_rules.insert(t.clone(), name.clone());
                                    name
                                }
                            };
                            symbols.push(Symbol::NonTerminal(name));
                        }
                        _ => symbols.push(symbol.clone()),
                    }
                }

                while symbols.len() > 2 {
                    let rest = symbols.split_off(2);
                    let key = (symbols[0].clone(), symbols[1].clone());
                    let name = match pair_rules.get(&key) {
                        Some(name) => name.clone(),
                        None => {
                            let name = names.fresh(PAIR_PREFIX)?;
                            g.insert_production(&name, symbols);
                            pair_rules.insert(key, name.clone());
                            name
                        }
                    };
                    symbols = std::iter::once(Symbol::NonTerminal(name))
                        .chain(rest)
                        .collect();
                }

                g.insert_production(&nt.name, symbols);
            }
        }

        Ok(g)
    }

    /// Fails on the first production that is not one terminal, two
    /// non-terminals, or `ε` for the start symbol.
    pub fn check_cnf(&self) -> Result<()> {
        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                let ok = match production.as_slice() {
                    [Symbol::Terminal(_)] => true,
                    [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => true,
                    [Symbol::Epsilon] => self.start_symbol == Some(nt.index),
                    _ => false,
                };
                if !ok {
                    return Err(Error::NotChomskyNormalForm(production_to_string(
                        &nt.name, production,
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_cnf(&self) -> bool {
        self.check_cnf().is_ok()
    }

    /// Runs every stage of the conversion, keeping the intermediate grammars.
    pub fn normalize(&self) -> Result<Normalization> {
        let start = self.start()?.name.clone();
        let mut names = NameAllocator::for_grammar(self);

        let nullable = self.calculate_nullable();
        let accepts_empty = nullable.contains(&start);

        let epsilon_free = self.eliminate_epsilon(&nullable);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            nullable = nullable.len(),
            productions = epsilon_free.production_count(),
            "eliminated epsilon productions"
        );

        let unit_free = epsilon_free.eliminate_unit_productions();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            productions = unit_free.production_count(),
            "eliminated unit productions"
        );

        let reduced = unit_free.eliminate_useless();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            non_terminals = reduced.non_terminals.len(),
            productions = reduced.production_count(),
            "eliminated useless symbols"
        );

        let cnf = reduced.binarize(&mut names)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            non_terminals = cnf.non_terminals.len(),
            productions = cnf.production_count(),
            accepts_empty,
            "converted to chomsky normal form"
        );

        Ok(Normalization {
            nullable,
            epsilon_free,
            unit_free,
            reduced,
            cnf: CnfGrammar {
                grammar: cnf,
                accepts_empty,
            },
        })
    }

    pub fn to_cnf(&self) -> Result<CnfGrammar> {
        self.normalize().map(Normalization::into_cnf)
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Error, Grammar, NameAllocator};

    fn rights(g: &Grammar, name: &str) -> Vec<String> {
        g.get_non_terminal(name)
            .unwrap()
            .productions
            .iter()
            .map(|p| p.iter().map(|s| s.name()).collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn isolate_and_binarize() {
        let g = Grammar::parse("S -> a S b | a b").unwrap();
        let mut names = NameAllocator::for_grammar(&g);
        let b = g.binarize(&mut names).unwrap();

        assert_eq!(rights(&b, "S"), vec!["X3 T2", "T1 T2"]);
        assert_eq!(rights(&b, "T1"), vec!["a"]);
        assert_eq!(rights(&b, "T2"), vec!["b"]);
        assert_eq!(rights(&b, "X3"), vec!["T1 S"]);
        assert!(b.is_cnf());
    }

    #[test]
    fn shared_prefix_and_terminal() {
        let g = Grammar::parse("S -> A B C | A B D | c D\nA -> a\nB -> b\nC -> c\nD -> d").unwrap();
        let b = g.binarize(&mut NameAllocator::new()).unwrap();

        assert_eq!(rights(&b, "S"), vec!["X1 C", "X1 D", "T2 D"]);
        assert_eq!(rights(&b, "X1"), vec!["A B"]);
        assert_eq!(rights(&b, "C"), vec!["c"]);
        assert_eq!(rights(&b, "T2"), vec!["c"]);
    }

    #[test]
    fn long_production_is_peeled_from_the_left() {
        let g = Grammar::parse("S -> A A A A\nA -> a").unwrap();
        let b = g.binarize(&mut NameAllocator::new()).unwrap();
        assert_eq!(rights(&b, "S"), vec!["X2 A"]);
        assert_eq!(rights(&b, "X2"), vec!["X1 A"]);
        assert_eq!(rights(&b, "X1"), vec!["A A"]);
    }

    #[test]
    fn fresh_names_avoid_existing_ones() {
        let g = Grammar::parse("S -> a b\nT1 -> t").unwrap();
        let b = g.binarize(&mut NameAllocator::for_grammar(&g)).unwrap();
        assert_eq!(rights(&b, "S"), vec!["T2 T3"]);
        assert_eq!(rights(&b, "T1"), vec!["t"]);
    }

    #[test]
    fn check_cnf_rejects_other_shapes() {
        for text in ["S -> A\nA -> a", "S -> a b", "S -> A B C\nA -> a\nB -> b\nC -> c", "S -> a | A\nA -> ε"] {
            let g = Grammar::parse(text).unwrap();
            assert!(matches!(g.check_cnf(), Err(Error::NotChomskyNormalForm(_))));
        }
        assert!(Grammar::parse("S -> A S | a | ε\nA -> a").unwrap().is_cnf());
    }

    #[test]
    fn pipeline_output_is_cnf() {
        let grammars = [
            "S -> a S b | ε",
            "S -> 0 A 0 | 1 B 1 | B B\nA -> C | ε\nB -> S | A\nC -> S | ε",
            "E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id",
            "S -> A B C\nA -> a A | ε\nB -> b B | ε\nC -> c C | ε",
            "S -> A | B\nA -> B | a\nB -> A | b",
        ];
        for text in grammars {
            let cnf = Grammar::parse(text).unwrap().to_cnf().unwrap();
            assert!(cnf.grammar.is_cnf(), "{}", cnf.grammar);
        }
    }

    #[test]
    fn useless_symbols_do_not_reach_cnf() {
        let g = Grammar::parse("S -> a S | b | U\nU -> a U\nV -> v").unwrap();
        let cnf = g.to_cnf().unwrap().grammar;
        assert!(cnf.get_non_terminal("U").is_none());
        assert!(cnf.get_non_terminal("V").is_none());
        assert!(!cnf.terminal_iter().any(|t| t == "v"));
    }

    #[test]
    fn start_symbol_is_threaded_through() {
        let g = Grammar::parse("E -> E + T | T\nT -> x").unwrap();
        let n = g.normalize().unwrap();
        for stage in [&n.epsilon_free, &n.unit_free, &n.reduced, &n.cnf.grammar] {
            assert_eq!(stage.start_symbol_name(), Some("E"));
        }
    }

    #[test]
    fn deterministic() {
        let g = Grammar::parse("S -> A S A | a B\nA -> B | S\nB -> b | ε").unwrap();
        assert_eq!(g.to_cnf().unwrap(), g.to_cnf().unwrap());
    }

    #[test]
    fn empty_grammar_has_no_start_symbol() {
        assert_eq!(Grammar::new().to_cnf().unwrap_err(), Error::NoStartSymbol);
    }

    #[test]
    fn empty_string_flag() {
        assert!(Grammar::parse("S -> A B\nA -> ε\nB -> ε | b").unwrap().to_cnf().unwrap().accepts_empty);
        assert!(Grammar::parse("S -> a | A\nA -> ε").unwrap().to_cnf().unwrap().accepts_empty);
        assert!(!Grammar::parse("S -> a A\nA -> ε").unwrap().to_cnf().unwrap().accepts_empty);
    }
}
