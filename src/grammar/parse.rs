use super::{Error, Grammar, Production, Result, Symbol, EPSILON_ALIASES};

impl Symbol {
    /// Classifies a token of the textual notation. Names starting with an
    /// uppercase ASCII letter are non-terminals.
    pub fn from_token(token: &str) -> Result<Self> {
        if EPSILON_ALIASES.contains(&token) {
            return Ok(Symbol::Epsilon);
        }
        match token.chars().next() {
            None => Err(Error::MalformedGrammar("empty symbol".to_string())),
            Some(c) if c.is_ascii_uppercase() => {
                if token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'')
                {
                    Ok(Symbol::non_terminal(token))
                } else {
                    Err(Error::MalformedGrammar(format!(
                        "invalid non-terminal name `{}`",
                        token
                    )))
                }
            }
            Some(_) => Ok(Symbol::terminal(token)),
        }
    }
}

/// Prefixes symbol errors with the line they come from.
fn at_line(line: usize) -> impl Fn(Error) -> Error {
    move |e| match e {
        Error::MalformedGrammar(reason) => {
            Error::MalformedGrammar(format!("line {}: {}", line, reason))
        }
        e => e,
    }
}

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self> {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, String, String)> = Vec::new();

        let mut previous_left: Option<String> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let line = line.replace('→', "->");
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(Error::Syntax {
                    line: i + 1,
                    reason: "too many \"->\"".to_string(),
                });
            }
            let (left, rights) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(Error::Syntax {
                        line: i + 1,
                        reason: "empty left side".to_string(),
                    });
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(Error::Syntax {
                        line: i + 1,
                        reason: "left side contains whitespace".to_string(),
                    });
                }
                match Symbol::from_token(left_str).map_err(at_line(i + 1))? {
                    Symbol::NonTerminal(name) => (name, parts[1].trim()),
                    _ => {
                        return Err(Error::MalformedGrammar(format!(
                            "line {}: left side `{}` is not a non-terminal",
                            i + 1,
                            left_str
                        )))
                    }
                }
            } else {
                match (&previous_left, parts[0].trim().strip_prefix('|')) {
                    (Some(left), Some(rights)) => (left.clone(), rights.trim()),
                    _ => {
                        return Err(Error::Syntax {
                            line: i + 1,
                            reason: "cannot find left side".to_string(),
                        })
                    }
                }
            };

            // Left sides are declared up front so the first rule owns the start
            // symbol even if another non-terminal is mentioned earlier.
            g.declare_non_terminal(&left).map_err(at_line(i + 1))?;
            previous_left = Some(left.clone());

            raw_productions.push((i + 1, left, rights.to_string()));
        }

        for (line, left, rights) in raw_productions {
            for right in rights.split('|') {
                let production = right
                    .split_whitespace()
                    .map(Symbol::from_token)
                    .collect::<Result<Production>>()
                    .map_err(at_line(line))?;
                g.add_production(&left, production).map_err(at_line(line))?;
            }
        }

        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Error, Grammar, Symbol};

    #[test]
    fn simple_parse() {
        let g = Grammar::parse("S -> a").unwrap();
        assert_eq!(g.start_symbol_name(), Some("S"));
        assert_eq!(g.start().unwrap().productions[0], vec![Symbol::terminal("a")]);
    }

    #[test]
    fn simple_parse_with_space_and_newline() {
        let g = Grammar::parse("  S -> a \n | b C\nC → c").unwrap();
        let s = g.start().unwrap();
        assert_eq!(s.productions[0], vec![Symbol::terminal("a")]);
        assert_eq!(
            s.productions[1],
            vec![Symbol::terminal("b"), Symbol::non_terminal("C")]
        );
        assert_eq!(g.terminal_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn epsilon_spellings() {
        let g = Grammar::parse("S -> a S b | ε\nA -> epsilon | ϵ |").unwrap();
        assert_eq!(g.start().unwrap().productions[1], vec![Symbol::Epsilon]);
        assert_eq!(
            g.get_non_terminal("A").unwrap().productions,
            vec![vec![Symbol::Epsilon]]
        );
    }

    #[test]
    fn start_is_first_left_side() {
        let g = Grammar::parse("E -> T\nT -> x").unwrap();
        assert_eq!(g.start_symbol_name(), Some("E"));
    }

    #[test]
    fn empty_parse() {
        let g = Grammar::parse("  \n  ").unwrap();
        assert!(g.start_symbol.is_none());
    }

    #[test]
    fn two_rightarrows_parse() {
        assert!(matches!(
            Grammar::parse("S -> a -> b"),
            Err(Error::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn no_left_parse() {
        assert!(matches!(
            Grammar::parse("-> a"),
            Err(Error::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn no_previous_left_parse() {
        assert!(matches!(
            Grammar::parse("| a b\n S -> a"),
            Err(Error::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn left_contain_space() {
        assert!(matches!(
            Grammar::parse("S a S -> x"),
            Err(Error::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn malformed_symbols() {
        assert!(matches!(
            Grammar::parse("S -> A+"),
            Err(Error::MalformedGrammar(_))
        ));
        assert!(matches!(
            Grammar::parse("s -> a"),
            Err(Error::MalformedGrammar(_))
        ));
    }

    #[test]
    fn symbol_errors_are_malformed_with_line() {
        let e = Grammar::parse("S -> a\nS -> b ε").unwrap_err();
        assert!(matches!(&e, Error::MalformedGrammar(reason) if reason.starts_with("line 2: ")));

        let e = Grammar::parse("S -> A\nA -> a S\n | A+").unwrap_err();
        assert!(matches!(&e, Error::MalformedGrammar(reason) if reason.starts_with("line 3: ")));

        let e = Grammar::parse("S -> a\n\nb -> c").unwrap_err();
        assert!(matches!(&e, Error::MalformedGrammar(reason) if reason.starts_with("line 3: ")));
    }
}
