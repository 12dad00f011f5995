use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, Recognition, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec<'a> {
    start: Option<&'a str>,
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Grammar {
    /// Non-terminals without productions are left out.
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .filter(|nt| !nt.productions.is_empty())
            .map(|nt| ProductionOutput {
                left: nt.name.as_str(),
                rights: nt
                    .productions
                    .iter()
                    .map(|p| p.iter().map(|s| s.name()).collect())
                    .collect(),
            })
            .collect();
        ProductionOutputVec {
            start: self.start_symbol_name(),
            productions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CykTableOutput<'a> {
    tokens: Vec<&'a str>,
    accepted: bool,
    /// `rows[len - 1][pos]`: non-terminals deriving the span of `len` tokens at `pos`.
    rows: Vec<Vec<Vec<&'a str>>>,
}

impl CykTableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let n = self.tokens.len();
        let mut output: Vec<Vec<String>> = Vec::new();

        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.tokens.iter().map(|t| t.to_string()));
        output.push(header);

        for (i, row) in self.rows.iter().enumerate() {
            let mut line: Vec<String> = vec![(i + 1).to_string()];
            line.extend(row.iter().map(|cell| {
                if cell.is_empty() {
                    "-".to_string()
                } else {
                    cell.join(", ")
                }
            }));
            line.resize(n + 1, String::new());
            output.push(line);
        }

        let width: Vec<usize> = (0..n + 1)
            .map(|j| {
                output
                    .iter()
                    .map(|line| line[j].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let table = output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n{}",
            table,
            if self.accepted { "accepted" } else { "rejected" }
        )
    }

    pub fn to_latex(&self) -> String {
        let n = self.tokens.len();
        let header = format!(
            "\\begin{{tabular}}{{c{}}}\n & {}\\\\\\hline",
            "|c".repeat(n),
            self.tokens
                .iter()
                .map(|t| format!("\\texttt{{{}}}", escape::tex(*t)))
                .collect::<Vec<_>>()
                .join(" & ")
        );

        let content = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut line: Vec<String> = vec![(i + 1).to_string()];
                line.extend(row.iter().map(|cell| {
                    if cell.is_empty() {
                        "$\\emptyset$".to_string()
                    } else {
                        cell.iter()
                            .map(|s| escape::tex(*s))
                            .collect::<Vec<_>>()
                            .join(", ")
                    }
                }));
                line.resize(n + 1, String::new());
                line.join(" & ")
            })
            .collect::<Vec<_>>()
            .join(" \\\\\n");

        format!("{}\n{}\n\\end{{tabular}}", header, content)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Recognition {
    pub fn to_table_output<'a, S: AsRef<str>>(
        &self,
        g: &'a Grammar,
        tokens: &'a [S],
    ) -> CykTableOutput<'a> {
        let n = self.table.len();
        CykTableOutput {
            tokens: tokens.iter().map(|t| t.as_ref()).collect(),
            accepted: self.accepted,
            rows: (1..=n)
                .map(|len| {
                    (0..=n - len)
                        .map(|pos| self.table.names(g, len, pos))
                        .collect()
                })
                .collect(),
        }
    }
}
