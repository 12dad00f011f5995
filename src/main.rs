use std::{fs, io::BufRead};

use cnf_cyk::grammar::pretty_print::ProductionOutputVec;
use cnf_cyk::Grammar;

fn print_help() {
    println!("Usage: cnf-cyk [outputs] [options] <grammar file>");
    println!("outputs:");
    println!("  prod: Productions of the grammar");
    println!("  eps: Productions after removing epsilon productions");
    println!("  unit: Productions after removing unit productions");
    println!("  useless: Productions after removing useless symbols");
    println!("  cnf: Productions in Chomsky normal form");
    println!("  cyk: CYK table of every input string");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!();
    println!("Strings are read from stdin, one per line, with whitespace separated tokens.");
    println!("Reading stops at end of input or at a line containing only \"exit\".");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn render_productions(t: &ProductionOutputVec, format: &OutputFormat) -> Result<String, String> {
    Ok(match format {
        OutputFormat::Plain => t.to_plaintext(),
        OutputFormat::LaTeX => t.to_latex(),
        OutputFormat::JSON => t.to_json().map_err(|e| e.to_string())?,
    })
}

fn run(args: &[String]) -> Result<(), String> {
    let mut outputs: Vec<&str> = Vec::new();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "eps", "unit", "useless", "cnf", "cyk"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return Ok(());
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 != args.len() {
        print_help();
        return Ok(());
    }

    let input = fs::read_to_string(args[i].as_str())
        .map_err(|e| format!("Failed to read {}: {}", args[i], e))?;
    let g = Grammar::parse(&input).map_err(|e| e.to_string())?;
    let n = g.normalize().map_err(|e| e.to_string())?;

    for output in &outputs {
        let t = match *output {
            "prod" => g.to_production_output_vec(),
            "eps" => n.epsilon_free.to_production_output_vec(),
            "unit" => n.unit_free.to_production_output_vec(),
            "useless" => n.reduced.to_production_output_vec(),
            "cnf" => n.cnf.grammar.to_production_output_vec(),
            _ => continue,
        };
        println!("{}", render_productions(&t, &output_format)?);
    }

    let show_table = outputs.contains(&"cyk");
    let recognizer = n.cnf.recognizer().map_err(|e| e.to_string())?;
    for line in std::io::stdin().lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim() == "exit" {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let r = recognizer.recognize(&tokens);
        if show_table {
            let t = r.to_table_output(recognizer.grammar(), &tokens);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json().map_err(|e| e.to_string())?,
                }
            );
        } else {
            println!(
                "\"{}\" {}",
                tokens.join(" "),
                if r.accepted { "accepted" } else { "rejected" }
            );
        }
    }

    Ok(())
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
