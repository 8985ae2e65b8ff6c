use anyhow::Result;
use clap::Parser as Clap;
use rlox::{
    parser::Parser,
    report::{DiagnosticSink, Diagnostics},
    scanner,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

#[derive(Clap)]
#[command(version, about = "Scanner and expression parser for the Lox language")]
struct Opts {
    /// Script to run; starts an interactive session when omitted
    script: Option<PathBuf>,
    #[arg(short, long, help = "Show the scanned token stream")]
    tokens: bool,
    #[arg(short, long, help = "Pretty-print the parsed syntax tree")]
    ast: bool,
}

fn main() -> Result<()> {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(error) => {
            error.print()?;
            process::exit(if error.use_stderr() { 64 } else { 0 });
        }
    };
    match &opts.script {
        Some(path) => run_file(path, &opts),
        None => run_prompt(&opts),
    }
}

fn run_file(path: &Path, opts: &Opts) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let mut diagnostics = Diagnostics::new();
    run(&source, opts, &mut diagnostics);
    report_all(&diagnostics);
    if diagnostics.had_error() {
        process::exit(65);
    }
    Ok(())
}

fn run_prompt(opts: &Opts) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut diagnostics = Diagnostics::new();
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    break;
                }
                let _ = editor.add_history_entry(line.as_str());
                run(&line, opts, &mut diagnostics);
                report_all(&diagnostics);
                diagnostics.clear();
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        }
    }
    Ok(())
}

fn run(source: &str, opts: &Opts, diagnostics: &mut Diagnostics) {
    let tokens = scanner::scan(source, diagnostics);
    if opts.tokens {
        for token in &tokens {
            println!("{token}");
        }
    }
    let mut parser = Parser::new(&tokens);
    match parser.parse() {
        Ok(expression) => {
            if opts.ast {
                println!("{expression:#?}");
            } else {
                println!("{expression:?}");
            }
        }
        Err(error) => diagnostics.report(error.line(), error.context(), error.message()),
    }
}

fn report_all(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.entries() {
        eprintln!("{diagnostic}");
    }
}
