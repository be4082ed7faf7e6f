use crossterm::style::Stylize;
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use suggest_core::core::types::SuggestionKind;
use suggest_core::spellcheck::SpellCheckReport;
use suggest_core::{Dictionary, EngineConfig, SuggestionEngine, SuggestionResult};
use tracing::Level;

struct Args {
    dict: Option<PathBuf>,
    config: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args { dict: None, config: None, verbose: false };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--dict" => args.dict = Some(it.next().ok_or("--dict requires a path")?.into()),
            "--config" => args.config = Some(it.next().ok_or("--config requires a path")?.into()),
            "-v" | "--verbose" => args.verbose = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn build_engine(args: &Args) -> suggest_core::Result<SuggestionEngine> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let dictionary = match &args.dict {
        Some(path) => Dictionary::from_path(path)?,
        None => Dictionary::builtin(),
    };
    SuggestionEngine::from_dictionary(&dictionary, config)
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: suggest_engine [--dict PATH] [--config PATH] [-v]");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let engine = match build_engine(&args) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            std::process::exit(1);
        }
    };

    println!("Smart Suggest ({} words). Type a query, ':check <text>' to spell check, 'exit' to quit.", engine.word_count());
    println!("---------------------------------------------------------------");

    loop {
        print!("\n> ");
        if stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => continue,
            s if s.starts_with(":check ") => print_report(&engine.spell_checker().check_text(&s[7..])),
            query => print_suggestions(&engine, query),
        }
    }
}

fn print_suggestions(engine: &SuggestionEngine, query: &str) {
    let path = engine.trie().node_path(query.trim());
    println!(
        "Trie path: [{}] ({} nodes traversed, ~{} KB indexed)",
        path.path.iter().collect::<String>(),
        path.nodes_traversed,
        engine.trie().memory_usage() / 1024
    );

    let suggestions = engine.get_suggestions(query);
    if suggestions.is_empty() {
        println!("{}", "No suggestions found.".dark_grey());
        return;
    }
    for (i, s) in suggestions.iter().enumerate() {
        println!("  {}: {} {}", i + 1, s.word.clone().bold(), describe(s));
    }
}

fn describe(s: &SuggestionResult) -> String {
    let tag = match s.kind {
        SuggestionKind::Prefix => "prefix".green().to_string(),
        SuggestionKind::Correction => "correction".yellow().to_string(),
    };
    format!("[{tag}] freq {} score {:.1}", s.frequency, s.score)
}

fn print_report(report: &SpellCheckReport) {
    println!("{} words, {} misspelled", report.total_words, report.errors_found);
    for result in report.results.iter().filter(|r| !r.is_correct) {
        let fixes: Vec<String> = result
            .suggestions
            .iter()
            .map(|c| format!("{} ({}, {:?})", c.word, c.distance, c.confidence))
            .collect();
        let fixes = if fixes.is_empty() { "no suggestions".to_string() } else { fixes.join(", ") };
        println!("  {} -> {}", result.word.clone().red(), fixes);
    }
}
