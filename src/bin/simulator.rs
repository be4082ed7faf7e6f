// Line-protocol driver for the suggestion engine, for UI front ends and scripts.
//
// Commands (one per line on stdin), each answered by one JSON line on stdout:
//   SUGGEST <query>     ranked suggestions
//   COMPLETE <prefix>   prefix completions only
//   CHECK <text>        spell-check report
//   DISTANCE <a> <b>    Levenshtein distance, similarity and DP table
//   EXIT
//
// An optional first argument names a JSON dictionary file.

use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::path::Path;
use suggest_core::fuzzy::distance::{levenshtein, levenshtein_matrix, similarity};
use suggest_core::{Dictionary, EngineConfig, SuggestionEngine};
use tracing::{debug, info, warn};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let engine = match std::env::args().nth(1) {
        Some(path) => {
            let built = Dictionary::from_path(Path::new(&path))
                .and_then(|dict| SuggestionEngine::from_dictionary(&dict, EngineConfig::default()));
            match built {
                Ok(engine) => engine,
                Err(e) => {
                    warn!(error = %e, "falling back to the built-in dictionary");
                    SuggestionEngine::with_builtin_dictionary()
                }
            }
        }
        None => SuggestionEngine::with_builtin_dictionary(),
    };
    info!(words = engine.word_count(), "simulator ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        debug!(input = %input, "command received");
        let (command, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));

        let response = match command {
            "SUGGEST" => json!({ "suggestions": engine.get_suggestions(rest) }),
            "COMPLETE" => json!({ "completions": engine.complete(rest) }),
            "CHECK" => json!(engine.spell_checker().check_text(rest)),
            "DISTANCE" => distance_response(rest),
            "EXIT" => break,
            other => json!({ "error": format!("unknown command: {other}") }),
        };

        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }
    info!("simulator shutting down");
    Ok(())
}

fn distance_response(args: &str) -> Value {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(a), Some(b)) => json!({
            "distance": levenshtein(a, b),
            "similarity": similarity(a, b),
            "matrix": levenshtein_matrix(a, b),
        }),
        _ => json!({ "error": "DISTANCE needs two words" }),
    }
}
