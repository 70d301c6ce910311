//! Interactive REPL and non-interactive entry point for the calculator.
//!
//! Launches an interactive session with line editing (via rustyline),
//! persistent history, multi-line input via paren-counting, session commands,
//! and robust error recovery (parse errors, eval errors, and caught panics
//! never crash the loop). Also supports `-c EXPR` and `FILE` non-interactive
//! modes for scripting.

use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, EditMode, Editor};

use ca_cli::commands::{execute_command, parse_command, CommandResult};
use ca_cli::environment::Environment;
use ca_cli::repl::ReplHelper;
use ca_cli::script::{execute_file, execute_source, ScriptResult};

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

/// Print the welcome banner with version and hint.
fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "ca v{} -- an exact computable-number calculator\nType 'help' for commands, 'quit' to exit.",
        version
    );
}

// ---------------------------------------------------------------------------
// History file
// ---------------------------------------------------------------------------

/// Compute the history file path (next to the executable).
fn history_file_path() -> std::path::PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".ca_history")
}

// ---------------------------------------------------------------------------
// CLI argument handling
// ---------------------------------------------------------------------------

enum Mode {
    Repl,
    Expr(String),
    File(String),
}

fn parse_args() -> Result<Mode, String> {
    let mut args = std::env::args().skip(1);
    match args.next() {
        None => Ok(Mode::Repl),
        Some(flag) if flag == "-c" => match args.next() {
            Some(expr) => Ok(Mode::Expr(expr)),
            None => Err("-c requires an expression argument".to_string()),
        },
        Some(path) => Ok(Mode::File(path)),
    }
}

fn run_non_interactive(result: ScriptResult) -> ! {
    if let Some(msg) = result.error_message() {
        eprintln!("{}", msg);
    }
    std::process::exit(result.exit_code() as i32);
}

// ---------------------------------------------------------------------------
// Main REPL loop
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let mode = match parse_args() {
        Ok(mode) => mode,
        Err(msg) => {
            eprintln!("usage: ca [-c EXPR | FILE]\n{}", msg);
            std::process::exit(ca_cli::script::EXIT_USAGE as i32);
        }
    };

    match mode {
        Mode::Expr(expr) => {
            let mut env = Environment::new();
            run_non_interactive(execute_source(&expr, &mut env, false));
        }
        Mode::File(path) => {
            let mut env = Environment::new();
            run_non_interactive(execute_file(&path, &mut env, false));
        }
        Mode::Repl => run_repl(),
    }
}

fn run_repl() {
    print_banner();

    let config = Config::builder()
        .completion_type(CompletionType::Circular)
        .edit_mode(EditMode::Emacs)
        .auto_add_history(true)
        .max_history_size(10_000)
        .expect("valid max_history_size")
        .build();

    let helper = ReplHelper::new();
    let mut rl: Editor<ReplHelper, DefaultHistory> =
        Editor::with_config(config).expect("failed to create editor");
    rl.set_helper(Some(helper));

    let history_path = history_file_path();
    let _ = rl.load_history(&history_path);

    let mut env = Environment::new();

    loop {
        match rl.readline("ca> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                // Command dispatch (before parser)
                if let Some(cmd) = parse_command(trimmed) {
                    match execute_command(cmd, &mut env) {
                        CommandResult::Continue => continue,
                        CommandResult::Quit => break,
                        CommandResult::Output(text) => {
                            println!("{}", text);
                            continue;
                        }
                    }
                }

                // Parse and evaluate
                match ca_cli::parser::parse(trimmed) {
                    Ok(stmts) => {
                        for stmt in &stmts {
                            match ca_cli::eval::eval_stmt_safe(stmt, &mut env) {
                                Ok(Some(val)) => {
                                    println!("{}", ca_cli::format::format_value(&env.ctx, &val));
                                }
                                Ok(None) => {} // colon-suppressed or empty
                                Err(e) => eprintln!("{}", e),
                            }
                        }
                    }
                    Err(e) => eprintln!("{}", e.render(trimmed)),
                }

                if let Some(helper) = rl.helper_mut() {
                    helper.update_var_names(env.variables.keys().cloned().collect());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: cancel current line, continue loop
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D: exit cleanly
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history on exit
    let _ = rl.save_history(&history_path);
}
