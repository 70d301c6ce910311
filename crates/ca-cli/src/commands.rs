//! Session commands for the calculator REPL.
//!
//! Handles built-in commands (`quit`, `exit`, `clear`, `set precision`,
//! `help`) that are intercepted before the expression parser. Only bare
//! command patterns are matched -- lines containing `:=` or function-call
//! syntax fall through to the parser.

use crate::environment::Environment;
use crate::help;

/// A parsed REPL command (distinct from an expression).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Display help, optionally for a specific topic.
    Help(Option<String>),
    /// Set the interval oracle's working precision, in bits.
    SetPrecision(i64),
    /// Clear all variables and reset session state.
    Clear,
    /// Exit the REPL.
    Quit,
}

/// The result of executing a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// No output, continue the REPL loop.
    Continue,
    /// Exit the REPL.
    Quit,
    /// Print this string and continue the REPL loop.
    Output(String),
}

/// Try to parse the input line as a built-in command.
///
/// Returns `Some(Command)` if the line matches a command pattern, or `None`
/// if it should be passed to the expression parser.
///
/// **Anti-pattern avoidance:** Lines containing `:=` (assignment) are never
/// treated as commands. Lines where a command keyword is followed by `(` are
/// assumed to be function calls and passed to the parser.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();

    if trimmed.contains(":=") {
        return None;
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let first = words[0].to_lowercase();

    match first.as_str() {
        "quit" | "exit" => {
            if words.len() == 1 {
                Some(Command::Quit)
            } else {
                None
            }
        }
        "clear" => {
            if words.len() == 1 && !trimmed.contains('(') {
                Some(Command::Clear)
            } else {
                None
            }
        }
        "help" => {
            if trimmed.contains('(') {
                return None;
            }
            if words.len() == 1 {
                Some(Command::Help(None))
            } else if words.len() == 2 {
                Some(Command::Help(Some(words[1].to_string())))
            } else {
                None
            }
        }
        "set" => {
            if words.len() >= 2 && words[1].to_lowercase() == "precision" {
                if words.len() == 3 {
                    match words[2].parse::<i64>() {
                        Ok(n) => Some(Command::SetPrecision(n)),
                        Err(_) => Some(Command::SetPrecision(-1)), // signal error
                    }
                } else if words.len() == 2 {
                    Some(Command::SetPrecision(-1))
                } else {
                    None
                }
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Execute a parsed command, modifying the environment as needed.
pub fn execute_command(cmd: Command, env: &mut Environment) -> CommandResult {
    match cmd {
        Command::Quit => CommandResult::Quit,
        Command::Clear => {
            env.clear();
            CommandResult::Output("Session cleared.".to_string())
        }
        Command::SetPrecision(n) if n > 0 => {
            env.ctx.options_mut().prec_limit = n as u32;
            CommandResult::Output(format!("Precision ceiling set to {} bits.", n))
        }
        Command::SetPrecision(_) => {
            CommandResult::Output("Error: precision must be a positive integer. Usage: set precision N".to_string())
        }
        Command::Help(None) => CommandResult::Output(help::general_help()),
        Command::Help(Some(topic)) => match help::function_help(&topic) {
            Some(text) => CommandResult::Output(text),
            None => CommandResult::Output(format!("Unknown function '{}'. Type 'help' for a list of available functions.", topic)),
        },
    }
}
