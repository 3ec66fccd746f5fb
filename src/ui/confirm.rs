//! User confirmation prompts for destructive operations

use std::io::{self, BufRead, Write};

/// Ask the user to confirm an action on stdin
///
/// Returns `true` only for an explicit yes. In batch mode, always returns
/// `false` (fails safe) and tells the user how to skip the prompt.
pub fn confirm_action(prompt: &str, batch_mode: bool) -> bool {
    if batch_mode {
        eprintln!("{} Refusing without --yes in batch mode.", prompt);
        return false;
    }

    eprint!("\x1b[1;33m{} [y/N]:\x1b[0m ", prompt);
    io::stderr().flush().ok();

    read_answer(io::stdin().lock())
}

fn read_answer(mut input: impl BufRead) -> bool {
    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return false;
    }

    let answer = line.trim().to_lowercase();
    matches!(answer.as_str(), "y" | "yes")
}
