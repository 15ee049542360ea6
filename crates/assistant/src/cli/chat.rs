//! `lighthouse-assistant chat`: interactive REPL.
//!
//! Opens a readline-based loop that sends each line to the assistant and
//! prints the answer. Slash-commands manage the loaded reports and the
//! sampling temperature.

use std::path::{Path, PathBuf};

use lh_domain::config::Config;
use lh_providers::ProviderRegistry;

use crate::runtime::Assistant;
use crate::session::{ChatSession, LoadOutcome};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Public entry point
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Run the interactive chat REPL.
pub async fn chat(
    config: &Config,
    report_files: &[PathBuf],
    temperature: Option<f32>,
) -> anyhow::Result<()> {
    let registry = ProviderRegistry::from_config(&config.llm);
    let assistant = Assistant::from_config(config, &registry);
    let mut session = ChatSession::new(temperature.unwrap_or(config.chat.temperature));

    for file in report_files {
        load_report(&mut session, file);
    }

    let history_path = history_path();
    let mut rl = rustyline::DefaultEditor::new()?;
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    // Banner on stderr; stdout carries only answers.
    eprintln!("Lighthouse Assistant");
    eprintln!(
        "{} report(s) loaded  |  temperature {:.1}  |  Type /help for commands, Ctrl+D to exit",
        session.reports.len(),
        session.temperature()
    );
    eprintln!();

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(&line).ok();

                if trimmed.starts_with('/') {
                    if handle_slash_command(trimmed, &mut session) {
                        break;
                    }
                    continue;
                }

                ask(&assistant, &mut session, trimmed).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                eprintln!("(Use Ctrl+D or /exit to quit)");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                break;
            }
            Err(e) => {
                eprintln!("\x1B[31mreadline error: {e}\x1B[0m");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        rl.save_history(path).ok();
    }

    eprintln!("Goodbye!");
    Ok(())
}

fn history_path() -> Option<PathBuf> {
    history_file_under(dirs::home_dir())
}

/// `<home>/.lighthouse-assistant/chat_history.txt`, creating the directory.
/// Without a home directory there is no history file at all.
fn history_file_under(home: Option<PathBuf>) -> Option<PathBuf> {
    let dir = home?.join(".lighthouse-assistant");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::debug!(error = %e, dir = %dir.display(), "chat history disabled");
        return None;
    }
    Some(dir.join("chat_history.txt"))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Slash command handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Process a slash command. Returns `true` if the REPL should exit.
fn handle_slash_command(input: &str, session: &mut ChatSession) -> bool {
    let (cmd, arg) = match input.split_once(' ') {
        Some((cmd, arg)) => (cmd, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (input, None),
    };

    match cmd {
        "/exit" | "/quit" => return true,

        "/load" => match arg {
            Some(path) => load_report(session, Path::new(path)),
            None => eprintln!("Usage: /load <file.json>"),
        },

        "/remove" => match arg {
            Some(name) if session.remove(name) => print_last_note(session),
            Some(name) => eprintln!("No report named {name}  (see /reports)"),
            None => eprintln!("Usage: /remove <name>"),
        },

        "/reports" => {
            if session.reports.is_empty() {
                eprintln!("No reports loaded");
            }
            for loaded in session.reports.iter() {
                let status = match &loaded.summary {
                    Some(s) if !s.degraded => "summarized",
                    Some(_) => "fallback, will retry",
                    None => "pending",
                };
                eprintln!(
                    "  {}  (Lighthouse {}, {}; {status})",
                    loaded.name,
                    loaded.validated.lighthouse_version,
                    loaded.validated.available.join(", ")
                );
            }
        }

        "/temperature" => match arg.map(str::parse::<f32>) {
            Some(Ok(t)) => {
                let set = session.set_temperature(t);
                eprintln!("Temperature set to {set:.1}");
            }
            Some(Err(_)) => eprintln!("Not a number. Usage: /temperature <0.0-2.0>"),
            None => {
                eprintln!("Current temperature: {:.1}", session.temperature());
                eprintln!("Usage: /temperature <0.0-2.0>");
            }
        },

        "/clear" => {
            // ANSI escape: clear screen and move cursor to top-left.
            eprint!("\x1B[2J\x1B[1;1H");
        }

        "/help" => {
            eprintln!("Commands:");
            eprintln!("  /load <file>        Load a Lighthouse JSON report");
            eprintln!("  /remove <name>      Unload a report");
            eprintln!("  /reports            List loaded reports");
            eprintln!("  /temperature <t>    Set the answer temperature (0.0 - 2.0)");
            eprintln!("  /clear              Clear the screen");
            eprintln!("  /exit, /quit        Exit the chat");
            eprintln!("  /help               Show this help");
        }

        other => {
            eprintln!("Unknown command: {other}  (type /help for a list)");
        }
    }

    false
}

fn load_report(session: &mut ChatSession, path: &Path) {
    match session.load_file(path) {
        Ok(LoadOutcome::Loaded) => print_last_note(session),
        Ok(LoadOutcome::AlreadyLoaded) => {
            eprintln!("Already loaded: {}", path.display());
        }
        Err(e) => eprintln!("\x1B[31merror loading {}: {e}\x1B[0m", path.display()),
    }
}

fn print_last_note(session: &ChatSession) {
    if let Some(note) = session.history().last() {
        println!("{}\n", note.content);
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Question answering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Record the question, answer it, and record the answer. A failed call
/// is answered with an apology so the conversation stays in step.
async fn ask(assistant: &Assistant, session: &mut ChatSession, question: &str) {
    session.push_user(question);

    if session.reports.iter().any(|r| r.needs_summary()) {
        eprintln!("\x1B[2m(summarizing reports...)\x1B[0m");
        assistant.summarize_missing(&mut session.reports).await;
    }

    let reply = match assistant
        .respond(session.history(), &session.reports, session.temperature())
        .await
    {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(error = %e, "answer failed");
            format!("Sorry, an error occurred while processing your request: {e}")
        }
    };

    println!("{reply}\n");
    session.push_assistant(reply);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_home_means_no_history_file() {
        assert_eq!(history_file_under(None), None);
    }

    #[test]
    fn history_lives_under_home() {
        let home = tempfile::tempdir().unwrap();
        let path = history_file_under(Some(home.path().to_path_buf())).unwrap();
        assert_eq!(
            path,
            home.path().join(".lighthouse-assistant").join("chat_history.txt")
        );
        assert!(home.path().join(".lighthouse-assistant").is_dir());
    }
}
