//! Interactive console loop.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use vita_ai::prompt::WELCOME_MESSAGE;
use vita_ai::{ChatEngine, ChatError, ChatObserver, ErrorKind, Role};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Message(String),
    /// Start a new conversation.
    New,
    /// Resubmit the last failed message.
    Retry,
    History,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(name) = line.strip_prefix('/') else {
            return Command::Message(line.to_string());
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "new" | "reset" => Command::New,
            "retry" => Command::Retry,
            "history" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

const HELP: &str = "\
Commands:
  /new      start a new conversation
  /retry    resend the last message that failed
  /history  show this conversation
  /help     show this help
  /quit     exit";

/// Renders one exchange: reply text to `out`, status to `err`.
pub struct ConsoleObserver<O, E> {
    out: O,
    err: E,
    /// A transient status line is on screen and must be cleared.
    status_shown: bool,
}

impl<O: Write + Send, E: Write + Send> ConsoleObserver<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            status_shown: false,
        }
    }

    fn status(&mut self, text: &str) {
        let _ = write!(self.err, "\r\x1b[2K{text}");
        let _ = self.err.flush();
        self.status_shown = true;
    }

    fn clear_status(&mut self) {
        if self.status_shown {
            let _ = write!(self.err, "\r\x1b[2K");
            let _ = self.err.flush();
            self.status_shown = false;
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write + Send, E: Write + Send> ChatObserver for ConsoleObserver<O, E> {
    fn on_chunk(&mut self, text: &str) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn on_thinking_start(&mut self) {
        self.status("Thinking...");
    }

    fn on_thinking_end(&mut self) {
        self.clear_status();
    }

    fn on_complete(&mut self) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }

    fn on_error(&mut self, kind: ErrorKind) {
        self.clear_status();
        let _ = writeln!(self.err);
        let _ = writeln!(self.err, "{}: {}", kind.title(), kind.description());
        let _ = writeln!(self.err, "Type /retry to try again.");
        let _ = writeln!(self.err);
        let _ = self.err.flush();
    }

    fn on_retry_wait(&mut self, seconds_remaining: u64) {
        if seconds_remaining == 0 {
            self.status("Retrying...");
        } else {
            self.status(&format!("Rate limited. Retrying in {seconds_remaining}s..."));
        }
    }
}

fn print_history(engine: &ChatEngine) {
    let history = engine.history();
    if history.is_empty() {
        println!("(no messages yet)\n");
        return;
    }
    for turn in history {
        let speaker = match turn.role {
            Role::User => "You",
            Role::Assistant => "Vita",
            Role::System => continue,
        };
        println!("{speaker}: {}\n", turn.content);
    }
}

async fn exchange(engine: &ChatEngine, text: &str) {
    let mut observer = ConsoleObserver::new(std::io::stdout(), std::io::stderr());
    match engine.submit(text, &mut observer).await {
        Ok(outcome) => debug!(success = outcome.is_success(), "Exchange finished"),
        Err(ChatError::EmptyMessage) => {}
        Err(e) => eprintln!("{e}"),
    }
}

/// Read commands from stdin until `/quit` or end of input.
pub async fn run(engine: ChatEngine) -> std::io::Result<()> {
    println!("{WELCOME_MESSAGE}\n");
    println!("Type /help for commands.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Message(text) => exchange(&engine, &text).await,
            Command::New => {
                engine.reset();
                println!("Started a new conversation.\n");
            }
            Command::Retry => match engine.last_failed() {
                Some(text) => {
                    println!("Retrying: {text}\n");
                    exchange(&engine, &text).await;
                }
                None => println!("Nothing to retry.\n"),
            },
            Command::History => print_history(&engine),
            Command::Help => println!("{HELP}\n"),
            Command::Quit => break,
            Command::Unknown(name) => println!("Unknown command /{name}. Type /help.\n"),
        }
    }

    info!("Session ended");
    Ok(())
}
