use std::collections::VecDeque;
use std::io::{self, Write};

use console::Term;

use crate::error::{LibrisError, Result};

/// The session's terminal collaborator. The core never reads stdin or
/// writes to a display surface except through this trait.
pub trait Ui {
    /// Show `message` and read one line of input.
    fn prompt(&mut self, message: &str) -> Result<String>;

    fn display(&mut self, message: &str);

    fn clear(&mut self);
}

/// Real terminal implementation. Input comes from stdin so the binary also
/// works with piped input; clearing only happens on an actual terminal.
pub struct ConsoleUi {
    term: Term,
}

impl ConsoleUi {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Ui for ConsoleUi {
    fn prompt(&mut self, message: &str) -> Result<String> {
        print!("{}", message);
        io::stdout().flush()?;
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Err(LibrisError::Storage("input stream closed".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn display(&mut self, message: &str) {
        let _ = self.term.write_line(message);
    }

    fn clear(&mut self) {
        if self.term.is_term() {
            let _ = self.term.clear_screen();
        }
    }
}

/// Scripted UI for driving sessions without a terminal: answers prompts
/// from a queue and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    inputs: VecDeque<String>,
    pub shown: Vec<String>,
}

impl ScriptedUi {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    pub fn shown_text(&self) -> String {
        self.shown.join("\n")
    }
}

impl Ui for ScriptedUi {
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.shown.push(message.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| LibrisError::Storage("scripted input exhausted".to_string()))
    }

    fn display(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }

    fn clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_ui_replays_inputs_in_order() {
        let mut ui = ScriptedUi::new(["one", "two"]);
        assert_eq!(ui.prompt("> ").unwrap(), "one");
        assert_eq!(ui.prompt("> ").unwrap(), "two");
        assert!(ui.prompt("> ").is_err());
    }

    #[test]
    fn scripted_ui_records_output() {
        let mut ui = ScriptedUi::new(Vec::<String>::new());
        ui.display("hello");
        assert!(ui.shown_text().contains("hello"));
    }
}
