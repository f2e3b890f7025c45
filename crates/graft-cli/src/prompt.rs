//! Terminal implementations of the [`Prompter`] port.
//!
//! With the `interactive` feature and a real terminal, questions are asked
//! with `dialoguer` widgets. Otherwise answers are read line by line from
//! stdin, which keeps `graft` scriptable (`printf 'n\n' | graft init demo`).

use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::sync::Mutex;

use tracing::debug;

use graft_core::{
    application::{ApplicationError, ports::Prompter},
    error::{GraftError, GraftResult},
};

/// Pick the prompter for this process.
pub fn terminal_prompter() -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    {
        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            debug!("Using interactive prompts");
            return Box::new(interactive::DialoguerPrompter);
        }
    }

    debug!("Reading answers from stdin");
    Box::new(LinePrompter::stdio())
}

fn prompt_failed(reason: impl ToString) -> GraftError {
    ApplicationError::PromptFailed {
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use super::prompt_failed;
    use graft_core::{application::ports::Prompter, error::GraftResult};

    /// Arrow-key widgets on stderr.
    pub struct DialoguerPrompter;

    impl Prompter for DialoguerPrompter {
        fn select(&self, prompt: &str, choices: &[String]) -> GraftResult<usize> {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(choices)
                .default(0)
                .interact()
                .map_err(prompt_failed)
        }

        fn confirm(&self, prompt: &str, default: bool) -> GraftResult<bool> {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(default)
                .interact()
                .map_err(prompt_failed)
        }

        fn input(&self, prompt: &str, default: &str) -> GraftResult<String> {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(default.to_string())
                .show_default(!default.is_empty())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_failed)
        }
    }
}

/// Line-oriented prompter for pipes and dumb terminals.
///
/// Questions go to the writer, answers come one per line from the reader.
/// End of input takes the default where there is one.
pub struct LinePrompter {
    io: Mutex<LineIo>,
}

struct LineIo {
    reader: Box<dyn BufRead + Send>,
    writer: Box<dyn Write + Send>,
}

impl LinePrompter {
    pub fn new(reader: impl BufRead + Send + 'static, writer: impl Write + Send + 'static) -> Self {
        Self {
            io: Mutex::new(LineIo {
                reader: Box::new(reader),
                writer: Box::new(writer),
            }),
        }
    }

    /// Read from stdin, ask on stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }

    /// Print `question` and read one trimmed line. `None` at end of input.
    fn ask(&self, question: &str) -> GraftResult<Option<String>> {
        let mut io = self
            .io
            .lock()
            .map_err(|_| prompt_failed("prompt stream lock poisoned"))?;

        write!(io.writer, "{question}").map_err(prompt_failed)?;
        io.writer.flush().map_err(prompt_failed)?;

        let mut line = String::new();
        let read = io.reader.read_line(&mut line).map_err(prompt_failed)?;
        if read == 0 {
            // Keep the next message off the question line.
            writeln!(io.writer).map_err(prompt_failed)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&self, text: &str) -> GraftResult<()> {
        let mut io = self
            .io
            .lock()
            .map_err(|_| prompt_failed("prompt stream lock poisoned"))?;
        writeln!(io.writer, "{text}").map_err(prompt_failed)
    }
}

impl Prompter for LinePrompter {
    fn select(&self, prompt: &str, choices: &[String]) -> GraftResult<usize> {
        self.say(prompt)?;
        for (i, choice) in choices.iter().enumerate() {
            self.say(&format!("  {}) {choice}", i + 1))?;
        }

        loop {
            let Some(answer) = self.ask("Enter a number or name [1]: ")? else {
                return Err(prompt_failed(format!("no answer for '{prompt}'")));
            };

            if answer.is_empty() {
                return Ok(0);
            }
            if let Ok(n) = answer.parse::<usize>() {
                if (1..=choices.len()).contains(&n) {
                    return Ok(n - 1);
                }
            }
            if let Some(index) = choices.iter().position(|c| *c == answer) {
                return Ok(index);
            }

            self.say(&format!("'{answer}' is not one of the choices"))?;
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> GraftResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };

        loop {
            let Some(answer) = self.ask(&format!("{prompt} {hint} "))? else {
                return Ok(default);
            };

            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n")?,
            }
        }
    }

    fn input(&self, prompt: &str, default: &str) -> GraftResult<String> {
        let question = if default.is_empty() {
            format!("{prompt}: ")
        } else {
            format!("{prompt} ({default}): ")
        };

        Ok(match self.ask(&question)? {
            Some(answer) if !answer.is_empty() => answer,
            _ => default.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter {
        LinePrompter::new(Cursor::new(input.to_string()), io::sink())
    }

    fn choices() -> Vec<String> {
        ["none", "antd", "mui"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_by_number() {
        assert_eq!(prompter("2\n").select("UI", &choices()).unwrap(), 1);
    }

    #[test]
    fn select_by_name() {
        assert_eq!(prompter("mui\n").select("UI", &choices()).unwrap(), 2);
    }

    #[test]
    fn select_empty_answer_takes_first() {
        assert_eq!(prompter("\n").select("UI", &choices()).unwrap(), 0);
    }

    #[test]
    fn select_reasks_after_bad_answer() {
        assert_eq!(
            prompter("7\nbootstrap\nantd\n")
                .select("UI", &choices())
                .unwrap(),
            1
        );
    }

    #[test]
    fn select_at_end_of_input_fails() {
        let err = prompter("").select("UI", &choices()).unwrap_err();
        assert!(matches!(
            err,
            GraftError::Application(ApplicationError::PromptFailed { .. })
        ));
    }

    #[test]
    fn confirm_answers() {
        assert!(prompter("y\n").confirm("Overwrite?", false).unwrap());
        assert!(prompter("YES\n").confirm("Overwrite?", false).unwrap());
        assert!(!prompter("n\n").confirm("Overwrite?", true).unwrap());
        assert!(prompter("maybe\ny\n").confirm("Overwrite?", false).unwrap());
    }

    #[test]
    fn confirm_defaults_on_empty_or_eof() {
        assert!(!prompter("\n").confirm("Overwrite?", false).unwrap());
        assert!(prompter("").confirm("Overwrite?", true).unwrap());
    }

    #[test]
    fn input_uses_default_when_blank() {
        assert_eq!(prompter("\n").input("Version", "1.0.0").unwrap(), "1.0.0");
        assert_eq!(prompter("").input("Author", "").unwrap(), "");
        assert_eq!(prompter("2.0.0\n").input("Version", "1.0.0").unwrap(), "2.0.0");
    }

    #[test]
    fn questions_are_written_to_the_writer() {
        let out = std::sync::Arc::new(Mutex::new(Vec::new()));
        struct Shared(std::sync::Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let p = LinePrompter::new(Cursor::new("1\n".to_string()), Shared(out.clone()));
        p.select("Select a UI library", &choices()).unwrap();

        let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        assert!(text.contains("Select a UI library"));
        assert!(text.contains("  3) mui"));
    }
}
