use anyhow::Result;
use std::{fmt, fmt::Display, io::Write, str::FromStr};
use tokio::sync::mpsc;

/// The user left a prompt with `exit`/`quit`, or input was closed.
#[derive(Debug)]
pub struct Aborted;

impl Display for Aborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aborted")
    }
}

impl std::error::Error for Aborted {}

/// Whether an error chain was caused by the user aborting a prompt.
pub fn is_aborted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<Aborted>())
}

/// A stdin scanner to collect user input on command line.
pub struct Scanner {
    rx: mpsc::Receiver<String>,
}

impl Scanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut line_buf = String::new();
            // Stop on EOF so the receiver observes a closed channel.
            while let Ok(n) = stdin.read_line(&mut line_buf) {
                if n == 0 {
                    break;
                }
                let line = line_buf.trim().to_string();
                line_buf.clear();
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Create a scanner which answers prompts from the given lines.
    #[cfg(test)]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            let _ = tx.try_send(line);
        }
        Self { rx }
    }

    /// Prompt the user for an answer and collect it.
    pub async fn prompt(
        &mut self,
        prompt: impl Display,
        type_hint: impl Display,
    ) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(format!("{} ~ ({}) > ", prompt, type_hint).as_bytes())?;
        stdout.flush()?;

        match self.rx.recv().await {
            Some(line) => match line.to_lowercase().trim() {
                "exit" | "quit" => Err(Aborted.into()),
                "" => Ok(None),
                _ => Ok(Some(line.trim().to_owned())),
            },
            None => Err(Aborted.into()),
        }
    }

    /// Prompt the user for a yes (true) or no (false).
    pub async fn prompt_yes_or_no(
        &mut self,
        prompt: impl Display,
        type_hint: impl Display,
    ) -> Result<Option<bool>> {
        let answer = loop {
            match self.prompt(&prompt, &type_hint).await? {
                Some(input) => match input.to_lowercase().as_str() {
                    "y" | "yes" => break Some(true),
                    "n" | "no" => break Some(false),
                    _ => {
                        println!(
                            "Error parsing input. Expected 'yes' or 'no'. Try again."
                        );
                        continue;
                    }
                },
                None => break None,
            }
        };
        Ok(answer)
    }

    /// Prompt the user for a type and collect it.
    pub async fn prompt_t<T>(
        &mut self,
        prompt: impl Display,
        type_hint: impl Display,
    ) -> Result<Option<T>>
    where
        T: FromStr,
    {
        let t = loop {
            match self.prompt(&prompt, &type_hint).await? {
                Some(input) => match input.parse::<T>() {
                    Ok(t) => break Some(t),
                    _ => {
                        println!(
                            "Error parsing input. Expected '{}'. Try again.",
                            std::any::type_name::<T>()
                        );
                        continue;
                    }
                },
                None => break None,
            }
        };
        Ok(t)
    }

    /// Prompt the user to pick one of `len` numbered entries.
    ///
    /// Returns the 0-based position, or `None` if the answer was empty or
    /// out of range.
    pub async fn prompt_choice(
        &mut self,
        prompt: impl Display,
        len: usize,
    ) -> Result<Option<usize>> {
        let choice = self
            .prompt_t::<usize>(prompt, format!("1-{}", len))
            .await?;
        Ok(choice.filter(|c| *c > 0 && *c <= len).map(|c| c - 1))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scanner {
    /// Close communication and drop the scanner, which may result in lost
    /// messages.
    fn drop(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_trims_and_empties() {
        let mut scanner = Scanner::from_lines(["  hello ", ""]);
        assert_eq!(
            scanner.prompt("Say", "text").await.unwrap().as_deref(),
            Some("hello")
        );
        assert_eq!(scanner.prompt("Say", "text").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prompt_exit_aborts() {
        let mut scanner = Scanner::from_lines(["QUIT"]);
        let err = scanner.prompt("Say", "text").await.unwrap_err();
        assert!(is_aborted(&err));
    }

    #[tokio::test]
    async fn test_closed_input_aborts() {
        let mut scanner = Scanner::from_lines(Vec::<String>::new());
        let err = scanner.prompt("Say", "text").await.unwrap_err();
        assert!(is_aborted(&err.context("choosing account")));
    }

    #[tokio::test]
    async fn test_yes_or_no_retries() {
        let mut scanner = Scanner::from_lines(["maybe", "Y"]);
        assert_eq!(
            scanner.prompt_yes_or_no("Ok?", "y/n").await.unwrap(),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_prompt_choice_bounds() {
        let mut scanner = Scanner::from_lines(["abc", "2", "9"]);
        assert_eq!(scanner.prompt_choice("Pick", 3).await.unwrap(), Some(1));
        assert_eq!(scanner.prompt_choice("Pick", 3).await.unwrap(), None);
    }
}
