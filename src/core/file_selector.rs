use crate::core::progress::ProgressBar;
use crate::domain::errors::{CopierError, CopierResult};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use globset::GlobBuilder;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionState {
    Prompting,
    MatchingPattern,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    Pattern,
    Quit,
    Invalid,
}

fn parse_answer(line: &str) -> Answer {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" => Answer::Yes,
        "n" => Answer::No,
        "p" => Answer::Pattern,
        "q" => Answer::Quit,
        _ => Answer::Invalid,
    }
}

/// Returns the entries of `remaining` matching `pattern`, in slice order.
pub fn match_pattern<'a, I>(pattern: &str, remaining: I) -> Result<Vec<&'a String>, globset::Error>
where
    I: IntoIterator<Item = &'a String>,
{
    let matcher = GlobBuilder::new(pattern.trim())
        .literal_separator(true)
        .build()?
        .compile_matcher();

    Ok(remaining
        .into_iter()
        .filter(|candidate| matcher.is_match(candidate.as_str()))
        .collect())
}

/// Walks the candidates one at a time and asks which ones to keep.
///
/// The selector owns the prompt streams; `run` consumes it so both handles are
/// released as soon as the selection is complete.
pub struct FileSelector<R, W> {
    input: R,
    output: W,
    progress: ProgressBar,
}

impl<R: BufRead, W: Write> FileSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            progress: ProgressBar::default(),
        }
    }

    pub fn run(mut self, candidates: &[String]) -> CopierResult<Vec<String>> {
        let total = candidates.len();
        debug!("Selecting from {} candidate files", total);

        let mut selection: Vec<String> = Vec::new();
        let mut selected: HashSet<&str> = HashSet::new();
        let mut cursor = 0;
        let mut state = SelectionState::Prompting;

        while state != SelectionState::Done {
            state = match state {
                SelectionState::Prompting => {
                    // Already taken by an earlier pattern batch.
                    while cursor < total && selected.contains(candidates[cursor].as_str()) {
                        cursor += 1;
                    }
                    if cursor == total {
                        SelectionState::Done
                    } else {
                        let candidate = &candidates[cursor];
                        self.prompt(cursor + 1, total, candidate)?;

                        match self.read_line()?.map(|line| parse_answer(&line)) {
                            None => {
                                warn!("Input closed, finishing selection");
                                SelectionState::Done
                            }
                            Some(Answer::Yes) => {
                                debug!("Selected {}", candidate);
                                selected.insert(candidate.as_str());
                                selection.push(candidate.clone());
                                cursor += 1;
                                SelectionState::Prompting
                            }
                            Some(Answer::No) => {
                                cursor += 1;
                                SelectionState::Prompting
                            }
                            Some(Answer::Pattern) => SelectionState::MatchingPattern,
                            Some(Answer::Quit) => SelectionState::Done,
                            Some(Answer::Invalid) => {
                                self.notice(
                                    Color::Red,
                                    "Invalid input. Please enter y, n, p, or q.",
                                )?;
                                SelectionState::Prompting
                            }
                        }
                    }
                }
                SelectionState::MatchingPattern => {
                    self.write_colored(Color::Cyan, "Enter glob pattern: ")?;

                    match self.read_line()? {
                        None => {
                            warn!("Input closed, finishing selection");
                            SelectionState::Done
                        }
                        Some(pattern) => {
                            let remaining = candidates[cursor..]
                                .iter()
                                .filter(|candidate| !selected.contains(candidate.as_str()));

                            match match_pattern(&pattern, remaining) {
                                Ok(matches) => {
                                    let count = matches.len();
                                    cursor += count;
                                    for candidate in matches {
                                        selected.insert(candidate.as_str());
                                        selection.push(candidate.clone());
                                    }
                                    info!("Pattern '{}' matched {} files", pattern, count);
                                    self.notice(
                                        Color::Green,
                                        &format!("Added {} file(s) matching '{}'", count, pattern),
                                    )?;
                                }
                                Err(e) => {
                                    self.notice(
                                        Color::Red,
                                        &format!("Invalid pattern '{}': {}", pattern, e),
                                    )?;
                                }
                            }
                            SelectionState::Prompting
                        }
                    }
                }
                SelectionState::Done => SelectionState::Done,
            };
        }

        info!("Selected {} of {} files", selection.len(), total);
        Ok(selection)
    }

    fn prompt(&mut self, current: usize, total: usize, candidate: &str) -> CopierResult<()> {
        let bar = self.progress.render(current, total);
        queue!(
            self.output,
            Print("\n"),
            SetForegroundColor(Color::DarkGrey),
            Print(bar),
            Print("\n"),
            ResetColor,
            Print(format!("Include {}? ", candidate)),
            SetForegroundColor(Color::Cyan),
            Print("(y)es / (n)o / (p)attern / (q)uit: "),
            ResetColor,
        )
        .map_err(CopierError::Prompt)?;
        self.output.flush().map_err(CopierError::Prompt)
    }

    fn notice(&mut self, color: Color, message: &str) -> CopierResult<()> {
        self.write_colored(color, &format!("{}\n", message))
    }

    fn write_colored(&mut self, color: Color, text: &str) -> CopierResult<()> {
        queue!(
            self.output,
            SetForegroundColor(color),
            Print(text),
            ResetColor
        )
        .map_err(CopierError::Prompt)?;
        self.output.flush().map_err(CopierError::Prompt)
    }

    fn read_line(&mut self) -> CopierResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(CopierError::Prompt)?;

        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }
}
