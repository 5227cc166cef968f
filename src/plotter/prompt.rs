// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line-oriented prompts for the plotting CLI.
//!
//! Every reader loops until it gets a valid answer. `Ok(None)` means the
//! input ended and the session should stop.

use crate::services::{ChartKind, DateRange};
use crate::time_utils::is_valid_date;
use std::io::{self, BufRead, Write};

/// What the user picked from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Chart(ChartKind),
    Exit,
}

/// Menu letters in display order.
pub const MENU: [(&str, Action, &str); 6] = [
    ("a", Action::Chart(ChartKind::PaceVsDate), "Plot Pace vs Date"),
    ("b", Action::Chart(ChartKind::PaceVsDistance), "Plot Pace vs Distance"),
    ("c", Action::Chart(ChartKind::PaceVsElevation), "Plot Pace vs Elevation"),
    ("d", Action::Chart(ChartKind::PaceVsEffort), "Plot Pace vs Perceived Effort"),
    ("e", Action::Chart(ChartKind::WeeklyDistance), "Plot Weekly Distance vs Date"),
    ("x", Action::Exit, "Exit application"),
];

impl Action {
    pub fn from_letter(letter: &str) -> Option<Self> {
        MENU.iter()
            .find(|(key, _, _)| *key == letter)
            .map(|(_, action, _)| *action)
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print `question`, then read one line. Surrounding whitespace is
    /// dropped.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn complain(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{message}")?;
        writeln!(self.output)
    }

    pub fn read_user_id(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(answer) = self.ask("Please enter your User ID: ")? else {
                return Ok(None);
            };
            let numeric = !answer.is_empty() && answer.bytes().all(|b| b.is_ascii_digit());
            if let Some(user_id) = numeric.then(|| answer.parse().ok()).flatten() {
                return Ok(Some(user_id));
            }
            self.complain("Invalid User ID. User ID must be a number.")?;
        }
    }

    /// `true` to plot every activity, `false` to ask for a date range.
    pub fn read_plot_all(&mut self) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask("Would you like to plot all activity data? y/n: ")? else {
                return Ok(None);
            };
            match answer.as_str() {
                "y" | "Y" => return Ok(Some(true)),
                "n" | "N" => return Ok(Some(false)),
                _ => self.complain("Invalid input.")?,
            }
        }
    }

    /// Ask for both bounds until both are valid `YYYY/MM/DD` dates.
    pub fn read_date_range(&mut self) -> io::Result<Option<DateRange>> {
        loop {
            let Some(start) = self.ask("Please enter a start date (YYYY/MM/DD): ")? else {
                return Ok(None);
            };
            let Some(end) = self.ask("Please enter an end date (YYYY/MM/DD): ")? else {
                return Ok(None);
            };
            if is_valid_date(&start) && is_valid_date(&end) {
                return Ok(Some(DateRange { start, end }));
            }
            self.complain("Invalid input. Date must be in the format YYYY/MM/DD.")?;
        }
    }

    pub fn read_action(&mut self) -> io::Result<Option<Action>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Available plots and actions:")?;
            for (key, _, label) in MENU {
                writeln!(self.output, " [{key}] {label}")?;
            }
            writeln!(self.output)?;

            let Some(answer) =
                self.ask("Please enter the letter of the action you would like to take: ")?
            else {
                return Ok(None);
            };
            if let Some(action) = Action::from_letter(&answer) {
                return Ok(Some(action));
            }
            self.complain("Invalid input.")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output).unwrap()
    }

    #[test]
    fn test_user_id_retries_until_numeric() {
        let mut p = prompter("abc\n-3\n\n12\n");
        assert_eq!(p.read_user_id().unwrap(), Some(12));
        let out = transcript(p);
        assert_eq!(out.matches("Invalid User ID").count(), 3);
    }

    #[test]
    fn test_plot_all_accepts_either_case() {
        let mut p = prompter("maybe\nY\nn\n");
        assert_eq!(p.read_plot_all().unwrap(), Some(true));
        assert_eq!(p.read_plot_all().unwrap(), Some(false));
        assert!(transcript(p).contains("Invalid input."));
    }

    #[test]
    fn test_date_range_needs_both_dates_valid() {
        let mut p = prompter("2025/01/01\nsoon\n2025/01/01\n2025/03/01\n");
        let range = p.read_date_range().unwrap().unwrap();
        assert_eq!(range.start, "2025/01/01");
        assert_eq!(range.end, "2025/03/01");
        assert_eq!(transcript(p).matches("Date must be in the format").count(), 1);
    }

    #[test]
    fn test_action_letters() {
        let mut p = prompter("z\nb\nx\n");
        assert_eq!(
            p.read_action().unwrap(),
            Some(Action::Chart(ChartKind::PaceVsDistance))
        );
        assert_eq!(p.read_action().unwrap(), Some(Action::Exit));
        let out = transcript(p);
        assert!(out.contains(" [e] Plot Weekly Distance vs Date"));
        assert_eq!(out.matches("Invalid input.").count(), 1);
    }

    #[test]
    fn test_end_of_input_stops() {
        assert_eq!(prompter("").read_user_id().unwrap(), None);
        assert_eq!(prompter("abc\n").read_user_id().unwrap(), None);
        assert_eq!(prompter("2025/01/01\n").read_date_range().unwrap(), None);
    }
}
