// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive activity plotter.
//!
//! Asks for a user and a date range, then prints the chosen chart series as
//! a text table until the user exits or input runs out.

pub mod prompt;

pub use prompt::{Action, Prompter};

use crate::db::SqliteDb;
use crate::services::{build_chart, load_dataset, no_data_message, ChartError, ChartSeries, DateRange};
use std::io::{self, BufRead, Write};

pub const GREETING: &str = "Hi, welcome to activity plotter!";
pub const FAREWELL: &str = "Goodbye! Enjoy your next activity!";

/// Run one plotting session against `db`.
pub async fn run_session<R: BufRead, W: Write>(
    db: &SqliteDb,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()> {
    prompter.say(GREETING)?;

    let Some(user_id) = prompter.read_user_id()? else {
        return Ok(());
    };
    let Some(plot_all) = prompter.read_plot_all()? else {
        return Ok(());
    };
    let range = if plot_all {
        DateRange::default()
    } else {
        match prompter.read_date_range()? {
            Some(range) => range,
            None => return Ok(()),
        }
    };
    tracing::debug!(user_id, start = %range.start, end = %range.end, "Plotter session ready");

    loop {
        let kind = match prompter.read_action()? {
            Some(Action::Chart(kind)) => kind,
            Some(Action::Exit) => {
                prompter.say(FAREWELL)?;
                return Ok(());
            }
            None => return Ok(()),
        };

        let dataset = load_dataset(db, user_id, &range).await?;
        match build_chart(kind, &dataset) {
            Ok(series) => write_series(prompter.output(), &series)?,
            Err(ChartError::NoData(_)) => {
                prompter.say("")?;
                prompter.say(&no_data_message(user_id))?;
                prompter.say("")?;
            }
        }
    }
}

/// Print a chart series as a two-column table.
pub fn write_series<W: Write>(out: &mut W, series: &ChartSeries) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", series.title)?;
    writeln!(out, "{:<24} {}", series.x_label, series.y_label)?;
    for point in &series.points {
        writeln!(out, "{:<24} {:.2}", point.x.to_string(), point.y)?;
    }
    if let Some(line) = series.trendline {
        writeln!(
            out,
            "Trendline: y = {:.4}x + {:.4}",
            line.slope, line.intercept
        )?;
    }
    Ok(())
}
