//! One function per user action.
//!
//! Each command takes the [`Config`] and an output writer so the binary stays thin and
//! everything here can be exercised from tests. Commands return `Ok(false)` when some
//! input was rejected; the message has already been written to `out`.

use crate::analyzer::{analyze_batch, parse_and_classify};
use crate::config::Config;
use crate::error::SuggestError;
use crate::history::HistoryStore;
use crate::output::{
    render_batch, render_descriptor, render_history, render_suggestion, write_history_csv,
};
use crate::suggest::{closed_form_prefix, SizeModel, Suggestion, TRAINING_WINDOW};
use chrono::Utc;
use colored::Colorize;
use std::error::Error;
use std::io::Write;

/// Analyze one CIDR string, print it and store it unless `save` is false.
pub fn run_calc<W: Write>(
    config: &Config,
    input: &str,
    save: bool,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    log::info!("#Start run_calc({input})");
    let descriptor = match parse_and_classify(input) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("{e}");
            writeln!(out, "{}", e.to_string().red())?;
            return Ok(false);
        }
    };

    write!(out, "{}", render_descriptor(&descriptor))?;
    if save {
        let store = HistoryStore::open(&config.history_file)?;
        store.append(&descriptor, Utc::now())?;
        writeln!(
            out,
            "{}",
            "Subnet info calculated and saved to history!".green()
        )?;
    }
    Ok(true)
}

/// Analyze newline-delimited input. Every success is stored, failures are listed after.
pub fn run_batch<W: Write>(
    config: &Config,
    text: &str,
    save: bool,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    log::info!("#Start run_batch() bytes={}", text.len());
    let report = analyze_batch(text);
    if report.is_empty() {
        writeln!(out, "{}", "Please enter at least one IP/CIDR".yellow())?;
        return Ok(false);
    }

    write!(out, "{}", render_batch(&report))?;
    if save && !report.results.is_empty() {
        let store = HistoryStore::open(&config.history_file)?;
        store.append_all(&report.results, Utc::now())?;
    }
    Ok(report.errors.is_empty())
}

/// Print the newest records, as a table or as CSV.
pub fn run_history<W: Write>(
    config: &Config,
    limit: Option<usize>,
    csv: bool,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    let limit = limit.unwrap_or(config.history_limit);
    log::info!("#Start run_history() limit={limit}");
    let store = HistoryStore::open(&config.history_file)?;
    let records = store.list_recent(limit)?;

    if csv {
        write_history_csv(&records, out)?;
    } else {
        write!(out, "{}", render_history(&records, config.timezone))?;
    }
    Ok(true)
}

/// Delete all stored records.
pub fn run_clear<W: Write>(config: &Config, out: &mut W) -> Result<bool, Box<dyn Error>> {
    let store = HistoryStore::open(&config.history_file)?;
    let removed = store.clear()?;
    writeln!(out, "{} ({removed} records removed)", "History cleared!".green())?;
    Ok(true)
}

/// Fit the size model on the newest stored history and save it.
pub fn run_train<W: Write>(config: &Config, out: &mut W) -> Result<bool, Box<dyn Error>> {
    log::info!("#Start run_train()");
    let store = HistoryStore::open(&config.history_file)?;
    let records = store.list_recent(TRAINING_WINDOW)?;

    match SizeModel::train(&records, Utc::now()) {
        Ok(model) => {
            model.save(&config.model_file)?;
            writeln!(
                out,
                "{} on {} rows, saved to {}",
                "Model trained successfully".green(),
                model.sample_count,
                config.model_file.display()
            )?;
            Ok(true)
        }
        Err(e @ SuggestError::NotEnoughData { .. }) | Err(e @ SuggestError::SingularFit) => {
            log::warn!("{e}");
            writeln!(out, "{}", e.to_string().yellow())?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Suggest a prefix for `hosts`, from the saved model when there is one and always
/// from the closed form.
pub fn run_suggest<W: Write>(
    config: &Config,
    hosts: u64,
    out: &mut W,
) -> Result<bool, Box<dyn Error>> {
    log::info!("#Start run_suggest({hosts})");
    let mut ok = true;

    match SizeModel::load(&config.model_file)? {
        Some(model) => match model.suggest(hosts) {
            Some(s) => write!(out, "{}", render_suggestion("model", &s))?,
            None => {
                writeln!(out, "{}", "Prediction failed.".red())?;
                ok = false;
            }
        },
        None => writeln!(out, "{}", SuggestError::NoModel.to_string().yellow())?,
    }

    match closed_form_prefix(hosts).and_then(Suggestion::for_prefix) {
        Some(s) => write!(out, "{}", render_suggestion("closed form", &s))?,
        None => {
            writeln!(out, "{}", format!("{hosts} hosts do not fit in IPv4").red())?;
            ok = false;
        }
    }
    Ok(ok)
}
