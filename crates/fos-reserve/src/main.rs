//! fOS Reserve - submit a reservation from the command line
//!
//! ```text
//! fos-reserve <submission.json> [config.json]
//! ```
//!
//! The submission is typed into the reference reservation page field by
//! field, then submitted. The accepted record is printed as JSON; rejected
//! fields are listed on stderr.

use std::fs;

use anyhow::{Context, bail};
use fos_forms::page::ReservePage;
use fos_forms::{FormConfig, FormSnapshot};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let submission_path = args
        .next()
        .context("usage: fos-reserve <submission.json> [config.json]")?;

    let config = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
            FormConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => FormConfig::default(),
    };

    let json = fs::read_to_string(&submission_path)
        .with_context(|| format!("reading submission {submission_path}"))?;
    let snapshot: FormSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("parsing submission {submission_path}"))?;

    info!(submission = %submission_path, locale = ?config.locale, "submitting reservation");
    let mut page = ReservePage::standard(&config)?;
    page.click_open();
    page.fill(&snapshot);

    let record = page.submit().and_then(|s| s.record.clone());
    if let Some(record) = record {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let errors: Vec<_> = page.controller().visible_errors().collect();
    for (field, message) in &errors {
        eprintln!("{field}: {message}");
    }
    bail!("reservation rejected: {} invalid field(s)", errors.len())
}
