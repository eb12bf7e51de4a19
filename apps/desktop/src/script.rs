use std::io::Write;

use anyhow::{Context, Result};
use client_core::CoreError;
use serde::Deserialize;
use tracing::{info, warn};

use crate::driver::{Driver, Event};

/// One scripted interaction. Scripts are a JSON array of these, e.g.
/// `[{"step":"navigate","path":"/booking"},{"step":"advance","ms":600}]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    Navigate { path: String },
    Back,
    /// A raw `{"type": ..., "value": ...}` store action.
    Dispatch { action: serde_json::Value },
    Advance { ms: u64 },
    Scroll { px: f32 },
    SubmitDetails,
    Settle,
    Frame,
}

pub fn parse(raw: &str) -> Result<Vec<Step>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn run<W: Write>(driver: &mut Driver<W>, steps: Vec<Step>) -> Result<()> {
    info!(steps = steps.len(), "running script");
    for (index, step) in steps.into_iter().enumerate() {
        run_step(driver, step).with_context(|| format!("script step {index} failed"))?;
    }
    driver.settle()
}

fn run_step<W: Write>(driver: &mut Driver<W>, step: Step) -> Result<()> {
    match step {
        Step::Navigate { path } => {
            let outcome = driver.app.navigate(&path)?;
            driver.navigation(outcome)?;
        }
        Step::Back => match driver.app.back() {
            Some(outcome) => driver.navigation(outcome)?,
            None => driver.emit(&Event::Rejected {
                step: "back".into(),
                error: "history is empty".into(),
            })?,
        },
        Step::Dispatch { action } => {
            let raw = action.to_string();
            let changed = driver.app.dispatch_json(&raw)?;
            let kind = action
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            driver.emit(&Event::Dispatched { kind, changed })?;
            driver.flush()?;
        }
        Step::Advance { ms } => driver.advance(ms)?,
        Step::Scroll { px } => {
            driver.app.scroll(px);
            let scrolled = driver.app.state().scrolled;
            driver.emit(&Event::Scrolled { px, scrolled })?;
        }
        Step::SubmitDetails => match driver.app.submit_details() {
            Ok(outcome) => driver.navigation(outcome)?,
            Err(CoreError::Validation(errors)) => {
                warn!(fields = ?errors.fields, "details rejected");
                driver.emit(&Event::Rejected {
                    step: "submitDetails".into(),
                    error: errors.to_string(),
                })?;
            }
            Err(err) => return Err(err.into()),
        },
        Step::Settle => driver.settle()?,
        Step::Frame => driver.frame()?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
