//! `pumlup check` – report the latest jar without changing anything.

use anyhow::{Context, Result};
use pumlup_core::config::Settings;
use pumlup_core::http::CurlClient;
use pumlup_core::sync;

use crate::cli::Exit;

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub fn run_check(settings: &Settings) -> Result<Exit> {
    let client = CurlClient::new(settings.user_agent.as_str());
    let Some(report) = sync::check(settings, &client).context("lookup failed")? else {
        println!("Could not find an MIT licensed jar on GitHub releases or the release feed.");
        return Ok(Exit::NotFound);
    };

    let c = &report.candidate;
    let version = c
        .version
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{:<12} {}", "LATEST", c.filename);
    println!("{:<12} {}", "VERSION", version);
    println!("{:<12} {}", "SOURCE", c.source);
    println!("{:<12} {}", "URL", c.url);
    println!("{:<12} {}", "DOWNLOADED", yes_no(report.present));
    println!("{:<12} {}", "CONFIGURED", yes_no(report.configured));
    Ok(Exit::Success)
}
