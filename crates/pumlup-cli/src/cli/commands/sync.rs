//! `pumlup sync` – fetch the latest jar, update the config, remove old jars.

use anyhow::{Context, Result};
use pumlup_core::config::Settings;
use pumlup_core::http::CurlClient;
use pumlup_core::ini::KeyUpdate;
use pumlup_core::store::FetchOutcome;
use pumlup_core::sync::{self, SyncOutcome, SyncReport};

use crate::cli::Exit;

pub fn run_sync(settings: &Settings) -> Result<Exit> {
    let client = CurlClient::new(settings.user_agent.as_str());
    let outcome = sync::run(settings, &client).context("sync failed")?;

    match outcome {
        SyncOutcome::NotFound => {
            println!("Could not find an MIT licensed jar on GitHub releases or the release feed.");
            Ok(Exit::NotFound)
        }
        SyncOutcome::Updated(report) => {
            print_report(settings, &report);
            Ok(Exit::Success)
        }
    }
}

fn print_report(settings: &Settings, report: &SyncReport) {
    let name = &report.candidate.filename;
    println!("Found latest version: {name} ({})", report.candidate.source);

    match report.fetch {
        FetchOutcome::AlreadyPresent => println!("Latest version already downloaded."),
        FetchOutcome::Downloaded { bytes } => println!(
            "Saved {} ({bytes} bytes)",
            settings.resources_dir.join(name).display()
        ),
    }

    let ini = settings.ini_file.display();
    let key = &settings.config_key;
    match &report.config {
        KeyUpdate::Replaced { previous } => {
            println!("Updated {ini}: {key}={previous} -> {key}={name}")
        }
        KeyUpdate::Unchanged => println!("{ini} already uses {name}"),
        KeyUpdate::Missing => {
            println!("warning: {ini} has no `{key}=` line; left unchanged")
        }
    }

    for old in &report.removed {
        println!("Removed old jar: {old}");
    }
    println!("Done.");
}
