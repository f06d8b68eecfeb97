//! `pumlup status` – show the configured jar and the local jars.

use anyhow::Result;
use pumlup_core::config::Settings;
use pumlup_core::sync;

pub fn run_status(settings: &Settings) -> Result<()> {
    let st = sync::status(settings)?;
    match &st.configured {
        Some(jar) => println!("{}: {}={}", settings.ini_file.display(), settings.config_key, jar),
        None => println!(
            "{}: no `{}=` line",
            settings.ini_file.display(),
            settings.config_key
        ),
    }

    if st.artifacts.is_empty() {
        println!("No PlantUML jars in {}.", settings.resources_dir.display());
    } else {
        for name in &st.artifacts {
            let marker = if st.configured.as_deref() == Some(name.as_str()) {
                "*"
            } else {
                " "
            };
            println!("{marker} {name}");
        }
    }
    Ok(())
}
