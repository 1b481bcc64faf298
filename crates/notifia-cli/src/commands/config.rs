use anyhow::Result;

use super::output;
use crate::context::Settings;

/// Prints the effective configuration, overrides included.
pub fn show(settings: &Settings, as_json: bool) -> Result<()> {
    if as_json {
        return output::json(&settings.config);
    }
    println!("# {}", settings.service.path().display());
    print!("{}", toml::to_string_pretty(&settings.config)?);
    Ok(())
}

pub fn init(settings: &Settings, force: bool) -> Result<()> {
    let path = settings.service.path().display();
    if settings.service.init(force)? {
        println!("Wrote default configuration to {}", path);
    } else {
        println!("{} already exists (use --force to overwrite)", path);
    }
    Ok(())
}
