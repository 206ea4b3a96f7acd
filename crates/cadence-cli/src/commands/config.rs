//! Config commands

use std::path::Path;

use cadence_common::CadenceConfig;

use crate::output::{Field, OutputFormat};
use crate::ConfigCommands;

pub fn handle(
    action: ConfigCommands,
    settings: &CadenceConfig,
    config_path: &Path,
    state_path: &Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => match format {
            OutputFormat::Table => print!("{}", settings.to_toml()?),
            _ => format.print(settings, |_| Vec::<Field>::new())?,
        },
        ConfigCommands::Path => {
            let paths = serde_json::json!({
                "config": config_path.display().to_string(),
                "state": state_path.display().to_string(),
            });
            format.print(&paths, |_| {
                vec![
                    Field::new("config", config_path.display()),
                    Field::new("state", state_path.display()),
                ]
            })?;
        }
        ConfigCommands::Init => {
            crate::config::init(config_path)?;
            format.message(&format!("Wrote default configuration to {}", config_path.display()))?;
        }
    }
    Ok(())
}
