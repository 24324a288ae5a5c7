//! Command to print the effective configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// Print the merged configuration as YAML.
///
/// Every field is filled in, so the output is itself a complete config file.
#[derive(Args)]
pub struct ShowConfigCommand {}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, None)?;
        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CliError::Config(format!("cannot render configuration: {e}")))?;
        print!("{yaml}");
        Ok(())
    }
}
