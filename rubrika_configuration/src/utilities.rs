use std::{env::current_dir, path::PathBuf};


/// Returns the default configuration file path, `{current directory}/data/configuration.toml`,
/// if such a file exists.
pub(crate) fn find_default_configuration_file_path() -> Option<PathBuf> {
    let mut configuration_file_path = current_dir().ok()?;
    configuration_file_path.push("data/configuration.toml");

    if !configuration_file_path.is_file() {
        return None;
    }

    Some(configuration_file_path)
}
