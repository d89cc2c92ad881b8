pub mod settings;

use settings::Settings;
use std::path::Path;

/// Load `settings.yaml` from the directory containing the file list.
///
/// If the file does not exist, defaults are returned.
pub fn load_settings_for_list(list_path: &Path) -> crate::error::Result<Settings> {
    let dir = list_path.parent().unwrap_or_else(|| Path::new("."));

    let settings_path = dir.join("settings.yaml");

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}
