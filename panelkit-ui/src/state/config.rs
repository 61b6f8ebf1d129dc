//! Persisted Configuration
//!
//! Pages can override the defaults by storing a TOML document under
//! [`STORAGE_KEY`] in localStorage.

use panelkit::Config;

/// localStorage key holding the TOML overrides
pub const STORAGE_KEY: &str = "panelkit_config";

/// Load the stored configuration, falling back to defaults
pub fn load_config() -> Config {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());

    let Some(content) = stored else {
        return Config::default();
    };

    match Config::from_toml_str(&content) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&format!("ignoring stored config: {}", e).into());
            Config::default()
        }
    }
}
