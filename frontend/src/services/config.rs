use shared::CelebrationConfig;

use crate::services::logging::Logger;

/// Id of the optional `<script type="application/json">` override in index.html
const CONFIG_ELEMENT_ID: &str = "celebration-config";

/// Load settings from the page, falling back to defaults
pub fn load_config() -> CelebrationConfig {
    let text = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        Logger::debug_with_component("config", "No page config found, using defaults");
        return CelebrationConfig::default();
    };

    match CelebrationConfig::from_json(&text) {
        Ok(config) => {
            Logger::info_with_component("config", "Loaded celebration config from page");
            config
        }
        Err(e) => {
            Logger::warn_with_component("config", &format!("Ignoring page config: {}", e));
            CelebrationConfig::default()
        }
    }
}
