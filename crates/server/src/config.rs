use std::collections::HashMap;
use std::fs;

use contact::ContactConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub data_dir: String,
    pub to_email: String,
    pub company: String,
    pub relay_url: Option<String>,
    /// Dev-only escape hatch: run without a relay, capturing mail in
    /// memory. Off by default so a missing relay cannot pass for a
    /// working deployment.
    pub allow_memory_mailer: bool,
    pub max_message_links: usize,
    pub max_message_addresses: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let contact = ContactConfig::default();
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            data_dir: "./data".into(),
            to_email: contact.to_email,
            company: contact.company,
            relay_url: None,
            allow_memory_mailer: false,
            max_message_links: contact.max_message_links,
            max_message_addresses: contact.max_message_addresses,
        }
    }
}

impl Settings {
    pub fn contact_config(&self) -> ContactConfig {
        ContactConfig {
            to_email: self.to_email.clone(),
            company: self.company.clone(),
            max_message_links: self.max_message_links,
            max_message_addresses: self.max_message_addresses,
        }
    }
}

/// Layered settings: compiled defaults, then `server.toml` (a flat string
/// map), then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_map(&mut settings, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Ok(v) = std::env::var("APP__DATA_DIR") {
        settings.data_dir = v;
    }

    if let Ok(v) = std::env::var("APP__TO_EMAIL") {
        settings.to_email = v;
    }

    if let Ok(v) = std::env::var("APP__COMPANY") {
        settings.company = v;
    }

    if let Ok(v) = std::env::var("APP__RELAY_URL") {
        settings.relay_url = Some(v);
    }

    if let Ok(v) = std::env::var("APP__ALLOW_MEMORY_MAILER") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.allow_memory_mailer = parsed;
        }
    }

    if let Ok(v) = std::env::var("APP__MAX_MESSAGE_LINKS") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_message_links = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__MAX_MESSAGE_ADDRESSES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_message_addresses = parsed;
        }
    }

    settings
}

fn apply_map(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.bind_addr = v.clone();
    }
    if let Some(v) = file_cfg.get("data_dir") {
        settings.data_dir = v.clone();
    }
    if let Some(v) = file_cfg.get("to_email") {
        settings.to_email = v.clone();
    }
    if let Some(v) = file_cfg.get("company") {
        settings.company = v.clone();
    }
    if let Some(v) = file_cfg.get("relay_url") {
        settings.relay_url = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("allow_memory_mailer") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.allow_memory_mailer = parsed;
        }
    }
    if let Some(v) = file_cfg.get("max_message_links") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_message_links = parsed;
        }
    }
    if let Some(v) = file_cfg.get("max_message_addresses") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_message_addresses = parsed;
        }
    }
}
