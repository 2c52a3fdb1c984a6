//! Connection profiles: load/save a simple JSON mapping of profile name -> { url }
//! Stored under XDG config dir: $XDG_CONFIG_HOME/threatwatch/profiles.json
//! (fallback ~/.config/threatwatch/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

/// Environment override for the backend endpoint.
pub const URL_ENV: &str = "THREATWATCH_URL";
/// Where the dashboard looks when nothing else is configured.
pub const DEFAULT_URL: &str = "ws://127.0.0.1:5002/ws";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("threatwatch")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("threatwatch")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(std::io::Error::other)?;
    fs::write(path, data)
}

/// Endpoint from the environment, else the local default.
pub fn endpoint_from_env() -> String {
    std::env::var(URL_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

pub enum ResolveProfile {
    /// Use the runtime URL as given (caller may persist it under a profile).
    Direct(String),
    /// Loaded from an existing profile entry.
    Loaded(String),
    /// Named profile does not exist yet; prompt to create it.
    PromptCreate(String),
    /// Nothing explicit given: fall back to env var / local default.
    Fallback(String),
}

pub struct ProfileRequest {
    pub profile_name: Option<String>,
    pub url: Option<String>,
}

impl ProfileRequest {
    pub fn resolve(self, pf: &ProfilesFile) -> ResolveProfile {
        // Only a profile name: load it, or offer to create it.
        if self.url.is_none() {
            if let Some(name) = self.profile_name {
                return match pf.profiles.get(&name) {
                    Some(entry) => ResolveProfile::Loaded(entry.url.clone()),
                    None => ResolveProfile::PromptCreate(name),
                };
            }
        }
        if let Some(u) = self.url {
            return ResolveProfile::Direct(u);
        }
        ResolveProfile::Fallback(endpoint_from_env())
    }
}
