use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend API base URL, e.g. http://localhost:8000
    pub base_url: String,

    /// Base URL for keyframe thumbnails; defaults to {base_url}/static/keyframes
    #[serde(default)]
    pub keyframe_base_url: Option<String>,

    /// Directory CSV exports are written to; defaults to the working directory
    #[serde(default)]
    pub export_dir: Option<String>,

    #[serde(default = "default_true")]
    pub image_preview_enabled: bool,

    /// Terminal graphics protocol: auto, iterm2, kitty, sixel, halfblocks
    #[serde(default = "default_image_protocol")]
    pub image_protocol: String,
}

fn default_true() -> bool {
    true
}

fn default_image_protocol() -> String {
    "auto".to_string()
}

impl Config {
    pub fn keyframe_base(&self) -> String {
        match &self.keyframe_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/static/keyframes", self.base_url.trim_end_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config: Config = serde_yaml::from_str("base_url: http://localhost:8000").unwrap();
        assert!(config.image_preview_enabled);
        assert_eq!(config.image_protocol, "auto");
        assert_eq!(
            config.keyframe_base(),
            "http://localhost:8000/static/keyframes"
        );
    }

    #[test]
    fn test_keyframe_base_override() {
        let config: Config = serde_yaml::from_str(
            "base_url: http://localhost:8000\nkeyframe_base_url: https://cdn.example.com/kf/",
        )
        .unwrap();
        assert_eq!(config.keyframe_base(), "https://cdn.example.com/kf");
    }
}
