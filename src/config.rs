use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard would otherwise hardcode: where the data lives,
/// which course/year combinations to offer, and which columns the charts
/// consume. Loaded from `zoomboard.json` when present, defaults otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root directory holding `{course}/{year}/data.csv` files.
    pub data_root: PathBuf,
    /// Course options offered in the side panel.
    pub courses: Vec<String>,
    /// Year options offered in the side panel.
    pub years: Vec<String>,
    /// Distinct-value count below which a column is treated as categorical.
    pub categorical_threshold: usize,
    /// How many entries the "top" charts show.
    pub top_n: usize,
    /// Column holding the project title (text analysis input).
    pub title_column: String,
    /// Column holding the project URL (rendered as a hyperlink).
    pub url_column: String,
    /// Column driving the deployment-type distribution chart.
    pub deployment_column: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("./Data"),
            courses: vec![
                "dezoomcamp".to_string(),
                "mlopszoomcamp".to_string(),
                "mlzoomcamp".to_string(),
            ],
            years: vec![
                "2021".to_string(),
                "2022".to_string(),
                "2023".to_string(),
            ],
            categorical_threshold: 10,
            top_n: 10,
            title_column: "project_title".to_string(),
            url_column: "project_url".to_string(),
            deployment_column: "Deployment Type".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or malformed (logged, never fatal).
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "Invalid config at {}: {err}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_the_shipped_deployment() {
        let config = DashboardConfig::default();
        assert_eq!(config.courses.len(), 3);
        assert_eq!(config.years, vec!["2021", "2022", "2023"]);
        assert_eq!(config.categorical_threshold, 10);
        assert_eq!(config.title_column, "project_title");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            DashboardConfig::load_or_default(Path::new("/nonexistent/zoomboard.json"));
        assert_eq!(config.top_n, DashboardConfig::default().top_n);
    }

    #[test]
    fn partial_config_keeps_defaults_for_omitted_fields() {
        let dir = std::env::temp_dir().join(format!("zoomboard-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("zoomboard.json");
        fs::write(&path, r#"{ "top_n": 5, "years": ["2024"] }"#).unwrap();

        let config = DashboardConfig::load_or_default(&path);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.years, vec!["2024"]);
        assert_eq!(config.title_column, "project_title");
    }
}
