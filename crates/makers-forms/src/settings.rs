use makers_core::models::DraftField;
use makers_core::validation::limits::{MAX_SCREENSHOTS, NARRATIVE_MAX_CHARS};
use makers_core::validation::DEFAULT_IMAGE_CONTENT_TYPES;
use makers_core::MakersConfig;
use std::time::Duration;

/// Limits applied by the form manager
#[derive(Clone, Debug)]
pub struct FormSettings {
    pub narrative_max_chars: usize,
    pub max_screenshots: usize,
    pub max_asset_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            narrative_max_chars: NARRATIVE_MAX_CHARS,
            max_screenshots: MAX_SCREENSHOTS,
            max_asset_size_bytes: 5 * 1024 * 1024,
            allowed_content_types: DEFAULT_IMAGE_CONTENT_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl FormSettings {
    pub fn from_config(config: &MakersConfig) -> Self {
        Self {
            narrative_max_chars: config.narrative_max_chars,
            max_screenshots: config.max_screenshots,
            max_asset_size_bytes: config.max_asset_size_bytes,
            allowed_content_types: config.allowed_content_types.clone(),
        }
    }

    /// Character ceiling for `field`
    pub fn max_chars(&self, field: DraftField) -> usize {
        if field.is_narrative() {
            self.narrative_max_chars
        } else {
            field.default_max_chars()
        }
    }
}

/// Pacing of screenshot uploads
#[derive(Clone, Debug)]
pub struct UploadSettings {
    /// Concurrent requests per batch
    pub batch_size: usize,
    /// Pause between consecutive batches
    pub batch_delay: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            batch_size: 3,
            batch_delay: Duration::from_millis(500),
        }
    }
}

impl UploadSettings {
    pub fn from_config(config: &MakersConfig) -> Self {
        Self {
            batch_size: config.upload_batch_size.max(1),
            batch_delay: Duration::from_millis(config.upload_batch_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_ceiling_is_configurable() {
        let settings = FormSettings {
            narrative_max_chars: 500,
            ..Default::default()
        };
        assert_eq!(settings.max_chars(DraftField::Roadmap), 500);
        assert_eq!(settings.max_chars(DraftField::Name), 100);
    }

    #[test]
    fn settings_follow_config() {
        let config = MakersConfig::from_lookup(|key| match key {
            "UPLOAD_BATCH_SIZE" => Some("2".to_string()),
            "UPLOAD_BATCH_DELAY_MS" => Some("50".to_string()),
            "MAX_SCREENSHOTS" => Some("4".to_string()),
            _ => None,
        })
        .unwrap();

        let upload = UploadSettings::from_config(&config);
        assert_eq!(upload.batch_size, 2);
        assert_eq!(upload.batch_delay, Duration::from_millis(50));

        let form = FormSettings::from_config(&config);
        assert_eq!(form.max_screenshots, 4);
        assert_eq!(form.narrative_max_chars, 300);
    }
}
