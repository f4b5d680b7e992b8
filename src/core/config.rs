//! Page configuration: which carousels exist, their element ids, and the
//! shared lightbox markup.
//!
//! Every field has a default matching the page markup, so `{}` is a complete
//! configuration.

use serde::{Deserialize, Serialize};

use crate::autoplay::DEFAULT_INTERVAL_MS;
use crate::carousel::CarouselOptions;
use crate::group::LightboxGroup;
use crate::labels::Locale;
use crate::registry::PageSettings;
use crate::viewport::Breakpoints;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("breakpoints must satisfy 0 < mobile_max < tablet_max (got {mobile_max} / {tablet_max})")]
    Breakpoints { mobile_max: u32, tablet_max: u32 },
    #[error("autoplay interval must be positive")]
    ZeroInterval,
    #[error("group `{0}` is bound to more than one carousel")]
    DuplicateGroup(LightboxGroup),
    #[error("track `{0}` is shared by more than one carousel")]
    DuplicateTrack(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub locale: Locale,
    pub breakpoints: Breakpoints,
    pub autoplay: AutoplayConfig,
    pub carousels: Vec<CarouselConfig>,
    pub lightbox: LightboxConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            breakpoints: Breakpoints::default(),
            autoplay: AutoplayConfig::default(),
            carousels: LightboxGroup::ALL
                .into_iter()
                .map(CarouselConfig::for_group)
                .collect(),
            lightbox: LightboxConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PageConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bp = self.breakpoints;
        if bp.mobile_max == 0 || bp.mobile_max >= bp.tablet_max {
            return Err(ConfigError::Breakpoints {
                mobile_max: bp.mobile_max,
                tablet_max: bp.tablet_max,
            });
        }
        if self.autoplay.enabled && self.autoplay.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let mut groups = Vec::with_capacity(self.carousels.len());
        let mut tracks = Vec::with_capacity(self.carousels.len());
        for c in &self.carousels {
            if groups.contains(&c.group) {
                return Err(ConfigError::DuplicateGroup(c.group));
            }
            groups.push(c.group);

            // Images are read per track, so a shared track would mix groups.
            let track = c.track_id();
            if tracks.contains(&track) {
                return Err(ConfigError::DuplicateTrack(track));
            }
            tracks.push(track);
        }
        Ok(())
    }

    pub fn settings(&self) -> PageSettings {
        PageSettings {
            carousel: CarouselOptions {
                breakpoints: self.breakpoints,
                locale: self.locale,
            },
            autoplay_interval_ms: self.autoplay.enabled.then_some(self.autoplay.interval_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub enabled: bool,
    pub interval_ms: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// Element ids of one carousel. Only `track_id` is required to exist on the
/// page; the others are optional controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub group: LightboxGroup,
    #[serde(default)]
    pub track_id: Option<String>,
    #[serde(default)]
    pub prev_id: Option<String>,
    #[serde(default)]
    pub next_id: Option<String>,
    #[serde(default)]
    pub dots_id: Option<String>,
    #[serde(default)]
    pub container_id: Option<String>,
}

impl CarouselConfig {
    /// The conventional `carousel-{part}-{group}` ids.
    pub fn for_group(group: LightboxGroup) -> Self {
        let id = |part: &str| Some(format!("carousel-{part}-{group}"));
        Self {
            group,
            track_id: id("track"),
            prev_id: id("prev"),
            next_id: id("next"),
            dots_id: id("dots"),
            container_id: id("container"),
        }
    }

    pub fn track_id(&self) -> String {
        self.track_id.clone().unwrap_or_else(|| self.group.track_id())
    }

    /// Selector for this carousel's full-size images, scoped to its own track.
    pub fn image_selector(&self) -> String {
        format!("#{} .carousel-image", self.track_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub root_id: String,
    pub image_id: String,
    pub caption_id: String,
    pub close_id: String,
    pub prev_id: String,
    pub next_id: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            root_id: "lightbox".to_string(),
            image_id: "lightbox-image".to_string(),
            caption_id: "lightbox-caption".to_string(),
            close_id: "lightbox-close".to_string(),
            prev_id: "lightbox-prev".to_string(),
            next_id: "lightbox-next".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default_page() {
        let cfg = PageConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, PageConfig::default());
        assert_eq!(cfg.carousels.len(), 2);
        assert_eq!(cfg.carousels[0].track_id(), "carousel-track-plans");
        assert_eq!(
            cfg.carousels[1].container_id.as_deref(),
            Some("carousel-container-galerie")
        );
        assert_eq!(cfg.settings().autoplay_interval_ms, Some(5_000));
    }

    #[test]
    fn partial_carousel_entries_fall_back_to_group_track() {
        let cfg = PageConfig::from_json_str(
            r#"{ "locale": "en", "autoplay": { "enabled": false },
                 "carousels": [ { "group": "galerie" } ] }"#,
        )
        .unwrap();
        assert_eq!(cfg.locale, Locale::En);
        assert_eq!(cfg.settings().autoplay_interval_ms, None);
        assert_eq!(cfg.carousels[0].track_id(), "carousel-track-galerie");
        assert_eq!(cfg.carousels[0].prev_id, None);
    }

    #[test]
    fn rejects_inverted_breakpoints() {
        let err = PageConfig::from_json_str(
            r#"{ "breakpoints": { "mobile_max": 1024, "tablet_max": 768 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Breakpoints { .. }));
    }

    #[test]
    fn rejects_zero_interval_and_duplicate_groups() {
        let err = PageConfig::from_json_str(r#"{ "autoplay": { "interval_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval));

        let err = PageConfig::from_json_str(
            r#"{ "carousels": [ { "group": "plans" }, { "group": "plans" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateGroup(LightboxGroup::Plans)));
    }

    #[test]
    fn rejects_two_groups_on_one_track() {
        let err = PageConfig::from_json_str(
            r#"{ "carousels": [
                   { "group": "plans", "track_id": "carousel-track-galerie" },
                   { "group": "galerie" } ] }"#,
        )
        .unwrap_err();
        match err {
            ConfigError::DuplicateTrack(track) => assert_eq!(track, "carousel-track-galerie"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn image_selector_follows_the_configured_track() {
        let cfg = PageConfig::from_json_str(
            r#"{ "carousels": [ { "group": "plans", "track_id": "plans-row" }, { "group": "galerie" } ] }"#,
        )
        .unwrap();
        assert_eq!(cfg.carousels[0].image_selector(), "#plans-row .carousel-image");
        assert_eq!(
            cfg.carousels[1].image_selector(),
            "#carousel-track-galerie .carousel-image"
        );
    }

    #[test]
    fn rejects_unknown_group_names() {
        let err = PageConfig::from_json_str(r#"{ "carousels": [ { "group": "plan" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn serializes_back_to_equivalent_json() {
        let cfg = PageConfig::default();
        let raw = cfg.to_json_pretty().unwrap();
        assert_eq!(PageConfig::from_json_str(&raw).unwrap(), cfg);
    }
}
