use std::fmt;
use std::str::FromStr;

/// A named partition of slides that a carousel may open in the lightbox.
///
/// Each variant owns exactly one carousel track on the page; the lightbox only
/// reads images from inside that track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LightboxGroup {
    Plans,
    Galerie,
}

impl LightboxGroup {
    pub const ALL: [LightboxGroup; 2] = [LightboxGroup::Plans, LightboxGroup::Galerie];

    pub fn as_str(self) -> &'static str {
        match self {
            LightboxGroup::Plans => "plans",
            LightboxGroup::Galerie => "galerie",
        }
    }

    /// Element id of the track hosting this group's slides.
    pub fn track_id(self) -> String {
        format!("carousel-track-{}", self.as_str())
    }
}

impl fmt::Display for LightboxGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lightbox group `{0}` (expected `plans` or `galerie`)")]
pub struct ParseGroupError(pub String);

impl FromStr for LightboxGroup {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plans" => Ok(LightboxGroup::Plans),
            "galerie" | "gallery" => Ok(LightboxGroup::Galerie),
            _ => Err(ParseGroupError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_group_has_its_own_track() {
        assert_eq!(LightboxGroup::Plans.track_id(), "carousel-track-plans");
        assert_eq!(LightboxGroup::Galerie.track_id(), "carousel-track-galerie");
        assert_ne!(
            LightboxGroup::Plans.track_id(),
            LightboxGroup::Galerie.track_id()
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Plans".parse::<LightboxGroup>(), Ok(LightboxGroup::Plans));
        assert_eq!(" galerie ".parse::<LightboxGroup>(), Ok(LightboxGroup::Galerie));
        assert_eq!("gallery".parse::<LightboxGroup>(), Ok(LightboxGroup::Galerie));
        assert!("plan".parse::<LightboxGroup>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for g in LightboxGroup::ALL {
            assert_eq!(g.to_string().parse::<LightboxGroup>(), Ok(g));
        }
    }
}
