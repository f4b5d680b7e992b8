/// Viewport width thresholds (CSS pixels) for the responsive slides-per-view.
///
/// Widths up to `mobile_max` show one slide, up to `tablet_max` two, anything
/// wider three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Breakpoints {
    pub mobile_max: u32,
    pub tablet_max: u32,
}

impl Breakpoints {
    pub const MOBILE_MAX: u32 = 768;
    pub const TABLET_MAX: u32 = 1024;

    pub fn slides_per_view(&self, viewport_width: f64) -> usize {
        if viewport_width <= self.mobile_max as f64 {
            1
        } else if viewport_width <= self.tablet_max as f64 {
            2
        } else {
            3
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: Self::MOBILE_MAX,
            tablet_max: Self::TABLET_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_breakpoints_are_inclusive() {
        let bp = Breakpoints::default();
        assert_eq!(bp.slides_per_view(0.0), 1);
        assert_eq!(bp.slides_per_view(768.0), 1);
        assert_eq!(bp.slides_per_view(768.5), 2);
        assert_eq!(bp.slides_per_view(1024.0), 2);
        assert_eq!(bp.slides_per_view(1025.0), 3);
        assert_eq!(bp.slides_per_view(3840.0), 3);
    }

    #[test]
    fn always_one_to_three() {
        let bp = Breakpoints::default();
        for w in (0..4000).step_by(7) {
            let spv = bp.slides_per_view(w as f64);
            assert!((1..=3).contains(&spv), "width {w} gave {spv}");
        }
    }
}
