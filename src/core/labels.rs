use std::fmt;

/// Language used for accessibility labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// `aria-label` for the indicator dot leading to `slide_number` (1-based).
    pub fn dot_label(self, slide_number: usize) -> String {
        match self {
            Locale::Fr => format!("Aller à la slide {slide_number}"),
            Locale::En => format!("Go to slide {slide_number}"),
        }
    }

    /// Labels for `count` dots, in dot order.
    pub fn dot_labels(self, count: usize) -> Vec<String> {
        (1..=count).map(|n| self.dot_label(n)).collect()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
