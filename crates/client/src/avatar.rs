// Avatar selection: the uploaded image when there is one, otherwise an initial

use crate::dto::Profile;

/// Alt text used when the caller has none
pub const DEFAULT_ALT: &str = "profile";

/// Rendered edge length in pixels
pub const DEFAULT_SIZE: u32 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Image { url: String },
    Initial { letter: String },
}

impl Avatar {
    /// Pick the image when a non-empty URL is given, else the fallback initial
    pub fn resolve(image_url: Option<&str>, fallback_text: Option<&str>, alt: &str) -> Self {
        match image_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Avatar::Image {
                url: url.to_string(),
            },
            None => Avatar::Initial {
                letter: fallback_letter(fallback_text, alt),
            },
        }
    }

    /// Avatar for a profile, falling back to the nickname then the email
    pub fn for_profile(profile: &Profile) -> Self {
        let fallback = profile
            .nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(profile.email.as_deref());
        Self::resolve(profile.image_url(), fallback, DEFAULT_ALT)
    }
}

/// First character of the trimmed fallback text, else of the trimmed alt
/// text, else `?`; upper-cased.
pub fn fallback_letter(fallback_text: Option<&str>, alt: &str) -> String {
    fallback_text
        .and_then(|t| t.trim().chars().next())
        .or_else(|| alt.trim().chars().next())
        .unwrap_or('?')
        .to_uppercase()
        .collect()
}
