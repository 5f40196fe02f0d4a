//! Portfolio profile shown on the front of the card.

use serde::{Deserialize, Serialize};

/// A social or contact link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileLink {
    pub label: String,
    pub href: String,
    /// Accent color name used by the front end.
    pub accent: String,
}

/// Portfolio owner profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    /// "My Journey" blurb.
    pub journey: String,
    pub portfolio_url: String,
    pub links: Vec<ProfileLink>,
}

fn link(label: &str, href: &str, accent: &str) -> ProfileLink {
    ProfileLink {
        label: label.to_string(),
        href: href.to_string(),
        accent: accent.to_string(),
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Lee Hyohwak".to_string(),
            role: "Full-Stack Developer".to_string(),
            journey: "Exploring the integration of blockchain in everyday life, \
                      crafting a better world with the power of blockchain"
                .to_string(),
            portfolio_url:
                "https://piatoss3612.notion.site/Lee-Hyohwak-d02f1c05aca944d7867bacbeef766aab?pvs=74"
                    .to_string(),
            links: vec![
                link("GitHub", "https://github.com/piatoss3612", "gray"),
                link("Blog", "https://piatoss3612.tistory.com/", "orange"),
                link("Twitter", "https://twitter.com/piatoss3612", "blue"),
                link("Email", "mailto:piatoss3612@mail.com", "green"),
            ],
        }
    }
}
