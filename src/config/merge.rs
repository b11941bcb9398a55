//! Flat per-field overlay of raw input onto defaults
//!
//! Each section is merged independently: a flag present in the input wins,
//! an absent flag keeps its default. There is no recursion past the section
//! level.

use crate::config::types::{
    HomepageSections, LayoutConfig, LegacyElements, LegacySections, LegacySiteConfig,
    RawHomepage, RawLayout, RawLegacyConfig, RawLegacyElements, RawLegacySections,
    RawSiteConfig, RawWriting, SectionsConfig, SiteConfig, WritingSections,
};

/// Overlays optional input values onto a fully-populated default
pub trait Overlay<Raw> {
    fn overlay(&self, raw: Option<&Raw>) -> Self;
}

impl Overlay<RawLayout> for LayoutConfig {
    fn overlay(&self, raw: Option<&RawLayout>) -> Self {
        let Some(raw) = raw else { return *self };
        Self {
            header: raw.header.unwrap_or(self.header),
            footer: raw.footer.unwrap_or(self.footer),
            theme_switcher: raw.theme_switcher.unwrap_or(self.theme_switcher),
        }
    }
}

impl Overlay<RawHomepage> for HomepageSections {
    fn overlay(&self, raw: Option<&RawHomepage>) -> Self {
        let Some(raw) = raw else { return *self };
        Self {
            author: raw.author.unwrap_or(self.author),
            about: raw.about.unwrap_or(self.about),
            contact: raw.contact.unwrap_or(self.contact),
            work_experience: raw.work_experience.unwrap_or(self.work_experience),
            speaking: raw.speaking.unwrap_or(self.speaking),
        }
    }
}

impl Overlay<RawWriting> for WritingSections {
    fn overlay(&self, raw: Option<&RawWriting>) -> Self {
        let Some(raw) = raw else { return *self };
        Self {
            author: raw.author.unwrap_or(self.author),
            latest_posts: raw.latest_posts.unwrap_or(self.latest_posts),
        }
    }
}

impl Overlay<RawSiteConfig> for SiteConfig {
    fn overlay(&self, raw: Option<&RawSiteConfig>) -> Self {
        let layout = raw.and_then(|r| r.layout.as_ref());
        let sections = raw.and_then(|r| r.sections.as_ref());
        Self {
            layout: self.layout.overlay(layout),
            sections: SectionsConfig {
                homepage: self
                    .sections
                    .homepage
                    .overlay(sections.and_then(|s| s.homepage.as_ref())),
                writing: self
                    .sections
                    .writing
                    .overlay(sections.and_then(|s| s.writing.as_ref())),
            },
        }
    }
}

impl Overlay<RawLegacySections> for LegacySections {
    fn overlay(&self, raw: Option<&RawLegacySections>) -> Self {
        let Some(raw) = raw else { return *self };
        Self {
            work_experience: raw.work_experience.unwrap_or(self.work_experience),
            talks: raw.talks.unwrap_or(self.talks),
            writing: raw.writing.unwrap_or(self.writing),
            social_links: raw.social_links.unwrap_or(self.social_links),
        }
    }
}

impl Overlay<RawLegacyElements> for LegacyElements {
    fn overlay(&self, raw: Option<&RawLegacyElements>) -> Self {
        let Some(raw) = raw else { return *self };
        Self {
            avatar: raw.avatar.unwrap_or(self.avatar),
            theme_switch: raw.theme_switch.unwrap_or(self.theme_switch),
            header: raw.header.unwrap_or(self.header),
            footer: raw.footer.unwrap_or(self.footer),
        }
    }
}

impl Overlay<RawLegacyConfig> for LegacySiteConfig {
    fn overlay(&self, raw: Option<&RawLegacyConfig>) -> Self {
        Self {
            sections: self
                .sections
                .overlay(raw.and_then(|r| r.sections.as_ref())),
            elements: self
                .elements
                .overlay(raw.and_then(|r| r.elements.as_ref())),
        }
    }
}
