use serde::{Deserialize, Serialize};

/// Resolved site configuration
///
/// Every flag is always defined. Page rendering reads these to decide which
/// layout elements and sections to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub layout: LayoutConfig,
    pub sections: SectionsConfig,
}

/// Layout element toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Render the site header
    pub header: bool,

    /// Render the site footer
    pub footer: bool,

    /// Render the light/dark theme switcher
    pub theme_switcher: bool,
}

/// Section toggles grouped by page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsConfig {
    pub homepage: HomepageSections,
    pub writing: WritingSections,
}

/// Homepage section toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageSections {
    pub author: bool,
    pub about: bool,
    pub contact: bool,
    pub work_experience: bool,
    pub speaking: bool,
}

/// Writing page section toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingSections {
    pub author: bool,
    pub latest_posts: bool,
}

/// Defaults for the site profile: everything enabled
pub const DEFAULT_SITE_CONFIG: SiteConfig = SiteConfig {
    layout: LayoutConfig {
        header: true,
        footer: true,
        theme_switcher: true,
    },
    sections: SectionsConfig {
        homepage: HomepageSections {
            author: true,
            about: true,
            contact: true,
            work_experience: true,
            speaking: true,
        },
        writing: WritingSections {
            author: true,
            latest_posts: true,
        },
    },
};

impl Default for SiteConfig {
    fn default() -> Self {
        DEFAULT_SITE_CONFIG
    }
}

/// Resolved configuration for the older `config.yml` layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySiteConfig {
    pub sections: LegacySections,
    pub elements: LegacyElements,
}

/// Top-level page sections of the legacy layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySections {
    pub work_experience: bool,
    pub talks: bool,
    pub writing: bool,
    pub social_links: bool,
}

/// Page chrome elements of the legacy layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyElements {
    pub avatar: bool,
    pub theme_switch: bool,
    pub header: bool,
    pub footer: bool,
}

/// Defaults for the legacy profile: everything enabled
pub const DEFAULT_LEGACY_CONFIG: LegacySiteConfig = LegacySiteConfig {
    sections: LegacySections {
        work_experience: true,
        talks: true,
        writing: true,
        social_links: true,
    },
    elements: LegacyElements {
        avatar: true,
        theme_switch: true,
        header: true,
        footer: true,
    },
};

impl Default for LegacySiteConfig {
    fn default() -> Self {
        DEFAULT_LEGACY_CONFIG
    }
}

// Raw input shapes. Every field is optional and unknown keys are dropped.

/// Raw site configuration as read from the source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSiteConfig {
    pub layout: Option<RawLayout>,
    pub sections: Option<RawSections>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLayout {
    pub header: Option<bool>,
    pub footer: Option<bool>,
    pub theme_switcher: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSections {
    pub homepage: Option<RawHomepage>,
    pub writing: Option<RawWriting>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHomepage {
    pub author: Option<bool>,
    pub about: Option<bool>,
    pub contact: Option<bool>,
    pub work_experience: Option<bool>,
    pub speaking: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWriting {
    pub author: Option<bool>,
    pub latest_posts: Option<bool>,
}

/// Raw legacy configuration as read from the source
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLegacyConfig {
    pub sections: Option<RawLegacySections>,
    pub elements: Option<RawLegacyElements>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLegacySections {
    pub work_experience: Option<bool>,
    pub talks: Option<bool>,
    pub writing: Option<bool>,
    pub social_links: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLegacyElements {
    pub avatar: Option<bool>,
    pub theme_switch: Option<bool>,
    pub header: Option<bool>,
    pub footer: Option<bool>,
}
