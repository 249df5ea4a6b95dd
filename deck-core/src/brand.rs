//! Brand kit - the per-project ambient theme.
//!
//! A brand kit is created once per project and read at resolution time.
//! It is never mutated by template application or by the resolver.

use serde::{Deserialize, Serialize};

/// Which brand kit color a brand-bindable style field draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandColorRole {
    /// The primary brand color.
    Primary,
    /// The secondary brand color.
    Secondary,
    /// The accent brand color.
    Accent,
}

/// Read-only brand identity snapshot for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandKit {
    /// Primary brand color as hex.
    pub primary_color: String,
    /// Secondary brand color as hex.
    pub secondary_color: String,
    /// Accent brand color as hex.
    pub accent_color: String,
    /// Brand font family (CSS font stack).
    pub font_family: String,
    /// Logo URL, if the project has uploaded one.
    pub logo_url: Option<String>,
}

impl BrandKit {
    /// Look up the color for a given role.
    #[must_use]
    pub fn color(&self, role: BrandColorRole) -> &str {
        match role {
            BrandColorRole::Primary => &self.primary_color,
            BrandColorRole::Secondary => &self.secondary_color,
            BrandColorRole::Accent => &self.accent_color,
        }
    }
}
