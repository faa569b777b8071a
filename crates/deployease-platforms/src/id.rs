//! Known hosting platforms and their marker files

use serde::{Deserialize, Serialize};

/// The closed set of supported hosting platforms
///
/// Declaration order is detection priority: when markers for several
/// platforms coexist, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Netlify,
    Vercel,
    Firebase,
    #[serde(rename = "github")]
    GitHubPages,
    Cloudflare,
    Render,
    Railway,
    Koyeb,
}

impl PlatformId {
    /// All platforms in detection priority order
    pub fn all() -> &'static [PlatformId] {
        &[
            Self::Netlify,
            Self::Vercel,
            Self::Firebase,
            Self::GitHubPages,
            Self::Cloudflare,
            Self::Render,
            Self::Railway,
            Self::Koyeb,
        ]
    }

    /// Short identifier (e.g., "netlify", "github")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Netlify => "netlify",
            Self::Vercel => "vercel",
            Self::Firebase => "firebase",
            Self::GitHubPages => "github",
            Self::Cloudflare => "cloudflare",
            Self::Render => "render",
            Self::Railway => "railway",
            Self::Koyeb => "koyeb",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Netlify => "Netlify",
            Self::Vercel => "Vercel",
            Self::Firebase => "Firebase",
            Self::GitHubPages => "GitHub Pages",
            Self::Cloudflare => "Cloudflare",
            Self::Render => "Render",
            Self::Railway => "Railway",
            Self::Koyeb => "Koyeb",
        }
    }

    /// Files or directories whose presence marks a project as configured
    /// for this platform. This is the only marker table in the crate.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::Netlify => &["netlify.toml"],
            Self::Vercel => &["vercel.json"],
            Self::Firebase => &["firebase.json"],
            Self::GitHubPages => &[".github/workflows"],
            Self::Cloudflare => &["wrangler.toml"],
            Self::Render => &["render.yaml", "render.yml"],
            Self::Railway => &["railway.json"],
            Self::Koyeb => &["koyeb.yaml", "koyeb.yml"],
        }
    }

    /// Parse from the short identifier
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all().iter().copied().find(|id| id.as_str() == s)
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
