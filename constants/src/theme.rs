use serde::{Deserialize, Serialize};

/// Which procedural scene a theme shows behind the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Strip,
    Shapes,
    Circuit,
    CodeRain,
}

impl BackgroundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strip => "strip",
            Self::Shapes => "shapes",
            Self::Circuit => "circuit",
            Self::CodeRain => "coderain",
        }
    }
}

pub struct ThemeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub hero_title: &'static str,
    pub description: &'static str,
    pub primary: u32,
    pub secondary: u32,
    pub accent: u32,
    pub background: BackgroundKind,
}

impl ThemeInfo {
    pub fn accents(&self) -> [u32; 3] {
        [self.primary, self.secondary, self.accent]
    }
}

/// Themes in cycling order.
pub const THEMES: &[ThemeInfo] = &[
    ThemeInfo {
        id: "ai",
        name: "AI Solutions Specialist",
        hero_title: "AI Solutions Specialist",
        description: "Building intelligent systems that learn and adapt",
        primary: 0x6366f1,
        secondary: 0x818cf8,
        accent: 0x4f46e5,
        background: BackgroundKind::Strip,
    },
    ThemeInfo {
        id: "multimedia",
        name: "Multimedia Designer",
        hero_title: "Multimedia Designer",
        description: "Creating stunning visual experiences that captivate",
        primary: 0xec4899,
        secondary: 0xf472b6,
        accent: 0xdb2777,
        background: BackgroundKind::Shapes,
    },
    ThemeInfo {
        id: "automation",
        name: "Automation Expert",
        hero_title: "Automation Expert",
        description: "Streamlining workflows with smart automation",
        primary: 0x10b981,
        secondary: 0x34d399,
        accent: 0x059669,
        background: BackgroundKind::Circuit,
    },
    ThemeInfo {
        id: "webdev",
        name: "Web Developer",
        hero_title: "Web Developer",
        description: "Crafting responsive and dynamic web solutions",
        primary: 0xf59e0b,
        secondary: 0xfbbf24,
        accent: 0xd97706,
        background: BackgroundKind::CodeRain,
    },
];

pub fn find_theme(id: &str) -> Option<usize> {
    THEMES.iter().position(|t| t.id.eq_ignore_ascii_case(id))
}
