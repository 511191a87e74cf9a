use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Km,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Km];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Km => "km",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }

    /// The locale named by the first path segment. Missing or unknown
    /// segments fall back to English.
    pub fn from_path(path: &str) -> Self {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .and_then(Self::from_code)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        match self {
            Locale::En => Locale::Km,
            Locale::Km => Locale::En,
        }
    }
}

/// Rewrite the first path segment to `locale`, keeping the rest of the path.
pub fn with_locale(path: &str, locale: Locale) -> String {
    let rest = path.trim_start_matches('/');
    let rest = rest.split_once('/').map(|(_, tail)| tail);

    match rest {
        Some(tail) => format!("/{}/{tail}", locale.code()),
        None => format!("/{}", locale.code()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hints {
    pub quit: String,
    pub switch: String,
    pub pause: String,
    pub resume: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusLabels {
    pub cooldown: String,
    pub morph: String,
    pub paused: String,
}

/// All UI text for one locale.
#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    /// The language's own name for itself.
    pub language: String,
    pub title: String,
    pub tagline: String,
    /// Phrases for the morphing headline, in display order.
    pub morph: Vec<String>,
    pub hints: Hints,
    pub status: StatusLabels,
}

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("malformed {locale} bundle: {source}")]
    Parse {
        locale: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Bundle {
    pub fn load(locale: Locale) -> Result<Self, BundleError> {
        let raw = match locale {
            Locale::En => include_str!("../locales/en.json"),
            Locale::Km => include_str!("../locales/km.json"),
        };

        serde_json::from_str(raw).map_err(|source| BundleError::Parse {
            locale: locale.code(),
            source,
        })
    }
}
