use tracing::info;

use crate::locale::{self, Bundle, BundleError, Locale};

/// Route and translation state shared by every part of the UI.
///
/// Passed explicitly to whatever needs it; nothing reads locale from a global.
#[derive(Debug, Clone)]
pub struct UiSession {
    path: String,
    locale: Locale,
    bundle: Bundle,
}

impl UiSession {
    pub fn from_path(path: &str) -> Result<Self, BundleError> {
        let locale = Locale::from_path(path);

        Ok(Self {
            path: path.to_string(),
            locale,
            bundle: Bundle::load(locale)?,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// Move to `locale`, rewriting the path. Returns `false` when already
    /// there, in which case nothing is reloaded.
    pub fn switch_locale(&mut self, locale: Locale) -> Result<bool, BundleError> {
        if locale == self.locale {
            return Ok(false);
        }

        let bundle = Bundle::load(locale)?;
        self.path = locale::with_locale(&self.path, locale);
        self.locale = locale;
        self.bundle = bundle;

        info!(path = %self.path, "switched locale");
        Ok(true)
    }
}
