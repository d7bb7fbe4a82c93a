use isolang::Language;

/// Language catalog for speech synthesis
///
/// This module holds the fixed, insertion-ordered set of languages the
/// synthesizer accepts, plus the caller-side policy that substitutes a
/// default language for unknown input.

/// One supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Code passed to the synthesizer (e.g. "es", "zh-CN")
    pub code: &'static str,
    /// Human readable name shown to the user and written in the stats block
    pub display_name: &'static str,
}

impl LanguageEntry {
    /// ISO 639-1 part of the code ("zh" for "zh-CN")
    pub fn iso_639_1(&self) -> &'static str {
        self.code.split('-').next().unwrap_or(self.code)
    }

    /// English name of the language according to ISO 639
    pub fn english_name(&self) -> Option<&'static str> {
        Language::from_639_1(self.iso_639_1()).map(|lang| lang.to_name())
    }

    /// Line shown in language listings: "fr: Francés (French)"
    pub fn listing_line(&self) -> String {
        match self.english_name() {
            Some(english) => format!("{}: {} ({})", self.code, self.display_name, english),
            None => format!("{}: {}", self.code, self.display_name),
        }
    }
}

static ENTRIES: [LanguageEntry; 10] = [
    LanguageEntry { code: "es", display_name: "Español" },
    LanguageEntry { code: "en", display_name: "Inglés" },
    LanguageEntry { code: "fr", display_name: "Francés" },
    LanguageEntry { code: "de", display_name: "Alemán" },
    LanguageEntry { code: "it", display_name: "Italiano" },
    LanguageEntry { code: "pt", display_name: "Portugués" },
    LanguageEntry { code: "ru", display_name: "Ruso" },
    LanguageEntry { code: "ja", display_name: "Japonés" },
    LanguageEntry { code: "ko", display_name: "Coreano" },
    LanguageEntry { code: "zh-CN", display_name: "Chino Mandarín" },
];

/// Language used when the caller asks for a default
pub const DEFAULT_LANGUAGE: &str = "es";

/// Fixed mapping from language code to display name
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageCatalog;

impl LanguageCatalog {
    /// All entries in catalog order
    pub fn entries() -> &'static [LanguageEntry] {
        &ENTRIES
    }

    /// Look up an entry by its exact code
    pub fn get(code: &str) -> Option<&'static LanguageEntry> {
        ENTRIES.iter().find(|entry| entry.code == code)
    }

    /// Check if a code is part of the catalog
    pub fn contains(code: &str) -> bool {
        Self::get(code).is_some()
    }

    /// Display name for a code
    pub fn display_name(code: &str) -> Option<&'static str> {
        Self::get(code).map(|entry| entry.display_name)
    }

    /// Codes in catalog order, joined for messages
    pub fn codes_list() -> String {
        ENTRIES.iter().map(|entry| entry.code).collect::<Vec<_>>().join(", ")
    }
}

/// Outcome of applying the default-language policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageChoice {
    /// The requested code is in the catalog
    Requested(&'static LanguageEntry),
    /// Nothing was requested, the default is used
    Defaulted(&'static LanguageEntry),
    /// The requested code is unknown, the default replaces it
    Substituted {
        /// What the user typed
        requested: String,
        /// The default that replaces it
        entry: &'static LanguageEntry,
    },
}

impl LanguageChoice {
    /// The entry that will actually be used
    pub fn entry(&self) -> &'static LanguageEntry {
        match self {
            Self::Requested(entry) | Self::Defaulted(entry) => entry,
            Self::Substituted { entry, .. } => entry,
        }
    }
}

/// Resolve user input against the catalog, substituting `default_code` for
/// empty or unknown input.
///
/// Returns `None` only when `default_code` itself is not in the catalog.
pub fn resolve_or_default(requested: Option<&str>, default_code: &str) -> Option<LanguageChoice> {
    let default_entry = LanguageCatalog::get(default_code)?;
    let requested = requested.map(str::trim).unwrap_or_default();

    if requested.is_empty() {
        return Some(LanguageChoice::Defaulted(default_entry));
    }

    match LanguageCatalog::get(requested) {
        Some(entry) => Some(LanguageChoice::Requested(entry)),
        None => Some(LanguageChoice::Substituted {
            requested: requested.to_string(),
            entry: default_entry,
        }),
    }
}
