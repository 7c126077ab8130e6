/// Canonical locale key for a user-supplied value such as `es`, `es-ES` or
/// `EN_us`. Unknown values pass through with `-` normalized to `_`.
pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or("en_US").trim();
    if raw.is_empty() {
        return "en_US".to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "es" | "es_es" | "es_mx" | "es_419" => "es_ES".to_string(),
        "en" | "en_us" | "en_gb" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiLocale {
    #[default]
    EnUs,
    EsEs,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        if normalize_locale(value) == "es_ES" {
            Self::EsEs
        } else {
            Self::EnUs
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::EsEs => "es_ES",
        }
    }

    pub fn text<'a>(self, en: &'a str, es: &'a str) -> &'a str {
        if matches!(self, Self::EsEs) {
            es
        } else {
            en
        }
    }
}
