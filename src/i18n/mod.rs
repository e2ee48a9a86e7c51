//! i18n - Internationalization Module
//!
//! Message lookups backed by the `rust-i18n` catalogue in `locales/`.

use rust_i18n::t;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Chinese (Simplified)
    ZhCN,
}

impl Locale {
    /// Catalogue code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCN => "zh-CN",
        }
    }

    /// Map a language tag such as `zh_CN.UTF-8`, `zh-Hans` or `en-US`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "zh" => Some(Locale::ZhCN),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Configured tag if recognized, else the OS locale, else English
    pub fn resolve(configured: Option<&str>) -> Self {
        configured
            .and_then(Self::from_tag)
            .or_else(Self::detect)
            .unwrap_or_default()
    }

    /// Detect from the operating system
    pub fn detect() -> Option<Self> {
        let current = locale_config::Locale::current().to_string();
        current.split(',').find_map(|tag| {
            // Entries may be category-qualified, e.g. "messages=zh-CN"
            let tag = tag.rsplit('=').next().unwrap_or(tag);
            Self::from_tag(tag)
        })
    }
}

/// Translate `key` for `locale`
pub fn tr(locale: Locale, key: &str) -> String {
    t!(key, locale = locale.code()).to_string()
}

/// Translate `key` and fill its `%{name}` placeholders
///
/// # Example
/// ```ignore
/// // With "notify.employee_added" = "Employee %{name} added"
/// tr_format(Locale::En, "notify.employee_added", &[("name", "张三")])
/// // Returns "Employee 张三 added"
/// ```
pub fn tr_format(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let (patterns, values): (Vec<&str>, Vec<String>) =
        args.iter().map(|(name, value)| (*name, value.to_string())).unzip();
    rust_i18n::replace_patterns(&tr(locale, key), &patterns, &values)
}
