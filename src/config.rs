//! Site configuration. Defaults match the published page; a handful of keys
//! can be overridden through `data-*` attributes on `<body>`.

use crate::error::UiError;

/// Whether the section scale-in replays on every forward entry or only the
/// first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleInPolicy {
    Once,
    EveryEntry,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    /// Space left above a section when navigating to it.
    pub header_offset: f64,
    pub indicator_scroll_ms: f64,
    pub menu_scroll_ms: f64,
    pub link_stagger_ms: f64,
    pub scale_in: ScaleInPolicy,
    pub loader_delay_ms: u32,
    pub modal_reload_ms: u32,
    pub resume_url: String,
    pub resume_title: String,
    pub certificate_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_offset: 100.0,
            indicator_scroll_ms: 1200.0,
            menu_scroll_ms: 1500.0,
            link_stagger_ms: 100.0,
            scale_in: ScaleInPolicy::Once,
            loader_delay_ms: 400,
            modal_reload_ms: 10,
            resume_url: "/assets/cv/srijan-pandey-cv.pdf".to_string(),
            resume_title: "Srijan_Pandey_Resume.pdf".to_string(),
            certificate_title: "Certificate.pdf".to_string(),
        }
    }
}

impl SiteConfig {
    /// Build from defaults, overriding whatever `lookup` (a `dataset` reader)
    /// provides. Unparseable values keep the default and are reported back.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<UiError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut problems = Vec::new();

        if let Some(url) = non_empty(lookup("resumeUrl")) {
            config.resume_url = url;
        }
        if let Some(title) = non_empty(lookup("resumeTitle")) {
            config.resume_title = title;
        }
        if let Some(raw) = lookup("headerOffset") {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => config.header_offset = v,
                _ => problems.push(UiError::InvalidConfig {
                    key: "data-header-offset",
                    value: raw,
                }),
            }
        }
        if let Some(raw) = lookup("loaderDelay") {
            match raw.trim().parse::<u32>() {
                Ok(v) => config.loader_delay_ms = v,
                Err(_) => problems.push(UiError::InvalidConfig {
                    key: "data-loader-delay",
                    value: raw,
                }),
            }
        }
        if let Some(raw) = lookup("scaleIn") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "once" => config.scale_in = ScaleInPolicy::Once,
                "every" => config.scale_in = ScaleInPolicy::EveryEntry,
                _ => problems.push(UiError::InvalidConfig {
                    key: "data-scale-in",
                    value: raw,
                }),
            }
        }

        (config, problems)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_dataset_gives_defaults() {
        let (config, problems) = SiteConfig::from_lookup(|_| None);
        assert_eq!(config, SiteConfig::default());
        assert!(problems.is_empty());
    }

    #[test]
    fn overrides_apply() {
        let (config, problems) = SiteConfig::from_lookup(lookup_from(&[
            ("resumeUrl", "/cv.pdf"),
            ("headerOffset", " 64 "),
            ("scaleIn", "EVERY"),
            ("loaderDelay", "0"),
        ]));
        assert!(problems.is_empty());
        assert_eq!(config.resume_url, "/cv.pdf");
        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.scale_in, ScaleInPolicy::EveryEntry);
        assert_eq!(config.loader_delay_ms, 0);
        assert_eq!(config.resume_title, "Srijan_Pandey_Resume.pdf");
    }

    #[test]
    fn bad_values_keep_defaults_and_are_reported() {
        let (config, problems) = SiteConfig::from_lookup(lookup_from(&[
            ("headerOffset", "lots"),
            ("scaleIn", "sometimes"),
            ("resumeTitle", "   "),
        ]));
        assert_eq!(config.header_offset, 100.0);
        assert_eq!(config.scale_in, ScaleInPolicy::Once);
        assert_eq!(config.resume_title, "Srijan_Pandey_Resume.pdf");
        assert_eq!(problems.len(), 2);
    }
}
