use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` waits for the service indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: None }
    }
}

impl ClientConfig {
    /// Reads `CMA_BASE_URL` and `CMA_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(base) = get("CMA_BASE_URL") {
            if !base.trim().is_empty() {
                cfg.base_url = base.trim().to_string();
            }
        }
        if let Some(timeout) = get("CMA_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.trim().parse::<u64>() {
                cfg.timeout = Some(Duration::from_secs(parsed));
            }
        }
        cfg
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base) = base_url {
            self.base_url = base;
        }
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn generate_content_url(&self) -> String {
        self.endpoint("/api/generate-content")
    }

    pub fn guided_questions_url(&self) -> String {
        self.endpoint("/api/guided-questions")
    }

    pub fn health_url(&self) -> String {
        self.endpoint("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_to_localhost_without_timeout() {
        let cfg = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.base_url, "http://localhost:8000");
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.generate_content_url(), "http://localhost:8000/api/generate-content");
    }

    #[test]
    fn env_overrides_and_trailing_slash() {
        let cfg = ClientConfig::from_lookup(lookup(&[("CMA_BASE_URL", "https://cm.example.com/"), ("CMA_TIMEOUT_SECS", "90")]));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(90)));
        assert_eq!(cfg.guided_questions_url(), "https://cm.example.com/api/guided-questions");
        assert_eq!(cfg.health_url(), "https://cm.example.com/");
    }

    #[test]
    fn unparseable_timeout_is_ignored() {
        let cfg = ClientConfig::from_lookup(lookup(&[("CMA_TIMEOUT_SECS", "soon")]));
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn flag_overrides_env() {
        let cfg = ClientConfig::default().with_base_url(Some("http://10.0.0.2:9000".into()));
        assert_eq!(cfg.generate_content_url(), "http://10.0.0.2:9000/api/generate-content");
    }
}
