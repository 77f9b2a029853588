use crate::config::{Config, FetchSettings};

/// What to load and how long to wait for it
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Search results page to open
    pub url: String,
    /// CSS selector counted to decide whether listings have rendered
    pub card_selector: String,
    pub settings: FetchSettings,
}

impl FetchRequest {
    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.search_url.clone(),
            card_selector: "div.mb-srp__card".to_string(),
            settings: config.fetch.clone(),
        }
    }

    /// Script returning how many listing cards are currently in the DOM
    pub fn card_count_script(&self) -> String {
        // JSON string literals are valid JavaScript string literals
        let selector = serde_json::Value::String(self.card_selector.clone());
        format!("document.querySelectorAll({}).length", selector)
    }
}

/// Markup captured after scrolling, plus what it took to get it
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub html: String,
    pub cards: usize,
    pub scrolls: usize,
    pub attempts: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_count_script_quotes_selector() {
        let mut request = FetchRequest::from_config(&Config::default());
        assert_eq!(
            request.card_count_script(),
            r#"document.querySelectorAll("div.mb-srp__card").length"#
        );

        request.card_selector = r#"div[data-x="a"]"#.to_string();
        assert_eq!(
            request.card_count_script(),
            r#"document.querySelectorAll("div[data-x=\"a\"]").length"#
        );
    }
}
