//! Built-in demo card.

use unveil_core::{Granularity, LineSet, RevealConfig};

/// File name shown in the demo card's title bar
pub const DEMO_TITLE: &str = "~/portfolio/hero.jsx";

/// Lines of the demo card
pub const DEMO_LINES: [&str; 9] = [
    "const researcher = {",
    "  name: \"Ada Researcher\",",
    "  role: \"AI Research Engineer\",",
    "  focus: [\"Reinforcement Learning\", \"Computer Vision\", \"Autonomous Systems\"],",
    "  location: \"Abu Dhabi, UAE\",",
    "  email: \"researcher@example.com\",",
    "};",
    "",
    "// run: npm run research --fast",
];

/// Badges under the demo code
pub const DEMO_TAGS: [&str; 8] = [
    "PyTorch",
    "OpenCV",
    "PPO",
    "NumPy",
    "HuggingFace",
    "GCP",
    "TensorFlow",
    "VertexAI",
];

/// Per-unit delay of the demo card
pub const DEMO_CHAR_DELAY_MS: f64 = 22.0;

/// Inter-line pause of the demo card
pub const DEMO_LINE_DELAY_MS: f64 = 300.0;

/// Demo lines split with `granularity`
#[must_use]
pub fn demo_lines(granularity: Granularity) -> LineSet {
    LineSet::with_granularity(DEMO_LINES, granularity)
}

/// Demo badges as owned strings
#[must_use]
pub fn demo_tags() -> Vec<String> {
    DEMO_TAGS.iter().map(|t| (*t).to_string()).collect()
}

/// Default config with the demo card's timing
#[must_use]
pub fn demo_config() -> RevealConfig {
    RevealConfig::new().with_timing(DEMO_CHAR_DELAY_MS, DEMO_LINE_DELAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_demo_lines() {
        let lines = demo_lines(Granularity::Char);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines.line(7), Some(""));
        assert_eq!(lines.line(8), Some("// run: npm run research --fast"));
    }

    #[test]
    fn test_demo_config_timing() {
        let timing = demo_config().timing();
        assert_eq!(timing.char_delay, Duration::from_millis(22));
        assert_eq!(timing.line_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_demo_tags() {
        let tags = demo_tags();
        assert_eq!(tags.len(), 8);
        assert_eq!(tags[0], "PyTorch");
    }
}
