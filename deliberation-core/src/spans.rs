//! Tagged-span extraction for negotiation answers
//!
//! Agents wrap the structured parts of their free-text output in marker
//! pairs:
//! - `<DEAL>…</DEAL>`: a deal proposal, any number per answer
//! - `<SCRATCHPAD>…</SCRATCHPAD>`: private reasoning, first block only
//! - `<ANSWER>…</ANSWER>`: the public reply, first block only
//!
//! Tags are case-sensitive. Scratchpad and answer bodies may span lines and
//! are trimmed. Deal bodies skip leading whitespace and cannot contain `<`.

use regex::Regex;

const DEAL_PATTERN: &str = r"<DEAL>\s*([^<]+)\s*</DEAL>";
const SCRATCHPAD_PATTERN: &str = r"(?s)<SCRATCHPAD>(.*?)</SCRATCHPAD>";
const ANSWER_PATTERN: &str = r"(?s)<ANSWER>(.*?)</ANSWER>";

/// Compiled patterns for the three tag kinds.
#[derive(Debug, Clone)]
pub struct SpanExtractor {
    deal: Regex,
    scratchpad: Regex,
    answer: Regex,
}

impl SpanExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            deal: Regex::new(DEAL_PATTERN)?,
            scratchpad: Regex::new(SCRATCHPAD_PATTERN)?,
            answer: Regex::new(ANSWER_PATTERN)?,
        })
    }

    /// All deal proposals in source order. Empty when the answer has none.
    pub fn deals(&self, text: &str) -> Vec<String> {
        self.deal
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// The first scratchpad block, trimmed.
    pub fn scratchpad(&self, text: &str) -> Option<String> {
        first_trimmed(&self.scratchpad, text)
    }

    /// The first answer block, trimmed.
    pub fn answer(&self, text: &str) -> Option<String> {
        first_trimmed(&self.answer, text)
    }
}

fn first_trimmed(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SpanExtractor {
        SpanExtractor::new().expect("patterns compile")
    }

    #[test]
    fn test_no_deals() {
        assert!(extractor().deals("I need more time to think.").is_empty());
    }

    #[test]
    fn test_two_deals_in_source_order() {
        let text = "First <DEAL>A</DEAL> then later <DEAL>B</DEAL>.";
        assert_eq!(extractor().deals(text), vec!["A", "B"]);
    }

    #[test]
    fn test_deal_skips_leading_whitespace() {
        let text = "<DEAL>\n  A1, B2, C3</DEAL>";
        assert_eq!(extractor().deals(text), vec!["A1, B2, C3"]);
    }

    #[test]
    fn test_deal_with_angle_bracket_is_not_a_match() {
        let text = "<DEAL>price <b>low</b></DEAL>";
        assert!(extractor().deals(text).is_empty());
    }

    #[test]
    fn test_deal_tags_are_case_sensitive() {
        assert!(extractor().deals("<deal>A</deal>").is_empty());
    }

    #[test]
    fn test_scratchpad_trimmed_across_lines() {
        let text = "<SCRATCHPAD>\n  line one\nline two  \n</SCRATCHPAD><ANSWER>ok</ANSWER>";
        assert_eq!(
            extractor().scratchpad(text).as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn test_missing_scratchpad_is_none() {
        assert_eq!(extractor().scratchpad("<ANSWER>hi</ANSWER>"), None);
    }

    #[test]
    fn test_empty_scratchpad_is_some_empty() {
        assert_eq!(
            extractor().scratchpad("<SCRATCHPAD>   </SCRATCHPAD>").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_answer_first_match_only() {
        let text = "<ANSWER> first </ANSWER> <ANSWER>second</ANSWER>";
        assert_eq!(extractor().answer(text).as_deref(), Some("first"));
    }

    #[test]
    fn test_unclosed_answer_is_none() {
        assert_eq!(extractor().answer("<ANSWER>never closed"), None);
    }
}
