//! Keyword lookup over free-text handling rules. A caller may consult this
//! before dispatching to annotate fragile or heavy-item handling; the
//! assignment and routing core never reads it.

use std::fs;
use std::io;
use std::path::Path;

pub const STANDARD_ADVICE: &str = "No exact rule found; follow standard handling procedures.";

pub struct KnowledgeBase {
    rules: Vec<String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        KnowledgeBase::new(vec![
            "Fragile items: slow speed, avoid fast turns.".to_string(),
            "Heavy items (>20kg): require two robots and check battery > 50%.".to_string(),
            "Electronics: keep dry and avoid magnetic interference.".to_string(),
        ])
    }
}

impl KnowledgeBase {
    pub fn new(rules: Vec<String>) -> KnowledgeBase {
        KnowledgeBase { rules }
    }
    /// One rule per non-empty line.
    pub fn from_file(path: &Path) -> io::Result<KnowledgeBase> {
        let rules = fs::read_to_string(path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(KnowledgeBase::new(rules))
    }
    pub fn rules(&self) -> &[String] {
        &self.rules
    }
    /// Rules containing any whitespace-separated keyword of the query,
    /// case-insensitive. Falls back to the standard-procedures advice when
    /// nothing matches.
    pub fn query(&self, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        let keywords = query.split_whitespace().collect::<Vec<_>>();

        let matches = self
            .rules
            .iter()
            .filter(|rule| {
                let rule = rule.to_lowercase();
                keywords.iter().any(|keyword| rule.contains(keyword))
            })
            .cloned()
            .collect::<Vec<_>>();

        if matches.is_empty() {
            vec![STANDARD_ADVICE.to_string()]
        } else {
            matches
        }
    }
}
