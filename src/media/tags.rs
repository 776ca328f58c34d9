use std::collections::HashMap;

/// The two embedded tags this server reports and strips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSummary {
    pub title: String,
    pub comment: String,
}

impl TagSummary {
    /// Pull `title` and `comment` (falling back to `comments`) out of a probe's
    /// tag map. Tag names match case-insensitively; empty values count as absent.
    pub fn from_tags(tags: &HashMap<String, String>) -> Self {
        let title = lookup(tags, "title");
        let comment = lookup(tags, "comment").or_else(|| lookup(tags, "comments"));
        Self {
            title: title.unwrap_or_default(),
            comment: comment.unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.comment.is_empty()
    }
}

/// Non-empty value of the tag named `name` in any letter case.
/// When several spellings carry a value (`title` and `TITLE`), the
/// lexicographically smallest key wins so the choice is stable.
fn lookup(tags: &HashMap<String, String>, name: &str) -> Option<String> {
    tags.iter()
        .filter(|(key, value)| key.eq_ignore_ascii_case(name) && !value.is_empty())
        .min_by(|a, b| a.0.cmp(b.0))
        .map(|(_, value)| value.clone())
}
