use std::fmt;

use crate::DiscoveryParams;

/// Navigation ref tag attached to a project opened from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefTag(String);

impl RefTag {
    pub fn discovery() -> Self {
        Self("discovery".to_string())
    }

    /// Tag describing the feed context the params select.
    pub fn for_params(params: &DiscoveryParams) -> Self {
        let mut tag = if params.is_saved_projects() {
            "starred".to_string()
        } else if let Some(category) = params.category() {
            format!("category_{}", category.slug)
        } else {
            "discovery".to_string()
        };
        if let Some(sort) = params.sort() {
            tag.push_str(sort.ref_tag_suffix());
        }
        Self(tag)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
