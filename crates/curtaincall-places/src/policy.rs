//! Allow/deny list classification of candidate names.

use curtaincall_core::ListConfig;

/// Result of matching a display name against the operator lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub blacklisted: bool,
    pub whitelisted: bool,
}

impl Classification {
    /// Promotion requires a whitelist hit and no blacklist hit.
    #[must_use]
    pub fn is_promoted(self) -> bool {
        self.whitelisted && !self.blacklisted
    }
}

/// Case-insensitive substring match of `name` against both lists.
#[must_use]
pub fn classify(name: &str, lists: &ListConfig) -> Classification {
    let name = name.to_lowercase();
    let matches_any = |terms: &[String]| terms.iter().any(|term| name.contains(term.as_str()));

    Classification {
        blacklisted: matches_any(lists.blacklist()),
        whitelisted: matches_any(lists.whitelist()),
    }
}
