//! Platform dispatch tables.
//!
//! A dispatch table maps platform tags to install-instruction producers.
//! Entries are evaluated in declaration order and the first one whose tag
//! is in the machine's tag set wins; `other_platforms` catches everything
//! else. Only the winning producer ever runs, and only once.

use std::fmt;
use std::sync::OnceLock;

/// Tag name of the catch-all entry.
pub const OTHER_PLATFORMS: &str = "other_platforms";

/// The tag an entry is declared for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchTag {
    /// Matches when the platform tag set contains this tag.
    Platform(String),
    /// Matches when no platform-specific entry did.
    OtherPlatforms,
}

impl From<&str> for DispatchTag {
    fn from(tag: &str) -> Self {
        if tag == OTHER_PLATFORMS {
            DispatchTag::OtherPlatforms
        } else {
            DispatchTag::Platform(tag.to_string())
        }
    }
}

impl fmt::Display for DispatchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchTag::Platform(tag) => f.write_str(tag),
            DispatchTag::OtherPlatforms => f.write_str(OTHER_PLATFORMS),
        }
    }
}

/// Produces install instructions for one platform.
pub type InstructionsProducer = Box<dyn Fn() -> String + Send + Sync>;

struct DispatchEntry {
    tag: DispatchTag,
    produce: InstructionsProducer,
}

/// Ordered platform → instructions table with a dispatch-once guard.
#[derive(Default)]
pub struct DispatchTable {
    entries: Vec<DispatchEntry>,
    dispatched: OnceLock<Option<String>>,
}

impl DispatchTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, tag: DispatchTag, produce: InstructionsProducer) {
        self.entries.push(DispatchEntry { tag, produce });
    }

    /// Declared tags, in order.
    pub fn tags(&self) -> Vec<&DispatchTag> {
        self.entries.iter().map(|e| &e.tag).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the table for declaration mistakes.
    ///
    /// Rejects empty tags, duplicate tags (the later one could never run)
    /// and a catch-all that is not the final entry.
    pub fn validate(&self) -> Result<(), String> {
        for (index, entry) in self.entries.iter().enumerate() {
            if let DispatchTag::Platform(tag) = &entry.tag {
                if tag.trim().is_empty() {
                    return Err(format!("dispatch entry {} has an empty tag", index));
                }
            }
            if self.entries[..index].iter().any(|e| e.tag == entry.tag) {
                return Err(format!("dispatch tag '{}' is declared twice", entry.tag));
            }
            if entry.tag == DispatchTag::OtherPlatforms && index + 1 != self.entries.len() {
                return Err(format!("'{}' must be the last dispatch entry", OTHER_PLATFORMS));
            }
        }
        Ok(())
    }

    /// Run the matching producer for `platform_tags`.
    ///
    /// The first call decides; later calls return the same answer without
    /// running any producer, whatever tags they pass.
    pub fn resolve(&self, platform_tags: &[String]) -> Option<String> {
        self.dispatched
            .get_or_init(|| {
                let entry = self.select(platform_tags)?;
                tracing::debug!("Dispatching install instructions for tag '{}'", entry.tag);
                Some((entry.produce)())
            })
            .clone()
    }

    /// Whether [`resolve`](Self::resolve) has already run.
    pub fn is_dispatched(&self) -> bool {
        self.dispatched.get().is_some()
    }

    fn select(&self, platform_tags: &[String]) -> Option<&DispatchEntry> {
        self.entries
            .iter()
            .find(|e| match &e.tag {
                DispatchTag::Platform(tag) => platform_tags.contains(tag),
                DispatchTag::OtherPlatforms => false,
            })
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.tag == DispatchTag::OtherPlatforms)
            })
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("tags", &self.tags())
            .field("dispatched", &self.dispatched.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn counting(text: &'static str, counter: &Arc<AtomicUsize>) -> InstructionsProducer {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            text.to_string()
        })
    }

    #[test]
    fn first_matching_entry_wins_and_runs_once() {
        let debian = Arc::new(AtomicUsize::new(0));
        let other = Arc::new(AtomicUsize::new(0));
        let mut table = DispatchTable::new();
        table.push("debian".into(), counting("apt", &debian));
        table.push(DispatchTag::OtherPlatforms, counting("other", &other));

        let platform = tags(&["ubuntu", "debian"]);
        assert_eq!(table.resolve(&platform).as_deref(), Some("apt"));
        assert_eq!(table.resolve(&platform).as_deref(), Some("apt"));

        assert_eq!(debian.load(Ordering::SeqCst), 1);
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn declaration_order_beats_tag_order() {
        let mut table = DispatchTable::new();
        table.push("debian".into(), Box::new(|| "debian".to_string()));
        table.push("ubuntu".into(), Box::new(|| "ubuntu".to_string()));

        let resolved = table.resolve(&tags(&["ubuntu", "debian"]));
        assert_eq!(resolved.as_deref(), Some("debian"));
    }

    #[test]
    fn other_platforms_catches_the_rest() {
        let mut table = DispatchTable::new();
        table.push("debian".into(), Box::new(|| "apt".to_string()));
        table.push(DispatchTag::OtherPlatforms, Box::new(|| "download".to_string()));

        assert_eq!(table.resolve(&tags(&["macosx"])).as_deref(), Some("download"));
    }

    #[test]
    fn no_match_resolves_to_none() {
        let mut table = DispatchTable::new();
        table.push("gentoo".into(), Box::new(|| "emerge".to_string()));

        assert!(table.resolve(&tags(&["fedora", "redhat"])).is_none());
        assert!(table.is_dispatched());
    }

    #[test]
    fn decision_is_sticky_across_tag_sets() {
        let mut table = DispatchTable::new();
        table.push("debian".into(), Box::new(|| "apt".to_string()));
        table.push("redhat".into(), Box::new(|| "yum".to_string()));

        assert_eq!(table.resolve(&tags(&["debian"])).as_deref(), Some("apt"));
        assert_eq!(table.resolve(&tags(&["redhat"])).as_deref(), Some("apt"));
    }

    #[test]
    fn tag_from_str() {
        assert_eq!(DispatchTag::from("other_platforms"), DispatchTag::OtherPlatforms);
        assert_eq!(
            DispatchTag::from("debian"),
            DispatchTag::Platform("debian".to_string())
        );
    }

    #[test]
    fn validate_accepts_well_formed_table() {
        let mut table = DispatchTable::new();
        table.push("debian".into(), Box::new(String::new));
        table.push("redhat".into(), Box::new(String::new));
        table.push(DispatchTag::OtherPlatforms, Box::new(String::new));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_tag() {
        let mut table = DispatchTable::new();
        table.push("".into(), Box::new(String::new));
        assert!(table.validate().unwrap_err().contains("empty tag"));
    }

    #[test]
    fn validate_rejects_duplicate_tag() {
        let mut table = DispatchTable::new();
        table.push("debian".into(), Box::new(String::new));
        table.push("debian".into(), Box::new(String::new));
        assert!(table.validate().unwrap_err().contains("declared twice"));
    }

    #[test]
    fn validate_rejects_catch_all_before_specific_entries() {
        let mut table = DispatchTable::new();
        table.push(DispatchTag::OtherPlatforms, Box::new(String::new));
        table.push("debian".into(), Box::new(String::new));
        assert!(table.validate().unwrap_err().contains("last"));
    }
}
