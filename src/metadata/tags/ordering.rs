//! Accumulation-order configuration for per-tag member lists.

use crate::metadata::tags::{builtin, TagKind};

/// The closed set of tag kinds whose member lists resolve root-to-leaf.
///
/// The class model walks a hierarchy from the leaf class upward, so per-tag member
/// lists naturally accumulate most-derived first. Setup-style tags need the opposite:
/// base-class setup has to execute before subclass setup, because a subclass method
/// may rely on state its ancestors establish. Members carrying a reverse-order kind
/// are therefore inserted at the front of their list during the fold, while teardown
/// style tags keep the default subclass-first ordering.
///
/// The policy is fixed configuration: it is captured when a class model is built and
/// applies to both member registries of that model. The registry itself hardcodes no
/// tag identities.
///
/// # Examples
///
/// ```rust
/// use testscope::metadata::tags::{OrderingPolicy, TagKind};
///
/// const INIT: TagKind = TagKind::new("init");
/// let policy = OrderingPolicy::new([INIT]);
/// assert!(policy.is_reverse(INIT));
/// assert!(!policy.is_reverse(TagKind::new("teardown")));
/// ```
#[derive(Debug, Clone)]
pub struct OrderingPolicy {
    reverse: Vec<TagKind>,
}

impl OrderingPolicy {
    /// Creates a policy with the given reverse-order tag kinds.
    #[must_use]
    pub fn new(reverse: impl IntoIterator<Item = TagKind>) -> Self {
        Self {
            reverse: reverse.into_iter().collect(),
        }
    }

    /// Whether members carrying `kind` resolve root-to-leaf.
    #[must_use]
    pub fn is_reverse(&self, kind: TagKind) -> bool {
        self.reverse.contains(&kind)
    }

    /// The configured reverse-order kinds.
    #[must_use]
    pub fn reverse_kinds(&self) -> &[TagKind] {
        &self.reverse
    }
}

impl Default for OrderingPolicy {
    /// The framework default: both setup vocabulary kinds resolve root-to-leaf.
    fn default() -> Self {
        Self::new([builtin::BEFORE_EACH, builtin::BEFORE_ALL])
    }
}
