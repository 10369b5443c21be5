//! Ordered, shadow-resolved member registries.
//!
//! A registry is the second pass of discovery: the class model accumulates one
//! candidate per declared member while walking the hierarchy leaf-to-root, then folds
//! the whole sequence in here. Folding resolves shadowing (a more-derived candidate
//! suppresses same-signature candidates offered later), drops members whose resolved
//! tag set is empty, and maintains the per-tag-kind lists with their configured
//! accumulation direction.
//!
//! Splitting accumulation from folding keeps the ordering rules in one place and
//! testable without a hierarchy.

use std::collections::HashMap;

use crate::metadata::tags::{OrderingPolicy, Tag, TagKind};

/// Shadowing and tagging surface a member exposes to the registry fold.
///
/// This is population machinery, not an API: the shadow comparison is only ever
/// evaluated between candidates of the same kind during a fold.
pub(crate) trait RegisteredMember: Clone {
    /// Whether `self` (offered earlier, i.e. more derived) shadows `other`.
    fn shadows(&self, other: &Self) -> bool;

    /// The member's resolved tag set.
    fn tags(&self) -> &[Tag];
}

/// Ordered member lists for one member kind of one class model.
#[derive(Debug)]
pub(crate) struct MemberRegistry<M> {
    all: Vec<M>,
    by_kind: HashMap<TagKind, Vec<M>>,
}

impl<M: RegisteredMember> MemberRegistry<M> {
    /// A registry with no members, for the absent-class model.
    pub(crate) fn empty() -> Self {
        Self {
            all: Vec::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Folds hierarchy candidates into final ordered lists.
    ///
    /// `candidates` must be in hierarchy-walk order: most-derived class first,
    /// declaration order within each class. Every candidate takes part in shadow
    /// resolution; only candidates with a non-empty tag set appear in the lists.
    pub(crate) fn build(candidates: Vec<M>, policy: &OrderingPolicy) -> Self {
        let mut registry = Self::empty();
        let mut slots: Vec<M> = Vec::new();

        for candidate in candidates {
            if slots.iter().any(|slot| slot.shadows(&candidate)) {
                continue;
            }
            slots.push(candidate.clone());

            if candidate.tags().is_empty() {
                continue;
            }
            registry.all.push(candidate.clone());

            let mut kinds_done: Vec<TagKind> = Vec::new();
            for tag in candidate.tags() {
                let kind = tag.kind();
                if kinds_done.contains(&kind) {
                    continue;
                }
                kinds_done.push(kind);

                let list = registry.by_kind.entry(kind).or_default();
                if policy.is_reverse(kind) {
                    list.insert(0, candidate.clone());
                } else {
                    list.push(candidate.clone());
                }
            }
        }

        registry
    }

    /// All tagged members, shadow-resolved, in resolution order.
    pub(crate) fn all(&self) -> &[M] {
        &self.all
    }

    /// The members carrying `kind`, shadow-resolved, in the kind's accumulation
    /// order. Empty when no member carries the kind.
    pub(crate) fn with_kind(&self, kind: TagKind) -> &[M] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tags::builtin;

    #[derive(Clone, Debug, PartialEq)]
    struct Candidate {
        name: &'static str,
        tags: Vec<Tag>,
    }

    impl Candidate {
        fn new(name: &'static str, kinds: &[TagKind]) -> Self {
            Self {
                name,
                tags: kinds.iter().map(|kind| Tag::marker(*kind)).collect(),
            }
        }
    }

    impl RegisteredMember for Candidate {
        fn shadows(&self, other: &Self) -> bool {
            self.name == other.name
        }

        fn tags(&self) -> &[Tag] {
            &self.tags
        }
    }

    fn names(members: &[Candidate]) -> Vec<&'static str> {
        members.iter().map(|member| member.name).collect()
    }

    #[test]
    fn untagged_candidate_wins_its_slot_but_contributes_nothing() {
        let candidates = vec![
            Candidate::new("m", &[]),
            Candidate::new("m", &[builtin::TEST]),
        ];
        let registry = MemberRegistry::build(candidates, &OrderingPolicy::default());
        assert!(registry.all().is_empty());
        assert!(registry.with_kind(builtin::TEST).is_empty());
    }

    #[test]
    fn shadowed_candidate_is_skipped_with_position_preserved() {
        let candidates = vec![
            Candidate::new("a", &[builtin::TEST]),
            Candidate::new("b", &[builtin::TEST]),
            Candidate::new("a", &[builtin::TEST]),
        ];
        let registry = MemberRegistry::build(candidates, &OrderingPolicy::default());
        assert_eq!(names(registry.all()), ["a", "b"]);
        assert_eq!(names(registry.with_kind(builtin::TEST)), ["a", "b"]);
    }

    #[test]
    fn reverse_kinds_accumulate_front_first() {
        let candidates = vec![
            Candidate::new("derived_setup", &[builtin::BEFORE_EACH]),
            Candidate::new("base_setup", &[builtin::BEFORE_EACH]),
        ];
        let registry = MemberRegistry::build(candidates, &OrderingPolicy::default());
        assert_eq!(
            names(registry.with_kind(builtin::BEFORE_EACH)),
            ["base_setup", "derived_setup"]
        );
    }

    #[test]
    fn normal_kinds_keep_walk_order() {
        let candidates = vec![
            Candidate::new("derived_teardown", &[builtin::AFTER_EACH]),
            Candidate::new("base_teardown", &[builtin::AFTER_EACH]),
        ];
        let registry = MemberRegistry::build(candidates, &OrderingPolicy::default());
        assert_eq!(
            names(registry.with_kind(builtin::AFTER_EACH)),
            ["derived_teardown", "base_teardown"]
        );
    }

    #[test]
    fn duplicate_kinds_on_one_member_insert_once() {
        let candidates = vec![Candidate::new("m", &[builtin::TEST, builtin::TEST])];
        let registry = MemberRegistry::build(candidates, &OrderingPolicy::default());
        assert_eq!(registry.with_kind(builtin::TEST).len(), 1);
    }

    #[test]
    fn absent_kind_yields_empty_slice() {
        let registry: MemberRegistry<Candidate> =
            MemberRegistry::build(Vec::new(), &OrderingPolicy::default());
        assert!(registry.with_kind(builtin::RULE).is_empty());
    }
}
