//! Tag model for test-relevant member discovery.
//!
//! This module contains the types used to represent annotation-style tags attached to
//! declared members, the tag argument values they may carry, and the ordering policy
//! that controls in which direction per-tag member lists accumulate across a class
//! hierarchy.
//!
//! # Key Components
//!
//! - [`TagKind`] - Interned identity of a tag category
//! - [`Tag`] - One tag attached to a declaration site, optionally carrying a [`TagValue`]
//! - [`TagValue`] - Argument payload of a tag (index of an injected parameter, etc.)
//! - [`OrderingPolicy`] - The closed set of tag kinds whose member lists resolve
//!   root-to-leaf instead of leaf-to-root
//! - [`builtin`] - The framework's default tag vocabulary
//!
//! # Examples
//!
//! ```rust
//! use testscope::metadata::tags::{builtin, OrderingPolicy, Tag, TagValue};
//!
//! let marker = Tag::marker(builtin::TEST);
//! let indexed = Tag::with_value(builtin::PARAMETER, TagValue::Int(0));
//! assert_eq!(marker.kind(), builtin::TEST);
//! assert_eq!(indexed.value().and_then(|v| v.as_int()), Some(0));
//!
//! let policy = OrderingPolicy::default();
//! assert!(policy.is_reverse(builtin::BEFORE_EACH));
//! assert!(!policy.is_reverse(builtin::AFTER_EACH));
//! ```

mod ordering;
mod types;

pub use ordering::OrderingPolicy;
pub use types::{builtin, Tag, TagKind, TagValue};
