//! Discovered methods and their resolved tag sets.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::BoxedError;
use crate::metadata::class::members::RegisteredMember;
use crate::metadata::descriptor::{ClassDescriptorRc, MethodDescriptor, TypeDesc};
use crate::metadata::tags::{Tag, TagKind};
use crate::Error;

/// One discovered method of a class hierarchy.
///
/// Wraps the declared [`MethodDescriptor`] together with its declaring class and the
/// tag set resolved across the hierarchy: the tags written at the declaration site,
/// enriched with tags from same-signature non-private ancestor declarations, where a
/// tag kind already contributed by a more-derived declaration masks the ancestor's
/// tag of that kind. A declaration site without direct tags resolves to the empty
/// set: it wins its shadow slot but contributes nothing.
///
/// Created once per declared member during the hierarchy walk; immutable.
#[derive(Clone)]
pub struct TestMethod {
    declaring: ClassDescriptorRc,
    descriptor: Arc<MethodDescriptor>,
    tags: Arc<[Tag]>,
}

impl TestMethod {
    pub(crate) fn new(
        declaring: ClassDescriptorRc,
        descriptor: Arc<MethodDescriptor>,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            declaring,
            descriptor,
            tags: tags.into(),
        }
    }

    /// The method's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// The class this method is declared in.
    #[must_use]
    pub fn declaring_class(&self) -> &ClassDescriptorRc {
        &self.declaring
    }

    /// The underlying declared member.
    #[must_use]
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// The resolved tag set of this method.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The resolved tag of the given kind, if this method carries one.
    #[must_use]
    pub fn tag(&self, kind: TagKind) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.kind() == kind)
    }

    /// Whether the declaration is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.descriptor.modifiers().is_public()
    }

    /// Whether the declaration is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.descriptor.modifiers().is_static()
    }

    /// The method's return type.
    #[must_use]
    pub fn return_type(&self) -> TypeDesc {
        self.descriptor.returns()
    }

    /// The method's parameter types.
    #[must_use]
    pub fn params(&self) -> &[TypeDesc] {
        self.descriptor.params()
    }

    /// Invokes the method on `target` (`None` for static methods).
    ///
    /// The body's own failure is returned unwrapped; the class model's collecting
    /// operations add the member name.
    pub fn invoke(
        &self,
        target: Option<&dyn Any>,
    ) -> std::result::Result<Box<dyn Any>, BoxedError> {
        self.descriptor.invoke(target)
    }

    /// Whether this method shadows `other`: same name, same parameter signature.
    ///
    /// Only meaningful when `self` is declared further down the hierarchy than
    /// `other`; the registry guarantees that during population.
    #[must_use]
    pub fn shadows_method(&self, other: &TestMethod) -> bool {
        self.descriptor.same_signature(other.descriptor())
    }

    /// Appends a shape complaint to `errors` for each violated constraint:
    /// wrong staticness (against `require_static`), non-public visibility, or a
    /// non-void return type.
    pub fn validate_public_void(&self, require_static: bool, errors: &mut Vec<Error>) {
        if self.is_static() != require_static {
            let state = if require_static { "should" } else { "should not" };
            errors.push(invalid_member_error!(
                "Method {}() {} be static",
                self.name(),
                state
            ));
        }
        if !self.is_public() {
            errors.push(invalid_member_error!(
                "Method {}() should be public",
                self.name()
            ));
        }
        if !self.return_type().is_void() {
            errors.push(invalid_member_error!(
                "Method {}() should be void",
                self.name()
            ));
        }
    }

    /// Like [`validate_public_void`](Self::validate_public_void), additionally
    /// requiring an empty parameter list.
    pub fn validate_public_void_no_arg(&self, require_static: bool, errors: &mut Vec<Error>) {
        self.validate_public_void(require_static, errors);
        if !self.params().is_empty() {
            errors.push(invalid_member_error!(
                "Method {} should have no parameters",
                self.name()
            ));
        }
    }
}

impl RegisteredMember for TestMethod {
    fn shadows(&self, other: &Self) -> bool {
        self.shadows_method(other)
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl PartialEq for TestMethod {
    fn eq(&self, other: &Self) -> bool {
        self.declaring.id() == other.declaring.id()
            && self.descriptor.same_signature(other.descriptor())
    }
}

impl Eq for TestMethod {}

impl Hash for TestMethod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring.id().hash(state);
        self.descriptor.name().hash(state);
        self.descriptor.params().hash(state);
    }
}

impl fmt::Debug for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMethod")
            .field("declaring", &self.declaring.fullname())
            .field("name", &self.descriptor.name())
            .field("tags", &self.tags)
            .finish()
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring.fullname(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::descriptor::ClassBuilder;
    use crate::metadata::tags::builtin;

    struct Receiver;

    fn method_named(name: &str) -> TestMethod {
        let class = ClassBuilder::new("Holder")
            .method(|method| {
                method
                    .name(name)
                    .public()
                    .tag(Tag::marker(builtin::TEST))
                    .invoke_on(|_: &Receiver| Ok(()))
            })
            .build()
            .unwrap();
        TestMethod::new(
            class.clone(),
            class.methods()[0].clone(),
            class.methods()[0].tags().to_vec(),
        )
    }

    #[test]
    fn display_prints_method_name() {
        let method = method_named("dummy_method");
        assert!(method.to_string().contains("dummy_method"));
    }

    #[test]
    fn present_tag_is_available() {
        let method = method_named("tagged");
        assert!(method.tag(builtin::TEST).is_some());
        assert!(method.tag(builtin::RULE).is_none());
    }

    #[test]
    fn validates_staticness_both_ways() {
        let method = method_named("run");

        let mut errors = Vec::new();
        method.validate_public_void(false, &mut errors);
        assert!(errors.is_empty());

        let mut errors = Vec::new();
        method.validate_public_void(true, &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("should be static"));
    }

    #[test]
    fn validates_arity() {
        let class = ClassBuilder::new("Holder")
            .method(|method| method.name("takes_arg").public().parameter::<i32>())
            .build()
            .unwrap();
        let method = TestMethod::new(class.clone(), class.methods()[0].clone(), Vec::new());

        let mut errors = Vec::new();
        method.validate_public_void_no_arg(false, &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("should have no parameters"));
    }

    #[test]
    fn invoke_without_body_reports_failure() {
        let class = ClassBuilder::new("Holder")
            .method(|method| method.name("bodyless").public())
            .build()
            .unwrap();
        let method = TestMethod::new(class.clone(), class.methods()[0].clone(), Vec::new());
        assert!(method.invoke(None).is_err());
    }
}
