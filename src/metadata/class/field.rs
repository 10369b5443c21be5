//! Discovered fields.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::metadata::class::members::RegisteredMember;
use crate::metadata::descriptor::{ClassDescriptorRc, FieldDescriptor, TypeDesc};
use crate::metadata::tags::{Tag, TagKind};

/// One discovered field of a class hierarchy.
///
/// Wraps the declared [`FieldDescriptor`] together with its declaring class. Unlike
/// methods, a field's tag set is resolved at the declaration site only: a shadowing
/// redeclaration either carries a tag or it does not, and nothing merges across the
/// hierarchy.
///
/// Created once per declared member during the hierarchy walk; immutable.
#[derive(Clone)]
pub struct TestField {
    declaring: ClassDescriptorRc,
    descriptor: Arc<FieldDescriptor>,
    tags: Arc<[Tag]>,
}

impl TestField {
    pub(crate) fn new(declaring: ClassDescriptorRc, descriptor: Arc<FieldDescriptor>) -> Self {
        let tags = descriptor.tags().to_vec();
        Self {
            declaring,
            descriptor,
            tags: tags.into(),
        }
    }

    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// The class this field is declared in.
    #[must_use]
    pub fn declaring_class(&self) -> &ClassDescriptorRc {
        &self.declaring
    }

    /// The underlying declared member.
    #[must_use]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// The field's tag set.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The tag of the given kind, if this field carries one.
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

    /// The field's type.
    #[must_use]
    pub fn ty(&self) -> TypeDesc {
        self.descriptor.ty()
    }

    /// Reads the field's value from `target`.
    ///
    /// # Panics
    /// Panics when the field cannot be read. Discovery only hands out fields it
    /// vouches for, so an unreadable field here is an internal-consistency fault,
    /// not a recoverable condition.
    #[must_use]
    pub fn read(&self, target: &dyn Any) -> Box<dyn Any> {
        match self.descriptor.read(target) {
            Some(value) => value,
            None => panic!(
                "discovery vouched for field `{}` but it cannot be read",
                self.name()
            ),
        }
    }

    /// Writes `value` into the field on `target`.
    ///
    /// Returns `false` when the field has no setter, or when the receiver or the
    /// value is not of the expected type.
    #[must_use]
    pub fn write(&self, target: &mut dyn Any, value: &dyn Any) -> bool {
        self.descriptor.write(target, value)
    }

    /// Whether this field shadows `other`: fields shadow by name alone.
    #[must_use]
    pub fn shadows_field(&self, other: &TestField) -> bool {
        self.name() == other.name()
    }
}

impl RegisteredMember for TestField {
    fn shadows(&self, other: &Self) -> bool {
        self.shadows_field(other)
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl PartialEq for TestField {
    fn eq(&self, other: &Self) -> bool {
        self.declaring.id() == other.declaring.id() && self.name() == other.name()
    }
}

impl Eq for TestField {}

impl fmt::Debug for TestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestField")
            .field("declaring", &self.declaring.fullname())
            .field("name", &self.descriptor.name())
            .field("tags", &self.tags)
            .finish()
    }
}

impl fmt::Display for TestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring.fullname(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::descriptor::ClassBuilder;

    struct Holder {
        label: String,
    }

    fn label_field() -> TestField {
        let class = ClassBuilder::new("Holder")
            .field(|field| field.name("label").public().get(|h: &Holder| h.label.clone()))
            .build()
            .unwrap();
        TestField::new(class.clone(), class.fields()[0].clone())
    }

    #[test]
    fn reads_value_through_any() {
        let field = label_field();
        let instance = Holder {
            label: "andromeda".to_string(),
        };
        let value = field.read(&instance);
        assert_eq!(*value.downcast::<String>().unwrap(), "andromeda");
    }

    #[test]
    #[should_panic(expected = "cannot be read")]
    fn wrong_receiver_is_an_internal_fault() {
        let field = label_field();
        let _ = field.read(&42i32);
    }

    #[test]
    fn fields_shadow_by_name() {
        let field = label_field();
        let other = label_field();
        assert!(field.shadows_field(&other));
    }
}
