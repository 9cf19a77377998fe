//! Introspection model for the types a skeleton is generated from.

use serde::{Deserialize, Serialize};

/// Visibility of a method as declared in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Plain `pub`.
    Public,
    /// `pub(crate)`, `pub(super)` or `pub(in ..)`.
    Restricted,
    /// No visibility modifier.
    Private,
}

impl From<&syn::Visibility> for Visibility {
    fn from(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => Self::Public,
            syn::Visibility::Restricted(_) => Self::Restricted,
            syn::Visibility::Inherited => Self::Private,
        }
    }
}

/// Kind of item a [`TypeDescriptor`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// `struct` definition.
    Struct,
    /// `enum` definition.
    Enum,
    /// `union` definition.
    Union,
    /// `trait` definition.
    Trait,
}

/// A single method as seen on a type, with the attributes the eligibility filter inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name, with any raw identifier prefix removed.
    pub name: String,
    /// Associated function that builds the type.
    pub is_constructor: bool,
    /// Trait method without a default body.
    pub is_abstract: bool,
    /// False for methods synthesized by derives or marked `#[automatically_derived]`.
    pub is_user_defined: bool,
    /// Declared visibility.
    pub visibility: Visibility,
    /// The type or trait the method is declared on.
    pub declaring_type: String,
}

impl MethodDescriptor {
    /// A public, concrete, user-defined method declared on `declaring_type`.
    pub fn new(name: impl Into<String>, declaring_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_constructor: false,
            is_abstract: false,
            is_user_defined: true,
            visibility: Visibility::Public,
            declaring_type: declaring_type.into(),
        }
    }

    /// Mark the method as a constructor.
    pub fn constructor(mut self, is_constructor: bool) -> Self {
        self.is_constructor = is_constructor;
        self
    }

    /// Mark the method as abstract.
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Mark the method as user-defined or synthesized.
    pub fn user_defined(mut self, is_user_defined: bool) -> Self {
        self.is_user_defined = is_user_defined;
        self
    }

    /// Set the declared visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Everything known about one type: its name, kind and methods in listing order.
///
/// Descriptors are normally produced by [`crate::loader`], but can be assembled by hand and
/// passed to [`crate::Skeleton::from_descriptor`] when the type is described some other way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name.
    pub name: String,
    /// Item kind.
    pub kind: TypeKind,
    /// Methods in listing order.
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Create a descriptor with no methods.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            methods: Vec::new(),
        }
    }

    /// Append a method to the listing.
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}

/// The types defined by one loaded source file, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRegistry {
    /// Registered types.
    types: Vec<TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. A name that is already registered keeps its first definition.
    pub fn insert(&mut self, descriptor: TypeDescriptor) {
        if !self.contains(&descriptor.name) {
            self.types.push(descriptor);
        }
    }

    /// Look up a type by exact name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Mutable lookup by exact name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeDescriptor> {
        self.types.iter_mut().find(|t| t.name == name)
    }

    /// Whether a type with this name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove and return a type by name.
    pub fn take(&mut self, name: &str) -> Option<TypeDescriptor> {
        let pos = self.types.iter().position(|t| t.name == name)?;
        Some(self.types.remove(pos))
    }

    /// Registered types in declaration order.
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types were registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registry_keeps_first_definition() {
        let mut registry = TypeRegistry::new();
        registry.insert(TypeDescriptor::new("Foo", TypeKind::Struct));
        registry.insert(TypeDescriptor::new("Bar", TypeKind::Enum));
        registry.insert(TypeDescriptor::new("Foo", TypeKind::Trait));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Foo").map(|t| t.kind), Some(TypeKind::Struct));
        assert!(registry.contains("Bar"));
        assert!(!registry.contains("foo"));
    }

    #[test]
    fn test_registry_take() {
        let mut registry = TypeRegistry::new();
        registry.insert(TypeDescriptor::new("Foo", TypeKind::Struct));
        assert!(registry.take("Foo").is_some());
        assert!(registry.take("Foo").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_visibility_from_syn() {
        let public: syn::Visibility = syn::parse_quote!(pub);
        let restricted: syn::Visibility = syn::parse_quote!(pub(crate));
        assert_eq!(Visibility::from(&public), Visibility::Public);
        assert_eq!(Visibility::from(&restricted), Visibility::Restricted);
        assert_eq!(
            Visibility::from(&syn::Visibility::Inherited),
            Visibility::Private
        );
    }

    #[test]
    fn test_method_builder_defaults() {
        let method = MethodDescriptor::new("add", "Calculator");
        assert!(method.is_user_defined);
        assert!(!method.is_constructor);
        assert!(!method.is_abstract);
        assert_eq!(method.visibility, Visibility::Public);
    }
}
