//! Builds a [`TypeRegistry`] from Rust source.
//!
//! The loader walks the items of a parsed file, including inline `mod` blocks, and records every
//! `struct`, `enum`, `union` and `trait`. Methods are then attached from each `impl` block in
//! source order, followed by the methods synthesized by well-known derives. An impl block only
//! contributes to the type its self type resolves to, so same-named types in sibling modules do
//! not share methods.

use std::{
    collections::{HashMap, HashSet},
    fs, mem,
    path::Path,
};

use syn::{
    Attribute, GenericArgument, ImplItem, Item, ItemImpl, ItemTrait, Meta, PathArguments,
    ReturnType, Signature, Token, TraitItem, Type, TypeParamBound, ext::IdentExt,
    punctuated::Punctuated,
};
use tracing::{debug, warn};

use crate::{
    descriptor::{MethodDescriptor, TypeDescriptor, TypeKind, TypeRegistry, Visibility},
    error::Result,
};

/// Methods contributed by derives, as `(derive, method)` pairs.
const DERIVED_METHODS: &[(&str, &str)] = &[
    ("Clone", "clone"),
    ("Debug", "fmt"),
    ("Default", "default"),
    ("PartialEq", "eq"),
    ("PartialOrd", "partial_cmp"),
    ("Ord", "cmp"),
    ("Hash", "hash"),
    ("Serialize", "serialize"),
    ("Deserialize", "deserialize"),
];

/// A module path within the parsed file, outermost first. The file root is empty.
type ModulePath = Vec<String>;

/// Items gathered in the first pass over a file.
#[derive(Default)]
struct Collected<'a> {
    /// Types in declaration order.
    registry: TypeRegistry,
    /// Module holding the registered definition of each type name.
    origins: HashMap<String, ModulePath>,
    /// Every type declaration, registered or shadowed, as `(module, name)`.
    declared: HashSet<(ModulePath, String)>,
    /// Derive names per registered type.
    derives: Vec<(String, Vec<String>)>,
    /// Every impl block with its enclosing module, in source order.
    impls: Vec<(ModulePath, &'a ItemImpl)>,
}

impl Collected<'_> {
    /// Note a declaration and report whether it is the first one with this name.
    fn declare(&mut self, module: &[String], name: &str) -> bool {
        self.declared.insert((module.to_vec(), name.to_string()));
        if self.registry.contains(name) {
            return false;
        }
        self.origins.insert(name.to_string(), module.to_vec());
        true
    }

    /// Whether an impl in `module` naming `path` targets the registered type called `name`.
    ///
    /// A path that resolves to a declaration in this file must resolve to the registered one.
    /// Any other path, such as a name brought in by `use`, is accepted only when the file
    /// declares that name once.
    fn targets_registered(&self, module: &[String], path: &syn::Path, name: &str) -> bool {
        let Some(origin) = self.origins.get(name) else {
            return false;
        };
        let resolved = resolve_module(module, path);
        if self.declared.contains(&(resolved.clone(), name.to_string())) {
            return resolved == *origin;
        }
        self.declared.iter().filter(|(_, n)| n == name).count() == 1
    }
}

/// Parse Rust source text and register the types it defines.
pub fn load_source(source: &str) -> Result<TypeRegistry> {
    let file = syn::parse_file(source)?;
    let mut collected = Collected::default();
    collect_items(&file.items, &[], &mut collected);

    let mut registry = mem::take(&mut collected.registry);
    for (module, item_impl) in &collected.impls {
        let Some(path) = self_type_path(&item_impl.self_ty) else {
            continue;
        };
        let Some(type_name) = path.segments.last().map(|s| s.ident.unraw().to_string()) else {
            continue;
        };
        if !collected.targets_registered(module, path, &type_name) {
            continue;
        }
        attach_impl(&mut registry, &type_name, item_impl);
    }

    for (name, derived) in collected.derives {
        let Some(descriptor) = registry.get_mut(&name) else {
            continue;
        };
        for derive in derived {
            let synthesized = DERIVED_METHODS
                .iter()
                .filter(|(d, _)| *d == derive)
                .map(|(d, method)| MethodDescriptor::new(*method, *d).user_defined(false));
            descriptor.methods.extend(synthesized);
        }
    }

    debug!("registered {} types", registry.len());
    Ok(registry)
}

/// Read and parse a source file.
pub fn load_file(path: &Path) -> Result<TypeRegistry> {
    let source = fs::read_to_string(path)?;
    load_source(&source)
}

/// Load a file, logging rather than returning any failure. A file that cannot be read or
/// parsed yields an empty registry.
pub fn load_file_lossy(path: &Path) -> TypeRegistry {
    match load_file(path) {
        Ok(registry) => registry,
        Err(e) => {
            warn!("could not load {}: {}", path.display(), e);
            TypeRegistry::new()
        }
    }
}

/// Record types, derives and impls from a list of items, descending into inline modules.
fn collect_items<'a>(items: &'a [Item], module: &[String], collected: &mut Collected<'a>) {
    for item in items {
        match item {
            Item::Struct(s) => register(collected, module, &s.ident, TypeKind::Struct, &s.attrs),
            Item::Enum(e) => register(collected, module, &e.ident, TypeKind::Enum, &e.attrs),
            Item::Union(u) => register(collected, module, &u.ident, TypeKind::Union, &u.attrs),
            Item::Trait(t) => register_trait(collected, module, t),
            Item::Impl(i) => collected.impls.push((module.to_vec(), i)),
            Item::Mod(m) => {
                if let Some((_, content)) = &m.content {
                    let mut inner = module.to_vec();
                    inner.push(m.ident.unraw().to_string());
                    collect_items(content, &inner, collected);
                }
            }
            _ => {}
        }
    }
}

/// Register a struct, enum or union along with its derives.
fn register(
    collected: &mut Collected<'_>,
    module: &[String],
    ident: &syn::Ident,
    kind: TypeKind,
    attrs: &[Attribute],
) {
    let name = ident.unraw().to_string();
    if !collected.declare(module, &name) {
        return;
    }
    collected.derives.push((name.clone(), derive_names(attrs)));
    collected.registry.insert(TypeDescriptor::new(name, kind));
}

/// Register a trait with the methods it declares.
fn register_trait(collected: &mut Collected<'_>, module: &[String], item: &ItemTrait) {
    let name = item.ident.unraw().to_string();
    if !collected.declare(module, &name) {
        return;
    }
    let visibility = Visibility::from(&item.vis);
    let mut descriptor = TypeDescriptor::new(name.clone(), TypeKind::Trait);
    for trait_item in &item.items {
        if let TraitItem::Fn(f) = trait_item {
            descriptor.methods.push(
                MethodDescriptor::new(f.sig.ident.unraw().to_string(), name.clone())
                    .constructor(is_constructor(&f.sig, &name))
                    .with_abstract(f.default.is_none())
                    .with_visibility(visibility),
            );
        }
    }
    collected.registry.insert(descriptor);
}

/// Attach the methods of an impl block to the registered type `type_name`.
fn attach_impl(registry: &mut TypeRegistry, type_name: &str, item: &ItemImpl) {
    let Some(descriptor) = registry.get_mut(type_name) else {
        return;
    };

    let trait_name = item
        .trait_
        .as_ref()
        .and_then(|(_, path, _)| path.segments.last())
        .map(|segment| segment.ident.unraw().to_string());
    let user_defined = !has_attr(&item.attrs, "automatically_derived");

    for impl_item in &item.items {
        let ImplItem::Fn(f) = impl_item else {
            continue;
        };
        // Trait methods are as visible as the trait itself.
        let visibility = match trait_name {
            Some(_) => Visibility::Public,
            None => Visibility::from(&f.vis),
        };
        descriptor.methods.push(
            MethodDescriptor::new(
                f.sig.ident.unraw().to_string(),
                trait_name.as_deref().unwrap_or(type_name),
            )
            .constructor(is_constructor(&f.sig, type_name))
            .user_defined(user_defined)
            .with_visibility(visibility),
        );
    }
}

/// Path of the type an impl block targets: a plain path type, or the principal trait of a
/// `dyn Trait` object.
fn self_type_path(ty: &Type) -> Option<&syn::Path> {
    match ty {
        Type::Path(p) if p.qself.is_none() => Some(&p.path),
        Type::TraitObject(object) => object.bounds.iter().find_map(|bound| match bound {
            TypeParamBound::Trait(bound) => Some(&bound.path),
            _ => None,
        }),
        Type::Paren(p) => self_type_path(&p.elem),
        Type::Group(g) => self_type_path(&g.elem),
        _ => None,
    }
}

/// Module a path's final segment lives in, read relative to `module`. `crate`, `self` and
/// `super` prefixes are honoured.
fn resolve_module(module: &[String], path: &syn::Path) -> ModulePath {
    let mut resolved = if path.leading_colon.is_some() {
        Vec::new()
    } else {
        module.to_vec()
    };
    let prefix = path.segments.len().saturating_sub(1);
    for segment in path.segments.iter().take(prefix) {
        let ident = segment.ident.unraw().to_string();
        match ident.as_str() {
            "crate" => resolved.clear(),
            "self" => {}
            "super" => {
                resolved.pop();
            }
            _ => resolved.push(ident),
        }
    }
    resolved
}

/// An associated function without a receiver that returns the type itself, directly or wrapped
/// once in `Option`, `Result` or `Box`.
fn is_constructor(sig: &Signature, type_name: &str) -> bool {
    if sig.receiver().is_some() {
        return false;
    }
    match &sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => returns_self(ty, type_name, true),
    }
}

/// Whether `ty` names `Self` or `type_name`, optionally looking through a single wrapper.
fn returns_self(ty: &Type, type_name: &str, through_wrapper: bool) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(last) = path.path.segments.last() else {
        return false;
    };
    let ident = last.ident.unraw().to_string();
    if ident == "Self" || ident == type_name {
        return true;
    }
    if !through_wrapper || !matches!(ident.as_str(), "Option" | "Result" | "Box") {
        return false;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => returns_self(inner, type_name, false),
            _ => false,
        },
        _ => false,
    }
}

/// Names listed in `#[derive(..)]` attributes, by last path segment. Derives nested in
/// `#[cfg_attr(..)]` count whatever their predicate.
fn derive_names(attrs: &[Attribute]) -> Vec<String> {
    let mut names = Vec::new();
    for attr in attrs {
        collect_derives(&attr.meta, &mut names);
    }
    names
}

/// Append the derives named by one attribute meta item.
fn collect_derives(meta: &Meta, names: &mut Vec<String>) {
    let Meta::List(list) = meta else {
        return;
    };
    if list.path.is_ident("derive") {
        if let Ok(paths) =
            list.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        {
            names.extend(
                paths
                    .iter()
                    .filter_map(|path| path.segments.last().map(|s| s.ident.unraw().to_string())),
            );
        }
    } else if list.path.is_ident("cfg_attr") {
        // The first entry is the predicate.
        if let Ok(nested) = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) {
            for inner in nested.iter().skip(1) {
                collect_derives(inner, names);
            }
        }
    }
}

/// Whether an attribute with the given single-segment name is present.
fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
