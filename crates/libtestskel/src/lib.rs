//! Generates stub test files for Rust types.
//!
//! Given the name of a type and the source file that defines it, testskel finds the public,
//! concrete, user-written methods declared directly on that type and emits a test file with one
//! placeholder test for each. The output is assembled from three templates (a header, a
//! per-method block and a footer) with simple `{token}` substitution, and every template can be
//! replaced with literal text or the contents of a file.
//!
//! Types are discovered by parsing the source with `syn`, so no compilation is involved. A
//! [`TypeDescriptor`] can also be built by hand and handed to [`Skeleton::from_descriptor`].

mod descriptor;
mod error;
pub mod filter;
pub mod highlight;
pub mod loader;
mod render;
mod skeleton;
pub mod template;

pub use crate::{
    descriptor::{MethodDescriptor, TypeDescriptor, TypeKind, TypeRegistry, Visibility},
    error::{Result, SkelError},
    render::{Renderer, upper_first},
    skeleton::Skeleton,
    template::{TemplateSet, TemplateSource, substitute},
};
