//! Method eligibility rules.
//!
//! A method gets a test stub only when it is a public, concrete, user-written method declared on
//! the type itself. Constructors, trait methods, derive output and anything non-public are left
//! out.

use crate::descriptor::{MethodDescriptor, TypeDescriptor, Visibility};

/// Whether `method` should receive a test stub when generating for `class_name`.
pub fn is_eligible(method: &MethodDescriptor, class_name: &str) -> bool {
    !method.is_constructor
        && !method.is_abstract
        && method.is_user_defined
        && method.visibility == Visibility::Public
        && method.declaring_type == class_name
}

/// Names of the eligible methods of `descriptor`, in listing order.
pub fn eligible_methods(descriptor: &TypeDescriptor) -> Vec<&str> {
    descriptor
        .methods
        .iter()
        .filter(|method| is_eligible(method, &descriptor.name))
        .map(|method| method.name.as_str())
        .collect()
}
