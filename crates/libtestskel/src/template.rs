//! Templates and token substitution.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Result, SkelError};

/// Token replaced by the name of the type under test.
pub const CLASS_NAME: &str = "{className}";
/// Token replaced by the source file the type was loaded from.
pub const CLASS_FILE: &str = "{classFile}";
/// Token replaced by the generation date, `YYYY-MM-DD`.
pub const DATE: &str = "{date}";
/// Token replaced by the generation time, `HH:MM:SS`.
pub const TIME: &str = "{time}";
/// Token replaced by the capitalized method name.
pub const METHOD_NAME: &str = "{methodName}";

/// Built-in header template.
///
/// There is no `main` declaration and no self-invocation footer: the test harness supplies the
/// entry point, so the generated file runs under `cargo test` as is. The type under test is
/// pulled in through a `#[path]` module pointing at `{classFile}`.
pub const DEFAULT_CLASS_HEADER: &str = r#"//! Tests for `{className}`.
//!
//! Generated by testskel on {date} at {time}.

#![allow(non_snake_case)]

#[path = "{classFile}"]
mod subject;

#[allow(unused_imports)]
use subject::{className};

/// Test suite for `{className}`.
mod {className}Test {
    use super::*;
"#;

/// Built-in footer template.
pub const DEFAULT_CLASS_FOOTER: &str = "} // mod {className}Test\n";

/// Built-in per-method template.
pub const DEFAULT_METHOD: &str = r#"
    /// TODO: Implement test{methodName}().
    #[test]
    #[ignore = "not yet implemented"]
    fn test{methodName}() {
        todo!("test{methodName} is not yet implemented");
    }
"#;

/// Replace every occurrence of each token with its value.
///
/// Bindings are applied in order, each over the output of the previous one. Tokens with no
/// binding are left in place.
pub fn substitute(template: &str, bindings: &[(&str, &str)]) -> String {
    bindings
        .iter()
        .fold(template.to_string(), |acc, (token, value)| {
            acc.replace(*token, value)
        })
}

/// Where a template override comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The value is the template text itself.
    Literal(String),
    /// The value names a file holding the template.
    File(PathBuf),
}

impl TemplateSource {
    /// Classify an override value: an existing file is read, anything else is literal text.
    pub fn resolve(value: &str) -> Self {
        let path = Path::new(value);
        if path.is_file() {
            Self::File(path.to_path_buf())
        } else {
            Self::Literal(value.to_string())
        }
    }

    /// Produce the template text.
    pub fn load(self) -> Result<String> {
        match self {
            Self::Literal(text) => Ok(text),
            Self::File(path) => {
                fs::read_to_string(&path).map_err(|source| SkelError::TemplateLoadFailed {
                    path,
                    source,
                })
            }
        }
    }
}

/// The header, footer and per-method templates used to render a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// Emitted once, before any method.
    pub class_header: String,
    /// Emitted once, after every method.
    pub class_footer: String,
    /// Emitted for each eligible method.
    pub method: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            class_header: DEFAULT_CLASS_HEADER.to_string(),
            class_footer: DEFAULT_CLASS_FOOTER.to_string(),
            method: DEFAULT_METHOD.to_string(),
        }
    }
}

impl TemplateSet {
    /// Creates a template set holding the built-in templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use literal text for the header.
    pub fn with_class_header(mut self, text: impl Into<String>) -> Self {
        self.class_header = text.into();
        self
    }

    /// Use literal text for the footer.
    pub fn with_class_footer(mut self, text: impl Into<String>) -> Self {
        self.class_footer = text.into();
        self
    }

    /// Use literal text for the per-method block.
    pub fn with_method(mut self, text: impl Into<String>) -> Self {
        self.method = text.into();
        self
    }

    /// Replace all three templates. Each value is either a path to an existing file, whose
    /// contents become the template, or the template text itself.
    ///
    /// No template is replaced if any of the named files cannot be read.
    pub fn set_templates(
        &mut self,
        class_header: &str,
        class_footer: &str,
        method: &str,
    ) -> Result<()> {
        let class_header = TemplateSource::resolve(class_header).load()?;
        let class_footer = TemplateSource::resolve(class_footer).load()?;
        let method = TemplateSource::resolve(method).load()?;

        self.class_header = class_header;
        self.class_footer = class_footer;
        self.method = method;
        Ok(())
    }
}
