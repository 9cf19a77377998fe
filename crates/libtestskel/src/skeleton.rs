//! The skeleton generator.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use heck::ToSnakeCase;
use tracing::debug;

use crate::{
    descriptor::TypeDescriptor,
    error::{Result, SkelError},
    filter::eligible_methods,
    loader::load_file_lossy,
    render::Renderer,
    template::TemplateSet,
};

/// Skeleton generates a stub test file for a single type.
///
/// The type is resolved once, at construction, from the Rust source file that defines it. Each
/// public, concrete, user-written method declared directly on the type becomes one placeholder
/// test, and the whole is wrapped in a header and footer. All three parts come from a
/// [`TemplateSet`] that can be replaced at any time before generating.
///
/// ```no_run
/// use libtestskel::Skeleton;
///
/// let skeleton = Skeleton::new("Calculator", None)?;
/// skeleton.write(None)?;
/// # Ok::<(), libtestskel::SkelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Name of the type under test.
    class_name: String,

    /// Source file the type was loaded from.
    class_source_file: PathBuf,

    /// Introspected view of the type.
    descriptor: TypeDescriptor,

    /// Templates used by every render.
    templates: TemplateSet,
}

impl Skeleton {
    /// Resolve `class_name` from `class_source_file`.
    ///
    /// When no source file is given, the snake-cased class name with an `.rs` extension is used,
    /// so `HttpClient` is looked up in `http_client.rs`.
    ///
    /// Fails with [`SkelError::SourceFileNotFound`] if the file does not exist. Reading and
    /// parsing are best-effort: any failure there is logged and surfaces as
    /// [`SkelError::ClassNotFound`], as does a file that simply does not define the type.
    pub fn new(class_name: &str, class_source_file: Option<&Path>) -> Result<Self> {
        let class_source_file = class_source_file
            .filter(|path| !path.as_os_str().is_empty())
            .map_or_else(|| Self::default_source_file(class_name), Path::to_path_buf);

        if !class_source_file.exists() {
            return Err(SkelError::SourceFileNotFound(class_source_file));
        }

        let mut registry = load_file_lossy(&class_source_file);
        let descriptor = registry
            .take(class_name)
            .ok_or_else(|| SkelError::ClassNotFound {
                class: class_name.to_string(),
                file: class_source_file.clone(),
            })?;

        debug!(
            "resolved {} in {} with {} methods",
            class_name,
            class_source_file.display(),
            descriptor.methods.len()
        );

        Ok(Self::from_descriptor(descriptor, class_source_file))
    }

    /// Build a skeleton from a descriptor the caller has already assembled. No file is read;
    /// `class_source_file` is only used for the `{classFile}` token.
    pub fn from_descriptor(
        descriptor: TypeDescriptor,
        class_source_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            class_name: descriptor.name.clone(),
            class_source_file: class_source_file.into(),
            descriptor,
            templates: TemplateSet::default(),
        }
    }

    /// Source file assumed for `class_name` when none is given.
    pub fn default_source_file(class_name: &str) -> PathBuf {
        PathBuf::from(format!("{}.rs", class_name.to_snake_case()))
    }

    /// Output file used by [`Self::write`] when none is given.
    pub fn default_output_file(class_name: &str) -> PathBuf {
        PathBuf::from(format!("{}_test.rs", class_name.to_snake_case()))
    }

    /// Replace the template set.
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    /// Replace the header, footer and method templates. Each value is a path to an existing
    /// file, whose contents are used, or the template text itself.
    pub fn set_templates(
        &mut self,
        class_header: &str,
        class_footer: &str,
        method: &str,
    ) -> Result<()> {
        self.templates.set_templates(class_header, class_footer, method)
    }

    /// Templates currently in use.
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Name of the type under test.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Source file the type was resolved from.
    pub fn class_source_file(&self) -> &Path {
        &self.class_source_file
    }

    /// Introspected view of the type.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Names of the methods that receive a test stub, in listing order.
    pub fn methods(&self) -> Vec<&str> {
        eligible_methods(&self.descriptor)
    }

    /// Render the skeleton, stamping the header with the current local date and time.
    pub fn generate(&self) -> String {
        self.generate_at(Local::now().naive_local())
    }

    /// Render the skeleton with an explicit timestamp for the `{date}` and `{time}` tokens.
    pub fn generate_at(&self, timestamp: NaiveDateTime) -> String {
        let methods = self.methods();
        debug!(
            "rendering {} test stubs for {}",
            methods.len(),
            self.class_name
        );
        Renderer::new(&self.templates).render(
            &self.class_name,
            &self.class_source_file,
            methods,
            timestamp,
        )
    }

    /// Generate the skeleton and write it to `output`, replacing any existing file. Without an
    /// output path, [`Self::default_output_file`] is used. Returns the path written.
    pub fn write(&self, output: Option<&Path>) -> Result<PathBuf> {
        let path = output
            .filter(|path| !path.as_os_str().is_empty())
            .map_or_else(
                || Self::default_output_file(&self.class_name),
                Path::to_path_buf,
            );

        fs::write(&path, self.generate()).map_err(|source| SkelError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        debug!("wrote skeleton for {} to {}", self.class_name, path.display());
        Ok(path)
    }

    /// Returns the type descriptor as pretty-printed JSON.
    pub fn raw_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.descriptor)?)
    }
}
