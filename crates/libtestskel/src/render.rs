//! Template rendering: token bindings for each part of a skeleton.

use std::{iter, path::Path};

use chrono::NaiveDateTime;

use crate::template::{self, TemplateSet, substitute};

/// Format used for the `{date}` token.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format used for the `{time}` token.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Upper-case the first character of `name`, leaving the rest untouched. A character whose
/// upper-case form is more than one `char`, like `ß`, is kept as it is.
pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let first = match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => first,
    };
    iter::once(first).chain(chars).collect()
}

/// Renders the three parts of a skeleton from a [`TemplateSet`].
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    /// Templates to render from.
    templates: &'a TemplateSet,
}

impl<'a> Renderer<'a> {
    /// Create a renderer over a template set.
    pub fn new(templates: &'a TemplateSet) -> Self {
        Self { templates }
    }

    /// Render the header for a type loaded from `class_file`, stamped with `timestamp`.
    pub fn render_header(
        &self,
        class_name: &str,
        class_file: &Path,
        timestamp: NaiveDateTime,
    ) -> String {
        let class_file = class_file.display().to_string();
        let date = timestamp.format(DATE_FORMAT).to_string();
        let time = timestamp.format(TIME_FORMAT).to_string();
        substitute(
            &self.templates.class_header,
            &[
                (template::CLASS_NAME, class_name),
                (template::CLASS_FILE, class_file.as_str()),
                (template::DATE, date.as_str()),
                (template::TIME, time.as_str()),
            ],
        )
    }

    /// Render the footer.
    pub fn render_footer(&self, class_name: &str) -> String {
        substitute(
            &self.templates.class_footer,
            &[(template::CLASS_NAME, class_name)],
        )
    }

    /// Render one method block.
    pub fn render_method(&self, method_name: &str) -> String {
        let method_name = upper_first(method_name);
        substitute(
            &self.templates.method,
            &[(template::METHOD_NAME, method_name.as_str())],
        )
    }

    /// Render a complete skeleton: header, one block per method, footer.
    pub fn render<'m>(
        &self,
        class_name: &str,
        class_file: &Path,
        methods: impl IntoIterator<Item = &'m str>,
        timestamp: NaiveDateTime,
    ) -> String {
        let mut output = self.render_header(class_name, class_file, timestamp);
        for method in methods {
            output.push_str(&self.render_method(method));
        }
        output.push_str(&self.render_footer(class_name));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("add"), "Add");
        assert_eq!(upper_first("get_value"), "Get_value");
        assert_eq!(upper_first("alreadyCamel"), "AlreadyCamel");
        assert_eq!(upper_first("Upper"), "Upper");
        assert_eq!(upper_first("_private"), "_private");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_upper_first_non_ascii() {
        assert_eq!(upper_first("éclair"), "Éclair");
        assert_eq!(upper_first("ßeta"), "ßeta");
        assert_eq!(upper_first("ŉame"), "ŉame");
    }

    #[test]
    fn test_render_header_tokens() {
        let templates =
            TemplateSet::new().with_class_header("{className}|{classFile}|{date}|{time}|{other}");
        let renderer = Renderer::new(&templates);
        assert_eq!(
            renderer.render_header("Calculator", Path::new("src/calculator.rs"), timestamp()),
            "Calculator|src/calculator.rs|2024-03-07|09:05:03|{other}"
        );
    }

    #[test]
    fn test_footer_and_method_only_know_their_tokens() {
        let templates = TemplateSet::new()
            .with_class_footer("end {className} {methodName}")
            .with_method("test{methodName} in {className}");
        let renderer = Renderer::new(&templates);
        assert_eq!(
            renderer.render_footer("Calculator"),
            "end Calculator {methodName}"
        );
        assert_eq!(
            renderer.render_method("subtract"),
            "testSubtract in {className}"
        );
    }

    #[test]
    fn test_render_concatenates_parts() {
        let templates = TemplateSet::new()
            .with_class_header("[{className}]")
            .with_method("<{methodName}>")
            .with_class_footer("[/{className}]");
        let renderer = Renderer::new(&templates);
        assert_eq!(
            renderer.render("Calc", Path::new("calc.rs"), ["add", "sub"], timestamp()),
            "[Calc]<Add><Sub>[/Calc]"
        );
        assert_eq!(
            renderer.render("Calc", Path::new("calc.rs"), Vec::<&str>::new(), timestamp()),
            "[Calc][/Calc]"
        );
    }

    #[test]
    fn test_default_method_template() {
        let templates = TemplateSet::new();
        let block = Renderer::new(&templates).render_method("add");
        assert!(block.contains("fn testAdd() {"));
        assert!(block.contains("todo!(\"testAdd is not yet implemented\")"));
        assert!(block.contains("#[test]"));
    }
}
