// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the pub items.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use libtestskel::{Skeleton, TemplateSet};
use pretty_assertions::assert_eq;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Fixed timestamp used wherever output is compared verbatim.
pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(14, 30, 5)
        .unwrap()
}

/// A source file written into a scratch directory that lives as long as the value.
pub struct SourceFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn source_file(name: &str, source: &str) -> SourceFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    SourceFile { dir, path }
}

pub fn skeleton(class_name: &str, source: &str) -> (SourceFile, Skeleton) {
    let file = source_file("subject.rs", source);
    let skeleton = Skeleton::new(class_name, Some(&file.path)).unwrap();
    (file, skeleton)
}

/// Templates that reduce every method block to `test<Name>;` so listings are easy to compare.
pub fn compact_templates() -> TemplateSet {
    TemplateSet::new()
        .with_class_header("")
        .with_class_footer("")
        .with_method("test{methodName};")
}

/// Check which methods of `class_name` receive a stub.
pub fn stubs(class_name: &str, source: &str, expected: &[&str]) {
    let (_file, skeleton) = skeleton(class_name, source);
    assert_eq!(skeleton.methods(), expected.to_vec());

    let rendered = skeleton
        .with_templates(compact_templates())
        .generate_at(timestamp());
    let expected_render: String = expected
        .iter()
        .map(|name| format!("test{};", libtestskel::upper_first(name)))
        .collect();
    assert_eq!(rendered, expected_render);
}

#[macro_export]
macro_rules! gen_tests {
    ($prefix:ident, {
        $(stubs {
            $name:ident: {
                class: $class:expr,
                input: $input:expr,
                expected: [$($expected:expr),* $(,)?]
            }
        })*
    }) => {
        mod $prefix {
            use super::*;

            $(
                #[test]
                fn $name() {
                    stubs($class, $input, &[$($expected),*]);
                }
            )*
        }
    };
}
