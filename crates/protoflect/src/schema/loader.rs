// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML schema loader.
//!
//! Describes message and enum types in a small human-friendly format and
//! turns them into a [`DescriptorPool`].
//!
//! # Example YAML
//!
//! ```yaml
//! # page.yaml
//! package: cosmos.base.query.v1beta1
//! messages:
//!   - name: PageRequest
//!     fields:
//!       - { name: key, number: 1, kind: bytes }
//!       - { name: offset, number: 2, kind: uint64 }
//!       - { name: limit, number: 3, kind: uint64 }
//!   - name: Tree
//!     fields:
//!       - { name: kids, number: 1, kind: message, type: Tree, repeated: true }
//!       - { name: tag, number: 2, kind: string, oneof: label }
//!       - { name: id, number: 3, kind: uint32, oneof: label }
//!       - { name: raw, number: 4, kind: sint32, repeated: true, packed: false }
//! enums:
//!   - name: Color
//!     values: { RED: 0, GREEN: 1 }
//! ```
//!
//! Type names starting with `.` are absolute. A name without a dot gets the
//! document's package prefixed.

use super::builder::{FieldSpec, MessageDescriptorBuilder};
use super::descriptor::EnumDescriptor;
use super::kind::FieldKind;
use super::pool::{DescriptorPool, PoolBuilder};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// YAML schema loader.
pub struct SchemaLoader;

/// Root YAML document structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct YamlSchemaDocument {
    /// Package prefixed to relative type names.
    pub package: Option<String>,
    pub messages: Vec<YamlMessage>,
    pub enums: Vec<YamlEnum>,
}

#[derive(Debug, Deserialize)]
pub struct YamlMessage {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<YamlField>,
}

/// One field declaration.
#[derive(Debug, Deserialize)]
pub struct YamlField {
    pub name: String,
    pub number: u32,
    /// `int32`, `string`, `message`, ...
    pub kind: String,
    /// Referenced message or enum (message and enum kinds only).
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default)]
    pub packed: Option<bool>,
    #[serde(default)]
    pub oneof: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Deserialize)]
pub struct YamlEnum {
    pub name: String,
    /// Ordered `NAME: number` pairs.
    #[serde(default)]
    pub values: serde_yaml::Mapping,
}

impl SchemaLoader {
    /// Load one schema file into a pool.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Arc<DescriptorPool>> {
        Self::load_files(std::iter::once(path))
    }

    /// Load several schema files into a single pool.
    ///
    /// Cross references may point into any of the files.
    pub fn load_files<I, P>(paths: I) -> Result<Arc<DescriptorPool>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut builder = PoolBuilder::new();
        for path in paths {
            let path = path.as_ref();
            log::debug!("[loader] reading schema {}", path.display());
            let content = fs::read_to_string(path)?;
            let doc = Self::parse_yaml(&content)?;
            Self::add_document(&mut builder, &doc)?;
        }
        builder.build()
    }

    /// Parse YAML content.
    pub fn parse_yaml(yaml_content: &str) -> Result<YamlSchemaDocument> {
        serde_yaml::from_str(yaml_content).map_err(|e| Error::SchemaParse(e.to_string()))
    }

    /// Build a pool from YAML text.
    pub fn load_str(yaml_content: &str) -> Result<Arc<DescriptorPool>> {
        let doc = Self::parse_yaml(yaml_content)?;
        let mut builder = PoolBuilder::new();
        Self::add_document(&mut builder, &doc)?;
        builder.build()
    }

    /// Convert a parsed document and append its types to `builder`.
    pub fn add_document(builder: &mut PoolBuilder, doc: &YamlSchemaDocument) -> Result<()> {
        let package = doc.package.as_deref();
        for message in &doc.messages {
            let mut mb = MessageDescriptorBuilder::new(qualify(package, &message.name));
            for field in &message.fields {
                mb = mb.spec(Self::field_to_spec(package, &message.name, field)?);
            }
            builder.add_message(mb);
        }
        for e in &doc.enums {
            builder.add_enum(Self::enum_to_descriptor(package, e)?);
        }
        log::debug!(
            "[loader] package {}: {} messages, {} enums",
            package.unwrap_or("<none>"),
            doc.messages.len(),
            doc.enums.len()
        );
        Ok(())
    }

    fn field_to_spec(package: Option<&str>, message: &str, field: &YamlField) -> Result<FieldSpec> {
        let kind = FieldKind::from_name(&field.kind.to_lowercase()).ok_or_else(|| {
            Error::SchemaParse(format!(
                "{}.{}: unknown kind '{}'",
                message, field.name, field.kind
            ))
        })?;
        let mut spec = FieldSpec::new(field.name.clone(), field.number, kind);
        if field.repeated {
            spec = spec.repeated();
        }
        if let Some(packed) = field.packed {
            spec = spec.packed(packed);
        }
        if let Some(ref group) = field.oneof {
            spec = spec.in_oneof(group.clone());
        }
        if field.optional {
            spec = spec.optional();
        }
        if let Some(ref type_name) = field.type_name {
            spec = spec.type_name(qualify(package, type_name));
        }
        Ok(spec)
    }

    fn enum_to_descriptor(package: Option<&str>, e: &YamlEnum) -> Result<EnumDescriptor> {
        let mut descriptor = EnumDescriptor::new(qualify(package, &e.name));
        for (key, value) in &e.values {
            let name = key.as_str().ok_or_else(|| {
                Error::SchemaParse(format!("enum {}: non-string value name", e.name))
            })?;
            let number = value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| {
                    Error::SchemaParse(format!("enum {}: {} is not an int32", e.name, name))
                })?;
            descriptor = descriptor.value(name, number);
        }
        Ok(descriptor)
    }
}

/// Apply the package to a relative type name.
fn qualify(package: Option<&str>, name: &str) -> String {
    if let Some(absolute) = name.strip_prefix('.') {
        return absolute.to_string();
    }
    match package {
        Some(pkg) if !pkg.is_empty() && !name.contains('.') => format!("{}.{}", pkg, name),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TREE: &str = r#"
package: demo
messages:
  - name: Tree
    fields:
      - { name: kids, number: 1, kind: message, type: Tree, repeated: true }
      - { name: tag, number: 2, kind: string, oneof: label }
      - { name: id, number: 3, kind: uint32, oneof: label }
      - { name: raw, number: 4, kind: sint32, repeated: true, packed: false }
      - { name: color, number: 5, kind: enum, type: .demo.Color }
      - { name: maybe, number: 6, kind: int64, optional: true }
enums:
  - name: Color
    values: { RED: 0, GREEN: 1, BLUE: 2 }
"#;

    #[test]
    fn test_parse_and_resolve() {
        let pool = SchemaLoader::load_str(TREE).expect("schema loads");
        let ty = pool.find_message("demo.Tree").expect("tree type");
        let d = ty.descriptor();
        let kids = d.field_by_name("kids").expect("kids");
        assert!(kids.is_repeated());
        assert_eq!(ty.field_type(kids), Some(ty.clone()));
        assert!(!d.field_by_name("raw").expect("raw").is_packed());
        assert!(d.field_by_name("maybe").expect("maybe").is_proto3_optional());
        assert_eq!(d.oneof_by_name("label").map(|o| o.field_indices().len()), Some(2));

        let color = pool.find_enum("demo.Color").expect("color enum");
        assert_eq!(color.value_name(2), Some("BLUE"));
        assert_eq!(color.values()[0], ("RED".to_string(), 0));
    }

    #[test]
    fn test_unknown_kind_and_bad_yaml() {
        let bad_kind = concat!(
            "messages:\n  - name: M\n    fields:\n",
            "      - { name: m, number: 1, kind: map }\n"
        );
        assert!(matches!(
            SchemaLoader::load_str(bad_kind),
            Err(Error::SchemaParse(msg)) if msg.contains("unknown kind")
        ));
        assert!(matches!(
            SchemaLoader::load_str("messages: [ { name: M, fields: oops } ]"),
            Err(Error::SchemaParse(_))
        ));
    }

    #[test]
    fn test_unresolved_reference_is_invalid_schema() {
        let yaml = concat!(
            "package: p\nmessages:\n  - name: M\n    fields:\n",
            "      - { name: x, number: 1, kind: message, type: Nope }\n"
        );
        assert!(matches!(
            SchemaLoader::load_str(yaml),
            Err(Error::InvalidSchema(msg)) if msg.contains("p.Nope")
        ));
    }

    #[test]
    fn test_load_files_across_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.yaml");
        let b = dir.path().join("b.yaml");
        fs::File::create(&a)
            .and_then(|mut f| {
                f.write_all(
                    concat!(
                        "package: x\nmessages:\n  - name: Outer\n    fields:\n",
                        "      - { name: inner, number: 1, kind: message, type: .y.Inner }\n"
                    )
                    .as_bytes(),
                )
            })
            .expect("write a");
        fs::File::create(&b)
            .and_then(|mut f| {
                f.write_all(
                    concat!(
                        "package: y\nmessages:\n  - name: Inner\n    fields:\n",
                        "      - { name: v, number: 1, kind: bool }\n"
                    )
                    .as_bytes(),
                )
            })
            .expect("write b");

        let pool = SchemaLoader::load_files([&a, &b]).expect("both files load");
        assert!(pool.find_message("x.Outer").is_some());
        assert!(pool.find_message("y.Inner").is_some());

        assert!(matches!(
            SchemaLoader::load_from_file(dir.path().join("missing.yaml")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify(Some("pkg"), "M"), "pkg.M");
        assert_eq!(qualify(Some("pkg"), ".other.M"), "other.M");
        assert_eq!(qualify(Some("pkg"), "other.M"), "other.M");
        assert_eq!(qualify(None, "M"), "M");
    }
}
