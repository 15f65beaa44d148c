// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! protoflect-dump - Decode protobuf payloads against a runtime schema
//!
//! Reads wire bytes (hex on the command line or stdin, raw from a file),
//! decodes them as the requested message type and prints the fields.

use clap::Parser;
use colored::*;
use protoflect::schema::SchemaLoader;
use protoflect::schemas::authz;
use protoflect::{
    codec, DescriptorPool, FieldDescriptor, MessageType, Record, UnmarshalOptions, ValueRef,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Decode protobuf payloads
#[derive(Parser, Debug)]
#[command(name = "protoflect-dump")]
#[command(version = "0.1.0")]
#[command(about = "Decode protobuf wire bytes against a YAML or built-in schema")]
struct Args {
    /// YAML schema file (repeatable)
    #[arg(short, long)]
    schema: Vec<PathBuf>,

    /// Include a built-in schema: authz
    #[arg(long)]
    builtin: Option<String>,

    /// Fully-qualified message type to decode as
    #[arg(short = 't', long = "type")]
    type_name: String,

    /// Payload as hex (whitespace allowed). Read from stdin when omitted
    #[arg(long, conflicts_with = "file")]
    hex: Option<String>,

    /// Raw binary payload file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the decoded record as JSON instead of a tree
    #[arg(long)]
    json: bool,

    /// Drop unknown fields while decoding
    #[arg(long)]
    discard_unknown: bool,

    /// Maximum message nesting depth
    #[arg(long, default_value = "100")]
    recursion_limit: usize,

    /// Re-encode the decoded record and compare with the input
    #[arg(long)]
    check_roundtrip: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let pool = load_pool(args)?;
    let ty = pool
        .find_message(&args.type_name)
        .ok_or_else(|| format!("unknown message type '{}'", args.type_name))?;

    let payload = read_payload(args)?;
    log::debug!("[dump] {} bytes as {}", payload.len(), ty.full_name());

    let opts = UnmarshalOptions::new()
        .discard_unknown(args.discard_unknown)
        .recursion_limit(args.recursion_limit);
    let record = codec::unmarshal_with(&payload, &ty, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record_json(&record))?);
    } else {
        println!(
            "{} {} ({} bytes)",
            ">>>".green().bold(),
            ty.full_name().bold(),
            payload.len()
        );
        print_record(&record, 1);
    }

    if args.check_roundtrip {
        let encoded = codec::marshal(&record);
        if encoded == payload {
            eprintln!("{}", "roundtrip: identical".green());
        } else {
            // Non-canonical input (field order, unpacked numerics) re-encodes differently.
            eprintln!(
                "{} re-encoded to {} bytes: {}",
                "roundtrip: differs".yellow(),
                encoded.len(),
                to_hex(&encoded).dimmed()
            );
        }
    }

    Ok(())
}

fn load_pool(args: &Args) -> Result<Arc<DescriptorPool>, Box<dyn std::error::Error>> {
    let mut builder = match args.builtin.as_deref() {
        Some("authz") => authz::builder(),
        Some(other) => return Err(format!("unknown built-in schema '{}'", other).into()),
        None => protoflect::PoolBuilder::new(),
    };
    for path in &args.schema {
        let content = std::fs::read_to_string(path)?;
        let doc = SchemaLoader::parse_yaml(&content)?;
        SchemaLoader::add_document(&mut builder, &doc)?;
    }
    if args.builtin.is_none() && args.schema.is_empty() {
        return Err("no schema given (use --schema or --builtin)".into());
    }
    Ok(builder.build()?)
}

fn read_payload(args: &Args) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.file {
        return Ok(std::fs::read(path)?);
    }
    let text = match args.hex {
        Some(ref hex) => hex.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_hex(&text)
}

fn parse_hex(text: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let digits = digits.strip_prefix(b"0x").unwrap_or(&digits[..]);
    if digits.len() % 2 != 0 {
        return Err("hex payload has an odd number of digits".into());
    }
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let byte = std::str::from_utf8(pair)
            .ok()
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| format!("invalid hex digits '{}'", String::from_utf8_lossy(pair)))?;
        out.push(byte);
    }
    Ok(out)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ============================================================================
// Pretty output
// ============================================================================

fn print_record(record: &Record, depth: usize) {
    let indent = "  ".repeat(depth);
    let ty = record.message_type();
    record.range(|fd, value| {
        print_field(ty, fd, &value, &indent, depth);
        true
    });
    if !record.unknown().is_empty() {
        println!(
            "{}{} {}",
            indent,
            "<unknown>".yellow(),
            to_hex(record.unknown()).dimmed()
        );
    }
}

fn print_field(
    ty: &MessageType,
    fd: &FieldDescriptor,
    value: &ValueRef<'_>,
    indent: &str,
    depth: usize,
) {
    let label = format!("{} #{}", fd.name(), fd.number());
    match value {
        ValueRef::Message(view) => {
            println!("{}{} {}", indent, label.cyan(), view.message_type().full_name().dimmed());
            if let Some(nested) = view.record() {
                print_record(nested, depth + 1);
            }
        }
        ValueRef::List(items) => {
            println!("{}{} [{}]", indent, label.cyan(), items.len());
            let inner = format!("{}  ", indent);
            for (i, item) in items.iter().enumerate() {
                match item {
                    ValueRef::Message(view) => {
                        println!("{}[{}]", inner, i);
                        if let Some(nested) = view.record() {
                            print_record(nested, depth + 2);
                        }
                    }
                    scalar => println!("{}[{}] {}", inner, i, scalar_text(ty, fd, &scalar)),
                }
            }
        }
        scalar => println!("{}{} = {}", indent, label.cyan(), scalar_text(ty, fd, scalar)),
    }
}

fn scalar_text(ty: &MessageType, fd: &FieldDescriptor, value: &ValueRef<'_>) -> String {
    match value {
        ValueRef::Bool(v) => v.to_string(),
        ValueRef::I32(v) => v.to_string(),
        ValueRef::I64(v) => v.to_string(),
        ValueRef::U32(v) => v.to_string(),
        ValueRef::U64(v) => v.to_string(),
        ValueRef::F32(v) => v.to_string(),
        ValueRef::F64(v) => v.to_string(),
        ValueRef::String(s) => format!("{:?}", s),
        ValueRef::Bytes(b) => format!("0x{}", to_hex(b)),
        ValueRef::Enum(n) => match ty.field_enum(fd).and_then(|e| e.value_name(*n)) {
            Some(name) => format!("{} ({})", name, n),
            None => n.to_string(),
        },
        ValueRef::Message(_) | ValueRef::List(_) => String::new(),
    }
}

// ============================================================================
// JSON output
// ============================================================================

fn record_json(record: &Record) -> serde_json::Value {
    let ty = record.message_type();
    let mut map = serde_json::Map::new();
    record.range(|fd, value| {
        map.insert(fd.name().to_string(), value_json(ty, fd, &value));
        true
    });
    if !record.unknown().is_empty() {
        map.insert(
            "@unknown".to_string(),
            serde_json::Value::String(to_hex(record.unknown())),
        );
    }
    serde_json::Value::Object(map)
}

fn value_json(ty: &MessageType, fd: &FieldDescriptor, value: &ValueRef<'_>) -> serde_json::Value {
    use serde_json::Value as Json;
    match value {
        ValueRef::Bool(v) => Json::Bool(*v),
        ValueRef::I32(v) => Json::from(*v),
        ValueRef::U32(v) => Json::from(*v),
        // 64-bit integers as strings, as protobuf JSON does.
        ValueRef::I64(v) => Json::String(v.to_string()),
        ValueRef::U64(v) => Json::String(v.to_string()),
        ValueRef::F32(v) => Json::from(f64::from(*v)),
        ValueRef::F64(v) => Json::from(*v),
        ValueRef::String(s) => Json::String((*s).to_string()),
        ValueRef::Bytes(b) => Json::String(to_hex(b)),
        ValueRef::Enum(n) => match ty.field_enum(fd).and_then(|e| e.value_name(*n)) {
            Some(name) => Json::String(name.to_string()),
            None => Json::from(*n),
        },
        ValueRef::Message(view) => match view.record() {
            Some(nested) => record_json(nested),
            None => Json::Object(serde_json::Map::new()),
        },
        ValueRef::List(items) => {
            Json::Array(items.iter().map(|item| value_json(ty, fd, &item)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0a 05\n61").expect("hex"), vec![0x0A, 0x05, 0x61]);
        assert_eq!(parse_hex("0x0A05").expect("hex"), vec![0x0A, 0x05]);
        assert!(parse_hex("0a0").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_record_json() {
        let ty = authz::query_grants_request();
        let bytes = [0x0A, 0x01, b'a', 0x22, 0x02, 0x18, 0x05];
        let record = codec::unmarshal(&bytes, &ty).expect("decode");
        let json = record_json(&record);
        assert_eq!(json["granter"], "a");
        assert_eq!(json["pagination"]["limit"], "5");
    }
}
