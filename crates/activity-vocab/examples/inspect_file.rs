//! Simple inspector for ActivityStreams JSON files.
//!
//! Run with `RUST_LOG=activity_vocab=debug` to see how each key is routed.

use std::fs;
use std::process::ExitCode;

use activity_vocab::codec::parse_json;
use activity_vocab::{CellValue, Entity, Property, CORE_REGISTRY};
use tracing_subscriber::EnvFilter;

fn describe(value: &CellValue) -> String {
    match value {
        CellValue::Entity(entity) => match entity.id() {
            Some(id) => format!("{} <{}>", entity.type_name(), id),
            None => format!("{} (inline)", entity.type_name()),
        },
        CellValue::Reference(iri) => format!("<{}>", iri),
        CellValue::Literal(literal) => {
            let text = format!("{:?}", literal);
            let preview: String = text.chars().take(80).collect();
            if text.chars().count() > 80 {
                format!("{}...", preview)
            } else {
                preview
            }
        }
        CellValue::Unrecognized(raw) => format!("UNRECOGNIZED({})", raw),
    }
}

fn print_entity(entity: &Entity, indent: usize) {
    let pad = "  ".repeat(indent);
    for property in entity.properties() {
        let name = property.spec().name;
        match property {
            Property::Functional(cell) => {
                if let Some(value) = cell.value() {
                    println!("{}{}: {}", pad, name, describe(value));
                }
            }
            Property::NonFunctional(list) => {
                if list.is_empty() {
                    continue;
                }
                println!("{}{} ({}):", pad, name, list.len());
                for cell in list {
                    if let Some(value) = cell.value() {
                        println!("{}  - {}", pad, describe(value));
                        if let CellValue::Entity(nested) = value {
                            print_entity(nested, indent + 2);
                        }
                    }
                }
            }
        }
    }
    for (spec, map) in entity.language_maps() {
        println!("{}{}Map: {:?}", pad, spec.name, map.languages());
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: inspect_file <path.json>");
        return ExitCode::FAILURE;
    };

    println!("Reading: {}", path);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("failed to read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    println!("File size: {} bytes", text.len());

    let value = match parse_json(&text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let entity = match CORE_REGISTRY.deserialize(&value) {
        Ok(Some(entity)) => entity,
        Ok(None) => {
            println!("No registered type in {}", value.get("type").unwrap_or(&serde_json::Value::Null));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("decode failed ({}): {}", e.code().code(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("\n=== Entity ===");
    println!("Type: {}", entity.type_name());
    println!("Declared types: {}", entity.types().join(", "));
    match entity.id() {
        Some(id) => println!("ID: {}", id),
        None => println!("ID: (none)"),
    }
    println!("Public: {}", entity.is_public());

    println!("\n=== Properties ===");
    print_entity(&entity, 0);

    let unknown: Vec<_> = entity.unknown().keys().collect();
    println!("\n=== Unknown fields ({}) ===", unknown.len());
    for key in unknown {
        println!("  - {}", key);
    }

    ExitCode::SUCCESS
}
