//! `modclash dump`: print the parsed tree of any script file.

use std::path::Path;

use anyhow::{Context, Result};

use modclash_core::script::{decode, Element, Parser};

use crate::style;

pub fn run_dump(path: &Path, json: bool) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = decode(&bytes);

    let mut parser = Parser::new(text.chars());
    let doc = parser.parse();
    let stalled = parser.take_error();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).context("failed to serialize document")?
        );
    } else {
        for element in &doc {
            print_element(element, 0);
        }
    }

    if let Some(err) = stalled {
        eprintln!("{}", style::warn(&format!("input truncated: {}", err)));
    }
    Ok(())
}

fn print_element(element: &Element, depth: usize) {
    let indent = "    ".repeat(depth);
    match element {
        Element::Scalar { value } => println!("{}{}", indent, value),
        Element::KeyValue { key, value } => {
            let value = match value {
                Some(v) => v.clone(),
                None => style::dim("(none)"),
            };
            println!("{}{} = {}", indent, style::key(key), value);
        }
        Element::KeyBlock { key, children } => {
            println!("{}{} = {{", indent, style::key(key));
            for child in children {
                print_element(child, depth + 1);
            }
            println!("{}}}", indent);
        }
    }
}
