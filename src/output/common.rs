//! Common utilities for output formatters

use serde::Serialize;

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

/// Print a value as YAML
pub fn print_yaml<T: Serialize + ?Sized>(value: &T) {
    match serde_yml::to_string(value) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => eprintln!("Error serializing to YAML: {}", e),
    }
}
