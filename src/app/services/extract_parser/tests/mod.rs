//! Test utilities for extract parser testing
//!
//! Helpers for building extract content and temporary extract files shared
//! by the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;


/// Header line as it appears in production extracts
pub const EXTRACT_HEADER: &str = "H|Customer_Name|Customer_Id|Open_Date|Last_Consulted_Date|Vaccination_Id|Dr_Name|State|Country|DOB|Is_Active";

/// Build a detail line with the given name, id and country
pub fn detail_line(name: &str, id: &str, country: &str) -> String {
    format!(
        "D|{}|{}|20101012|13012012|MVD|Paul|SA|{}|06031987|A",
        name, id, country
    )
}

/// Helper to create extract content from a header and data lines
pub fn extract_content(lines: &[String]) -> String {
    let mut content = String::from(EXTRACT_HEADER);
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
