use std::{fs::File, io::Read, path::Path};

// ===============================================================================================
// Strings
// ===============================================================================================
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Rewrites all line breaks (`\r\n`, `\r` or `\n`) to the platform line
/// separator. Stub bodies read from configuration files and live request
/// bodies may disagree on line endings; both sides are normalized on read so
/// body comparison is not sensitive to how the file was checked out.
pub fn enforce_system_line_separator(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', LINE_SEPARATOR)
}

pub(crate) fn is_set(value: Option<&str>) -> bool {
    value.map_or(false, |v| !v.is_empty())
}

// ===============================================================================================
// Files
// ===============================================================================================
pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, std::io::Error> {
    let mut file = File::open(path)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

#[cfg(test)]
mod test {
    use crate::common::util::{enforce_system_line_separator, is_set, LINE_SEPARATOR};

    #[test]
    fn enforce_system_line_separator_test() {
        let normalized = enforce_system_line_separator("a\r\nb\rc\nd");
        assert_eq!(
            normalized,
            format!("a{0}b{0}c{0}d", LINE_SEPARATOR)
        );
    }

    #[test]
    fn is_set_test() {
        assert_eq!(is_set(None), false);
        assert_eq!(is_set(Some("")), false);
        assert_eq!(is_set(Some("value")), true);
    }
}
