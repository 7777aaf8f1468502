use std::fs;
use std::io;
use std::path::Path;

/// Read a file as text, replacing invalid UTF-8 instead of failing.
///
/// Scanned trees routinely contain files with mixed or broken encodings;
/// a lossy decode keeps them analyzable line by line.
pub fn read_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Line count as the number of newline separators plus one.
///
/// Matches how detectors enumerate `content.split('\n')`, so a reported
/// finding line never exceeds this count.
pub fn count_lines(content: &str) -> usize {
    content.matches('\n').count() + 1
}
