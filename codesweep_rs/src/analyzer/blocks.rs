//! Quasi-code-block extraction for duplicate comparison.
//!
//! Blocks are heuristic declaration-like spans, not parsed syntax. The
//! scanner sits behind a trait so a grammar-aware extractor can replace the
//! indentation heuristic per source family without touching the duplicate
//! index.

/// A contiguous declaration-like span. Lines are 1-based and inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub start_line: usize,
    pub end_line: usize,
    pub content: String,
}

pub trait BlockScanner {
    fn scan(&self, content: &str) -> Vec<CodeBlock>;
}

/// Blocks shorter than this many retained lines are noise, not duplicates.
pub const DEFAULT_MIN_BLOCK_LINES: usize = 10;

/// Keywords that open a declaration-like block, checked as substrings of
/// the trimmed line. Covers the Python and JavaScript shapes this scanner
/// is aimed at plus generic const/var bindings.
const DECLARATION_KEYWORDS: &[&str] = &["def ", "class ", "function ", "const ", "var ", "let "];

/// Indentation-based scanner: a declaration keyword opens a block, a line
/// indented at or above the opener closes it. Blank and comment lines are
/// invisible either way.
pub struct IndentBlockScanner {
    min_lines: usize,
}

impl IndentBlockScanner {
    pub fn new(min_lines: usize) -> Self {
        Self { min_lines }
    }
}

impl Default for IndentBlockScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BLOCK_LINES)
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn opens_declaration(trimmed: &str) -> bool {
    DECLARATION_KEYWORDS.iter().any(|kw| trimmed.contains(kw))
}

impl BlockScanner for IndentBlockScanner {
    fn scan(&self, content: &str) -> Vec<CodeBlock> {
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut start_idx = 0usize;
        let mut last_idx = 0usize;
        let mut open_indent = 0usize;

        let mut flush = |current: &mut Vec<&str>, start_idx: usize, last_idx: usize| {
            if current.len() >= self.min_lines {
                blocks.push(CodeBlock {
                    start_line: start_idx + 1,
                    end_line: last_idx + 1,
                    content: current.join("\n"),
                });
            }
            current.clear();
        };

        for (i, line) in content.split('\n').enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
                continue;
            }

            if opens_declaration(trimmed) {
                flush(&mut current, start_idx, last_idx);
                current.push(line);
                start_idx = i;
                last_idx = i;
                open_indent = indent_of(line);
            } else if !current.is_empty() {
                if indent_of(line) > open_indent {
                    current.push(line);
                    last_idx = i;
                } else {
                    // Closing line is dropped, not part of any block.
                    flush(&mut current, start_idx, last_idx);
                }
            }
        }
        flush(&mut current, start_idx, last_idx);

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_with(min_lines: usize, content: &str) -> Vec<CodeBlock> {
        IndentBlockScanner::new(min_lines).scan(content)
    }

    #[test]
    fn short_blocks_are_discarded() {
        let code = "def short():\n    a = 1\n    b = 2\n";
        assert!(scan_with(10, code).is_empty());
    }

    #[test]
    fn long_function_body_is_one_block() {
        let mut code = String::from("def work(x):\n");
        for i in 0..11 {
            code.push_str(&format!("    step_{i} = x + {i}\n"));
        }
        code.push_str("result = 0\n");

        let blocks = scan_with(10, &code);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_line, 1);
        assert_eq!(blocks[0].end_line, 12);
    }

    #[test]
    fn shallower_line_closes_the_block() {
        let mut code = String::from("def first():\n");
        for i in 0..10 {
            code.push_str(&format!("    a{i} = {i}\n"));
        }
        code.push_str("x = 1\n");
        for _ in 0..5 {
            code.push_str("y = 2\n");
        }

        let blocks = scan_with(10, &code);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].end_line, 11);
    }

    #[test]
    fn new_declaration_flushes_previous_block() {
        let mut code = String::new();
        for name in ["alpha", "beta"] {
            code.push_str(&format!("def {name}():\n"));
            for i in 0..10 {
                code.push_str(&format!("    v{i} = {i}\n"));
            }
        }

        let blocks = scan_with(10, &code);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_line, 1);
        assert_eq!(blocks[1].start_line, 12);
    }

    #[test]
    fn blank_and_comment_lines_do_not_close_or_count() {
        let mut code = String::from("def spaced():\n");
        for i in 0..5 {
            code.push_str(&format!("    a{i} = {i}\n"));
            code.push_str("\n");
            code.push_str("# note\n");
        }
        code.push_str("    tail = 0\n");

        let blocks = scan_with(7, &code);
        assert_eq!(blocks.len(), 1);
        // Opener plus six retained body lines; blanks and comments invisible.
        assert_eq!(blocks[0].content.lines().count(), 7);
    }

    #[test]
    fn ranges_never_overlap() {
        let mut code = String::new();
        for name in ["one", "two", "three"] {
            code.push_str(&format!("function {name}() {{\n"));
            for i in 0..12 {
                code.push_str(&format!("    run({i});\n"));
            }
        }

        let blocks = scan_with(10, &code);
        assert_eq!(blocks.len(), 3);
        for pair in blocks.windows(2) {
            assert!(pair[0].end_line < pair[1].start_line);
        }
    }

    #[test]
    fn js_declarations_open_blocks() {
        let mut code = String::from("const handler = () => {\n");
        for i in 0..12 {
            code.push_str(&format!("    doStep({i});\n"));
        }
        code.push_str("};\n");

        let blocks = scan_with(10, &code);
        assert_eq!(blocks.len(), 1);
    }
}
