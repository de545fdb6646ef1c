//! Line-oriented scanner for name-tagged SQL text.
//!
//! Recognizes tag lines of the form `-- name: <tag>` and groups every
//! following line (including ordinary `--` comments) into that tag's query
//! body, until the next tag line or end of input.

use std::collections::HashMap;

/// Extracts the tag name from a line, if it is a tag line.
///
/// A tag line is `--`, optional whitespace, the literal `name:`, then the
/// name. Whitespace before `--` and around the name is ignored; `--name:`
/// with no separating space is accepted.
///
/// Returns `None` for non-tag lines (including plain `--` comments) and
/// `Some("")` for a tag line whose name is empty or all-whitespace.
pub(crate) fn get_tag(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("--")?;
    let name = rest.trim_start().strip_prefix("name:")?;
    Some(name.trim())
}

/// Accumulates tagged query groups while walking the input line by line.
#[derive(Debug, Default)]
pub(crate) struct Scanner {
    queries: HashMap<String, String>,
    current: Option<String>,
    body: Vec<String>,
}

impl Scanner {
    /// Consumes the input lines and returns the tag → query-text map.
    ///
    /// Body lines are trimmed of surrounding whitespace and blank lines are
    /// skipped, so indentation in the source file never leaks into the
    /// stored SQL. A tag whose group ends up with no surviving body lines
    /// contributes no entry. Lines before the first valid tag are
    /// discarded, as are lines following a tag line with a blank name.
    pub(crate) fn run<'a, I>(mut self, lines: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            match get_tag(line) {
                // A blank name ends the current group without starting
                // a new one; lines are dropped until the next valid tag.
                Some("") => self.commit(),
                Some(name) => {
                    self.commit();
                    self.current = Some(name.to_owned());
                }
                None => {
                    if self.current.is_some() {
                        let body_line = line.trim();
                        if !body_line.is_empty() {
                            self.body.push(body_line.to_owned());
                        }
                    }
                }
            }
        }
        self.commit();
        self.queries
    }

    /// Stores the active group, if any, joining its body lines with `\n`.
    /// Empty bodies are dropped rather than stored as empty strings.
    fn commit(&mut self) {
        if let Some(name) = self.current.take() {
            if !self.body.is_empty() {
                self.queries.insert(name, self.body.join("\n"));
            }
            self.body.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_extraction() {
        let cases = [
            ("SELECT all", None),
            ("-- no name", None),
            ("-- name:  ", Some("")),
            ("-- name: find-products-by-name", Some("find-products-by-name")),
            ("  --  name:  save-product ", Some("save-product")),
            ("--name: compact", Some("compact")),
        ];
        for (line, want) in cases {
            assert_eq!(get_tag(line), want, "line: {line:?}");
        }
    }

    #[test]
    fn groups_lines_and_drops_empty_bodies() {
        let input = "
	-- name: all-products
	-- Finds all products
	SELECT * from products
	-- name: empty-query-should-not-be-stored
	-- name: save-products
	INSERT INTO products (?, ?, ?)
	";

        let queries = Scanner::default().run(input.lines());

        assert_eq!(queries.len(), 2);
        assert_eq!(
            queries["all-products"],
            "-- Finds all products\nSELECT * from products"
        );
        assert_eq!(queries["save-products"], "INSERT INTO products (?, ?, ?)");
    }

    #[test]
    fn lines_before_first_tag_are_discarded() {
        let input = "SELECT orphan;\n-- a stray comment\n-- name: real\nSELECT 1";
        let queries = Scanner::default().run(input.lines());
        assert_eq!(queries.len(), 1);
        assert_eq!(queries["real"], "SELECT 1");
    }

    #[test]
    fn blank_name_clears_active_section() {
        let input = "\
-- name: first
SELECT 1
-- name:
SELECT dropped
-- name: second
SELECT 2";
        let queries = Scanner::default().run(input.lines());

        // The dropped lines must neither extend `first` nor form a group.
        assert_eq!(queries.len(), 2);
        assert_eq!(queries["first"], "SELECT 1");
        assert_eq!(queries["second"], "SELECT 2");
    }

    #[test]
    fn redeclared_tag_last_wins() {
        let input = "-- name: q\nSELECT old\n-- name: q\nSELECT new";
        let queries = Scanner::default().run(input.lines());
        assert_eq!(queries["q"], "SELECT new");
    }

    #[test]
    fn parsing_is_deterministic() {
        let input = "-- name: a\nSELECT 1\n\n-- name: b\nSELECT 2\nFROM t";
        let first = Scanner::default().run(input.lines());
        let second = Scanner::default().run(input.lines());
        assert_eq!(first, second);
    }

    #[test]
    fn no_trailing_newline_in_bodies() {
        let input = "-- name: multi\nSELECT a,\nb\nFROM t\n";
        let queries = Scanner::default().run(input.lines());
        assert_eq!(queries["multi"], "SELECT a,\nb\nFROM t");
    }
}
