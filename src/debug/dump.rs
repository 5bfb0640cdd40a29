use std::io::{self, Write};

use super::{display_width, max, Printer};
use crate::Value;

impl<W: Write> Printer<W> {
    /// Prints `subject` as a tree, one line per scalar.
    ///
    /// Each line starts with the value's type tag. Containers print their
    /// size and then one branch per entry, with keys padded by underscores
    /// so the `=>` arrows line up:
    ///
    /// ```text
    /// array (2)
    ///  ├─ host _ => string (9) "localhost"
    ///  └─ port _ => integer 8080
    /// ```
    ///
    /// `indent` is prepended to every branch line; pass `""` at the top.
    pub fn dump(&mut self, subject: &Value, indent: &str) -> io::Result<()> {
        self.printf(format_args!("{}", subject.type_tag()))?;
        match subject {
            Value::Object { name, .. } => {
                self.printf(format_args!(" {name}"))?;
                self.dump_entries(subject, indent)
            }
            Value::Sequence(_) | Value::Mapping(_) => self.dump_entries(subject, indent),
            Value::String(s) => self.printf(format_args!(" ({}) \"{}\"\n", s.len(), escape(s))),
            Value::Integer(i) => self.printf(format_args!(" {i}\n")),
            Value::Float(x) => self.printf(format_args!(" {x}\n")),
            Value::Bool(b) => self.printf(format_args!(" {b}\n")),
            Value::Null => self.printf(format_args!("\n")),
        }
    }

    fn dump_entries(&mut self, subject: &Value, indent: &str) -> io::Result<()> {
        let entries = subject.entries().unwrap_or_default();
        self.printf(format_args!(" ({})\n", entries.len()))?;

        let width = max(entries.iter().map(|(key, _)| display_width(key))).unwrap_or(0) + 1;
        let last = entries.len().saturating_sub(1);

        for (i, (key, value)) in entries.iter().enumerate() {
            let (branch, continuation) = if i == last {
                (" └─", "    ")
            } else {
                (" ├─", " │  ")
            };
            let fill = "_".repeat(width - display_width(key));
            self.printf(format_args!("{indent}{branch} {key} {fill} => "))?;
            self.dump(value, &format!("{indent}{continuation}"))?;
        }
        Ok(())
    }
}

/// Dumps `subject` into a fresh string.
pub fn dump_to_string(subject: &Value) -> String {
    let mut printer = Printer::buffer();
    // writes into a Vec cannot fail
    let _ = printer.dump(subject, "");
    printer.into_string()
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(dump_to_string(&Value::Integer(42)), "integer 42\n");
        assert_eq!(dump_to_string(&Value::Float(1.5)), "double 1.5\n");
        assert_eq!(dump_to_string(&Value::Bool(false)), "boolean false\n");
        assert_eq!(dump_to_string(&Value::Null), "NULL\n");
    }

    #[test]
    fn test_string_is_escaped_and_measured_raw() {
        let out = dump_to_string(&Value::from("he\"llo\n"));
        assert_eq!(out, "string (7) \"he\\\"llo\\n\"\n");

        let out = dump_to_string(&Value::from("a\\b\tc\r"));
        assert_eq!(out, "string (6) \"a\\\\b\\tc\\r\"\n");
    }

    #[test]
    fn test_flat_mapping() {
        let value = Value::mapping([("host", Value::from("localhost")), ("port", Value::from(8080))]);

        let expected = "\
array (2)
 ├─ host _ => string (9) \"localhost\"
 └─ port _ => integer 8080
";
        similar_asserts::assert_eq!(dump_to_string(&value).as_str(), expected);
    }

    #[test]
    fn test_nested_tree() {
        let value = Value::object(
            "Server",
            [
                ("name", Value::from("web")),
                ("ports", Value::from(vec![80, 443])),
                ("tls", Value::mapping([("on", Value::from(true))])),
            ],
        );

        let expected = "\
object Server (3)
 ├─ name __ => string (3) \"web\"
 ├─ ports _ => array (2)
 │   ├─ 0 _ => integer 80
 │   └─ 1 _ => integer 443
 └─ tls ___ => array (1)
     └─ on _ => boolean true
";
        similar_asserts::assert_eq!(dump_to_string(&value).as_str(), expected);
    }

    #[test]
    fn test_empty_container() {
        assert_eq!(dump_to_string(&Value::Sequence(Vec::new())), "array (0)\n");
    }

    #[test]
    fn test_indent_prefixes_branches() {
        let mut printer = Printer::buffer();
        printer.dump(&Value::from(vec![Value::Null]), ">>").unwrap();
        assert_eq!(printer.contents(), "array (1)\n>> └─ 0 _ => NULL\n");
    }
}
