use crate::ast::Indice;
use crate::index::{InIndex, OutIndex};
use crate::tags::TagPresenceMap;
use crate::{InputPattern, OutputPattern};

/// JSON formatting style.
#[derive(Clone, Copy)]
pub enum JsonStyle {
    /// Compact: no whitespace between tokens.
    Compact,
    /// Pretty: 2-space indented, one entry per line.
    Pretty,
}

struct JsonWriter {
    buf: String,
    style: JsonStyle,
    depth: usize,
}

impl JsonWriter {
    fn new(style: JsonStyle) -> Self {
        JsonWriter {
            buf: String::new(),
            style,
            depth: 0,
        }
    }

    fn is_pretty(&self) -> bool {
        matches!(self.style, JsonStyle::Pretty)
    }

    fn newline(&mut self) {
        if self.is_pretty() {
            self.buf.push('\n');
            for _ in 0..self.depth {
                self.buf.push_str("  ");
            }
        }
    }

    fn space(&mut self) {
        if self.is_pretty() {
            self.buf.push(' ');
        }
    }

    fn write_input(&mut self, pattern: &InputPattern) {
        self.buf.push('{');
        self.depth += 1;
        let mut first = true;

        self.entry_sep(&mut first);
        self.write_key("shape");
        self.write_shape(&pattern.shape);

        self.entry_sep(&mut first);
        self.write_key("index");
        self.write_in_index(&pattern.index);

        self.depth -= 1;
        self.newline();
        self.buf.push('}');
    }

    fn write_output(&mut self, pattern: &OutputPattern) {
        self.buf.push('{');
        self.depth += 1;
        let mut first = true;

        self.entry_sep(&mut first);
        self.write_key("shape");
        self.write_shape(&pattern.shape);

        self.entry_sep(&mut first);
        self.write_key("index");
        self.write_out_index(&pattern.index);

        self.entry_sep(&mut first);
        self.write_key("tags");
        self.buf.push('{');
        self.depth += 1;
        let mut tag_first = true;
        for (tag, presence) in &pattern.tags {
            self.entry_sep(&mut tag_first);
            self.write_key(tag);
            self.write_presence(presence);
        }
        self.depth -= 1;
        if !pattern.tags.is_empty() {
            self.newline();
        }
        self.buf.push('}');

        self.depth -= 1;
        self.newline();
        self.buf.push('}');
    }

    fn write_shape(&mut self, shape: &[i64]) {
        self.buf.push('[');
        for (i, dim) in shape.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
                self.space();
            }
            self.buf.push_str(&dim.to_string());
        }
        self.buf.push(']');
    }

    fn write_indice_array(&mut self, indice: &Indice) {
        self.buf.push('[');
        for (i, pos) in indice.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
                self.space();
            }
            self.buf.push_str(&pos.to_string());
        }
        self.buf.push(']');
    }

    fn write_in_index(&mut self, index: &InIndex) {
        self.buf.push('{');
        self.depth += 1;
        let mut first = true;
        for (identifier, indice) in index {
            self.entry_sep(&mut first);
            self.write_key(identifier);
            self.write_indice_array(indice);
        }
        self.depth -= 1;
        if !index.is_empty() {
            self.newline();
        }
        self.buf.push('}');
    }

    fn write_out_index(&mut self, index: &OutIndex) {
        self.buf.push('{');
        self.depth += 1;
        let mut first = true;
        for (indice, identifier) in index {
            self.entry_sep(&mut first);
            self.write_key(&indice_key(indice));
            self.write_string_value(identifier);
        }
        self.depth -= 1;
        if !index.is_empty() {
            self.newline();
        }
        self.buf.push('}');
    }

    fn write_presence(&mut self, presence: &TagPresenceMap) {
        self.buf.push('{');
        self.depth += 1;
        let mut first = true;
        for (indice, flag) in presence {
            self.entry_sep(&mut first);
            self.write_key(&indice_key(indice));
            self.buf.push_str(if *flag { "true" } else { "false" });
        }
        self.depth -= 1;
        if !presence.is_empty() {
            self.newline();
        }
        self.buf.push('}');
    }

    fn entry_sep(&mut self, first: &mut bool) {
        if *first {
            *first = false;
        } else {
            self.buf.push(',');
        }
        self.newline();
    }

    fn write_key(&mut self, key: &str) {
        self.write_string_value(key);
        self.buf.push(':');
        self.space();
    }

    fn write_string_value(&mut self, s: &str) {
        self.buf.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.buf.push_str("\\\""),
                '\\' => self.buf.push_str("\\\\"),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                '\u{0008}' => self.buf.push_str("\\b"),
                '\u{000C}' => self.buf.push_str("\\f"),
                c if c < '\u{0020}' => {
                    write!(&mut self.buf, "\\u{:04x}", c as u32).unwrap();
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }
}

use std::fmt::Write;

/// Coordinates used as object keys render compactly: `[0, 1]` becomes "0,1".
/// The root's empty coordinate renders as the empty string.
fn indice_key(indice: &Indice) -> String {
    indice
        .iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn input_to_json(pattern: &InputPattern, style: JsonStyle) -> String {
    let mut w = JsonWriter::new(style);
    w.write_input(pattern);
    w.buf
}

pub fn output_to_json(pattern: &OutputPattern, style: JsonStyle) -> String {
    let mut w = JsonWriter::new(style);
    w.write_output(pattern);
    w.buf
}
