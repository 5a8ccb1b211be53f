use crate::ast::{ExprKind, ExprTree, NodeId};
use crate::error::{LitError, Position};

/// Parser state: tracks position in the input string.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

/// Parse a nested-array literal into an expression tree.
///
/// A literal is a name, a dotted path, a number, a single-argument tag call
/// `f(x)`, or a bracketed comma-separated list of literals whose last element
/// may be `...` to mark an open trailing dimension.
pub fn parse(input: &str) -> Result<ExprTree, LitError> {
    let mut parser = Parser { input, pos: 0 };
    let mut tree = ExprTree::new();

    parser.skip_ws();
    let root = parser.parse_literal(&mut tree)?;
    parser.skip_ws();
    if parser.pos < parser.input.len() {
        return Err(parser.error_point("Unexpected text after the literal".to_string()));
    }

    tree.set_root(root);
    Ok(tree)
}

impl<'a> Parser<'a> {
    // ── Helpers ──────────────────────────────────────────────────────

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    fn eat_char(&mut self, ch: char) -> bool {
        if self.peek_char() == Some(ch) {
            self.advance(ch.len_utf8());
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, ch: char) -> Result<(), LitError> {
        if self.eat_char(ch) {
            Ok(())
        } else {
            Err(self.error_point(format!("Expected '{}'", ch)))
        }
    }

    /// Current position in the source.
    fn position(&self) -> Position {
        let consumed = &self.input[..self.pos];
        let line = consumed.matches('\n').count();
        let last_newline = consumed.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = self.pos - last_newline;
        Position {
            line,
            column,
            offset: self.pos,
        }
    }

    /// Create an error at a single point (current position).
    fn error_point(&self, message: String) -> LitError {
        let pos = self.position();
        LitError::syntax_error(message, pos, pos)
    }

    /// Create an error spanning from `begin` to the current position.
    fn error_span(&self, message: String, begin: Position) -> LitError {
        LitError::syntax_error(message, begin, self.position())
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' || ch == '\r' || ch == '\n' {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
    }

    // ── Literal Dispatch ────────────────────────────────────────────

    fn parse_literal(&mut self, tree: &mut ExprTree) -> Result<NodeId, LitError> {
        if self.starts_with("...") {
            // Only parse_list consumes ellipsis markers.
            return Err(
                self.error_point("'...' is only allowed as the last element of a list".to_string())
            );
        }
        match self.peek_char() {
            Some('[') => self.parse_list(tree),
            Some(ch) if ch == '-' || ch == '.' || ch.is_ascii_digit() => {
                self.parse_number(tree)
            }
            Some(ch) if is_name_start(ch) => self.parse_name(tree),
            Some(ch) => Err(self.error_point(format!("Unexpected character '{}'", ch))),
            None => Err(self.error_point("Unexpected end of input".to_string())),
        }
    }

    // ── Lists ───────────────────────────────────────────────────────

    fn parse_list(&mut self, tree: &mut ExprTree) -> Result<NodeId, LitError> {
        let begin = self.position();
        self.expect_char('[')?;
        self.skip_ws();

        if self.eat_char(']') {
            return Err(self.error_span("A list needs at least one element".to_string(), begin));
        }

        let mut children = Vec::new();
        let mut open_tail = false;
        loop {
            if self.pos >= self.input.len() {
                return Err(self.error_span("Unclosed '['".to_string(), begin));
            }

            if self.starts_with("...") {
                let marker = self.position();
                self.advance(3);
                self.skip_ws();
                if self.eat_char(',') {
                    self.skip_ws();
                }
                if !self.eat_char(']') {
                    return Err(self.error_span(
                        "'...' must be the last element of a list".to_string(),
                        marker,
                    ));
                }
                open_tail = true;
                break;
            }

            let child = self.parse_literal(tree)?;
            children.push(child);
            self.skip_ws();

            if self.eat_char(',') {
                self.skip_ws();
                // Trailing comma before the closing bracket.
                if self.eat_char(']') {
                    break;
                }
                continue;
            }
            if self.eat_char(']') {
                break;
            }
            if self.pos >= self.input.len() {
                return Err(self.error_span("Unclosed '['".to_string(), begin));
            }
            return Err(self.error_point("Expected ',' or ']'".to_string()));
        }

        let length = if open_tail {
            -1
        } else {
            children.len() as i64
        };
        let list = tree.push(ExprKind::List {
            children: children.clone(),
            length,
        });
        for (i, child) in children.into_iter().enumerate() {
            tree.link(child, list, i);
        }
        Ok(list)
    }

    // ── Names, Paths, Tag Calls ─────────────────────────────────────

    fn parse_name(&mut self, tree: &mut ExprTree) -> Result<NodeId, LitError> {
        let begin = self.position();
        let first = self.parse_identifier()?;

        // A '(' directly after a plain name makes it a tag call.
        let saved = self.pos;
        self.skip_ws();
        if self.eat_char('(') {
            self.skip_ws();
            let inner = self.parse_literal(tree)?;
            self.skip_ws();
            self.expect_char(')')?;
            // Annotates the inner node; tagging a list is accepted and ignored,
            // and for nested calls the outermost tag wins.
            tree.set_tag(inner, first);
            return Ok(inner);
        }
        self.pos = saved;

        let mut path = vec![first];
        while self.peek_char() == Some('.') && !self.starts_with("...") {
            self.advance(1);
            let next = self.parse_identifier()?;
            path.push(next);
        }

        if path.len() > 1 {
            let saved = self.pos;
            self.skip_ws();
            if self.peek_char() == Some('(') {
                return Err(
                    self.error_span("A call target must be a plain name".to_string(), begin)
                );
            }
            self.pos = saved;
        }

        Ok(tree.push(ExprKind::Leaf {
            identifier: path.join("."),
            tag: None,
        }))
    }

    fn parse_identifier(&mut self) -> Result<String, LitError> {
        let start = self.pos;
        match self.peek_char() {
            Some(ch) if is_name_start(ch) => self.advance(ch.len_utf8()),
            _ => return Err(self.error_point("Expected a name".to_string())),
        }
        while let Some(ch) = self.peek_char() {
            if is_name_char(ch) {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
        Ok(self.input[start..self.pos].to_string())
    }

    // ── Numbers ─────────────────────────────────────────────────────

    /// Numbers become leaves named by their decimal rendering, so they take
    /// part in coordinate bookkeeping exactly like variables.
    fn parse_number(&mut self, tree: &mut ExprTree) -> Result<NodeId, LitError> {
        let start = self.pos;
        let begin = self.position();

        if self.peek_char() == Some('-') {
            self.advance(1);
        }

        let mut has_int_digits = false;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                has_int_digits = true;
                self.advance(1);
            } else {
                break;
            }
        }

        let mut has_frac = false;
        if self.peek_char() == Some('.') && !self.starts_with("...") {
            self.advance(1);
            let frac_start = self.pos;
            while let Some(ch) = self.peek_char() {
                if ch.is_ascii_digit() {
                    self.advance(1);
                } else {
                    break;
                }
            }
            if self.pos == frac_start {
                return Err(self.error_span("Expected digits after '.'".to_string(), begin));
            }
            has_frac = true;
        }

        if !has_int_digits && !has_frac {
            return Err(self.error_point("Expected a number".to_string()));
        }

        let token = &self.input[start..self.pos];
        let identifier = if has_frac {
            let n: f64 = token
                .parse()
                .map_err(|_| self.error_span(format!("Invalid number: {}", token), begin))?;
            if n.fract() == 0.0 {
                format!("{:.1}", n)
            } else {
                format!("{}", n)
            }
        } else {
            let n: i64 = token
                .parse()
                .map_err(|_| self.error_span(format!("Invalid number: {}", token), begin))?;
            n.to_string()
        };

        Ok(tree.push(ExprKind::Leaf {
            identifier,
            tag: None,
        }))
    }
}

/// Check if a character can start a name.
fn is_name_start(ch: char) -> bool {
    is_name_char(ch) && !ch.is_ascii_digit()
}

/// Check if a character is valid inside a name.
fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ('\u{00C0}'..='\u{024F}').contains(&ch)
        || ('\u{1E00}'..='\u{1EFF}').contains(&ch)
}
