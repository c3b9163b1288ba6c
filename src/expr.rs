//! `?:` conditional expressions.
//!
//! An expression is either a bare token or a bracketed prefix form:
//!
//! ```text
//! expr  := token | "[" op expr* "]"
//! token := literal | "$" NAME
//! op    := AND | IOR | NOT | EQU | LEQ | GEQ
//! ```
//!
//! Every value is a string. `"0"` is false; anything else, including the
//! placeholders produced for malformed input, counts as true, so a broken
//! condition leaves its block active.

/// Value of an unknown operator, an empty operator or an unknown variable.
pub const UNKNOWN: &str = "?o?o?";
/// Value of a bracket that is never closed.
pub const UNTERMINATED: &str = "?x?x?";

/// Prefix that marks a conditional line in a rule file.
pub const LINE_PREFIX: &str = "?:";

/// Evaluate `expr`, looking `$NAME` tokens up through `resolve` (called with
/// `NAME`, without the `$`).
///
/// Returns the value and the number of characters consumed, including the
/// single terminator character after the expression if there is one.
pub fn eval(expr: &str, resolve: &dyn Fn(&str) -> String) -> (String, usize) {
    let mut cursor = Cursor { text: expr, pos: 0, resolve };
    let (value, _) = cursor.value();
    (value, expr[..cursor.pos].chars().count())
}

/// The expression part of a `?:` line.
pub fn condition(line: &str) -> Option<&str> {
    line.strip_prefix(LINE_PREFIX)
}

/// True when an evaluated condition switches its block off.
pub fn is_false(value: &str) -> bool {
    value == "0"
}

struct Cursor<'a> {
    text: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    resolve: &'a dyn Fn(&str) -> String,
}

impl Cursor<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Consume and return the next character.
    fn terminator(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Read one expression. Also returns the character that ended it.
    fn value(&mut self) -> (String, Option<char>) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();

        if self.rest().starts_with('[') {
            self.pos += 1;
            return self.bracket();
        }

        let rest = self.rest();
        let len = rest.find(|c: char| c.is_control() || matches!(c, ' ' | '[' | ']')).unwrap_or(rest.len());
        let token = &rest[..len];
        let value = match token.strip_prefix('$') {
            Some(name) => (self.resolve)(name),
            None => token.to_string(),
        };
        self.pos += len;
        let end = self.terminator();
        (value, end)
    }

    fn bracket(&mut self) -> (String, Option<char>) {
        let (op, mut end) = self.value();

        let value = if op.is_empty() {
            UNKNOWN.to_string()
        } else {
            let mut operands = Vec::new();
            while !self.at_end() && end != Some(']') {
                let (operand, next) = self.value();
                operands.push(operand);
                end = next;
            }
            apply(&op, &operands).to_string()
        };

        let value = if end == Some(']') { value } else { UNTERMINATED.to_string() };
        (value, self.terminator())
    }
}

fn apply(op: &str, operands: &[String]) -> &'static str {
    let truth = |b: bool| if b { "1" } else { "0" };
    match op {
        "AND" => truth(!operands.iter().any(|v| v == "0")),
        "IOR" => truth(operands.iter().any(|v| !v.is_empty() && v != "0")),
        "NOT" => truth(!operands.iter().any(|v| v == "1")),
        "EQU" => match operands.split_first() {
            Some((first, rest)) => truth(rest.iter().any(|v| v == first)),
            None => "0",
        },
        "LEQ" => truth(ordered(operands, |a, b| a <= b)),
        "GEQ" => truth(ordered(operands, |a, b| a >= b)),
        _ => {
            tracing::debug!(op, "unknown expression operator");
            UNKNOWN
        }
    }
}

/// Every adjacent pair satisfies `holds`. Empty operands are not compared.
fn ordered(operands: &[String], holds: impl Fn(i64, i64) -> bool) -> bool {
    operands.windows(2).all(|pair| pair[1].is_empty() || holds(atoi(&pair[0]), atoi(&pair[1])))
}

/// Leading integer of `s`, 0 when there is none.
fn atoi(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    digits[..len].parse::<i64>().map_or(0, |n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> String {
        UNKNOWN.to_string()
    }

    fn value(expr: &str) -> String {
        eval(expr, &no_vars).0
    }

    #[test]
    fn boolean_operators() {
        assert_eq!(value("[AND 1 1]"), "1");
        assert_eq!(value("[AND 1 0]"), "0");
        assert_eq!(value("[NOT 0]"), "1");
        assert_eq!(value("[NOT 1]"), "0");
        assert_eq!(value("[IOR 0 0]"), "0");
        assert_eq!(value("[IOR 0 yes]"), "1");
        assert_eq!(value("[AND]"), "1");
    }

    #[test]
    fn comparisons() {
        assert_eq!(value("[GEQ 5 3 1]"), "1");
        assert_eq!(value("[GEQ 1 3]"), "0");
        assert_eq!(value("[LEQ 1 1 2]"), "1");
        assert_eq!(value("[LEQ 10 09]"), "0");
        assert_eq!(value("[EQU a b a]"), "1");
        assert_eq!(value("[EQU a b c]"), "0");
    }

    #[test]
    fn variables_go_through_the_resolver() {
        let resolve = |name: &str| if name == "LEVEL" { "10".to_string() } else { UNKNOWN.to_string() };
        assert_eq!(eval("[EQU $LEVEL 10]", &resolve).0, "1");
        assert_eq!(eval("[GEQ $LEVEL 12]", &resolve).0, "0");
        assert_eq!(eval("$RACE", &resolve).0, UNKNOWN);
    }

    #[test]
    fn nesting() {
        assert_eq!(value("[AND [NOT 0] [IOR 0 1]]"), "1");
        assert_eq!(value("[AND [NOT 1] 1]"), "0");
        assert_eq!(value("  [NOT [AND 1 0]]"), "1");
    }

    #[test]
    fn malformed_input_fails_open() {
        assert_eq!(value("[AND 1"), UNTERMINATED);
        assert_eq!(value("[FOO 1 2]"), UNKNOWN);
        assert_eq!(value("[]"), UNKNOWN);
        assert!(!is_false(&value("[AND 1 0")));
    }

    #[test]
    fn consumed_count_includes_terminator() {
        assert_eq!(eval("abc def", &no_vars), ("abc".to_string(), 4));
        assert_eq!(eval("[NOT 0] tail", &no_vars), ("1".to_string(), 8));
        assert_eq!(eval("[NOT 0]", &no_vars).1, 7);
    }

    #[test]
    fn condition_lines() {
        assert_eq!(condition("?:[EQU $RACE Elf]"), Some("[EQU $RACE Elf]"));
        assert_eq!(condition("rings"), None);
    }
}
