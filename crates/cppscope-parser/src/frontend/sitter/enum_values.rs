//! Constant folding for enumerator values.
//!
//! Handles what enumerator lists actually contain: integer literals,
//! earlier enumerators, and unary, binary, or parenthesized combinations of
//! those. Anything else (sizeof, casts, names from other scopes) leaves the
//! value unknown, as does every implicit value after it.

use std::collections::HashMap;

use ast_grep_core::Node;

/// Values of the enumerators seen so far, for implicit increments and
/// references to earlier names.
#[derive(Debug, Default)]
pub(super) struct EnumEvaluator {
    known: HashMap<String, i128>,
    previous: Option<Option<i128>>,
}

impl EnumEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the next enumerator, given its explicit initializer if any.
    pub fn next<D: ast_grep_core::Doc>(
        &mut self,
        name: &str,
        explicit: Option<&Node<'_, D>>,
    ) -> Option<i128> {
        let value = match (explicit, self.previous) {
            (Some(expr), _) => self.eval(expr),
            (None, None) => Some(0),
            (None, Some(previous)) => previous.and_then(|v| v.checked_add(1)),
        };
        if let Some(v) = value {
            self.known.insert(name.to_string(), v);
        }
        self.previous = Some(value);
        value
    }

    fn eval<D: ast_grep_core::Doc>(&self, node: &Node<'_, D>) -> Option<i128> {
        match node.kind().as_ref() {
            "number_literal" => parse_integer(&node.text()),
            "char_literal" => parse_char(&node.text()),
            "true" => Some(1),
            "false" => Some(0),
            "identifier" => self.known.get(node.text().as_ref()).copied(),
            "qualified_identifier" => {
                let text = node.text();
                let last = text.rsplit("::").next().unwrap_or_default().trim();
                self.known.get(last).copied()
            }
            "parenthesized_expression" => {
                let inner = node.children().find(|c| c.is_named())?;
                self.eval(&inner)
            }
            "unary_expression" => {
                let operator = node.field("operator")?;
                let operand = self.eval(&node.field("argument")?)?;
                match operator.text().as_ref() {
                    "-" => operand.checked_neg(),
                    "+" => Some(operand),
                    "~" => Some(!operand),
                    "!" => Some(i128::from(operand == 0)),
                    _ => None,
                }
            }
            "binary_expression" => {
                let operator = node.field("operator")?;
                let left = self.eval(&node.field("left")?)?;
                let right = self.eval(&node.field("right")?)?;
                binary(operator.text().as_ref(), left, right)
            }
            _ => None,
        }
    }
}

fn binary(operator: &str, left: i128, right: i128) -> Option<i128> {
    match operator {
        "+" => left.checked_add(right),
        "-" => left.checked_sub(right),
        "*" => left.checked_mul(right),
        "/" => left.checked_div(right),
        "%" => left.checked_rem(right),
        "<<" => u32::try_from(right).ok().and_then(|r| left.checked_shl(r)),
        ">>" => u32::try_from(right).ok().and_then(|r| left.checked_shr(r)),
        "&" => Some(left & right),
        "|" => Some(left | right),
        "^" => Some(left ^ right),
        "&&" => Some(i128::from(left != 0 && right != 0)),
        "||" => Some(i128::from(left != 0 || right != 0)),
        "==" => Some(i128::from(left == right)),
        "!=" => Some(i128::from(left != right)),
        "<" => Some(i128::from(left < right)),
        "<=" => Some(i128::from(left <= right)),
        ">" => Some(i128::from(left > right)),
        ">=" => Some(i128::from(left >= right)),
        _ => None,
    }
}

/// Integer literal in any base, with digit separators and suffixes.
pub(super) fn parse_integer(text: &str) -> Option<i128> {
    let cleaned: String = text.chars().filter(|c| *c != '\'').collect();
    let lower = cleaned.to_ascii_lowercase();
    let digits = lower.trim_end_matches(['u', 'l', 'z']);

    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    i128::from_str_radix(body, radix).ok()
}

fn parse_char(text: &str) -> Option<i128> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let value = match inner {
        "\\n" => '\n',
        "\\t" => '\t',
        "\\r" => '\r',
        "\\0" => '\0',
        "\\\\" => '\\',
        "\\'" => '\'',
        _ => {
            let mut chars = inner.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            c
        }
    };
    Some(i128::from(u32::from(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Some(42))]
    #[case("0x1F", Some(31))]
    #[case("0b101", Some(5))]
    #[case("017", Some(15))]
    #[case("0", Some(0))]
    #[case("10u", Some(10))]
    #[case("1'000", Some(1000))]
    #[case("0xFFull", Some(255))]
    #[case("1.5", None)]
    fn integer_literals(#[case] text: &str, #[case] expected: Option<i128>) {
        assert_eq!(parse_integer(text), expected);
    }

    #[test]
    fn char_literals() {
        assert_eq!(parse_char("'a'"), Some(97));
        assert_eq!(parse_char("'\\n'"), Some(10));
        assert_eq!(parse_char("'ab'"), None);
    }

    #[test]
    fn binary_operators() {
        assert_eq!(binary("<<", 1, 4), Some(16));
        assert_eq!(binary("|", 1, 2), Some(3));
        assert_eq!(binary("/", 1, 0), None);
        assert_eq!(binary("?", 1, 2), None);
    }
}
