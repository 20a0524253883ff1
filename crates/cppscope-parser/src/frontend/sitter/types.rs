//! Declarator unwrapping and type spelling.
//!
//! Spellings follow the clang style (`const char *`, `int *const`,
//! `std::string &`) so both front ends produce comparable documents.

use ast_grep_core::Node;

use crate::cursor::TypeInfo;

/// One layer of a declarator, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Modifier {
    Pointer { is_const: bool },
    LvalueRef,
    RvalueRef,
    Array(String),
}

/// A declarator reduced to its name, type layers, and extras.
pub(super) struct Declarator<'r, D: ast_grep_core::Doc> {
    pub name: Option<Node<'r, D>>,
    pub modifiers: Vec<Modifier>,
    /// Set when the declarator declares a function.
    pub function: Option<Node<'r, D>>,
    /// Modifiers seen inside the function declarator, meaning this is a
    /// function pointer rather than a function.
    pub is_function_pointer: bool,
    pub initializer: Option<String>,
}

impl<'r, D: ast_grep_core::Doc> Declarator<'r, D> {
    pub fn name_text(&self) -> String {
        self.name.as_ref().map(name_text).unwrap_or_default()
    }
}

/// Declarator node kinds that can appear in a declaration list.
pub(super) fn is_declarator(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "field_identifier"
            | "qualified_identifier"
            | "destructor_name"
            | "operator_name"
            | "operator_cast"
            | "template_function"
            | "init_declarator"
            | "pointer_declarator"
            | "reference_declarator"
            | "array_declarator"
            | "function_declarator"
            | "parenthesized_declarator"
            | "attributed_declarator"
            | "abstract_pointer_declarator"
            | "abstract_reference_declarator"
            | "abstract_array_declarator"
            | "abstract_function_declarator"
    )
}

fn is_name(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "field_identifier"
            | "qualified_identifier"
            | "destructor_name"
            | "operator_name"
            | "operator_cast"
            | "template_function"
            | "type_identifier"
    )
}

/// The `operator T()` node behind a possibly qualified name.
pub(super) fn operator_cast<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    match node.kind().as_ref() {
        "operator_cast" => Some(node.clone()),
        "qualified_identifier" => node.field("name").and_then(|n| operator_cast(&n)),
        _ => None,
    }
}

/// Unqualified text of a name node: `ns::C::m` gives `m`, `f<int>` gives `f`,
/// `operator int() const` gives `operator int`.
pub(super) fn name_text<D: ast_grep_core::Doc>(node: &Node<'_, D>) -> String {
    match node.kind().as_ref() {
        "operator_cast" => {
            let text = node.text();
            normalize(text.split('(').next().unwrap_or_default())
        }
        "qualified_identifier" => node
            .field("name")
            .map_or_else(|| last_segment(&node.text()), |n| name_text(&n)),
        "template_function" | "template_type" => node
            .field("name")
            .map_or_else(|| normalize(&node.text()), |n| n.text().to_string()),
        _ => normalize(&node.text()),
    }
}

/// Scope prefix of a qualified name: `ns::C::m` gives `ns::C`.
pub(super) fn qualifier_text<D: ast_grep_core::Doc>(node: &Node<'_, D>) -> Option<String> {
    if node.kind().as_ref() != "qualified_identifier" {
        return None;
    }
    let text = normalize(&node.text());
    // The cast target may itself be qualified: `A::operator std::string`.
    let cast_scope = operator_cast(node)
        .and_then(|_| text.find("::operator"))
        .map(|end| &text[..end]);
    let scope = cast_scope.or_else(|| text.rsplit_once("::").map(|(scope, _)| scope));
    scope
        .map(|scope| scope.trim().to_string())
        .filter(|scope| !scope.is_empty())
}

/// `Box<T>` gives `Box`.
pub(super) fn strip_template_args(text: &str) -> &str {
    text.split_once('<').map_or(text, |(head, _)| head).trim()
}

pub(super) fn last_segment(text: &str) -> String {
    text.rsplit("::").next().unwrap_or_default().trim().to_string()
}

/// Collapse all whitespace runs to single spaces.
pub(super) fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Walk a declarator down to its name.
pub(super) fn unwrap_declarator<'r, D: ast_grep_core::Doc>(
    node: Node<'r, D>,
) -> Declarator<'r, D> {
    let mut out = Declarator {
        name: None,
        modifiers: Vec::new(),
        function: None,
        is_function_pointer: false,
        initializer: None,
    };
    let mut current = Some(node);
    while let Some(node) = current.take() {
        let kind = node.kind();
        match kind.as_ref() {
            k if is_name(k) => {
                // A conversion operator carries its own function declarator
                // and the layers of its target type.
                if let Some(cast) = operator_cast(&node)
                    && let Some(inner) = cast.field("declarator").map(unwrap_declarator)
                {
                    out.modifiers.extend(inner.modifiers);
                    out.function = out.function.or(inner.function);
                }
                out.name = Some(node.clone());
            }
            "init_declarator" => {
                out.initializer = node
                    .field("value")
                    .map(|v| initializer_text(&v.text()));
                current = node.field("declarator");
            }
            "pointer_declarator" | "abstract_pointer_declarator" => {
                let is_const = node
                    .children()
                    .any(|c| c.kind().as_ref() == "type_qualifier" && c.text().as_ref() == "const");
                push_modifier(&mut out, Modifier::Pointer { is_const });
                current = node.field("declarator");
            }
            "reference_declarator" | "abstract_reference_declarator" => {
                let modifier = if node.children().any(|c| c.kind().as_ref() == "&&") {
                    Modifier::RvalueRef
                } else {
                    Modifier::LvalueRef
                };
                push_modifier(&mut out, modifier);
                current = node
                    .children()
                    .filter(|c| c.is_named() && is_declarator(c.kind().as_ref()))
                    .last();
            }
            "array_declarator" | "abstract_array_declarator" => {
                let size = node
                    .field("size")
                    .map(|s| normalize(&s.text()))
                    .unwrap_or_default();
                push_modifier(&mut out, Modifier::Array(size));
                current = node.field("declarator");
            }
            "function_declarator" | "abstract_function_declarator" => {
                if out.function.is_none() {
                    out.function = Some(node.clone());
                }
                current = node.field("declarator");
            }
            "parenthesized_declarator" | "attributed_declarator" => {
                current = node
                    .children()
                    .find(|c| c.is_named() && is_declarator(c.kind().as_ref()));
            }
            _ => {}
        }
    }
    out
}

fn push_modifier<D: ast_grep_core::Doc>(out: &mut Declarator<'_, D>, modifier: Modifier) {
    if out.function.is_some() {
        out.is_function_pointer = true;
    } else {
        out.modifiers.push(modifier);
    }
}

/// Initializer text without a leading `=` and with normalized whitespace.
pub(super) fn initializer_text(text: &str) -> String {
    normalize(text.trim_start().trim_start_matches('=').trim())
}

/// The base type of a declaration: its `type` field plus top-level
/// cv-qualifiers, and whether one of them was `const`.
pub(super) fn base_type<D: ast_grep_core::Doc>(decl: &Node<'_, D>) -> Option<(String, bool)> {
    let ty = decl.field("type")?;
    let mut is_const = false;
    let mut qualifiers = Vec::new();
    for child in decl.children() {
        if child.kind().as_ref() == "type_qualifier" {
            let text = child.text();
            match text.as_ref() {
                "const" | "constexpr" => is_const = true,
                "volatile" => qualifiers.push("volatile"),
                _ => {}
            }
        }
    }
    let mut spelling = String::new();
    if is_const {
        spelling.push_str("const ");
    }
    for q in qualifiers {
        spelling.push_str(q);
        spelling.push(' ');
    }
    spelling.push_str(&type_text(&ty));
    Some((spelling, is_const))
}

/// A type specifier's spelling. Inline definitions are spelled by name only.
fn type_text<D: ast_grep_core::Doc>(ty: &Node<'_, D>) -> String {
    match ty.kind().as_ref() {
        "class_specifier" | "struct_specifier" | "union_specifier" | "enum_specifier"
            if ty.field("body").is_some() =>
        {
            ty.field("name").map_or_else(
                || "(anonymous)".to_string(),
                |name| normalize(&name.text()),
            )
        }
        _ => normalize(&ty.text()),
    }
}

/// Apply declarator layers to a base spelling.
pub(super) fn compose(base: &str, base_const: bool, modifiers: &[Modifier]) -> TypeInfo {
    let mut spelling = base.to_string();
    for modifier in modifiers {
        let suffix = match modifier {
            Modifier::Pointer { is_const: true } => "*const".to_string(),
            Modifier::Pointer { is_const: false } => "*".to_string(),
            Modifier::LvalueRef => "&".to_string(),
            Modifier::RvalueRef => "&&".to_string(),
            Modifier::Array(size) => format!("[{size}]"),
        };
        if !(spelling.ends_with('*') || spelling.ends_with('&')) {
            spelling.push(' ');
        }
        spelling.push_str(&suffix);
    }

    let innermost = modifiers.last();
    TypeInfo {
        spelling,
        is_const: match innermost {
            None => base_const,
            Some(Modifier::Pointer { is_const }) => *is_const,
            Some(_) => false,
        },
        is_reference: matches!(innermost, Some(Modifier::LvalueRef)),
        is_pointer: matches!(innermost, Some(Modifier::Pointer { .. })),
    }
}

/// Type of a function pointer declarator: the declarator text with the name
/// cut out, e.g. `int (*)(int)`.
pub(super) fn function_pointer_type<D: ast_grep_core::Doc>(
    base: &str,
    declarator: &Node<'_, D>,
    name: &str,
) -> TypeInfo {
    let mut text = normalize(&declarator.text());
    if let Some((head, _)) = text.split_once('=') {
        text = head.trim().to_string();
    }
    let stripped = if name.is_empty() {
        text
    } else {
        text.replacen(name, "", 1)
    };
    TypeInfo {
        spelling: format!("{base} {}", stripped.replace(" )", ")")),
        is_const: false,
        is_reference: false,
        is_pointer: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("int", false, vec![], "int", false, false, false)]
    #[case("const int", true, vec![], "const int", true, false, false)]
    #[case("const char", true, vec![Modifier::Pointer { is_const: false }], "const char *", false, false, true)]
    #[case("int", false, vec![Modifier::Pointer { is_const: true }], "int *const", true, false, true)]
    #[case("const std::string", true, vec![Modifier::LvalueRef], "const std::string &", false, true, false)]
    #[case("std::string", false, vec![Modifier::RvalueRef], "std::string &&", false, false, false)]
    #[case("int", false, vec![Modifier::Pointer { is_const: false }, Modifier::LvalueRef], "int *&", false, true, false)]
    #[case("int", false, vec![Modifier::Array("4".into())], "int [4]", false, false, false)]
    fn composes_clang_style_spellings(
        #[case] base: &str,
        #[case] base_const: bool,
        #[case] modifiers: Vec<Modifier>,
        #[case] spelling: &str,
        #[case] is_const: bool,
        #[case] is_reference: bool,
        #[case] is_pointer: bool,
    ) {
        let ty = compose(base, base_const, &modifiers);
        assert_eq!(ty.spelling, spelling);
        assert_eq!(
            (ty.is_const, ty.is_reference, ty.is_pointer),
            (is_const, is_reference, is_pointer)
        );
    }

    #[rstest]
    #[case("ns::C::m", "m")]
    #[case("m", "m")]
    #[case(" a :: b ", "b")]
    fn last_segment_of_qualified_names(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(last_segment(text), expected);
    }

    #[test]
    fn initializer_drops_equals_and_whitespace() {
        assert_eq!(initializer_text("=  1 +\n 2"), "1 + 2");
        assert_eq!(initializer_text("{1, 2}"), "{1, 2}");
    }
}
