use cppscope_core::entities::{FunctionEntity, ParameterEntity};
use cppscope_core::enums::ElementKind;

use super::{ExtractContext, element, type_or_default};
use crate::cursor::{Cursor, CursorKind};

/// A function, method, constructor, or destructor record.
///
/// Apart from constructors and destructors the kind follows the lexical
/// scope: anything declared inside a class body is a method, anything else
/// (including an out-of-line `C::m` definition) is a function.
pub fn extract_function<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> Option<FunctionEntity> {
    let kind = match cursor.kind() {
        CursorKind::Constructor => ElementKind::Constructor,
        CursorKind::Destructor => ElementKind::Destructor,
        _ if ctx.scope.in_class() => ElementKind::Method,
        _ => ElementKind::Function,
    };
    let element = element(cursor, kind, ctx)?;

    Some(FunctionEntity {
        element,
        return_type_name: type_or_default(cursor.result_type()).spelling,
        parameters: extract_parameters(cursor),
        is_virtual: cursor.is_virtual_method(),
        is_pure_virtual: cursor.is_pure_virtual_method(),
        is_static: cursor.is_static_method(),
        is_const: cursor.is_const_method(),
        is_constructor: kind == ElementKind::Constructor,
        is_destructor: kind == ElementKind::Destructor,
        is_template: cursor.kind() == CursorKind::FunctionTemplate,
        access_specifier: cursor.access(),
        owning_class_qualified_name: ctx.scope.current_class_key(),
    })
}

/// Parameter children in declaration order. Unnamed parameters are called
/// `param_<index>`.
pub fn extract_parameters<C: Cursor>(cursor: &C) -> Vec<ParameterEntity> {
    cursor
        .children()
        .iter()
        .filter(|c| c.kind() == CursorKind::ParmDecl)
        .enumerate()
        .map(|(index, param)| {
            let ty = type_or_default(param.type_info());
            let name = param.spelling();
            ParameterEntity {
                name: if name.is_empty() {
                    format!("param_{index}")
                } else {
                    name
                },
                type_name: ty.spelling,
                is_const: ty.is_const,
                is_reference: ty.is_reference,
                is_pointer: ty.is_pointer,
                default_value: param.initializer(),
            }
        })
        .collect()
}
