use cppscope_core::entities::VariableEntity;
use cppscope_core::enums::ElementKind;

use super::{ExtractContext, element, type_or_default};
use crate::cursor::{Cursor, CursorKind};

pub fn extract_variable<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> Option<VariableEntity> {
    let kind = if cursor.kind() == CursorKind::FieldDecl || ctx.scope.in_class() {
        ElementKind::Field
    } else {
        ElementKind::Variable
    };
    let element = element(cursor, kind, ctx)?;
    let ty = type_or_default(cursor.type_info());

    Some(VariableEntity {
        element,
        type_name: ty.spelling,
        is_const: ty.is_const,
        is_static: cursor.is_static_storage(),
        access_specifier: cursor.access(),
        initial_value: cursor.initializer(),
    })
}
