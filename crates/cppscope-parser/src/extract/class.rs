use cppscope_core::entities::ClassEntity;
use cppscope_core::enums::ElementKind;

use super::{ExtractContext, element};
use crate::cursor::{Cursor, CursorKind};

/// A class record without members. Members are attached by the traversal.
///
/// `is_abstract` looks only at direct children: a class that inherits a pure
/// virtual method without declaring one is not abstract here.
pub fn extract_class<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> Option<ClassEntity> {
    let kind = match cursor.kind() {
        CursorKind::StructDecl => ElementKind::Struct,
        _ => ElementKind::Class,
    };
    let element = element(cursor, kind, ctx)?;
    let children = cursor.children();

    let base_class_names = children
        .iter()
        .filter(|c| c.kind() == CursorKind::BaseSpecifier)
        .map(|base| match base.type_info() {
            Ok(ty) if !ty.spelling.is_empty() => ty.spelling,
            _ => base.spelling(),
        })
        .collect();

    let is_abstract = children
        .iter()
        .any(|c| c.kind() == CursorKind::Method && c.is_pure_virtual_method());

    let mut class = ClassEntity::new(element.name.clone(), kind, element.location.clone());
    class.element = element;
    class.base_class_names = base_class_names;
    class.is_abstract = is_abstract;
    class.is_template = cursor.kind() == CursorKind::ClassTemplate;
    class.owning_namespace_path = ctx.scope.current_namespace_key();
    class.access_specifier = cursor.access();
    Some(class)
}
