use cppscope_core::entities::{EnumEntity, EnumValue};
use cppscope_core::enums::ElementKind;

use super::{ExtractContext, element, type_or_default};
use crate::cursor::{Cursor, CursorKind};

/// An enum record with its enumerators in declaration order.
pub fn extract_enum<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> Option<EnumEntity> {
    let element = element(cursor, ElementKind::Enum, ctx)?;

    let values = cursor
        .children()
        .iter()
        .filter(|c| c.kind() == CursorKind::EnumConstantDecl)
        .filter_map(|constant| {
            let name = constant.spelling();
            if name.is_empty() {
                return None;
            }
            let value = constant.enum_constant_value().unwrap_or_else(|| {
                tracing::debug!(enumerator = %name, "enumerator has no value");
                String::new()
            });
            Some(EnumValue { name, value })
        })
        .collect();

    Some(EnumEntity {
        element,
        is_scoped: cursor.is_scoped_enum(),
        underlying_type_name: type_or_default(cursor.enum_underlying_type()).spelling,
        values,
        access_specifier: cursor.access(),
    })
}
