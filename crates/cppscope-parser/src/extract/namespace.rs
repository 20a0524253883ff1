use cppscope_core::entities::NamespaceEntity;

use super::{ExtractContext, location_or_unknown};
use crate::cursor::Cursor;

/// A namespace record whose parent path is the current namespace stack.
///
/// Returns `None` for anonymous namespaces.
pub fn extract_namespace<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> Option<NamespaceEntity> {
    let name = cursor.spelling();
    if name.is_empty() {
        return None;
    }
    let mut namespace = NamespaceEntity::new(
        name,
        location_or_unknown(cursor, ctx),
        ctx.scope.current_namespace_key(),
    );
    namespace.element.display_name = cursor.display_name();
    Some(namespace)
}
