use cppscope_core::entities::IncludeEntity;

use super::{ExtractContext, location_or_unknown};
use crate::cursor::Cursor;

/// An include record. Unresolved includes are kept with `is_found = false`
/// and the spelled path.
pub fn extract_include<C: Cursor>(cursor: &C, ctx: ExtractContext<'_>) -> Option<IncludeEntity> {
    let display = cursor.display_name();
    let is_system_include = display.contains('<') && display.contains('>');

    let (included_path, is_found) = match cursor.included_file() {
        Some(path) => (path, true),
        None => (cursor.spelling(), false),
    };
    if included_path.is_empty() {
        return None;
    }

    Some(IncludeEntity {
        included_path,
        is_system_include,
        is_found,
        location: location_or_unknown(cursor, ctx),
    })
}
