use std::fs;

use pretty_assertions::assert_eq;

use super::*;

// ════════════════════════════════════════════════════════════════
// Includes
// ════════════════════════════════════════════════════════════════

#[test]
fn system_and_quoted_includes() {
    let root = lower_root("#include <vector>\n#include \"local.h\"\n");
    let includes = children_of_kind(&root, CursorKind::InclusionDirective);
    assert_eq!(spellings(&includes), vec!["vector", "local.h"]);
    assert_eq!(includes[0].display_name(), "#include <vector>");
    assert_eq!(includes[1].display_name(), "#include \"local.h\"");
    assert!(includes.iter().all(|i| i.included_file().is_none()));
}

#[test]
fn quoted_include_resolves_next_to_the_source() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("util.h"), "int util();\n").unwrap();
    let main = dir.path().join("main.cpp");
    fs::write(&main, "#include \"util.h\"\nint main() { return 0; }\n").unwrap();

    let unit = TreeSitterFrontend::new().parse(&main, &[]).unwrap();
    let include = find(&unit.root, CursorKind::InclusionDirective, "util.h");
    assert_eq!(
        include.included_file(),
        Some(dir.path().join("util.h").to_string_lossy().into_owned())
    );
}

#[test]
fn include_directories_are_searched_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    fs::write(second.join("dep.h"), "").unwrap();

    let args = vec![
        format!("-I{}", first.display()),
        "-I".to_string(),
        second.display().to_string(),
    ];
    let unit = TreeSitterFrontend::new()
        .parse_source("src/main.cpp", "#include <dep.h>\n", &args)
        .unwrap();
    let include = find(&unit.root, CursorKind::InclusionDirective, "dep.h");
    assert_eq!(
        include.included_file(),
        Some(second.join("dep.h").to_string_lossy().into_owned())
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TreeSitterFrontend::new().parse(&dir.path().join("absent.cpp"), &[]);
    assert!(matches!(result, Err(FrontendError::Io(_))));
}
