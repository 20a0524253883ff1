//! Routing of extracted entities into the document tree.
//!
//! Containers are found by structural path: namespaces by their name path,
//! classes by name within a container. Member targets use a flat pre-order
//! scan keyed by (class name, owning namespace); the first match wins, so
//! same-named nested classes under different parents in one namespace are
//! not told apart.

use cppscope_core::document::FileDocument;
use cppscope_core::entities::{
    ClassEntity, EnumEntity, FunctionEntity, NamespaceEntity, VariableEntity,
};
use cppscope_core::location::SourceLocation;

use crate::error::AggregateError;
use crate::scope::{SCOPE_SEPARATOR, ScopeTracker};

/// The namespace at `path`, creating placeholder namespaces for missing
/// levels. `None` only for an empty path.
pub fn resolve_namespace<'d>(
    doc: &'d mut FileDocument,
    path: &[String],
) -> Option<&'d mut NamespaceEntity> {
    let (first, rest) = path.split_first()?;
    Some(resolve_in(&mut doc.namespaces, first, rest, &doc.file_path))
}

fn resolve_in<'n>(
    namespaces: &'n mut Vec<NamespaceEntity>,
    first: &str,
    rest: &[String],
    file_path: &str,
) -> &'n mut NamespaceEntity {
    let mut current = child_namespace(namespaces, first, None, file_path);
    for name in rest {
        let parent_path = current.qualified_name();
        current = child_namespace(
            &mut current.nested_namespaces,
            name,
            Some(parent_path),
            file_path,
        );
    }
    current
}

fn child_namespace<'n>(
    list: &'n mut Vec<NamespaceEntity>,
    name: &str,
    parent_path: Option<String>,
    file_path: &str,
) -> &'n mut NamespaceEntity {
    let index = if let Some(index) = list.iter().position(|ns| ns.name() == name) {
        index
    } else {
        list.push(NamespaceEntity::new(
            name,
            SourceLocation::unknown(file_path),
            parent_path,
        ));
        list.len() - 1
    };
    &mut list[index]
}

/// Record a namespace declaration at the current scope.
///
/// Reopening a namespace reuses the existing instance. A placeholder created
/// earlier for a missing level takes the declaration's location.
pub fn declare_namespace(doc: &mut FileDocument, scope: &ScopeTracker, namespace: NamespaceEntity) {
    let siblings = match scope.namespace_path().split_first() {
        Some((first, rest)) => {
            &mut resolve_in(&mut doc.namespaces, first, rest, &doc.file_path).nested_namespaces
        }
        None => &mut doc.namespaces,
    };
    match siblings.iter_mut().find(|ns| ns.name() == namespace.name()) {
        Some(existing) => {
            if existing.element.location.is_unknown() {
                existing.element.location = namespace.element.location;
                existing.element.display_name = namespace.element.display_name;
            }
        }
        None => siblings.push(namespace),
    }
}

/// Record a class declaration at the current scope.
///
/// Outside any class the class goes into the top-level list or into the
/// current namespace. Inside a class it goes into the enclosing class's
/// nested classes. A class seen again is merged into the first instance.
///
/// # Errors
/// Returns [`AggregateError::ClassNotFound`] when the enclosing class is not
/// in the document.
pub fn declare_class(
    doc: &mut FileDocument,
    scope: &ScopeTracker,
    class: ClassEntity,
) -> Result<(), AggregateError> {
    let siblings = if scope.in_class() {
        &mut enclosing_class(doc, scope)?.nested_classes
    } else {
        match scope.namespace_path().split_first() {
            Some((first, rest)) => {
                &mut resolve_in(&mut doc.namespaces, first, rest, &doc.file_path).classes
            }
            None => &mut doc.classes,
        }
    };
    match siblings.iter_mut().find(|c| c.name() == class.name()) {
        Some(existing) => existing.merge_declaration(&class),
        None => siblings.push(class),
    }
    Ok(())
}

/// Route a function to the enclosing class, the current namespace, or the
/// top level.
///
/// # Errors
/// Returns [`AggregateError::ClassNotFound`] when the enclosing class is not
/// in the document.
pub fn place_function(
    doc: &mut FileDocument,
    scope: &ScopeTracker,
    function: FunctionEntity,
) -> Result<(), AggregateError> {
    if scope.in_class() {
        enclosing_class(doc, scope)?.methods.push(function);
    } else {
        match resolve_namespace(doc, scope.namespace_path()) {
            Some(namespace) => namespace.functions.push(function),
            None => doc.functions.push(function),
        }
    }
    Ok(())
}

/// Route a variable to the enclosing class's fields, the current namespace,
/// or the top level.
///
/// # Errors
/// Returns [`AggregateError::ClassNotFound`] when the enclosing class is not
/// in the document.
pub fn place_variable(
    doc: &mut FileDocument,
    scope: &ScopeTracker,
    variable: VariableEntity,
) -> Result<(), AggregateError> {
    if scope.in_class() {
        enclosing_class(doc, scope)?.fields.push(variable);
    } else {
        match resolve_namespace(doc, scope.namespace_path()) {
            Some(namespace) => namespace.variables.push(variable),
            None => doc.variables.push(variable),
        }
    }
    Ok(())
}

/// Route an enum to the enclosing class, the current namespace, or the top
/// level.
///
/// # Errors
/// Returns [`AggregateError::ClassNotFound`] when the enclosing class is not
/// in the document.
pub fn place_enum(
    doc: &mut FileDocument,
    scope: &ScopeTracker,
    entity: EnumEntity,
) -> Result<(), AggregateError> {
    if scope.in_class() {
        enclosing_class(doc, scope)?.nested_enums.push(entity);
    } else {
        match resolve_namespace(doc, scope.namespace_path()) {
            Some(namespace) => namespace.enums.push(entity),
            None => doc.enums.push(entity),
        }
    }
    Ok(())
}

fn enclosing_class<'d>(
    doc: &'d mut FileDocument,
    scope: &ScopeTracker,
) -> Result<&'d mut ClassEntity, AggregateError> {
    let name = scope.innermost_class().unwrap_or_default();
    let namespace = scope.current_namespace_key();
    find_class_mut(doc, name, namespace.as_deref()).ok_or_else(|| AggregateError::ClassNotFound {
        name: name.to_string(),
        namespace: namespace.unwrap_or_else(|| SCOPE_SEPARATOR.to_string()),
    })
}

/// First class in document pre-order with this name and owning namespace.
pub fn find_class_mut<'d>(
    doc: &'d mut FileDocument,
    name: &str,
    namespace: Option<&str>,
) -> Option<&'d mut ClassEntity> {
    let mut trail = ClassTrail::default();
    let found = locate_in_classes(&doc.classes, name, namespace, &mut trail.classes)
        || locate_in_namespaces(&doc.namespaces, name, namespace, &mut trail);
    if found { follow(doc, &trail) } else { None }
}

/// Indices leading from the document root to one class.
#[derive(Debug, Default)]
struct ClassTrail {
    namespaces: Vec<usize>,
    classes: Vec<usize>,
}

fn locate_in_namespaces(
    namespaces: &[NamespaceEntity],
    name: &str,
    namespace: Option<&str>,
    trail: &mut ClassTrail,
) -> bool {
    for (index, ns) in namespaces.iter().enumerate() {
        trail.namespaces.push(index);
        if locate_in_classes(&ns.classes, name, namespace, &mut trail.classes)
            || locate_in_namespaces(&ns.nested_namespaces, name, namespace, trail)
        {
            return true;
        }
        trail.namespaces.pop();
    }
    false
}

fn locate_in_classes(
    classes: &[ClassEntity],
    name: &str,
    namespace: Option<&str>,
    trail: &mut Vec<usize>,
) -> bool {
    for (index, class) in classes.iter().enumerate() {
        trail.push(index);
        let is_match =
            class.name() == name && class.owning_namespace_path.as_deref() == namespace;
        if is_match || locate_in_classes(&class.nested_classes, name, namespace, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

fn follow<'d>(doc: &'d mut FileDocument, trail: &ClassTrail) -> Option<&'d mut ClassEntity> {
    let (first, rest) = trail.classes.split_first()?;
    let mut list = &mut doc.classes;
    if let Some((ns_first, ns_rest)) = trail.namespaces.split_first() {
        let mut ns = doc.namespaces.get_mut(*ns_first)?;
        for index in ns_rest {
            ns = ns.nested_namespaces.get_mut(*index)?;
        }
        list = &mut ns.classes;
    }
    let mut class = list.get_mut(*first)?;
    for index in rest {
        class = class.nested_classes.get_mut(*index)?;
    }
    Some(class)
}
