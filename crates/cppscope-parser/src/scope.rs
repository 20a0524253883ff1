//! Lexical scope stacks threaded through a traversal.

/// Separator used in every owner key and namespace path.
pub const SCOPE_SEPARATOR: &str = "::";

/// Namespace and class name stacks for the node currently being visited.
///
/// Both stacks are strictly LIFO: every `enter_*` is paired with the matching
/// `leave_*` by the caller once the node's children are done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTracker {
    namespace_path: Vec<String>,
    class_path: Vec<String>,
}

impl ScopeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_namespace(&mut self, name: impl Into<String>) {
        self.namespace_path.push(name.into());
    }

    pub fn leave_namespace(&mut self) -> Option<String> {
        self.namespace_path.pop()
    }

    pub fn enter_class(&mut self, name: impl Into<String>) {
        self.class_path.push(name.into());
    }

    pub fn leave_class(&mut self) -> Option<String> {
        self.class_path.pop()
    }

    #[must_use]
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace_path
    }

    #[must_use]
    pub fn class_path(&self) -> &[String] {
        &self.class_path
    }

    /// `::`-joined namespace path, `None` at file scope.
    #[must_use]
    pub fn current_namespace_key(&self) -> Option<String> {
        join(&self.namespace_path)
    }

    /// `::`-joined class path, `None` outside any class.
    #[must_use]
    pub fn current_class_key(&self) -> Option<String> {
        join(&self.class_path)
    }

    #[must_use]
    pub fn innermost_class(&self) -> Option<&str> {
        self.class_path.last().map(String::as_str)
    }

    #[must_use]
    pub fn in_class(&self) -> bool {
        !self.class_path.is_empty()
    }

    #[must_use]
    pub fn in_namespace(&self) -> bool {
        !self.namespace_path.is_empty()
    }
}

fn join(path: &[String]) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        Some(path.join(SCOPE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_has_no_keys() {
        let scope = ScopeTracker::new();
        assert_eq!(scope.current_namespace_key(), None);
        assert_eq!(scope.current_class_key(), None);
        assert_eq!(scope.innermost_class(), None);
    }

    #[test]
    fn keys_join_with_double_colon() {
        let mut scope = ScopeTracker::new();
        scope.enter_namespace("a");
        scope.enter_namespace("b");
        scope.enter_class("Outer");
        scope.enter_class("Inner");
        assert_eq!(scope.current_namespace_key().as_deref(), Some("a::b"));
        assert_eq!(scope.current_class_key().as_deref(), Some("Outer::Inner"));
        assert_eq!(scope.innermost_class(), Some("Inner"));
    }

    #[test]
    fn stacks_are_lifo_and_independent() {
        let mut scope = ScopeTracker::new();
        scope.enter_namespace("n");
        scope.enter_class("C");
        assert_eq!(scope.leave_class().as_deref(), Some("C"));
        assert!(!scope.in_class());
        assert!(scope.in_namespace());
        assert_eq!(scope.leave_namespace().as_deref(), Some("n"));
        assert_eq!(scope.leave_namespace(), None);
    }
}
