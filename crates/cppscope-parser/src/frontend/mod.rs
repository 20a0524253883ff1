//! Front ends: anything that turns a C++ file into an [`AstNode`] tree plus
//! diagnostics.

#[cfg(feature = "libclang")]
mod libclang;
mod sitter;

#[cfg(feature = "libclang")]
pub use self::libclang::ClangFrontend;
pub use self::sitter::TreeSitterFrontend;

use std::path::Path;

use cppscope_config::FrontendKind;

use crate::ast::AstNode;
use crate::cursor::ParsedUnit;
use crate::error::FrontendError;

/// A parser that produces the cursor tree for one file.
///
/// Implementations are shared across the project worker pool.
pub trait Frontend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parse the file at `path` with the given compiler arguments.
    ///
    /// # Errors
    /// Returns [`FrontendError`] when the file cannot be read or parsed at all.
    /// Recoverable problems are reported as diagnostics instead.
    fn parse(&self, path: &Path, args: &[String]) -> Result<ParsedUnit<AstNode>, FrontendError>;

    /// Parse in-memory `source` as if it were the file at `path`.
    ///
    /// # Errors
    /// Same as [`parse`](Self::parse).
    fn parse_source(
        &self,
        path: &str,
        source: &str,
        args: &[String],
    ) -> Result<ParsedUnit<AstNode>, FrontendError>;
}

/// The front end selected by configuration.
///
/// # Errors
/// Returns [`FrontendError::Unavailable`] for `libclang` when the crate was
/// built without the `libclang` feature.
pub fn frontend_for(kind: FrontendKind) -> Result<Box<dyn Frontend>, FrontendError> {
    match kind {
        FrontendKind::TreeSitter => Ok(Box::new(TreeSitterFrontend::new())),
        #[cfg(feature = "libclang")]
        FrontendKind::Libclang => Ok(Box::new(ClangFrontend::new())),
        #[cfg(not(feature = "libclang"))]
        FrontendKind::Libclang => Err(FrontendError::Unavailable(
            "cppscope was built without the `libclang` feature".to_string(),
        )),
    }
}

/// `-I` directories from a compiler argument list, in order.
pub(crate) fn include_dirs(args: &[String]) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-I" {
            if let Some(dir) = iter.next() {
                dirs.push(dir.clone());
            }
        } else if let Some(dir) = arg.strip_prefix("-I") {
            dirs.push(dir.to_string());
        }
    }
    dirs
}
