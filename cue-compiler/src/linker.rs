//! Library linking: resolve import paths, load and parse library
//! documents, and merge their exported actions into scope.
//!
//! The main program is never rewritten; libraries are loaded alongside it
//! and the name registry merges their actions flatly. Loading does blocking
//! file I/O, which is acceptable because one compile never overlaps with itself,
//! and concurrent compiles each get their own loaded set.

use std::path::{Component, Path, PathBuf};

use cue_ast::{Document, Import, Library, Location, Program};

use crate::error::{CompileError, IoError, ParseError, TransformError};

/// Seam to the external front-end: the linker re-invokes it for each
/// loaded library file.
pub trait DocumentParser {
    /// Parse `source` into a document; `origin` is the file it was loaded
    /// from, for diagnostics.
    fn parse(&self, source: &str, origin: &Path) -> Result<Document, ParseError>;
}

/// The import paths of a program, deduplicated by literal path string,
/// first-seen order.
pub fn extract_imports(program: &Program) -> Vec<&Import> {
    let mut seen = Vec::new();
    let mut imports = Vec::new();
    for import in &program.imports {
        if !seen.contains(&import.path.as_str()) {
            seen.push(import.path.as_str());
            imports.push(import);
        }
    }
    imports
}

/// Resolve an import path against the importing document's directory.
///
/// Only relative paths are allowed; both separator styles are accepted and
/// `.`/`..` segments are collapsed.
pub fn resolve_import(
    path: &str,
    importing_document: &Path,
    location: Location,
) -> Result<PathBuf, IoError> {
    let normalized_input = path.replace('\\', "/");
    let relative = Path::new(&normalized_input);
    if relative.is_absolute() {
        return Err(IoError::Security {
            path: path.to_string(),
            location,
        });
    }

    let anchor = importing_document.parent().unwrap_or_else(|| Path::new(""));
    Ok(normalize(&anchor.join(relative)))
}

/// Collapse `.` and `..` components without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Read a library file, mapping io failures onto the closed error set.
pub fn load(path: &Path, location: Location) -> Result<String, IoError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
            location,
        },
        std::io::ErrorKind::PermissionDenied => IoError::Permission {
            path: path.to_path_buf(),
            location,
        },
        _ => IoError::Read {
            path: path.to_path_buf(),
            message: source.to_string(),
            location,
        },
    })
}

/// Parse loaded text as a library. A program imported as a library is a
/// parse error pointing at the import statement.
pub fn parse_library(
    parser: &dyn DocumentParser,
    source: &str,
    origin: &Path,
    import_location: Location,
) -> Result<Library, ParseError> {
    match parser.parse(source, origin)? {
        Document::Library(library) => Ok(library),
        Document::Program(_) => Err(ParseError::new(
            format!("'{}' is a program, not a library", origin.display()),
            import_location,
        )
        .with_hint("library files must start with the 'library' keyword")),
    }
}

/// Resolve, load, and parse every import of `program`, then reject
/// duplicate action names across the merged scope.
pub fn link(
    program: &Program,
    source_location: Option<&Path>,
    parser: &dyn DocumentParser,
) -> Result<Vec<Library>, CompileError> {
    let imports = extract_imports(program);
    if imports.is_empty() {
        return Ok(Vec::new());
    }

    let Some(importing_document) = source_location else {
        return Err(IoError::Read {
            path: PathBuf::from(imports[0].path.clone()),
            message: "cannot resolve imports without a source location".into(),
            location: imports[0].location,
        }
        .into());
    };

    let mut libraries = Vec::with_capacity(imports.len());
    for import in imports {
        let resolved = resolve_import(&import.path, importing_document, import.location)?;
        let source = load(&resolved, import.location)?;
        let library = parse_library(parser, &source, &resolved, import.location)?;
        libraries.push(library);
    }

    check_duplicate_actions(program, &libraries)?;
    Ok(libraries)
}

/// Duplicate action names, whether across libraries or between the program
/// and a library, are a linking error, never a silent overwrite.
fn check_duplicate_actions(
    program: &Program,
    libraries: &[Library],
) -> Result<(), TransformError> {
    let mut owners: Vec<(&str, String, Location)> = program
        .actions
        .iter()
        .map(|action| {
            (
                action.name.as_str(),
                format!("program '{}'", program.name),
                action.location,
            )
        })
        .collect();

    for library in libraries {
        for action in &library.actions {
            let origin = format!("library '{}'", library.name);
            if let Some((_, first, _)) = owners
                .iter()
                .find(|(name, _, _)| *name == action.name.as_str())
            {
                return Err(TransformError::DuplicateAction {
                    name: action.name.clone(),
                    first: first.clone(),
                    second: origin,
                    location: action.location,
                });
            }
            owners.push((action.name.as_str(), origin, action.location));
        }
    }
    Ok(())
}
