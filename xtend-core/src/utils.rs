//! Shared string helpers for code generation.

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

/// Check whether `name` is a Rust keyword
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Path keywords have no raw form (`r#self` is not an identifier)
const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Convert a package name to the identifier used in Rust paths
/// (e.g., "xtend-static" -> "xtend_static", "type" -> "r#type")
///
/// Path keywords are returned unescaped; cargo rejects them as package
/// names before any generated code is compiled.
pub fn to_crate_ident(name: &str) -> String {
    let ident = name.replace('-', "_");
    if is_rust_keyword(&ident) && !PATH_KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_crate_ident() {
        assert_eq!(to_crate_ident("static"), "r#static");
        assert_eq!(to_crate_ident("xtend-static"), "xtend_static");
        assert_eq!(to_crate_ident("timeouts"), "timeouts");
        assert_eq!(to_crate_ident(""), "");
    }

    #[test]
    fn test_path_keywords_are_never_raw() {
        for name in ["crate", "self", "Self", "super"] {
            assert!(is_rust_keyword(name));
            assert_eq!(to_crate_ident(name), name);
        }
        assert_eq!(to_crate_ident("async"), "r#async");
    }

    #[test]
    fn test_is_rust_keyword() {
        assert!(is_rust_keyword("fn"));
        assert!(!is_rust_keyword("migrations"));
    }
}
