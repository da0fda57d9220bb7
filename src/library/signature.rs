//! Formal-parameter extraction from declared signature text.
//!
//! The API surface is introspected as raw declaration strings, e.g.
//! `function hack(host, opts = {}) { ... }`. Only the text between the first
//! `(` and the first `)` matters; comments, default-value expressions and
//! destructuring bodies are stripped before the names are split out.

use regex::Regex;

/// A named formal parameter. `rest` marks a trailing spread collector
/// (`...extra`) that gathers any number of additional positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub rest: bool,
}

/// Parse parameter names out of a declared signature.
///
/// Malformed text (no parameter list, unbalanced parens) degrades to an
/// empty parameter list rather than an error.
pub fn parse_params(signature: &str) -> Vec<Param> {
    let Some(open) = signature.find('(') else {
        return Vec::new();
    };
    let Some(close) = signature[open..].find(')').map(|i| open + i) else {
        return Vec::new();
    };
    let inner = &signature[open + 1..close];

    let line_comments = Regex::new(r"(?m)//.*$").unwrap();
    let block_comments = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    let defaults =
        Regex::new(r#"\s*=\s*(?:'(?:\\'|[^'\r\n])*'|"(?:\\"|[^"\r\n])*"|[^,)]*)"#).unwrap();
    let braces = Regex::new(r"\{[^}]*\}").unwrap();

    let stripped = line_comments.replace_all(inner, "");
    let stripped = block_comments.replace_all(&stripped, "");
    let stripped = defaults.replace_all(&stripped, "");
    let stripped = braces.replace_all(&stripped, "");

    stripped
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|raw| match raw.strip_prefix("...") {
            Some(name) => Param {
                name: name.to_string(),
                rest: true,
            },
            None => Param {
                name: raw.to_string(),
                rest: false,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(signature: &str) -> Vec<String> {
        parse_params(signature).into_iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_simple_params() {
        assert_eq!(names("function hack(host, threads)"), vec!["host", "threads"]);
    }

    #[test]
    fn test_empty_param_list() {
        assert!(parse_params("function getHostname()").is_empty());
    }

    #[test]
    fn test_defaults_are_stripped() {
        assert_eq!(
            names("function grow(host, opts = null, stock = false)"),
            vec!["host", "opts", "stock"]
        );
    }

    #[test]
    fn test_string_defaults_with_commas() {
        assert_eq!(
            names(r#"function print(fmt = "a, b", value)"#),
            vec!["fmt", "value"]
        );
    }

    #[test]
    fn test_destructured_defaults_are_stripped() {
        assert_eq!(names("function weaken(host, opts = {a: 1})"), vec!["host", "opts"]);
    }

    #[test]
    fn test_comments_are_stripped() {
        assert_eq!(
            names("function run(script /* the filename */, threads)"),
            vec!["script", "threads"]
        );
    }

    #[test]
    fn test_rest_param() {
        let params = parse_params("function exec(script, host, threads, ...args)");
        assert_eq!(params.len(), 4);
        assert_eq!(
            params[3],
            Param {
                name: "args".to_string(),
                rest: true
            }
        );
        assert!(!params[0].rest);
    }

    #[test]
    fn test_malformed_signature_degrades_to_empty() {
        assert!(parse_params("not a signature at all").is_empty());
        assert!(parse_params("function broken(").is_empty());
    }

    #[test]
    fn test_only_first_paren_pair_is_read() {
        assert_eq!(
            names("function f(a, b) { return g(x, y); }"),
            vec!["a", "b"]
        );
    }
}
