//! Top-level statement scanner.
//!
//! Walks unindented logical lines and records the names bound directly at
//! module level: `def`/`async def` functions, classes, and bare-name
//! targets of plain `=` assignments. Bodies of compound statements are
//! indented (or follow the header's colon) and are never scanned.

use crate::{Definition, DefinitionKind};

use super::lexer::{LogicalLine, Token, TokenKind};

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const COMPOUND_HEADERS: &[&str] = &[
    "if", "elif", "else", "for", "while", "try", "except", "finally", "with",
];

/// Collects module-level definitions in source order.
pub fn top_level_definitions(lines: &[LogicalLine]) -> Vec<Definition> {
    let mut found = Vec::new();

    for line in lines.iter().filter(|l| l.indent == 0) {
        let tokens = line.tokens.as_slice();
        if let Some(def) = definition_header(tokens) {
            found.push(def);
            continue;
        }
        if is_compound_header(tokens) {
            continue;
        }
        for statement in split_top_level(tokens, ";") {
            found.extend(assignment_targets(statement));
        }
    }

    found
}

fn definition_header(tokens: &[Token]) -> Option<Definition> {
    let (kind, rest) = match tokens {
        [first, rest @ ..] if first.is_name("def") => (DefinitionKind::Function, rest),
        [first, second, rest @ ..] if first.is_name("async") && second.is_name("def") => {
            (DefinitionKind::Function, rest)
        }
        [first, rest @ ..] if first.is_name("class") => (DefinitionKind::Class, rest),
        _ => return None,
    };
    let name = rest.first().filter(|t| is_bindable_name(t))?;
    Some(Definition {
        name: name.text.clone(),
        kind,
        line: name.line,
    })
}

fn is_compound_header(tokens: &[Token]) -> bool {
    let Some(first) = tokens.first() else {
        return false;
    };
    if first.is_op("@") {
        return true;
    }
    if first.kind == TokenKind::Name && COMPOUND_HEADERS.contains(&first.text.as_str()) {
        return true;
    }
    if first.is_name("async") {
        return true;
    }
    // `match` is a soft keyword; as a statement header the line ends in a colon.
    first.is_name("match")
        && tokens.len() > 2
        && tokens.last().is_some_and(|t| t.is_op(":"))
}

/// Splits `tokens` on `separator` operators outside any brackets.
fn split_top_level<'a>(tokens: &'a [Token], separator: &str) -> Vec<&'a [Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Op {
            continue;
        }
        match token.text.as_str() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            text if depth == 0 && text == separator => {
                parts.push(&tokens[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts.retain(|p| !p.is_empty());
    parts
}

fn assignment_targets(statement: &[Token]) -> Vec<Definition> {
    let parts = split_top_level(statement, "=");
    if parts.len() < 2 {
        return Vec::new();
    }
    parts[..parts.len() - 1]
        .iter()
        .filter_map(|target| match target {
            [name] if is_bindable_name(name) => Some(Definition {
                name: name.text.clone(),
                kind: DefinitionKind::Assignment,
                line: name.line,
            }),
            _ => None,
        })
        .collect()
}

fn is_bindable_name(token: &Token) -> bool {
    token.kind == TokenKind::Name && !KEYWORDS.contains(&token.text.as_str())
}

#[cfg(test)]
mod tests {
    use super::super::lexer::PythonLexer;
    use super::*;

    fn names(src: &str) -> Vec<(String, DefinitionKind)> {
        let lines = PythonLexer::tokenize(src).expect("tokenize");
        top_level_definitions(&lines)
            .into_iter()
            .map(|d| (d.name, d.kind))
            .collect()
    }

    #[test]
    fn test_finds_functions_classes_and_assignments() {
        let src = "\
import os

def run():
    pass

async def serve():
    pass

class Plugin(Base):
    pass

VERSION = '1.0'
";
        assert_eq!(
            names(src),
            vec![
                ("run".to_string(), DefinitionKind::Function),
                ("serve".to_string(), DefinitionKind::Function),
                ("Plugin".to_string(), DefinitionKind::Class),
                ("VERSION".to_string(), DefinitionKind::Assignment),
            ]
        );
    }

    #[test]
    fn test_skips_nested_definitions() {
        let src = "\
class Outer:
    thing = 1
    def method(self):
        inner = 2

def wrapper():
    def thing():
        pass

if True:
    flag = 1
";
        let found = names(src);
        assert!(!found.iter().any(|(n, _)| n == "thing"));
        assert!(!found.iter().any(|(n, _)| n == "inner"));
        assert!(!found.iter().any(|(n, _)| n == "flag"));
    }

    #[test]
    fn test_one_line_compound_bodies_are_not_top_level() {
        let found = names("if DEBUG: level = 1\nclass A: x = 1\ndef f(): y = 2\n");
        assert_eq!(
            found,
            vec![
                ("A".to_string(), DefinitionKind::Class),
                ("f".to_string(), DefinitionKind::Function),
            ]
        );
    }

    #[test]
    fn test_chained_and_semicolon_assignments() {
        let found = names("a = b = 0; c = 1\n");
        let found: Vec<&str> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(found, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ignores_non_simple_targets() {
        let src = "\
x, y = 1, 2
obj.attr = 3
items[0] = 4
count += 1
typed: int = 5
call(arg=6)
same == 7
handler = lambda event=None: event
";
        let found: Vec<String> = names(src).into_iter().map(|(n, _)| n).collect();
        assert_eq!(found, vec!["handler".to_string()]);
    }

    #[test]
    fn test_decorated_definition_is_found() {
        let found = names("@register\ndef hook():\n    pass\n");
        assert_eq!(found, vec![("hook".to_string(), DefinitionKind::Function)]);
    }

    #[test]
    fn test_match_statement_is_compound_but_match_name_is_assignable() {
        let found = names("match = 1\nmatch command:\n    case _:\n        x = 1\n");
        assert_eq!(found, vec![("match".to_string(), DefinitionKind::Assignment)]);
    }
}
