//! Semantic checker
//!
//! Walks the declarations of a tree in document order and records findings:
//!
//! - unknown declared type → `error`, the declaration is not registered
//! - name already in scope → `error`, the first declaration's type is kept
//! - otherwise the name is registered and an `info` finding announces it
//! - a literal initializer whose type does not widen to the declared type →
//!   `error`; non-literal initializers are accepted unverified
//!
//! The scope lives only for one [`check`] call, so checking the same tree
//! twice yields the same findings.

use super::findings::SemanticFinding;
use super::type_system::{compatible, infer, PrimitiveType};
use crate::parser::ast::{AstNode, VariableDeclaration};
use rustc_hash::FxHashMap;

/// Check a tree and return its findings. The result is never empty.
pub fn check(ast: &AstNode) -> Vec<SemanticFinding> {
    let mut checker = Checker::new();
    for decl in ast.declarations() {
        checker.check_declaration(decl);
    }
    checker.finish()
}

/// Per-call checker state
struct Checker<'a> {
    scope: FxHashMap<&'a str, PrimitiveType>,
    findings: Vec<SemanticFinding>,
}

impl<'a> Checker<'a> {
    fn new() -> Self {
        Self {
            scope: FxHashMap::default(),
            findings: Vec::new(),
        }
    }

    fn check_declaration(&mut self, decl: &'a VariableDeclaration) {
        let name = decl.identifier.as_str();

        let Some(declared) = PrimitiveType::from_name(&decl.declared_type) else {
            self.findings.push(SemanticFinding::error(format!(
                "unknown type '{}' for variable '{}'",
                decl.declared_type, name
            )));
            return;
        };

        if self.scope.contains_key(name) {
            self.findings.push(SemanticFinding::error(format!(
                "variable '{}' is already declared",
                name
            )));
            return;
        }

        self.scope.insert(name, declared);
        self.findings.push(SemanticFinding::info(format!(
            "declared variable '{}' of type {}",
            name, declared
        )));

        match infer(&decl.expression) {
            Some(inferred) if !compatible(declared, inferred) => {
                self.findings.push(SemanticFinding::error(format!(
                    "type mismatch: cannot assign {} value {} to variable '{}' of type {}",
                    inferred,
                    decl.expression.trim(),
                    name,
                    declared
                )));
            }
            Some(_) => {}
            None => {
                log::debug!("initializer of '{}' is not a literal, left unverified", name);
            }
        }
    }

    fn finish(mut self) -> Vec<SemanticFinding> {
        if self.findings.is_empty() {
            self.findings.push(SemanticFinding::info("no semantic errors found"));
        }
        self.findings
    }
}
