// AST (Abstract Syntax Tree) definitions for the declaration language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Compute the 1-based location of a byte offset in `source`.
    ///
    /// The line is the number of newlines before `offset` plus one; the column
    /// counts characters from the preceding newline (or from the start of the
    /// text on the first line, which also yields a 1-based value).
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let before = &source[..offset.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

/// Tag naming the kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Program,
    VariableDeclaration,
    Type,
    Identifier,
    Expression,
    Empty,
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeTag::Program => "Program",
            NodeTag::VariableDeclaration => "VariableDeclaration",
            NodeTag::Type => "Type",
            NodeTag::Identifier => "Identifier",
            NodeTag::Expression => "Expression",
            NodeTag::Empty => "Empty",
        };
        f.write_str(name)
    }
}

/// A single `<type> <identifier> = <expression>` statement.
///
/// The expression is kept verbatim; it is never parsed further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub declared_type: String,
    pub identifier: String,
    pub expression: String,
}

impl VariableDeclaration {
    pub fn new(
        declared_type: impl Into<String>,
        identifier: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            declared_type: declared_type.into(),
            identifier: identifier.into(),
            expression: expression.into(),
        }
    }
}

/// Syntax tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    /// Root of every parsed source; holds declarations in document order,
    /// or a single [`AstNode::Empty`] when there are none.
    Program { children: Vec<AstNode> },
    VariableDeclaration(VariableDeclaration),
    Empty,
}

impl AstNode {
    pub fn program(children: Vec<AstNode>) -> Self {
        if children.is_empty() {
            AstNode::Program {
                children: vec![AstNode::Empty],
            }
        } else {
            AstNode::Program { children }
        }
    }

    pub fn tag(&self) -> NodeTag {
        match self {
            AstNode::Program { .. } => NodeTag::Program,
            AstNode::VariableDeclaration(_) => NodeTag::VariableDeclaration,
            AstNode::Empty => NodeTag::Empty,
        }
    }

    /// Iterate the declarations reachable from this node in document order.
    pub fn declarations(&self) -> Box<dyn Iterator<Item = &VariableDeclaration> + '_> {
        match self {
            AstNode::Program { children } => {
                Box::new(children.iter().flat_map(|child| child.declarations()))
            }
            AstNode::VariableDeclaration(decl) => Box::new(std::iter::once(decl)),
            AstNode::Empty => Box::new(std::iter::empty()),
        }
    }

    /// Generic `tag` / `label` / `children` view of the tree, used for display.
    ///
    /// Declarations expand into their `Type`, `Identifier` and `Expression`
    /// parts, which appear as labelled leaves.
    pub fn view(&self) -> TreeView<'_> {
        match self {
            AstNode::Program { children } => TreeView {
                tag: NodeTag::Program,
                label: None,
                children: children.iter().map(AstNode::view).collect(),
            },
            AstNode::VariableDeclaration(decl) => TreeView {
                tag: NodeTag::VariableDeclaration,
                label: None,
                children: vec![
                    TreeView::leaf(NodeTag::Type, &decl.declared_type),
                    TreeView::leaf(NodeTag::Identifier, &decl.identifier),
                    TreeView::leaf(NodeTag::Expression, &decl.expression),
                ],
            },
            AstNode::Empty => TreeView {
                tag: NodeTag::Empty,
                label: None,
                children: Vec::new(),
            },
        }
    }
}

/// Borrowed, renderable view of one tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView<'a> {
    pub tag: NodeTag,
    pub label: Option<&'a str>,
    pub children: Vec<TreeView<'a>>,
}

impl<'a> TreeView<'a> {
    fn leaf(tag: NodeTag, label: &'a str) -> Self {
        Self {
            tag,
            label: Some(label),
            children: Vec::new(),
        }
    }

    /// Flatten into `(depth, node)` pairs in pre-order.
    pub fn flatten(&self) -> Vec<(usize, &TreeView<'a>)> {
        let mut out = Vec::new();
        self.flatten_into(0, &mut out);
        out
    }

    fn flatten_into<'s>(&'s self, depth: usize, out: &mut Vec<(usize, &'s TreeView<'a>)>) {
        out.push((depth, self));
        for child in &self.children {
            child.flatten_into(depth + 1, out);
        }
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.flatten() {
            let indent = "  ".repeat(depth);
            match node.label {
                Some(label) => writeln!(f, "{}{}: {}", indent, node.tag, label)?,
                None => writeln!(f, "{}{}", indent, node.tag)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_offset() {
        let source = "int x = 1;\nint y = 2;";
        assert_eq!(SourceLocation::from_offset(source, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::from_offset(source, 4), SourceLocation::new(1, 5));
        assert_eq!(SourceLocation::from_offset(source, 11), SourceLocation::new(2, 1));
        assert_eq!(SourceLocation::from_offset(source, 15), SourceLocation::new(2, 5));
    }

    #[test]
    fn test_empty_program_gets_empty_child() {
        let program = AstNode::program(Vec::new());
        assert_eq!(
            program,
            AstNode::Program {
                children: vec![AstNode::Empty]
            }
        );
        assert_eq!(program.declarations().count(), 0);
    }

    #[test]
    fn test_view_expands_declaration_parts() {
        let program = AstNode::program(vec![AstNode::VariableDeclaration(
            VariableDeclaration::new("int", "x", "5"),
        )]);
        let rendered = program.view().to_string();
        assert_eq!(
            rendered,
            "Program\n  VariableDeclaration\n    Type: int\n    Identifier: x\n    Expression: 5\n"
        );
    }
}
