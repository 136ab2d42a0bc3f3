//! Lowering from the external tree-sitter parse tree into the arena model.
//!
//! tree-sitter is the parser boundary: it owns tokenization and error
//! recovery, and we consume its tree read-only. Lowering keeps named nodes
//! (minus comments), maps grammar kind strings onto the closed [`SyntaxKind`]
//! set, and keeps exactly one class of anonymous tokens: the `var`/`let`/
//! `const` declaration keywords, which the mutability pass rewrites.
//!
//! One shape difference is papered over here: in `for (var k in obj)` the
//! grammar attaches the keyword and the binding directly to the loop node,
//! while everywhere else they live under a declaration list. Lowering
//! synthesizes the list so every declaration keyword has a
//! [`SyntaxKind::VariableDeclarationList`] parent.

use anyhow::Context;
use tree_sitter::{Node as TsNode, Parser};

use crate::error::Result;
use crate::tree::arena::{NodeId, SyntaxTree};
use crate::tree::kind::SyntaxKind;

/// Parse one source unit and lower it into a [`SyntaxTree`].
pub fn parse(text: &str) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .context("failed to load the TypeScript grammar")?;
    let ts_tree = parser
        .parse(text, None)
        .context("parser produced no syntax tree")?;
    Ok(convert(ts_tree.root_node()))
}

/// Lower a parsed tree-sitter tree into the arena model.
#[must_use]
pub fn convert(root: TsNode) -> SyntaxTree {
    let mut tree = SyntaxTree::new();
    let root_id = tree.push(
        SyntaxKind::SourceFile,
        root.start_byte(),
        root.end_byte(),
        None,
    );
    let mut cursor = root.walk();
    let kids: Vec<TsNode> = root.children(&mut cursor).collect();
    for child in kids {
        lower(&mut tree, root_id, child);
    }
    tree
}

fn lower(tree: &mut SyntaxTree, parent: NodeId, node: TsNode) {
    match node.kind() {
        "comment" => {}
        "for_in_statement" => lower_for_in(tree, parent, node),
        // Plain strings carry no identifier references; template strings do
        // (via `${...}` substitutions) and take the default path.
        "string" => {
            tree.push(
                SyntaxKind::StringLiteral,
                node.start_byte(),
                node.end_byte(),
                Some(parent),
            );
        }
        kind => {
            let id = tree.push(
                map_kind(kind),
                node.start_byte(),
                node.end_byte(),
                Some(parent),
            );
            let mut cursor = node.walk();
            let kids: Vec<TsNode> = node.children(&mut cursor).collect();
            for child in kids {
                if child.is_named() {
                    lower(tree, id, child);
                } else if matches!(kind, "variable_declaration" | "lexical_declaration") {
                    if let Some(kw) = keyword_kind(child.kind()) {
                        tree.push(kw, child.start_byte(), child.end_byte(), Some(id));
                    }
                }
            }
        }
    }
}

/// Lower `for (var k in obj) body`, synthesizing a declaration list around
/// the keyword and binding so it matches the shape of every other
/// declaration. Loops without a declaration keyword (`for (k in obj)`) lower
/// normally.
fn lower_for_in(tree: &mut SyntaxTree, parent: NodeId, node: TsNode) {
    let id = tree.push(
        SyntaxKind::ForInStatement,
        node.start_byte(),
        node.end_byte(),
        Some(parent),
    );
    let mut cursor = node.walk();
    let kids: Vec<TsNode> = node.children(&mut cursor).collect();

    let keyword = kids
        .iter()
        .find(|c| !c.is_named() && keyword_kind(c.kind()).is_some())
        .copied();
    let left = node.child_by_field_name("left");

    if let (Some(kw), Some(binding)) = (keyword, left) {
        let list = tree.push(
            SyntaxKind::VariableDeclarationList,
            kw.start_byte(),
            binding.end_byte(),
            Some(id),
        );
        if let Some(kind) = keyword_kind(kw.kind()) {
            tree.push(kind, kw.start_byte(), kw.end_byte(), Some(list));
        }
        let decl = tree.push(
            SyntaxKind::VariableDeclaration,
            binding.start_byte(),
            binding.end_byte(),
            Some(list),
        );
        lower(tree, decl, binding);
        for child in kids {
            if child.is_named() && child.id() != binding.id() {
                lower(tree, id, child);
            }
        }
    } else {
        for child in kids {
            if child.is_named() {
                lower(tree, id, child);
            }
        }
    }
}

fn keyword_kind(token: &str) -> Option<SyntaxKind> {
    match token {
        "var" => Some(SyntaxKind::VarKeyword),
        "let" => Some(SyntaxKind::LetKeyword),
        "const" => Some(SyntaxKind::ConstKeyword),
        _ => None,
    }
}

/// Map a tree-sitter grammar kind onto the closed kind set.
fn map_kind(kind: &str) -> SyntaxKind {
    match kind {
        "program" => SyntaxKind::SourceFile,
        "function_declaration" | "generator_function_declaration" => SyntaxKind::FunctionDecl,
        "function_expression" | "function" | "generator_function" => SyntaxKind::FunctionExpr,
        "arrow_function" => SyntaxKind::ArrowFunction,
        "method_definition" => SyntaxKind::MethodDecl,
        "function_signature" => SyntaxKind::FunctionSignature,
        "method_signature" | "abstract_method_signature" => SyntaxKind::MethodSignature,
        "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDecl,
        "class" => SyntaxKind::ClassExpr,
        "class_body" => SyntaxKind::ClassBody,
        "public_field_definition" => SyntaxKind::PublicFieldDef,
        "decorator" => SyntaxKind::Decorator,
        "accessibility_modifier" => SyntaxKind::AccessibilityModifier,
        "formal_parameters" => SyntaxKind::FormalParameters,
        "required_parameter" | "optional_parameter" => SyntaxKind::Parameter,
        "enum_declaration" => SyntaxKind::EnumDecl,
        "enum_body" => SyntaxKind::EnumBody,
        "enum_assignment" => SyntaxKind::EnumMember,
        "interface_declaration" => SyntaxKind::InterfaceDecl,
        "interface_body" | "object_type" => SyntaxKind::InterfaceBody,
        "property_signature" => SyntaxKind::PropertySignature,
        "type_alias_declaration" => SyntaxKind::TypeAliasDecl,
        "type_annotation" => SyntaxKind::TypeAnnotation,
        "import_statement" => SyntaxKind::ImportDecl,
        "import_clause" => SyntaxKind::ImportClause,
        "named_imports" => SyntaxKind::NamedImports,
        "import_specifier" => SyntaxKind::ImportSpecifier,
        "namespace_import" => SyntaxKind::NamespaceImport,
        "export_statement" => SyntaxKind::ExportStatement,
        "statement_block" => SyntaxKind::Block,
        "if_statement" => SyntaxKind::IfStatement,
        "else_clause" => SyntaxKind::ElseClause,
        "for_statement" => SyntaxKind::ForStatement,
        "for_in_statement" => SyntaxKind::ForInStatement,
        "while_statement" => SyntaxKind::WhileStatement,
        "do_statement" => SyntaxKind::DoStatement,
        "expression_statement" => SyntaxKind::ExpressionStatement,
        "return_statement" => SyntaxKind::ReturnStatement,
        "break_statement" => SyntaxKind::BreakStatement,
        "continue_statement" => SyntaxKind::ContinueStatement,
        "throw_statement" => SyntaxKind::ThrowStatement,
        "debugger_statement" => SyntaxKind::DebuggerStatement,
        "empty_statement" => SyntaxKind::EmptyStatement,
        "variable_declaration" | "lexical_declaration" => SyntaxKind::VariableDeclarationList,
        "variable_declarator" => SyntaxKind::VariableDeclaration,
        "object_pattern" => SyntaxKind::ObjectPattern,
        "array_pattern" => SyntaxKind::ArrayPattern,
        "pair_pattern" => SyntaxKind::PairPattern,
        "object_assignment_pattern" | "assignment_pattern" => SyntaxKind::AssignmentPattern,
        "rest_pattern" => SyntaxKind::RestPattern,
        // Shorthand object properties and type positions are identifier
        // references to the same bindings; labels are not and fall through.
        "identifier"
        | "shorthand_property_identifier"
        | "shorthand_property_identifier_pattern"
        | "type_identifier" => SyntaxKind::Identifier,
        "property_identifier" => SyntaxKind::PropertyIdentifier,
        "number" => SyntaxKind::NumericLiteral,
        "member_expression" => SyntaxKind::PropertyAccess,
        "subscript_expression" => SyntaxKind::ElementAccess,
        "assignment_expression" => SyntaxKind::AssignmentExpr,
        "augmented_assignment_expression" => SyntaxKind::CompoundAssignmentExpr,
        "update_expression" => SyntaxKind::UpdateExpr,
        _ => SyntaxKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::walk::find_descendants;

    #[test]
    fn test_parse_var_statement() {
        let text = "var x = 1;";
        let tree = parse(text).unwrap();
        let keywords = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::VarKeyword
        });
        assert_eq!(keywords.len(), 1);
        assert_eq!(tree.text_of(keywords[0], text), "var");
        assert_eq!(
            tree.kind(tree.parent(keywords[0]).unwrap()),
            SyntaxKind::VariableDeclarationList
        );
    }

    #[test]
    fn test_parse_lexical_keywords() {
        let text = "let a = 1; const b = 2;";
        let tree = parse(text).unwrap();
        let lets = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::LetKeyword
        });
        let consts = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::ConstKeyword
        });
        assert_eq!(lets.len(), 1);
        assert_eq!(consts.len(), 1);
        assert_eq!(tree.text_of(lets[0], text), "let");
        assert_eq!(tree.text_of(consts[0], text), "const");
    }

    #[test]
    fn test_for_in_synthesized_list() {
        let text = "for (var k in obj) { use(k); }";
        let tree = parse(text).unwrap();
        let keywords = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::VarKeyword
        });
        assert_eq!(keywords.len(), 1);
        let list = tree.parent(keywords[0]).unwrap();
        assert_eq!(tree.kind(list), SyntaxKind::VariableDeclarationList);
        let decl = tree.child_of_kind(list, SyntaxKind::VariableDeclaration).unwrap();
        let name = tree.children(decl)[0];
        assert_eq!(tree.kind(name), SyntaxKind::Identifier);
        assert_eq!(tree.text_of(name, text), "k");
    }

    #[test]
    fn test_for_of_without_keyword() {
        let text = "for (k of items) { use(k); }";
        let tree = parse(text).unwrap();
        let lists = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::VariableDeclarationList
        });
        assert!(lists.is_empty());
        let loops = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::ForInStatement
        });
        assert_eq!(loops.len(), 1);
    }

    #[test]
    fn test_comments_are_dropped() {
        let text = "// leading\nvar x = 1; // trailing\n";
        let tree = parse(text).unwrap();
        let lists = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::VariableDeclarationList
        });
        assert_eq!(lists.len(), 1);
        // The leading comment is not represented as a node
        assert_eq!(tree.start(lists[0]), text.find("var").unwrap());
        assert_eq!(tree.children(tree.root()).len(), 1);
    }

    #[test]
    fn test_property_side_is_not_identifier() {
        let text = "a.b;";
        let tree = parse(text).unwrap();
        let access = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::PropertyAccess
        });
        assert_eq!(access.len(), 1);
        let kids = tree.children(access[0]);
        assert_eq!(tree.kind(kids[0]), SyntaxKind::Identifier);
        assert_eq!(tree.kind(kids[1]), SyntaxKind::PropertyIdentifier);
    }

    #[test]
    fn test_destructuring_patterns() {
        let text = "var {a, b: [c]} = obj;";
        let tree = parse(text).unwrap();
        let objects = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::ObjectPattern
        });
        let arrays = find_descendants(&tree, tree.root(), |n| {
            tree.kind(n) == SyntaxKind::ArrayPattern
        });
        assert_eq!(objects.len(), 1);
        assert_eq!(arrays.len(), 1);
    }
}
