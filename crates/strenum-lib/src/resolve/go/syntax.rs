//! Lowering of tree-sitter Go trees into constant and type declarations.

use arborium_tree_sitter::{Node, Tree};
use strenum_core::{SourceId, Span};

use super::literal;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::resolve::{Binding, BindingId, ConstSpec, DeclBlock, SpecType};

/// Package scope or the body of one function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct ScopeId(u32);

impl ScopeId {
    pub(crate) const PACKAGE: ScopeId = ScopeId(0);
}

/// Enclosing scope of every function scope. Function literals nest
/// inside the function that contains them.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScopeTree {
    /// `parents[i]` encloses `ScopeId(i + 1)`.
    parents: Vec<ScopeId>,
}

impl ScopeTree {
    fn open(&mut self, parent: ScopeId) -> ScopeId {
        self.parents.push(parent);
        ScopeId(self.parents.len() as u32)
    }

    pub(crate) fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        let idx = scope.0.checked_sub(1)?;
        self.parents.get(idx as usize).copied()
    }

    /// `scope` followed by every scope enclosing it, innermost first.
    pub(crate) fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |&s| self.parent(s))
    }
}

/// Deepest expression nesting that is lowered. Deeper expressions are
/// left unevaluated.
const MAX_EXPR_DEPTH: usize = 200;

/// A type as written in a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TypeExpr {
    Name(String),
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    Or,
    Xor,
    AndNot,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOp {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            "&" => Self::And,
            "|" => Self::Or,
            "^" => Self::Xor,
            "&^" => Self::AndNot,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "&&" => Self::LogicalAnd,
            "||" => Self::LogicalOr,
            _ => return None,
        })
    }

    pub(crate) fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
    Plus,
    Complement,
    Not,
}

impl UnaryOp {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "-" => Self::Neg,
            "+" => Self::Plus,
            "^" => Self::Complement,
            "!" => Self::Not,
            _ => return None,
        })
    }
}

/// Constant expression subset understood by the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Str(Vec<u8>),
    Int(i128),
    Float(f64),
    Imaginary,
    Rune(u32),
    Bool(bool),
    Iota,
    Ident(String),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Convert {
        ty: String,
        operand: Box<Expr>,
    },
    /// Not a constant expression we can evaluate; holds the reason.
    Unsupported(String),
}

/// One constant binding with everything needed to evaluate it.
#[derive(Clone, Debug)]
pub(crate) struct ConstDef {
    pub(crate) name: String,
    pub(crate) scope: ScopeId,
    /// Declared type, after implicit repetition.
    pub(crate) ty: Option<TypeExpr>,
    /// Initializer, after implicit repetition.
    pub(crate) value: Option<Expr>,
    pub(crate) iota: i128,
}

#[derive(Clone, Debug)]
pub(crate) struct TypeDef {
    pub(crate) name: String,
    pub(crate) scope: ScopeId,
    pub(crate) target: TypeExpr,
}

/// Declarations collected from every file of a package.
#[derive(Debug, Default)]
pub(crate) struct PackageSyntax {
    /// Package clause of each file, `None` when the clause is absent.
    pub(crate) package_names: Vec<Option<String>>,
    pub(crate) blocks: Vec<DeclBlock>,
    pub(crate) consts: Vec<ConstDef>,
    pub(crate) types: Vec<TypeDef>,
    pub(crate) scopes: ScopeTree,
}

/// Report every error and missing node of a tree.
pub(crate) fn report_syntax_errors(
    tree: &Tree,
    source: SourceId,
    text: &str,
    diagnostics: &mut Diagnostics,
) {
    let root = tree.root_node();
    if root.has_error() {
        report_errors(root, source, text, diagnostics);
    }
}

fn report_errors(root: Node<'_>, source: SourceId, text: &str, diagnostics: &mut Diagnostics) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let span = Span::from_bytes(source, node.byte_range());
        if node.is_missing() {
            diagnostics
                .report(DiagnosticKind::SyntaxError, span)
                .message(format!("missing `{}`", node.kind()))
                .emit();
            continue;
        }
        if node.is_error() {
            let snippet = node_text(node, text).lines().next().unwrap_or_default().trim();
            let detail = if snippet.is_empty() {
                "unexpected input".to_string()
            } else {
                format!("unexpected `{snippet}`")
            };
            diagnostics
                .report(DiagnosticKind::SyntaxError, span)
                .message(detail)
                .emit();
            continue;
        }
        // Reversed so errors come out in document order.
        stack.extend(children(node).into_iter().rev().filter(|c| c.has_error()));
    }
}

/// Lower one parsed file into `out`.
pub(crate) fn lower_file(tree: &Tree, source: SourceId, text: &str, out: &mut PackageSyntax) {
    let root = tree.root_node();
    let mut lowering = Lowering { source, text, out };

    let package = children(root)
        .into_iter()
        .find(|c| c.kind() == "package_clause")
        .and_then(|clause| {
            children(clause)
                .into_iter()
                .find(|c| c.kind() == "package_identifier")
        })
        .map(|ident| node_text(ident, text).to_owned());
    lowering.out.package_names.push(package);

    lowering.visit(root, ScopeId::PACKAGE);
}

struct Lowering<'a> {
    source: SourceId,
    text: &'a str,
    out: &'a mut PackageSyntax,
}

impl Lowering<'_> {
    fn visit(&mut self, root: Node<'_>, scope: ScopeId) {
        let mut stack = vec![(root, scope)];
        while let Some((node, scope)) = stack.pop() {
            let inner = match node.kind() {
                "const_declaration" => {
                    self.lower_const_block(node, scope);
                    continue;
                }
                "type_declaration" => {
                    self.lower_type_decl(node, scope);
                    continue;
                }
                "function_declaration" | "method_declaration" | "func_literal" => {
                    self.out.scopes.open(scope)
                }
                _ => scope,
            };
            // Reversed so declarations are lowered in document order.
            stack.extend(children(node).into_iter().rev().map(|c| (c, inner)));
        }
    }

    fn lower_const_block(&mut self, node: Node<'_>, scope: ScopeId) {
        let mut block = DeclBlock {
            specs: Vec::new(),
            span: self.span(node),
        };
        // Implicit repetition: an empty spec reuses the last type and expression list.
        let mut repeated: (Option<TypeExpr>, Vec<Expr>) = (None, Vec::new());

        let specs = children(node)
            .into_iter()
            .filter(|c| c.kind() == "const_spec");
        for (iota, spec) in specs.enumerate() {
            let names: Vec<_> = field_children(spec, "name")
                .into_iter()
                .filter(|n| n.is_named() && n.kind() != "comment")
                .collect();
            let type_node = spec.child_by_field_name("type");
            let value_node = spec.child_by_field_name("value");

            let spec_type = match type_node {
                None => SpecType::Inferred,
                Some(ty) if ty.kind() == "type_identifier" => {
                    SpecType::Named(self.text(ty).to_owned())
                }
                Some(ty) => SpecType::Unsupported(self.text(ty).to_owned()),
            };

            if type_node.is_some() || value_node.is_some() {
                let ty = type_node.map(|ty| self.type_expr(ty));
                let values = value_node
                    .map(|list| {
                        expression_children(list)
                            .into_iter()
                            .map(|e| self.lower_expr(e, 0))
                            .collect()
                    })
                    .unwrap_or_default();
                repeated = (ty, values);
            }

            let mut bindings = Vec::with_capacity(names.len());
            for (i, name) in names.into_iter().enumerate() {
                let id = BindingId::from_raw(self.out.consts.len() as u32);
                let name_text = self.text(name).to_owned();
                self.out.consts.push(ConstDef {
                    name: name_text.clone(),
                    scope,
                    ty: repeated.0.clone(),
                    value: repeated.1.get(i).cloned(),
                    iota: iota as i128,
                });
                bindings.push(Binding {
                    id,
                    name: name_text,
                    span: self.span(name),
                });
            }

            block.specs.push(ConstSpec {
                bindings,
                ty: spec_type,
                has_values: value_node.is_some(),
                span: self.span(spec),
            });
        }

        self.out.blocks.push(block);
    }

    fn lower_type_decl(&mut self, node: Node<'_>, scope: ScopeId) {
        for spec in children(node) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let (Some(name), Some(target)) = (
                spec.child_by_field_name("name"),
                spec.child_by_field_name("type"),
            ) else {
                continue;
            };
            let target = self.type_expr(target);
            self.out.types.push(TypeDef {
                name: self.text(name).to_owned(),
                scope,
                target,
            });
        }
    }

    fn type_expr(&self, mut node: Node<'_>) -> TypeExpr {
        while node.kind() == "parenthesized_type" {
            match expression_children(node).first() {
                Some(inner) => node = *inner,
                None => break,
            }
        }
        let text = self.text(node).to_owned();
        match node.kind() {
            "type_identifier" => TypeExpr::Name(text),
            _ => TypeExpr::Other(text),
        }
    }

    fn lower_expr(&self, node: Node<'_>, depth: usize) -> Expr {
        if depth > MAX_EXPR_DEPTH {
            return Expr::Unsupported("expression is nested too deeply".to_string());
        }
        let depth = depth + 1;
        let text = self.text(node);
        match node.kind() {
            "interpreted_string_literal" => {
                literal::interpreted_string(text).map_or_else(Expr::Unsupported, Expr::Str)
            }
            "raw_string_literal" => {
                literal::raw_string(text).map_or_else(Expr::Unsupported, Expr::Str)
            }
            "int_literal" => literal::int(text).map_or_else(Expr::Unsupported, Expr::Int),
            "float_literal" => literal::float(text).map_or_else(Expr::Unsupported, Expr::Float),
            "imaginary_literal" => Expr::Imaginary,
            "rune_literal" => literal::rune(text).map_or_else(Expr::Unsupported, Expr::Rune),
            "true" => Expr::Bool(true),
            "false" => Expr::Bool(false),
            "iota" => Expr::Iota,
            "identifier" => Expr::Ident(text.to_owned()),
            "parenthesized_expression" => match expression_children(node).first() {
                Some(inner) => self.lower_expr(*inner, depth),
                None => Expr::Unsupported("empty parentheses".to_string()),
            },
            "binary_expression" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| BinaryOp::from_token(op.kind()));
                let (Some(op), Some(lhs), Some(rhs)) = (
                    op,
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) else {
                    return Expr::Unsupported(format!("unsupported operation `{text}`"));
                };
                Expr::Binary {
                    op,
                    lhs: Box::new(self.lower_expr(lhs, depth)),
                    rhs: Box::new(self.lower_expr(rhs, depth)),
                }
            }
            "unary_expression" => {
                let op = node
                    .child_by_field_name("operator")
                    .and_then(|op| UnaryOp::from_token(op.kind()));
                let (Some(op), Some(operand)) = (op, node.child_by_field_name("operand")) else {
                    return Expr::Unsupported(format!("unsupported operation `{text}`"));
                };
                Expr::Unary {
                    op,
                    operand: Box::new(self.lower_expr(operand, depth)),
                }
            }
            "call_expression" => {
                let callee = node.child_by_field_name("function");
                let args = node
                    .child_by_field_name("arguments")
                    .map(expression_children)
                    .unwrap_or_default();
                match (callee, args.as_slice()) {
                    (Some(callee), [operand]) if callee.kind() == "identifier" => Expr::Convert {
                        ty: self.text(callee).to_owned(),
                        operand: Box::new(self.lower_expr(*operand, depth)),
                    },
                    _ => Expr::Unsupported(format!("`{text}` is not a constant expression")),
                }
            }
            "type_conversion_expression" => {
                let ty = node.child_by_field_name("type");
                let operand = node.child_by_field_name("operand");
                match (ty, operand) {
                    (Some(ty), Some(operand)) if ty.kind() == "type_identifier" => Expr::Convert {
                        ty: self.text(ty).to_owned(),
                        operand: Box::new(self.lower_expr(operand, depth)),
                    },
                    _ => Expr::Unsupported(format!("unsupported conversion `{text}`")),
                }
            }
            "selector_expression" => {
                Expr::Unsupported(format!("qualified reference `{text}` is not supported"))
            }
            kind => Expr::Unsupported(format!("unsupported expression `{text}` ({kind})")),
        }
    }

    fn text(&self, node: Node<'_>) -> &str {
        node_text(node, self.text)
    }

    fn span(&self, node: Node<'_>) -> Span {
        Span::from_bytes(self.source, node.byte_range())
    }
}

fn node_text<'s>(node: Node<'_>, text: &'s str) -> &'s str {
    text.get(node.byte_range()).unwrap_or_default()
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Named children other than comments.
fn expression_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}
