//! Constant evaluation.
//!
//! Covers the part of Go's constant expressions that string enums use.
//! Integer arithmetic runs on `i128` and fails on overflow instead of
//! tracking arbitrary precision.

use std::collections::HashMap;
use std::fmt;

use super::syntax::{BinaryOp, ConstDef, Expr, ScopeId, ScopeTree, TypeExpr, UnaryOp};
use super::types::{BasicKind, TypeTable, Underlying};
use crate::resolve::BindingId;

/// Kind of an untyped constant, ordered by Go's promotion rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Untyped {
    Bool,
    String,
    Int,
    Rune,
    Float,
    Complex,
}

impl fmt::Display for Untyped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "untyped bool",
            Self::String => "untyped string",
            Self::Int => "untyped int",
            Self::Rune => "untyped rune",
            Self::Float => "untyped float",
            Self::Complex => "untyped complex",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ConstType {
    Untyped(Untyped),
    Named(String),
}

impl fmt::Display for ConstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untyped(u) => write!(f, "{u}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    Bool(bool),
    Int(i128),
    Float(f64),
    /// Complex values are recognized but never computed with.
    Complex,
    Str(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Constant {
    pub(crate) value: Value,
    pub(crate) ty: ConstType,
}

impl Constant {
    fn untyped(value: Value, kind: Untyped) -> Self {
        Self {
            value,
            ty: ConstType::Untyped(kind),
        }
    }
}

pub(crate) type EvalResult = Result<Constant, String>;

/// Deepest evaluation nesting, counting both sub-expressions and
/// references to other constants.
const MAX_EVAL_DEPTH: usize = 512;

const TOO_DEEP: &str = "constant expression is nested too deeply";

/// Package-wide name lookup for constants. The first declaration in a
/// scope wins, and inner scopes shadow the ones enclosing them.
#[derive(Debug, Default)]
pub(crate) struct ConstScopes {
    names: HashMap<(ScopeId, String), BindingId>,
    tree: ScopeTree,
}

impl ConstScopes {
    pub(crate) fn new(consts: &[ConstDef], tree: &ScopeTree) -> Self {
        let mut names = HashMap::new();
        for (idx, def) in consts.iter().enumerate() {
            if def.name == "_" {
                continue;
            }
            names
                .entry((def.scope, def.name.clone()))
                .or_insert(BindingId::from_raw(idx as u32));
        }
        Self {
            names,
            tree: tree.clone(),
        }
    }

    fn lookup(&self, name: &str, scope: ScopeId) -> Option<BindingId> {
        self.tree
            .chain(scope)
            .find_map(|scope| self.names.get(&(scope, name.to_owned())))
            .copied()
    }
}

#[derive(Clone, Debug)]
enum State {
    Pending,
    Active,
    Done(EvalResult),
}

pub(crate) struct Evaluator<'a> {
    consts: &'a [ConstDef],
    scopes: &'a ConstScopes,
    types: &'a TypeTable,
    states: Vec<State>,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(consts: &'a [ConstDef], scopes: &'a ConstScopes, types: &'a TypeTable) -> Self {
        Self {
            consts,
            scopes,
            types,
            states: vec![State::Pending; consts.len()],
            depth: 0,
        }
    }

    /// Evaluate every binding, in declaration order.
    pub(crate) fn evaluate_all(mut self) -> Vec<EvalResult> {
        (0..self.consts.len())
            .map(|idx| self.evaluate(BindingId::from_raw(idx as u32)))
            .collect()
    }

    pub(crate) fn evaluate(&mut self, id: BindingId) -> EvalResult {
        let consts = self.consts;
        let Some(def) = consts.get(id.index()) else {
            return Err("unknown constant".to_string());
        };
        match &self.states[id.index()] {
            State::Done(result) => return result.clone(),
            State::Active => return Err(format!("initialization cycle for {}", def.name)),
            State::Pending => {}
        }

        self.states[id.index()] = State::Active;
        let result = self.compute(def);
        // A constant cut off by the depth limit may still evaluate from a
        // shallower starting point.
        self.states[id.index()] = match &result {
            Err(reason) if reason == TOO_DEEP && self.depth > 0 => State::Pending,
            _ => State::Done(result.clone()),
        };
        result
    }

    fn compute(&mut self, def: &ConstDef) -> EvalResult {
        let Some(expr) = &def.value else {
            return Err(format!("missing init expression for {}", def.name));
        };
        let value = self.eval(expr, def)?;
        match &def.ty {
            None => Ok(value),
            Some(TypeExpr::Name(name)) => self.assign(value, name, def.scope),
            Some(TypeExpr::Other(written)) => Err(format!("invalid constant type {written}")),
        }
    }

    fn eval(&mut self, expr: &Expr, def: &ConstDef) -> EvalResult {
        if self.depth >= MAX_EVAL_DEPTH {
            return Err(TOO_DEEP.to_string());
        }
        self.depth += 1;
        let result = self.eval_expr(expr, def);
        self.depth -= 1;
        result
    }

    fn eval_expr(&mut self, expr: &Expr, def: &ConstDef) -> EvalResult {
        match expr {
            Expr::Str(s) => Ok(Constant::untyped(Value::Str(s.clone()), Untyped::String)),
            Expr::Int(i) => Ok(Constant::untyped(Value::Int(*i), Untyped::Int)),
            Expr::Float(f) => Ok(Constant::untyped(Value::Float(*f), Untyped::Float)),
            Expr::Imaginary => Ok(Constant::untyped(Value::Complex, Untyped::Complex)),
            Expr::Rune(r) => Ok(Constant::untyped(Value::Int(i128::from(*r)), Untyped::Rune)),
            Expr::Bool(b) => Ok(Constant::untyped(Value::Bool(*b), Untyped::Bool)),
            Expr::Iota => Ok(Constant::untyped(Value::Int(def.iota), Untyped::Int)),
            Expr::Ident(name) => self.ident(name, def.scope),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, def)?;
                let rhs = self.eval(rhs, def)?;
                binary(*op, lhs, rhs)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval(operand, def)?;
                unary(*op, operand)
            }
            Expr::Convert { ty, operand } => {
                let operand = self.eval(operand, def)?;
                self.convert(operand, ty, def.scope)
            }
            Expr::Unsupported(reason) => Err(reason.clone()),
        }
    }

    fn ident(&mut self, name: &str, scope: ScopeId) -> EvalResult {
        if let Some(id) = self.scopes.lookup(name, scope) {
            return self.evaluate(id);
        }
        match name {
            "true" => Ok(Constant::untyped(Value::Bool(true), Untyped::Bool)),
            "false" => Ok(Constant::untyped(Value::Bool(false), Untyped::Bool)),
            _ => Err(format!("undefined constant {name}")),
        }
    }

    /// Implicit conversion of a constant to a declared type.
    fn assign(&self, value: Constant, ty: &str, scope: ScopeId) -> EvalResult {
        if let ConstType::Named(actual) = &value.ty
            && actual != ty
        {
            return Err(format!(
                "cannot use constant of type {actual} as {ty} value"
            ));
        }
        let kind = self.basic_kind(ty, scope)?;
        let converted = represent(value.value, kind, false)
            .ok_or_else(|| format!("cannot use {} constant as {ty} value", value.ty))?;
        Ok(Constant {
            value: converted,
            ty: ConstType::Named(ty.to_owned()),
        })
    }

    /// Explicit conversion `T(x)`.
    fn convert(&self, value: Constant, ty: &str, scope: ScopeId) -> EvalResult {
        let kind = self.basic_kind(ty, scope)?;
        let converted = represent(value.value, kind, true)
            .ok_or_else(|| format!("cannot convert {} constant to type {ty}", value.ty))?;
        Ok(Constant {
            value: converted,
            ty: ConstType::Named(ty.to_owned()),
        })
    }

    fn basic_kind(&self, ty: &str, scope: ScopeId) -> Result<BasicKind, String> {
        match self.types.underlying(ty, scope) {
            Underlying::Basic(kind) => Ok(kind),
            Underlying::Composite(written) => {
                Err(format!("type {ty} ({written}) cannot hold constants"))
            }
            Underlying::Unknown(reason) => Err(reason),
        }
    }
}

/// Convert a value to a basic kind, `None` if it is not representable.
///
/// Explicit conversions additionally allow integer to string.
fn represent(value: Value, kind: BasicKind, explicit: bool) -> Option<Value> {
    match (kind, value) {
        (BasicKind::String, Value::Str(s)) => Some(Value::Str(s)),
        (BasicKind::String, Value::Int(code)) if explicit => {
            let ch = u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            Some(Value::Str(ch.to_string().into_bytes()))
        }
        (BasicKind::Bool, Value::Bool(b)) => Some(Value::Bool(b)),
        (BasicKind::Int, Value::Int(i)) => Some(Value::Int(i)),
        (BasicKind::Int, Value::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
            Some(Value::Int(f as i128))
        }
        (BasicKind::Float, Value::Int(i)) => Some(Value::Float(i as f64)),
        (BasicKind::Float, Value::Float(f)) => Some(Value::Float(f)),
        (BasicKind::Complex, Value::Int(_) | Value::Float(_) | Value::Complex) => {
            Some(Value::Complex)
        }
        _ => None,
    }
}

/// Result type of a binary operation on two operand types.
fn unify(op: BinaryOp, lhs: &ConstType, rhs: &ConstType) -> Result<ConstType, String> {
    if matches!(op, BinaryOp::Shl | BinaryOp::Shr) {
        return Ok(lhs.clone());
    }
    match (lhs, rhs) {
        (ConstType::Named(a), ConstType::Named(b)) if a != b => {
            Err(format!("mismatched types {a} and {b}"))
        }
        (ConstType::Named(a), _) | (_, ConstType::Named(a)) => Ok(ConstType::Named(a.clone())),
        (ConstType::Untyped(a), ConstType::Untyped(b)) => {
            Ok(ConstType::Untyped((*a).max(*b)))
        }
    }
}

fn binary(op: BinaryOp, lhs: Constant, rhs: Constant) -> EvalResult {
    let ty = unify(op, &lhs.ty, &rhs.ty)?;

    if op.is_comparison() {
        let result = compare(op, &lhs.value, &rhs.value)?;
        return Ok(Constant::untyped(Value::Bool(result), Untyped::Bool));
    }

    let value = match (lhs.value, rhs.value) {
        (Value::Str(mut a), Value::Str(b)) if op == BinaryOp::Add => {
            a.extend_from_slice(&b);
            Value::Str(a)
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::LogicalAnd => Value::Bool(a && b),
            BinaryOp::LogicalOr => Value::Bool(a || b),
            _ => return Err(format!("operator {op:?} not defined on bool")),
        },
        (Value::Int(a), Value::Int(b)) => Value::Int(int_op(op, a, b)?),
        (Value::Int(a), Value::Float(b)) => numeric_float(op, a as f64, b)?,
        (Value::Float(a), Value::Int(b)) if matches!(op, BinaryOp::Shl | BinaryOp::Shr) => {
            if a.fract() != 0.0 {
                return Err("shifted operand must be an integer".to_string());
            }
            Value::Int(int_op(op, a as i128, b)?)
        }
        (Value::Float(a), Value::Int(b)) => numeric_float(op, a, b as f64)?,
        (Value::Float(a), Value::Float(b)) => numeric_float(op, a, b)?,
        (Value::Complex, _) | (_, Value::Complex) => {
            return Err("complex constant arithmetic is not supported".to_string());
        }
        _ => return Err(format!("invalid operation {op:?} on mismatched operands")),
    };

    Ok(Constant { value, ty })
}

fn numeric_float(op: BinaryOp, a: f64, b: f64) -> Result<Value, String> {
    float_op(op, a, b).map(Value::Float)
}

fn int_op(op: BinaryOp, a: i128, b: i128) -> Result<i128, String> {
    let overflow = || "constant overflow".to_string();
    match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(overflow),
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(overflow),
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(overflow),
        BinaryOp::Div | BinaryOp::Rem if b == 0 => Err("division by zero".to_string()),
        BinaryOp::Div => a.checked_div(b).ok_or_else(overflow),
        BinaryOp::Rem => a.checked_rem(b).ok_or_else(overflow),
        BinaryOp::Shl | BinaryOp::Shr => {
            let shift = u32::try_from(b).map_err(|_| format!("invalid shift count {b}"))?;
            if op == BinaryOp::Shr {
                return Ok(if shift >= 128 { a.signum().min(0) } else { a >> shift });
            }
            if a == 0 {
                return Ok(0);
            }
            if shift >= 127 || a.unsigned_abs().leading_zeros() <= shift {
                return Err(overflow());
            }
            Ok(a << shift)
        }
        BinaryOp::And => Ok(a & b),
        BinaryOp::Or => Ok(a | b),
        BinaryOp::Xor => Ok(a ^ b),
        BinaryOp::AndNot => Ok(a & !b),
        _ => Err(format!("operator {op:?} not defined on integers")),
    }
}

fn float_op(op: BinaryOp, a: f64, b: f64) -> Result<f64, String> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div if b == 0.0 => Err("division by zero".to_string()),
        BinaryOp::Div => Ok(a / b),
        _ => Err(format!("operator {op:?} not defined on floats")),
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool, String> {
    let ordering = match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) if matches!(op, BinaryOp::Eq | BinaryOp::Ne) => a.cmp(b),
        (a, b) => {
            let (Some(a), Some(b)) = (as_float(a), as_float(b)) else {
                return Err(format!("invalid comparison {op:?}"));
            };
            a.partial_cmp(&b)
                .ok_or_else(|| "comparison of NaN".to_string())?
        }
    };
    Ok(match op {
        BinaryOp::Eq => ordering.is_eq(),
        BinaryOp::Ne => ordering.is_ne(),
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    })
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn unary(op: UnaryOp, operand: Constant) -> EvalResult {
    let value = match (op, operand.value) {
        (UnaryOp::Plus, v @ (Value::Int(_) | Value::Float(_) | Value::Complex)) => v,
        (UnaryOp::Neg, Value::Int(i)) => Value::Int(
            i.checked_neg()
                .ok_or_else(|| "constant overflow".to_string())?,
        ),
        (UnaryOp::Neg, Value::Float(f)) => Value::Float(-f),
        (UnaryOp::Neg, Value::Complex) => Value::Complex,
        (UnaryOp::Complement, Value::Int(i)) => Value::Int(!i),
        (UnaryOp::Not, Value::Bool(b)) => Value::Bool(!b),
        (op, _) => return Err(format!("operator {op:?} not defined on {}", operand.ty)),
    };
    Ok(Constant {
        value,
        ty: operand.ty,
    })
}
