//! Syntax tree for Tremolo programs.
//!
//! The node set is closed: the evaluator dispatches with one exhaustive
//! `match` over [`Node`]. Nodes own their children. The one exception is
//! [`FunctionLit`], which sits behind an `Rc` so that closures created at
//! runtime can point at their body without copying it.
//!
//! Trees can be as deep as the input is long (`1+1+1+...` nests to the
//! right), so nothing here may recurse once per level on the native
//! stack: `Drop` walks an explicit work list and `Display` grows the
//! stack through `ensure_sufficient_stack`.

mod operators;

use std::fmt;
use std::mem;
use std::rc::Rc;

use tremolo_stack::ensure_sufficient_stack;

pub use operators::{BinaryOp, UnaryOp};

/// Binding-site name: the left side of `let` or a function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarDef {
    pub name: String,
}

impl VarDef {
    pub fn new(name: impl Into<String>) -> Self {
        VarDef { name: name.into() }
    }
}

/// A `{ ... }` statement sequence. Evaluated in a fresh child scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Node>,
}

impl Block {
    pub fn new(stmts: Vec<Node>) -> Self {
        Block { stmts }
    }
}

/// The whole program. Evaluated directly in the root scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub stmts: Vec<Node>,
}

impl Program {
    pub fn new(stmts: Vec<Node>) -> Self {
        Program { stmts }
    }
}

/// `func(a, b) { ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionLit {
    pub params: Vec<VarDef>,
    pub body: Block,
}

impl FunctionLit {
    pub fn new(params: Vec<VarDef>, body: Block) -> Self {
        FunctionLit { params, body }
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// Shared handle to a function literal, held by both the tree and closures.
pub type SharedFunction = Rc<FunctionLit>;

/// A syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    // Literals
    Number(i64),
    Boolean(bool),
    Str(String),

    VarRef(String),

    /// `let target = value`
    Assign {
        target: VarDef,
        value: Box<Node>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },

    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },

    Block(Block),

    Program(Program),

    If {
        cond: Box<Node>,
        then_block: Block,
        else_block: Option<Block>,
    },

    Function(SharedFunction),

    /// `callee(args...)`. The callee is always a bare name.
    Call {
        callee: String,
        args: Vec<Node>,
    },

    Return {
        args: Vec<Node>,
    },
}

impl Node {
    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Node::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn assign(name: impl Into<String>, value: Node) -> Self {
        Node::Assign {
            target: VarDef::new(name),
            value: Box::new(value),
        }
    }

    pub fn call(callee: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn function(params: Vec<VarDef>, body: Block) -> Self {
        Node::Function(Rc::new(FunctionLit::new(params, body)))
    }

    /// Short tag name for trace output.
    pub const fn tag(&self) -> &'static str {
        match self {
            Node::Number(_) => "number",
            Node::Boolean(_) => "boolean",
            Node::Str(_) => "string",
            Node::VarRef(_) => "varref",
            Node::Assign { .. } => "assign",
            Node::Unary { .. } => "unary",
            Node::Binary { .. } => "binary",
            Node::Block(_) => "block",
            Node::Program(_) => "program",
            Node::If { .. } => "if",
            Node::Function(_) => "func",
            Node::Call { .. } => "call",
            Node::Return { .. } => "return",
        }
    }

    /// Move this node's children onto `out`, leaving it a leaf.
    fn take_children(&mut self, out: &mut Vec<Node>) {
        match self {
            Node::Number(_) | Node::Boolean(_) | Node::Str(_) | Node::VarRef(_) => {}
            Node::Assign { value: child, .. } | Node::Unary { operand: child, .. } => {
                out.push(take(child));
            }
            Node::Binary { lhs, rhs, .. } => {
                out.push(take(lhs));
                out.push(take(rhs));
            }
            Node::Block(Block { stmts }) | Node::Program(Program { stmts }) => {
                out.append(stmts);
            }
            Node::If {
                cond,
                then_block,
                else_block,
            } => {
                out.push(take(cond));
                out.append(&mut then_block.stmts);
                if let Some(block) = else_block {
                    out.append(&mut block.stmts);
                }
            }
            // A literal still held by a closure is freed with the closure.
            Node::Function(func) => {
                if let Some(func) = Rc::get_mut(func) {
                    out.append(&mut func.body.stmts);
                }
            }
            Node::Call { args, .. } | Node::Return { args } => out.append(args),
        }
    }
}

fn take(node: &mut Node) -> Node {
    mem::replace(node, Node::Number(0))
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

/// S-expression rendering, used by `--emit=ast` and in tests.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_sexp(f))
    }
}

impl Node {
    fn fmt_sexp(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{n}"),
            Node::Boolean(b) => write!(f, "{b}"),
            Node::Str(s) => write!(f, "{s:?}"),
            Node::VarRef(name) => f.write_str(name),
            Node::Assign { target, value } => write!(f, "(let {} {value})", target.name),
            Node::Unary { op, operand } => write!(f, "({op} {operand})"),
            Node::Binary { op, lhs, rhs } => write!(f, "({op} {lhs} {rhs})"),
            Node::Block(block) => write!(f, "{block}"),
            Node::Program(program) => write!(f, "{program}"),
            Node::If {
                cond,
                then_block,
                else_block,
            } => {
                write!(f, "(if {cond} {then_block}")?;
                if let Some(else_block) = else_block {
                    write!(f, " {else_block}")?;
                }
                f.write_str(")")
            }
            Node::Function(func) => {
                let params: Vec<&str> = func.param_names().collect();
                write!(f, "(func ({}) {})", params.join(" "), func.body)
            }
            Node::Call { callee, args } => {
                write!(f, "({callee}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
            Node::Return { args } => {
                f.write_str("(return")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_stmts(f: &mut fmt::Formatter<'_>, head: &str, stmts: &[Node]) -> fmt::Result {
    write!(f, "({head}")?;
    for stmt in stmts {
        write!(f, " {stmt}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmts(f, "block", &self.stmts)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmts(f, "program", &self.stmts)
    }
}
