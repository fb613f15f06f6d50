use std::fmt;

/// Fieldless tag naming every node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Leaves
    Value,
    Var,
    Spread,

    // Data construction
    Tuple,
    Format,
    Object,

    // Operations
    Assign,
    Call,
    Index,
    Op,

    // Control flow
    Loop,
    If,
    Branch,
    Switch,
    For,
    Return,

    // Declarations
    Import,
    Proto,
    Func,

    // Sequences
    Block,
    Prog,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Value => "value",
            NodeKind::Var => "var",
            NodeKind::Spread => "spread",
            NodeKind::Tuple => "tuple",
            NodeKind::Format => "format",
            NodeKind::Object => "object",
            NodeKind::Assign => "assign",
            NodeKind::Call => "call",
            NodeKind::Index => "index",
            NodeKind::Op => "op",
            NodeKind::Loop => "loop",
            NodeKind::If => "if",
            NodeKind::Branch => "branch",
            NodeKind::Switch => "switch",
            NodeKind::For => "for",
            NodeKind::Return => "return",
            NodeKind::Import => "import",
            NodeKind::Proto => "proto",
            NodeKind::Func => "func",
            NodeKind::Block => "block",
            NodeKind::Prog => "prog",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
