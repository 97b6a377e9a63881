use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition (`+`)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`)
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (`*`)
    #[serde(rename = "*")]
    Mul,
    /// Division (`/`)
    #[serde(rename = "/")]
    Div,
    /// Modulo (`%`)
    #[serde(rename = "%")]
    Mod,
    /// Power (`^`)
    #[serde(rename = "^")]
    Pow,
    /// Arc tangent of two vectors (`atan2`)
    #[serde(rename = "atan2")]
    Atan2,

    // Comparison
    /// Equal (`==`)
    #[serde(rename = "==")]
    Eql,
    /// Not equal (`!=`)
    #[serde(rename = "!=")]
    Neq,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    Gtr,
    /// Less than (`<`)
    #[serde(rename = "<")]
    Lss,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    Gte,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    Lte,

    // Set
    /// Intersection (`and`)
    #[serde(rename = "and")]
    And,
    /// Union (`or`)
    #[serde(rename = "or")]
    Or,
    /// Complement (`unless`)
    #[serde(rename = "unless")]
    Unless,
}

/// Precedence of a unary `+`/`-`, which binds like multiplication.
pub const UNARY_PRECEDENCE: u8 = 5;

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Atan2 => "atan2",
            BinaryOp::Eql => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Gtr => ">",
            BinaryOp::Lss => "<",
            BinaryOp::Gte => ">=",
            BinaryOp::Lte => "<=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Unless => "unless",
        }
    }

    /// Binding strength, higher binds tighter.
    ///
    /// `or` < `and`/`unless` < comparisons < `+ -` < `* / % atan2` < `^`
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And | BinaryOp::Unless => 2,
            BinaryOp::Eql
            | BinaryOp::Neq
            | BinaryOp::Gtr
            | BinaryOp::Lss
            | BinaryOp::Gte
            | BinaryOp::Lte => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Atan2 => 5,
            BinaryOp::Pow => 6,
        }
    }

    /// Only `^` groups to the right.
    pub fn is_right_associative(&self) -> bool {
        matches!(self, BinaryOp::Pow)
    }

    /// Operators spelled as words are highlighted as keywords.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            BinaryOp::Atan2 | BinaryOp::And | BinaryOp::Or | BinaryOp::Unless
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eql
                | BinaryOp::Neq
                | BinaryOp::Gtr
                | BinaryOp::Lss
                | BinaryOp::Gte
                | BinaryOp::Lte
        )
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation (`-`)
    #[serde(rename = "-")]
    Neg,
    /// Identity (`+`)
    #[serde(rename = "+")]
    Pos,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_ladder() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
        assert_eq!(BinaryOp::And.precedence(), BinaryOp::Unless.precedence());
        assert!(BinaryOp::Unless.precedence() < BinaryOp::Eql.precedence());
        assert!(BinaryOp::Lte.precedence() < BinaryOp::Sub.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Atan2.precedence());
        assert!(BinaryOp::Mod.precedence() < BinaryOp::Pow.precedence());
        assert_eq!(UNARY_PRECEDENCE, BinaryOp::Mul.precedence());
    }

    #[test]
    fn word_operators_are_keywords() {
        for op in [BinaryOp::Atan2, BinaryOp::And, BinaryOp::Or, BinaryOp::Unless] {
            assert!(op.is_keyword(), "{op} should be a keyword");
        }
        assert!(!BinaryOp::Div.is_keyword());
        assert!(!BinaryOp::Gte.is_keyword());
    }

    #[test]
    fn decodes_operator_spelling() {
        assert!(serde_json::from_str::<BinaryOp>("\"=~\"").is_err());
        let op: BinaryOp = serde_json::from_str("\"unless\"").unwrap();
        assert_eq!(op, BinaryOp::Unless);
        let op: UnaryOp = serde_json::from_str("\"-\"").unwrap();
        assert_eq!(op, UnaryOp::Neg);
    }
}
