//! Questions answered from the belief history.

use serde::{Deserialize, Serialize};

use crate::{Support, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Where is X now?
    WhereIs,
    /// Where was X, in order?
    WhereWas,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::WhereIs => "where_is",
            QuestionKind::WhereWas => "where_was",
        }
    }
}

/// A question together with its answer and the clauses needed to derive it.
///
/// `args` starts with the subject; the remaining entries are the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub args: Vec<Value>,
    pub support: Support,
}

impl Question {
    pub fn subject(&self) -> Option<&Value> {
        self.args.first()
    }

    pub fn answer(&self) -> &[Value] {
        self.args.get(1..).unwrap_or(&[])
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.as_str())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
