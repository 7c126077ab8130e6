use digitduel_core::Operator;
use serde::{Deserialize, Serialize};

/// One player move: pool slots in the order they are picked, and the
/// operator to score them with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AutoMove {
    pub indices: Vec<usize>,
    pub operator: Operator,
}

impl AutoMove {
    pub fn stable_key(&self) -> String {
        format!("{}:{:?}", self.operator.id(), self.indices)
    }

    pub fn short_label(&self) -> String {
        format!("{} {:?}", self.operator.symbol(), self.indices)
    }
}
