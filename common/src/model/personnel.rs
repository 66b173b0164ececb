use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    pub id: i64,
    pub name: String,
    pub nip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorInput {
    pub name: String,
    #[serde(default)]
    pub nip: String,
}

/// A rostered shift group. `member` is a comma-separated list of operator ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kelompok {
    pub id: i64,
    pub name: String,
    pub member: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KelompokInput {
    pub name: String,
    #[serde(default)]
    pub member: String,
}
