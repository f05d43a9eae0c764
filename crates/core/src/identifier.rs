use serde::{Deserialize, Serialize};

/// One record in the watched source. Carries no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(u64);

impl Identifier {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered snapshot returned by one poll. Position, not value, indicates recency.
pub type IdentifierList = Vec<Identifier>;

/// Render identifiers as a bracketed list, e.g. `[4, 5]`.
pub fn format_ids(ids: &[Identifier]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_from_plain_json_array() {
        let ids: IdentifierList = serde_json::from_str("[1,2,3,7]").unwrap();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[3], Identifier::new(7));
    }

    #[test]
    fn rejects_negative_numbers() {
        let result: Result<IdentifierList, _> = serde_json::from_str("[1,-2]");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_fractional_numbers() {
        let result: Result<IdentifierList, _> = serde_json::from_str("[1.5]");
        assert!(result.is_err());
    }

    #[test]
    fn format_ids_brackets_and_separates() {
        let ids: Vec<Identifier> = vec![4.into(), 5.into()];
        assert_eq!(format_ids(&ids), "[4, 5]");
        assert_eq!(format_ids(&[Identifier::new(9)]), "[9]");
        assert_eq!(format_ids(&[]), "[]");
    }
}
