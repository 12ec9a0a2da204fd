use serde::{Deserialize, Serialize};
use std::fmt;

/// A site that benchmark results and flavors are attached to.
///
/// The submission dialog treats this as opaque: it is handed to the form
/// as-is and never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_description() {
        let site: Site = serde_json::from_str(
            r#"{"id": "s1", "name": "CERN", "address": "cern.ch", "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(site.id, "s1");
        assert_eq!(site.description, None);
        assert_eq!(site.to_string(), "CERN (cern.ch)");
    }
}
