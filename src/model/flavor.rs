use serde::Serialize;

/// A proposed flavor for a site, pending review by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlavorDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlavorDraft {
    /// Build a draft from raw field input.
    ///
    /// Returns `None` when the name is blank. An empty description is
    /// treated as absent.
    pub fn from_input(name: &str, description: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let description = description.trim();
        Some(Self {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(FlavorDraft::from_input("   ", "anything"), None);
    }

    #[test]
    fn test_input_is_trimmed() {
        let draft = FlavorDraft::from_input("  m1.large ", "  ").unwrap();
        assert_eq!(draft.name, "m1.large");
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_serialize_skips_missing_description() {
        let draft = FlavorDraft::from_input("m1.large", "").unwrap();
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            r#"{"name":"m1.large"}"#
        );

        let draft = FlavorDraft::from_input("gpu", "1x A100").unwrap();
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            r#"{"name":"gpu","description":"1x A100"}"#
        );
    }
}
