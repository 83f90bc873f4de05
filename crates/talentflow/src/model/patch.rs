//! Shallow merging of partial JSON records onto typed records.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Patch body must be a JSON object")]
    NotAnObject,

    #[error("Patched record is invalid: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Overlays the top-level fields of `patch` onto `record`.
///
/// Keys named in `protected` are left untouched. Nested objects are replaced
/// wholesale, not merged.
pub fn merge_shallow<T>(record: &T, patch: &Value, protected: &[&str]) -> Result<T, PatchError>
where
    T: Serialize + DeserializeOwned,
{
    let updates = patch.as_object().ok_or(PatchError::NotAnObject)?;

    let mut merged = serde_json::to_value(record)?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in updates {
            if protected.contains(&key.as_str()) {
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }
    }

    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Record {
        id: String,
        title: String,
        tags: Vec<String>,
    }

    fn record() -> Record {
        Record {
            id: "1".to_string(),
            title: "Old".to_string(),
            tags: vec!["a".to_string()],
        }
    }

    #[test]
    fn test_merge_replaces_given_fields_only() {
        let merged = merge_shallow(&record(), &json!({"title": "New"}), &[]).unwrap();
        assert_eq!(merged.title, "New");
        assert_eq!(merged.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_merge_skips_protected_keys() {
        let merged = merge_shallow(&record(), &json!({"id": "99", "title": "New"}), &["id"]).unwrap();
        assert_eq!(merged.id, "1");
        assert_eq!(merged.title, "New");
    }

    #[test]
    fn test_merge_rejects_non_object() {
        let err = merge_shallow(&record(), &json!([1, 2]), &[]).unwrap_err();
        assert!(matches!(err, PatchError::NotAnObject));
    }

    #[test]
    fn test_merge_rejects_wrong_types() {
        let err = merge_shallow(&record(), &json!({"tags": "not-a-list"}), &[]).unwrap_err();
        assert!(matches!(err, PatchError::Invalid(_)));
    }
}
