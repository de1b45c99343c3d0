//! Scheme document types
//!
//! JSON field names are camelCase. Optional fields that are unset are left
//! out of the serialized document; `benefits` is always present.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use super::validate::{FieldViolation, ValidationError};

/// Fields owned by the server; ignored when they appear in a patch
const SERVER_OWNED_FIELDS: [&str; 2] = ["id", "lastUpdated"];

/// Unique identifier of a scheme, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeId(Uuid);

impl SchemeId {
    /// Generate a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SchemeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SchemeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A stored scheme record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub id: SchemeId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Map<String, Value>>,
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Set when the record is created. Edits leave it untouched.
    pub last_updated: DateTime<Utc>,
}

impl Scheme {
    /// The client-editable part of this record
    pub fn to_draft(&self) -> SchemeDraft {
        SchemeDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            image_link: self.image_link.clone(),
            pdf_link: self.pdf_link.clone(),
            income: self.income.clone(),
            state: self.state.clone(),
            age: self.age.clone(),
            eligibility: self.eligibility.clone(),
            benefits: Some(self.benefits.clone()),
        }
    }

    /// Apply a partial update and return the resulting record.
    ///
    /// Fields absent from the patch keep their current values, `null`
    /// clears a field. The merged record is validated as a whole; `id` and
    /// `lastUpdated` are carried over unchanged.
    pub fn merged(&self, patch: &SchemePatch) -> Result<Scheme, ValidationError> {
        let mut doc = match serde_json::to_value(self.to_draft()) {
            Ok(Value::Object(doc)) => doc,
            Ok(_) => return Err(ValidationError::malformed("scheme is not a JSON object")),
            Err(e) => return Err(ValidationError::malformed(e.to_string())),
        };

        for (key, value) in patch.fields() {
            if SERVER_OWNED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            if value.is_null() {
                doc.remove(key);
            } else {
                doc.insert(key.clone(), value.clone());
            }
        }

        SchemeDraft::from_value(Value::Object(doc))?.into_scheme(self.id, self.last_updated)
    }
}

/// Client-supplied scheme fields, before validation.
///
/// Unknown fields, `id` and `lastUpdated` are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
}

impl SchemeDraft {
    /// Draft with only the required fields set
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Read a draft out of an arbitrary JSON document
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::malformed(e.to_string()))
    }

    /// Check the required fields without consuming the draft
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        for (field, value) in [("title", &self.title), ("description", &self.description)] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                violations.push(FieldViolation::new(field, format!("{} is required", field)));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Validate and turn into a stored record with the given identity
    pub fn into_scheme(
        self,
        id: SchemeId,
        last_updated: DateTime<Utc>,
    ) -> Result<Scheme, ValidationError> {
        self.validate()?;

        let (Some(title), Some(description)) = (self.title, self.description) else {
            return Err(ValidationError::required("title"));
        };

        Ok(Scheme {
            id,
            title,
            description,
            image_link: self.image_link,
            pdf_link: self.pdf_link,
            income: self.income,
            state: self.state,
            age: self.age,
            eligibility: self.eligibility,
            benefits: self.benefits.unwrap_or_default(),
            last_updated,
        })
    }
}

/// A partial update: any subset of the scheme's JSON fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemePatch(Map<String, Value>);

impl SchemePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field, builder style
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SchemePatch {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Scheme {
        let draft = SchemeDraft {
            image_link: Some("https://example.org/img.png".to_string()),
            income: Some(250000.into()),
            state: Some("NY".to_string()),
            eligibility: json!({"student": true}).as_object().cloned(),
            benefits: Some(vec!["tuition".to_string()]),
            ..SchemeDraft::new("Scholarship", "For students")
        };
        draft.into_scheme(SchemeId::new(), Utc::now()).unwrap()
    }

    #[test]
    fn test_scheme_json_shape() {
        let scheme = SchemeDraft::new("Scholarship", "For students")
            .into_scheme(SchemeId::new(), Utc::now())
            .unwrap();

        let json = serde_json::to_value(&scheme).unwrap();
        assert_eq!(json["title"], "Scholarship");
        assert_eq!(json["benefits"], json!([]));
        assert!(json["id"].is_string());
        assert!(json["lastUpdated"].is_string());
        assert!(json.get("imageLink").is_none());
        assert!(json.get("income").is_none());
    }

    #[test]
    fn test_numbers_keep_their_json_form() {
        let draft = SchemeDraft::from_value(json!({
            "title": "Pension",
            "description": "For seniors",
            "income": 5,
            "age": 62.5
        }))
        .unwrap();
        let scheme = draft.into_scheme(SchemeId::new(), Utc::now()).unwrap();

        let json = serde_json::to_value(&scheme).unwrap();
        assert_eq!(json["income"], json!(5));
        assert_eq!(json["age"], json!(62.5));
        assert_eq!(serde_json::to_string(&json["income"]).unwrap(), "5");
    }

    #[test]
    fn test_draft_requires_title_and_description() {
        let err = SchemeDraft::default().validate().unwrap_err();
        assert_eq!(err.fields(), vec!["title", "description"]);

        let err = SchemeDraft::new("Scholarship", "   ").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["description"]);
    }

    #[test]
    fn test_draft_ignores_unknown_and_server_fields() {
        let draft = SchemeDraft::from_value(json!({
            "title": "Pension",
            "description": "For seniors",
            "id": "not-an-id",
            "lastUpdated": "yesterday",
            "colour": "blue"
        }))
        .unwrap();

        assert_eq!(draft, SchemeDraft::new("Pension", "For seniors"));
    }

    #[test]
    fn test_draft_rejects_wrong_types() {
        let err = SchemeDraft::from_value(json!({
            "title": "Pension",
            "description": "For seniors",
            "income": "lots"
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["body"]);
    }

    #[test]
    fn test_merge_preserves_untouched_fields() {
        let original = sample();
        let patch = SchemePatch::new().set("state", "CA");

        let merged = original.merged(&patch).unwrap();
        assert_eq!(merged.state.as_deref(), Some("CA"));
        assert_eq!(
            Scheme {
                state: original.state.clone(),
                ..merged
            },
            original
        );
    }

    #[test]
    fn test_merge_null_clears_optional_field() {
        let original = sample();
        let patch = SchemePatch::new().set("imageLink", Value::Null);

        let merged = original.merged(&patch).unwrap();
        assert_eq!(merged.image_link, None);
        assert_eq!(merged.title, original.title);
    }

    #[test]
    fn test_merge_keeps_identity_and_timestamp() {
        let original = sample();
        let patch = SchemePatch::new()
            .set("id", SchemeId::new().to_string())
            .set("lastUpdated", "2001-01-01T00:00:00Z")
            .set("title", "Renamed");

        let merged = original.merged(&patch).unwrap();
        assert_eq!(merged.id, original.id);
        assert_eq!(merged.last_updated, original.last_updated);
        assert_eq!(merged.title, "Renamed");
    }

    #[test]
    fn test_merge_rejects_blank_required_field() {
        let original = sample();

        let err = original
            .merged(&SchemePatch::new().set("title", ""))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["title"]);

        let err = original
            .merged(&SchemePatch::new().set("description", Value::Null))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["description"]);
    }

    #[test]
    fn test_scheme_id_parsing() {
        let id = SchemeId::new();
        assert_eq!(id.to_string().parse::<SchemeId>().unwrap(), id);
        assert!("507f1f77bcf86cd799439011".parse::<SchemeId>().is_err());
    }
}
