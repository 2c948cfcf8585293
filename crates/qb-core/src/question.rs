use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One answer choice. The effective display value is `text` when non-empty,
/// falling back to `image` for picture-only options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_image: Option<bool>,
}

impl QuestionOption {
    /// Text-only option.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            image: None,
            is_image: None,
        }
    }

    /// Image-only option.
    pub fn image(path: impl Into<String>) -> Self {
        Self {
            text: None,
            image: Some(path.into()),
            is_image: Some(true),
        }
    }
}

/// One quiz item as stored in the index.
///
/// Only `title` and `options` feed the duplicate logic; everything else is
/// carried through untouched. All fields tolerate absence so that documents
/// indexed by older ingest paths still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_time: Option<DateTime<Utc>>,
}

impl QuestionRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    /// Options whose text choices are the given strings.
    pub fn with_text_options<I, S>(self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = texts.into_iter().map(QuestionOption::text).collect();
        self.with_options(options)
    }
}

/// Accept an explicit `null` options field as an empty list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<QuestionOption>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<QuestionOption>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip() {
        let record = QuestionRecord::new("什么是操作系统？")
            .with_text_options(["A、进程管理", "B、内存管理"]);
        let json = serde_json::to_string(&record).unwrap();
        let back: QuestionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let record: QuestionRecord = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(record.title.as_deref(), Some("t"));
        assert!(record.options.is_empty());
    }

    #[test]
    fn test_null_options_deserialize() {
        let record: QuestionRecord =
            serde_json::from_str(r#"{"title":"t","options":null}"#).unwrap();
        assert!(record.options.is_empty());
    }

    #[test]
    fn test_non_list_options_rejected() {
        let result = serde_json::from_str::<QuestionRecord>(r#"{"title":"t","options":"abc"}"#);
        assert!(result.is_err());
    }
}
