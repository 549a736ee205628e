use serde::{Deserialize, Deserializer};

/// Response code the API reports for a successful lookup.
pub const SUCCESS_CODE: i64 = 200;

/// Top-level response body returned by the chapter endpoint.
///
/// `data` is kept as raw JSON because the API puts a plain string message
/// there on error responses. It is only read as a [`ChapterData`] once
/// `code` says the lookup succeeded.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterEnvelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ChapterEnvelope {
    pub fn is_success(&self) -> bool {
        self.code == Some(SUCCESS_CODE)
    }

    /// The data section, if present and not `null`.
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref().filter(|v| !v.is_null())
    }
}

/// The chapter payload inside a successful envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterData {
    /// Original-script name (e.g. "سُورَةُ ٱلْفَاتِحَةِ").
    #[serde(default)]
    pub name: Option<String>,
    /// Transliterated name (e.g. "Al-Faatiha").
    #[serde(default)]
    pub english_name: Option<String>,
    /// Missing and `null` both read as no verses.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ayahs: Vec<VerseRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<VerseRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<VerseRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChapterData {
    /// Name used in passage references: the transliterated name, then the
    /// original-script name, then a generic `"Surah {n}"` label.
    pub fn display_name(&self, chapter_number: u32) -> String {
        [&self.english_name, &self.name]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Surah {chapter_number}"))
    }
}

/// A single verse as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRecord {
    #[serde(default)]
    pub number_in_surah: Option<u32>,
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_envelope() {
        let json = r#"{
            "code": 200,
            "status": "OK",
            "data": {
                "number": 1,
                "name": "سُورَةُ ٱلْفَاتِحَةِ",
                "englishName": "Al-Faatiha",
                "englishNameTranslation": "The Opening",
                "ayahs": [
                    {"number": 1, "text": "In the name of Allah", "numberInSurah": 1, "juz": 1}
                ]
            }
        }"#;
        let envelope: ChapterEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success());
        let data: ChapterData = serde_json::from_value(envelope.data().unwrap().clone()).unwrap();
        assert_eq!(data.display_name(1), "Al-Faatiha");
        assert_eq!(data.ayahs.len(), 1);
        assert_eq!(data.ayahs[0].number_in_surah, Some(1));
    }

    #[test]
    fn test_error_envelope_with_string_data() {
        let json = r#"{"code": 404, "status": "NOT FOUND", "data": "Please specify an Ayah number (1 to 6236)"}"#;
        let envelope: ChapterEnvelope = serde_json::from_str(json).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.data().unwrap().is_string());
    }

    #[test]
    fn test_null_data_is_absent() {
        let envelope: ChapterEnvelope = serde_json::from_str(r#"{"code": 200, "data": null}"#).unwrap();
        assert!(envelope.is_success());
        assert!(envelope.data().is_none());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut data = ChapterData {
            name: Some("سُورَةُ البَقَرَةِ".into()),
            english_name: Some("Al-Baqara".into()),
            ..Default::default()
        };
        assert_eq!(data.display_name(2), "Al-Baqara");

        data.english_name = Some(String::new());
        assert_eq!(data.display_name(2), "سُورَةُ البَقَرَةِ");

        data.name = None;
        assert_eq!(data.display_name(2), "Surah 2");
    }

    #[test]
    fn test_missing_ayahs_defaults_empty() {
        let data: ChapterData = serde_json::from_str(r#"{"englishName": "Al-Kawthar"}"#).unwrap();
        assert!(data.ayahs.is_empty());
    }

    #[test]
    fn test_null_ayahs_defaults_empty() {
        let data: ChapterData =
            serde_json::from_str(r#"{"englishName": "Al-Kawthar", "ayahs": null}"#).unwrap();
        assert!(data.ayahs.is_empty());
        assert_eq!(data.display_name(108), "Al-Kawthar");
    }
}
