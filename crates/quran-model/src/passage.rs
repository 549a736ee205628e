use serde::{Deserialize, Serialize};

/// One normalized verse, ready for downstream retrieval.
///
/// Field order here is the field order in the written JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passage {
    /// Citation in the form `"Al-Baqara 2:255"`.
    pub reference: String,
    /// Verse text with markup removed and whitespace collapsed.
    pub text: String,
    /// Chapter context in the form `"Surah Al-Baqara (Chapter 2)"`.
    pub context: String,
}

impl Passage {
    /// Build a passage from an already-normalized verse.
    ///
    /// A missing verse number renders as an empty position, e.g. `"Al-Fatiha 1:"`.
    pub fn new(chapter_name: &str, chapter_number: u32, verse_number: Option<u32>, text: String) -> Self {
        let verse = verse_number.map(|n| n.to_string()).unwrap_or_default();
        Self {
            reference: format!("{chapter_name} {chapter_number}:{verse}"),
            text,
            context: format!("Surah {chapter_name} (Chapter {chapter_number})"),
        }
    }
}

/// The single JSON artifact written at the end of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputDocument {
    pub passages: Vec<Passage>,
}

impl OutputDocument {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    /// Serialize with 2-space indentation. Non-ASCII text is written as-is.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passage_formats() {
        let p = Passage::new("Al-Baqara", 2, Some(255), "The Throne Verse".to_string());
        assert_eq!(p.reference, "Al-Baqara 2:255");
        assert_eq!(p.text, "The Throne Verse");
        assert_eq!(p.context, "Surah Al-Baqara (Chapter 2)");
    }

    #[test]
    fn test_missing_verse_number() {
        let p = Passage::new("Al-Faatiha", 1, None, "In the name of Allah".to_string());
        assert_eq!(p.reference, "Al-Faatiha 1:");
    }

    #[test]
    fn test_document_field_order_and_indent() {
        let doc = OutputDocument::new(vec![Passage::new("Al-Ikhlaas", 112, Some(1), "Say: He is Allah, the One!".into())]);
        let json = doc.to_json_pretty().unwrap();
        let expected = r#"{
  "passages": [
    {
      "reference": "Al-Ikhlaas 112:1",
      "text": "Say: He is Allah, the One!",
      "context": "Surah Al-Ikhlaas (Chapter 112)"
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let doc = OutputDocument::new(vec![Passage::new("سورة الفاتحة", 1, Some(1), "بِسْمِ ٱللَّهِ".into())]);
        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("سورة الفاتحة 1:1"));
        assert!(json.contains("بِسْمِ ٱللَّهِ"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_document_roundtrip_preserves_order() {
        let passages = vec![
            Passage::new("Al-Faatiha", 1, Some(1), "first".into()),
            Passage::new("Al-Faatiha", 1, Some(2), "second".into()),
            Passage::new("Al-Baqara", 2, Some(1), "third".into()),
        ];
        let doc = OutputDocument::new(passages.clone());
        let parsed = OutputDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed.passages, passages);
    }
}
