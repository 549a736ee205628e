use std::time::Duration;

use quran_model::{ChapterData, ChapterEnvelope, Passage};
use thiserror::Error;

use crate::fetch::{error_chain, ChapterSource, FetchError};
use crate::normalize;
use crate::progress::Progress;

/// Number of chapters (surahs) in the Quran.
pub const CHAPTER_COUNT: u32 = 114;

/// Pause after every chapter request, failed or not.
pub const DEFAULT_DELAY_MS: u64 = 200;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(DEFAULT_DELAY_MS);

/// Which chapters to fetch and how fast.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub first_chapter: u32,
    pub last_chapter: u32,
    pub delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            first_chapter: 1,
            last_chapter: CHAPTER_COUNT,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RunConfig {
    pub fn chapters(&self) -> std::ops::RangeInclusive<u32> {
        self.first_chapter..=self.last_chapter
    }

    pub fn chapter_count(&self) -> u32 {
        if self.first_chapter > self.last_chapter {
            0
        } else {
            self.last_chapter - self.first_chapter + 1
        }
    }
}

/// Why a chapter contributed no passages.
#[derive(Debug, Error)]
pub enum ChapterError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("API reported code {} ({})", display_code(.code), .status.as_deref().unwrap_or("no status"))]
    Unsuccessful {
        code: Option<i64>,
        status: Option<String>,
    },

    #[error("response has no data section")]
    MissingData,

    #[error("data section is not a chapter")]
    Malformed(#[source] serde_json::Error),
}

fn display_code(code: &Option<i64>) -> String {
    code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string())
}

/// Turn one chapter envelope into passages, in the order the verses were received.
pub fn chapter_passages(chapter: u32, envelope: &ChapterEnvelope) -> Result<Vec<Passage>, ChapterError> {
    if !envelope.is_success() {
        return Err(ChapterError::Unsuccessful {
            code: envelope.code,
            status: envelope.status.clone(),
        });
    }
    let data = envelope.data().ok_or(ChapterError::MissingData)?;
    let data: ChapterData = serde_json::from_value(data.clone()).map_err(ChapterError::Malformed)?;

    let name = data.display_name(chapter);
    let passages = data
        .ayahs
        .iter()
        .map(|ayah| {
            let text = normalize::normalize_verse_text(ayah.text.as_deref());
            Passage::new(&name, chapter, ayah.number_in_surah, text)
        })
        .collect();

    Ok(passages)
}

/// Fetch one chapter and convert it.
pub async fn fetch_chapter_passages<S: ChapterSource>(
    source: &S,
    chapter: u32,
) -> Result<Vec<Passage>, ChapterError> {
    let envelope = source.fetch_chapter(chapter).await?;
    chapter_passages(chapter, &envelope)
}

/// Walk the configured chapter range in ascending order and gather every passage.
///
/// A chapter that fails is logged and skipped; the run always reaches the
/// end of the range. The configured delay is applied after every chapter.
pub async fn collect_passages<S, P>(source: &S, config: &RunConfig, progress: &mut P) -> Vec<Passage>
where
    S: ChapterSource,
    P: Progress + ?Sized,
{
    let total = config.chapter_count();
    progress.begin(total);
    tracing::info!(
        first = config.first_chapter,
        last = config.last_chapter,
        delay_ms = config.delay.as_millis() as u64,
        "Collecting chapters"
    );

    let mut passages = Vec::new();

    for (position, chapter) in (1..).zip(config.chapters()) {
        progress.chapter_started(chapter, position, total);

        match fetch_chapter_passages(source, chapter).await {
            Ok(mut chapter_passages) => {
                tracing::debug!(chapter, verses = chapter_passages.len(), "Collected chapter");
                passages.append(&mut chapter_passages);
            }
            Err(e) => {
                progress.chapter_failed(chapter, &e);
                tracing::warn!(
                    chapter,
                    url = %source.chapter_url(chapter),
                    error = %error_chain(&e),
                    "Skipping chapter"
                );
            }
        }

        tokio::time::sleep(config.delay).await;
    }

    progress.finish(passages.len());
    tracing::info!(passages = passages.len(), "Finished collecting");
    passages
}
