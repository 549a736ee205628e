use crate::collect::ChapterError;

/// Progress reporting for the chapter loop.
/// The CLI implements this to draw its console counter.
pub trait Progress {
    /// Called once before the first chapter with the number of chapters to fetch.
    fn begin(&mut self, _total: u32) {}

    /// Called before each chapter request. `position` counts from 1.
    fn chapter_started(&mut self, _chapter: u32, _position: u32, _total: u32) {}

    /// Called when a chapter produced no passages because of an error.
    fn chapter_failed(&mut self, _chapter: u32, _error: &ChapterError) {}

    /// Called after the last chapter with the number of passages collected.
    fn finish(&mut self, _passages: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
