use std::io::{self, Write};

use quran_acquire::{ChapterError, Progress};

/// Draws `Fetching Surah X/N...` on stdout, overwriting the line in place.
///
/// Log lines go to stderr, so the counter line is closed before a failure
/// gets logged to keep the two from sharing a line.
#[derive(Default)]
pub struct ConsoleProgress {
    line_open: bool,
}

impl ConsoleProgress {
    fn close_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}

impl Progress for ConsoleProgress {
    fn chapter_started(&mut self, chapter: u32, position: u32, total: u32) {
        let last = chapter + (total - position);
        print!("\rFetching Surah {chapter}/{last}...");
        let _ = io::stdout().flush();
        self.line_open = true;
    }

    fn chapter_failed(&mut self, _chapter: u32, _error: &ChapterError) {
        self.close_line();
    }

    fn finish(&mut self, passages: usize) {
        self.close_line();
        println!();
        println!("Downloaded {passages} Quran verses");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_closes_line() {
        let mut progress = ConsoleProgress::default();
        progress.chapter_started(1, 1, 114);
        assert!(progress.line_open);
        progress.chapter_failed(1, &ChapterError::MissingData);
        assert!(!progress.line_open);
        progress.finish(0);
        assert!(!progress.line_open);
    }
}
