//! Splitting long transcripts into overlapping windows small enough for a
//! bounded-context language model.
//!
//! The work is done by [`text_splitter`], which breaks text on the coarsest
//! semantic boundary that fits (paragraphs, lines, sentences, words, then
//! characters) and packs neighbouring sections into chunks of at most
//! `chunk_size` characters, each sharing up to `chunk_overlap` characters with
//! the previous one.

use text_splitter::{Characters, ChunkConfig, TextSplitter};

use crate::error::{Result, TldwError};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Maximum chunk length, in characters
    pub chunk_size: usize,
    /// Maximum number of characters shared with the previous chunk
    pub chunk_overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

pub struct TextChunker {
    config: ChunkerConfig,
    splitter: TextSplitter<Characters>,
}

impl TextChunker {
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        if config.chunk_size == 0 || config.chunk_overlap >= config.chunk_size {
            return Err(TldwError::InvalidChunkConfig {
                size: config.chunk_size,
                overlap: config.chunk_overlap,
            });
        }

        let chunk_config = ChunkConfig::new(config.chunk_size).with_overlap(config.chunk_overlap)?;
        Ok(Self {
            config,
            splitter: TextSplitter::new(chunk_config),
        })
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split `text` into ordered, trimmed chunks
    pub fn split(&self, text: &str) -> Vec<String> {
        self.splitter.chunks(text).map(str::to_string).collect()
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default()).expect("default chunk config is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: usize, chunk_overlap: usize) -> TextChunker {
        TextChunker::new(ChunkerConfig {
            chunk_size,
            chunk_overlap,
        })
        .unwrap()
    }

    /// Byte ranges of every chunk within `text`
    fn ranges(chunker: &TextChunker, text: &str) -> Vec<(usize, usize)> {
        chunker
            .splitter
            .chunk_indices(text)
            .map(|(start, chunk)| (start, start + chunk.len()))
            .collect()
    }

    /// Chunks appear in source order and only whitespace falls between them
    fn assert_covers_in_order(source: &str, ranges: &[(usize, usize)]) {
        let mut covered = 0;
        for &(start, end) in ranges {
            if start > covered {
                assert!(
                    source[covered..start].trim().is_empty(),
                    "text lost before {:?}",
                    &source[start..end]
                );
            }
            assert!(end >= covered, "chunk {:?} out of order", &source[start..end]);
            covered = end;
        }
        assert!(source[covered..].trim().is_empty(), "text lost after last chunk");
    }

    #[test]
    fn test_default_config() {
        let chunker = TextChunker::default();
        assert_eq!(chunker.config().chunk_size, 1000);
        assert_eq!(chunker.config().chunk_overlap, 100);
    }

    #[test]
    fn test_rejects_overlap_not_smaller_than_size() {
        let err = TextChunker::new(ChunkerConfig {
            chunk_size: 100,
            chunk_overlap: 100,
        })
        .err()
        .unwrap();
        assert!(matches!(
            err,
            TldwError::InvalidChunkConfig {
                size: 100,
                overlap: 100
            }
        ));

        assert!(
            TextChunker::new(ChunkerConfig {
                chunk_size: 0,
                chunk_overlap: 0
            })
            .is_err()
        );
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = TextChunker::default().split("  just a short caption  ");
        assert_eq!(chunks, vec!["just a short caption"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(TextChunker::default().split("").is_empty());
        assert!(TextChunker::default().split("   ").is_empty());
    }

    #[test]
    fn test_character_fallback_without_separators() {
        let chunks = chunker(4, 0).split("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_paragraphs_split_before_words() {
        let text = "first paragraph here\n\nsecond paragraph here";
        let chunks = chunker(25, 0).split(text);
        assert_eq!(chunks, vec!["first paragraph here", "second paragraph here"]);
    }

    #[test]
    fn test_lengths_are_counted_in_characters() {
        let chunks = chunker(2, 0).split("éééééé");
        assert_eq!(chunks, vec!["éé", "éé", "éé"]);
    }

    #[test]
    fn test_bounds_and_coverage_on_long_transcript() {
        let text = (0..2_000)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");

        for (size, overlap) in [(1000, 100), (120, 30), (50, 0), (17, 16)] {
            let chunker = chunker(size, overlap);
            let chunks = chunker.split(&text);

            assert!(chunks.len() > 1);
            for chunk in &chunks {
                assert!(chunk.chars().count() <= size, "chunk over {size}: {chunk:?}");
            }
            assert_covers_in_order(&text, &ranges(&chunker, &text));
        }
    }

    #[test]
    fn test_long_word_is_split_within_bounds() {
        let text = "hi supercalifragilistic yo";
        let chunker = chunker(8, 2);
        let chunks = chunker.split(text);

        assert!(chunks.iter().all(|c| c.chars().count() <= 8));
        assert!(chunks.iter().any(|c| c.starts_with("super")));
        assert_covers_in_order(text, &ranges(&chunker, text));
    }

    #[test]
    fn test_consecutive_chunks_share_bounded_context() {
        let text = (0..300)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let chunker = chunker(100, 20);
        let ranges = ranges(&chunker, &text);

        let shared: Vec<usize> = ranges
            .windows(2)
            .map(|pair| pair[0].1.saturating_sub(pair[1].0))
            .collect();

        assert!(shared.iter().any(|&len| len > 0), "no context carried over");
        assert!(shared.iter().all(|&len| len <= 20), "overlap too large: {shared:?}");
    }

    #[test]
    fn test_mixed_separators_keep_bounds() {
        let text = (0..40)
            .map(|i| format!("Paragraph {i}: the quick brown fox jumps over the dog.\nIt keeps running."))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunker = chunker(150, 25);
        let chunks = chunker.split(&text);

        for chunk in &chunks {
            assert!(chunk.chars().count() <= 150);
            assert!(!chunk.starts_with(char::is_whitespace));
        }
        assert_covers_in_order(&text, &ranges(&chunker, &text));
    }
}
