//! File-backed FASTA source
//!
//! Maps a single-record FASTA file into memory and answers symbol lookups
//! without decoding the whole file. A checkpoint is recorded every 16 KiB
//! of file so a lookup only walks the bytes of one block.

use super::fasta::map_fasta_byte;
use super::{Sequence, SequenceSource};
use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// File bytes between checkpoints
const CHECKPOINT_BYTES: usize = 16 * 1024;

/// Position of a block start in both file and symbol coordinates
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    file_offset: usize,
    symbol_pos: usize,
}

/// A FASTA record read lazily through a memory map
pub struct MappedFasta {
    mmap: Mmap,
    /// First byte of sequence data (after the header line)
    data_start: usize,
    /// End of the first record (exclusive)
    data_end: usize,
    checkpoints: Vec<Checkpoint>,
    len: usize,
}

impl MappedFasta {
    /// Map a FASTA file; only the first record is exposed
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let bytes = &mmap[..];
        let data_start = if bytes.first() == Some(&b'>') {
            memchr::memchr(b'\n', bytes).map_or(bytes.len(), |p| p + 1)
        } else {
            0
        };
        let data_end = memchr::memmem::find(&bytes[data_start..], b"\n>")
            .map_or(bytes.len(), |p| data_start + p + 1);

        let mut checkpoints = Vec::with_capacity((data_end - data_start) / CHECKPOINT_BYTES + 1);
        let mut symbol_pos = 0;
        let mut offset = data_start;
        while offset < data_end {
            checkpoints.push(Checkpoint {
                file_offset: offset,
                symbol_pos,
            });
            let block_end = (offset + CHECKPOINT_BYTES).min(data_end);
            symbol_pos += count_symbols(&bytes[offset..block_end]);
            offset = block_end;
        }

        log::debug!(
            "mapped {} ({} symbols, {} checkpoints)",
            path.display(),
            symbol_pos,
            checkpoints.len()
        );

        Ok(Self {
            mmap,
            data_start,
            data_end,
            checkpoints,
            len: symbol_pos,
        })
    }

    /// Symbols starting at `pos`, decoded on the fly
    fn symbols_from(&self, pos: usize) -> impl Iterator<Item = u8> + '_ {
        let idx = self
            .checkpoints
            .partition_point(|c| c.symbol_pos <= pos)
            .saturating_sub(1);
        let checkpoint = self.checkpoints.get(idx).copied().unwrap_or(Checkpoint {
            file_offset: self.data_start,
            symbol_pos: 0,
        });

        self.mmap[checkpoint.file_offset..self.data_end]
            .iter()
            .filter(|&&b| b != b'\n' && b != b'\r')
            .map(|&b| map_fasta_byte(b))
            .skip(pos - checkpoint.symbol_pos)
    }
}

impl SequenceSource for MappedFasta {
    fn len(&self) -> usize {
        self.len
    }

    fn symbol_at(&self, pos: usize) -> u8 {
        assert!(pos < self.len, "position {} out of range {}", pos, self.len);
        self.symbols_from(pos)
            .next()
            .expect("checkpoint table covers every symbol")
    }

    fn subsequence(&self, start: usize, len: usize) -> Sequence {
        assert!(
            start + len <= self.len,
            "subsequence {}+{} out of range {}",
            start,
            len,
            self.len
        );
        let codes: Vec<u8> = self.symbols_from(start).take(len).collect();
        Sequence::from_codes_unchecked(codes)
    }
}

/// Count sequence bytes in a block (everything except line endings)
#[inline]
fn count_symbols(block: &[u8]) -> usize {
    block.len() - memchr::memchr2_iter(b'\n', b'\r', block).count()
}
