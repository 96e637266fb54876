//! Columnar Transposition
//!
//! Text is written round-robin into `key.len()` columns (byte `i` goes to
//! column `i % K`) and the columns are read out in key order. Column `c`
//! holds `L / K` bytes, plus one when `c < L % K`.

use crate::{Error, Key, Result};

pub struct GridCodec;

impl GridCodec {
    pub fn encode(text: &[u8], key: &Key) -> Vec<u8> {
        let columns = key.len();
        let mut grid: Vec<Vec<u8>> = Self::column_lengths(text.len(), columns)
            .into_iter()
            .map(Vec::with_capacity)
            .collect();

        for (index, &byte) in text.iter().enumerate() {
            grid[index % columns].push(byte);
        }

        let mut out = Vec::with_capacity(text.len());
        for col in key.column_order() {
            out.extend_from_slice(&grid[col]);
        }
        out
    }

    pub fn decode(ciphertext: &[u8], key: &Key) -> Result<Vec<u8>> {
        let columns = key.len();
        let lengths = Self::column_lengths(ciphertext.len(), columns);

        // Cut contiguous chunks in key order, store them by original column.
        let mut grid: Vec<&[u8]> = vec![&ciphertext[..0]; columns];
        let mut offset = 0;
        for col in key.column_order() {
            let end = offset + lengths[col];
            grid[col] = ciphertext.get(offset..end).ok_or_else(|| {
                Error::DecodeFailure(format!(
                    "column {} wants bytes {}..{} of {}",
                    col,
                    offset,
                    end,
                    ciphertext.len()
                ))
            })?;
            offset = end;
        }

        let rows = lengths.first().copied().unwrap_or(0);
        let mut out = Vec::with_capacity(ciphertext.len());
        for row in 0..rows {
            for column in &grid {
                if let Some(&byte) = column.get(row) {
                    out.push(byte);
                }
            }
        }

        if out.len() != ciphertext.len() {
            return Err(Error::DecodeFailure(format!(
                "rebuilt {} of {} bytes",
                out.len(),
                ciphertext.len()
            )));
        }
        Ok(out)
    }

    /// Bytes held by each column (original index order) for a text of `len` bytes.
    pub fn column_lengths(len: usize, columns: usize) -> Vec<usize> {
        if columns == 0 {
            return Vec::new();
        }
        let base = len / columns;
        let extra = len % columns;
        (0..columns)
            .map(|col| if col < extra { base + 1 } else { base })
            .collect()
    }
}
