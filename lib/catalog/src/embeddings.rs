//! The on-disk embedding-matrix format.
//!
//! Layout (little-endian):
//!
//! ```text
//! Magic:   "LBEM" (4 bytes)
//! Version: u16
//! Rows:    u32
//! Dim:     u32
//! Data:    rows * dim f32 values, row-major
//! ```
//!
//! Row order must match the filename index produced by the same offline
//! build; the loader enforces that the row counts agree.

use std::path::Path;

use lookbook_core::{EmbeddingMatrix, Error, Result};

pub const EMBEDDING_MAGIC: [u8; 4] = *b"LBEM";
pub const EMBEDDING_VERSION: u16 = 1;

const HEADER_LEN: usize = 4 + 2 + 4 + 4;

/// Read an embedding matrix from disk.
pub fn read_matrix(path: &Path) -> Result<EmbeddingMatrix> {
    let bytes = std::fs::read(path).map_err(|e| Error::unavailable(path, e))?;
    parse_matrix(&bytes).map_err(|msg| {
        Error::MalformedData(format!("{}: {}", path.display(), msg))
    })
}

fn parse_matrix(bytes: &[u8]) -> std::result::Result<EmbeddingMatrix, String> {
    if bytes.len() < HEADER_LEN {
        return Err(format!("truncated header ({} bytes)", bytes.len()));
    }
    if bytes[0..4] != EMBEDDING_MAGIC {
        return Err("bad magic, not an embedding file".to_string());
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != EMBEDDING_VERSION {
        return Err(format!("unsupported version {}", version));
    }
    let rows = u32::from_le_bytes(bytes[6..10].try_into().unwrap()) as usize;
    let dim = u32::from_le_bytes(bytes[10..14].try_into().unwrap()) as usize;
    if dim == 0 {
        return Err("dimension must be non-zero".to_string());
    }

    let expected = HEADER_LEN + rows * dim * 4;
    if bytes.len() != expected {
        return Err(format!(
            "expected {} bytes for {} x {} matrix, got {}",
            expected,
            rows,
            dim,
            bytes.len()
        ));
    }

    let data: Vec<f32> = bytes[HEADER_LEN..]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
        .collect();
    EmbeddingMatrix::new(dim, data).map_err(|e| e.to_string())
}

/// Write an embedding matrix to disk. Used by the offline catalog build and
/// by tests producing fixtures.
pub fn write_matrix(path: &Path, matrix: &EmbeddingMatrix) -> Result<()> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + matrix.as_slice().len() * 4);
    bytes.extend_from_slice(&EMBEDDING_MAGIC);
    bytes.extend_from_slice(&EMBEDDING_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(matrix.rows() as u32).to_le_bytes());
    bytes.extend_from_slice(&(matrix.dim() as u32).to_le_bytes());
    for value in matrix.as_slice() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    std::fs::write(path, bytes).map_err(|e| Error::unavailable(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emb.lbe");

        let matrix = EmbeddingMatrix::new(3, vec![1.0, 2.0, 3.0, -4.0, 0.5, 0.0]).unwrap();
        write_matrix(&path, &matrix).unwrap();

        let loaded = read_matrix(&path).unwrap();
        assert_eq!(loaded, matrix);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_matrix(&dir.path().join("nope.lbe")).unwrap_err();
        assert!(matches!(err, Error::DataUnavailable { .. }));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emb.lbe");
        std::fs::write(&path, b"NOPE\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();
        assert!(matches!(
            read_matrix(&path),
            Err(Error::MalformedData(_))
        ));
    }

    #[test]
    fn test_truncated_data_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emb.lbe");

        let matrix = EmbeddingMatrix::new(2, vec![1.0, 2.0]).unwrap();
        write_matrix(&path, &matrix).unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 2);
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(read_matrix(&path), Err(Error::MalformedData(_))));
    }
}
