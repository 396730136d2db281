use std::io::Read;

use crate::error::DecodeError;

/// Default cap on a single decompressed block body (16 MiB).
pub const MAX_BLOCK_DECOMPRESSED_SIZE: usize = 16 * 1024 * 1024;

/// Decompress a zstd block body, refusing to produce more than `max_size`
/// bytes.
///
/// The output is read through a `take` guard one byte past the limit, so a
/// body that inflates beyond it is caught without buffering all of it.
pub fn decompress(data: &[u8], max_size: usize) -> Result<Vec<u8>, DecodeError> {
    let decoder = zstd::stream::read::Decoder::new(data)
        .map_err(|e| DecodeError::DecompressFailed(e.to_string()))?;

    let guard = u64::try_from(max_size).unwrap_or(u64::MAX).saturating_add(1);
    let mut out = Vec::new();
    decoder
        .take(guard)
        .read_to_end(&mut out)
        .map_err(|e| DecodeError::DecompressFailed(e.to_string()))?;

    if out.len() > max_size {
        return Err(DecodeError::DecompressionBomb {
            actual: out.len(),
            limit: max_size,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflates_encoder_output() {
        let body = b"building=yes;".repeat(64);
        let packed = osmbin_encoder::compression::compress(&body).expect("compressible");
        assert_eq!(decompress(&packed, 1 << 20).unwrap(), body);
    }

    #[test]
    fn rejects_oversized_output() {
        let body = vec![0u8; 4096];
        let packed = osmbin_encoder::compression::compress(&body).expect("compressible");
        let err = decompress(&packed, 1024).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DecompressionBomb { limit: 1024, .. }
        ));
    }

    #[test]
    fn garbage_fails() {
        let err = decompress(b"definitely not zstd", 1024).unwrap_err();
        assert!(matches!(err, DecodeError::DecompressFailed(_)));
    }
}
