/*
 * Responsibility
 * - 公開 ID ↔ 内部のプロフィール ID の変換 (encode/decode)
 * - 連番の内部 ID をそのまま URL に出さないための難読化 (sqids)
 * - Extractor や DTO からはこの service を使う (方式変更の影響を局所化)
 */
use sqids::Sqids;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must be between 0 and 255, got {value}")]
    InvalidMinLength { value: usize },
    #[error("sqids error: {0}")]
    Sqids(#[from] sqids::Error),
    #[error("invalid public id format")]
    DecodeInvalidFormat,
    #[error("decoded id is out of range")]
    DecodeOutOfRange,
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: u64) -> Result<String> {
        Ok(self.sqids.encode(&[id])?)
    }

    /// Only the canonical encoding of a single id is accepted, so every
    /// internal id has exactly one public spelling.
    pub fn decode(&self, public_id: &str) -> Result<u64> {
        let nums = self.sqids.decode(public_id);
        let [id] = nums.as_slice() else {
            return Err(IdCodecError::DecodeInvalidFormat);
        };
        if self.sqids.encode(&[*id])? != public_id {
            return Err(IdCodecError::DecodeInvalidFormat);
        }
        if *id > i64::MAX as u64 {
            return Err(IdCodecError::DecodeOutOfRange);
        }
        Ok(*id)
    }
}
