use serde::{Deserialize, Serialize};

/// Current signature-data format version (wire byte 0).
pub const DATA_VERSION: u8 = 0x00;

/// The content of a signature payload.
///
/// `Invalid` is produced only by decoding: malformed or foreign ledger
/// entries become data, never errors, so a verifier can always enumerate
/// whatever it found. It is deliberately distinguishable from `None`
/// (a signature that genuinely carried no payload).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataContent {
    /// No payload attached.
    None,
    /// A unicode string.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Undecodable payload, with a diagnostic.
    Invalid(String),
}

impl DataContent {
    pub fn is_none(&self) -> bool {
        matches!(self, DataContent::None)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, DataContent::Invalid(_))
    }

    /// True for `None` and for empty text/bytes content.
    pub fn is_empty(&self) -> bool {
        match self {
            DataContent::None => true,
            DataContent::Text(s) => s.is_empty(),
            DataContent::Bytes(b) => b.is_empty(),
            DataContent::Invalid(_) => false,
        }
    }
}

/// The optional payload attached to a signature event.
///
/// Carries the wire format version and encrypted flag alongside the
/// content so decoded events preserve exactly what was published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureData {
    pub version: u8,
    pub encrypted: bool,
    pub content: DataContent,
}

impl SignatureData {
    /// An empty payload.
    pub fn none() -> Self {
        Self {
            version: DATA_VERSION,
            encrypted: false,
            content: DataContent::None,
        }
    }

    /// A plaintext string payload.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            version: DATA_VERSION,
            encrypted: false,
            content: DataContent::Text(content.into()),
        }
    }

    /// A plaintext raw-bytes payload.
    pub fn bytes(content: impl Into<Vec<u8>>) -> Self {
        Self {
            version: DATA_VERSION,
            encrypted: false,
            content: DataContent::Bytes(content.into()),
        }
    }

    /// Mark the payload for encryption on encode (or as having been
    /// encrypted on the wire, when decoding).
    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }
}

impl Default for SignatureData {
    fn default() -> Self {
        Self::none()
    }
}
