use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDocument {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode input as {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode a saved document into UTF-8: BOM first, then statistical
/// detection. File input carries no transport charset, so detection is the
/// only other signal.
pub fn decode_document(bytes: &[u8]) -> Result<DecodedDocument, DecodeError> {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    decode_with(bytes, encoding)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedDocument, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedDocument {
        html: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}
