// Line framing for incoming JSON-RPC requests

use bytes::BytesMut;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

/// Longest request line accepted before it is discarded as malformed
pub const MAX_REQUEST_LINE: usize = 4 * 1024 * 1024;

/// One newline-terminated frame read from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLine {
    Text(String),
    /// Not valid UTF-8 or over the length limit; carries the reason
    Malformed(String),
}

/// Wraps `LinesCodec` so a bad line becomes a frame instead of ending the stream.
///
/// `FramedRead` stops yielding after the first decoder error, so content
/// problems must not surface as `Err`. Only I/O errors from the reader do.
#[derive(Debug, Clone)]
pub struct RequestLineCodec {
    inner: LinesCodec,
}

impl RequestLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn recover(
        decoded: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<RequestLine>, LinesCodecError> {
        match decoded {
            Ok(line) => Ok(line.map(RequestLine::Text)),
            // LinesCodec has already consumed the line (or entered discard mode)
            Err(e) => Ok(Some(RequestLine::Malformed(e.to_string()))),
        }
    }
}

impl Default for RequestLineCodec {
    fn default() -> Self {
        Self::new(MAX_REQUEST_LINE)
    }
}

impl Decoder for RequestLineCodec {
    type Item = RequestLine;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<RequestLine>, LinesCodecError> {
        Self::recover(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<RequestLine>, LinesCodecError> {
        Self::recover(self.inner.decode_eof(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_line_then_valid_line() {
        let mut codec = RequestLineCodec::default();
        let mut buf = BytesMut::from(&b"\xff\xfe\n{\"id\":1}\n"[..]);

        assert!(matches!(codec.decode(&mut buf).unwrap(), Some(RequestLine::Malformed(_))));
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(RequestLine::Text("{\"id\":1}".to_string()))
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_overlong_line_is_discarded() {
        let mut codec = RequestLineCodec::new(8);
        let mut buf = BytesMut::from(&b"0123456789abcdef\nping\n"[..]);

        assert!(matches!(codec.decode(&mut buf).unwrap(), Some(RequestLine::Malformed(_))));
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(RequestLine::Text("ping".to_string()))
        );
    }

    #[test]
    fn test_partial_line_waits_for_newline() {
        let mut codec = RequestLineCodec::default();
        let mut buf = BytesMut::from(&b"{\"jsonrpc\""[..]);

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b":\"2.0\"}\r\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(RequestLine::Text("{\"jsonrpc\":\"2.0\"}".to_string()))
        );
    }

    #[test]
    fn test_trailing_line_at_eof() {
        let mut codec = RequestLineCodec::default();
        let mut buf = BytesMut::from(&b"last"[..]);

        assert_eq!(
            codec.decode_eof(&mut buf).unwrap(),
            Some(RequestLine::Text("last".to_string()))
        );
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }
}
