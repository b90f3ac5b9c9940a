use tokio::io::{AsyncRead, AsyncReadExt};

use super::errors::RequestError;

const READ_CHUNK: usize = 1024;
/// Bytes of the previous read scanned again, enough for a split `\n\r\n`.
const TERMINATOR_LOOKBACK: usize = 3;

/// The request line of an HTTP/1.x request. Headers are read but not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    method: String,
    target: String,
    version: String,
}

impl RequestHead {
    /// Parse the request line out of a complete request head.
    pub fn parse(head: &[u8]) -> Result<Self, RequestError> {
        let line_end = head.iter().position(|&b| b == b'\n').unwrap_or(head.len());
        let line = &head[..line_end];
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let malformed = || RequestError::MalformedRequestLine {
            line: String::from_utf8_lossy(line).into_owned(),
        };

        let text = std::str::from_utf8(line).map_err(|_| malformed())?;
        let mut parts = text.split_ascii_whitespace();
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        if !version.starts_with("HTTP/") {
            return Err(malformed());
        }
        let target = origin_form(target).ok_or_else(malformed)?;

        Ok(Self {
            method: method.to_string(),
            target,
            version: version.to_string(),
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target in origin form, query string included.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The request target without its query string.
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(path, _)| path)
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Reduce a request target to origin form (`/path?query`).
///
/// Absolute-form targets (`http://host/path`) lose their scheme and
/// authority. Anything else must already start with `/`.
fn origin_form(target: &str) -> Option<String> {
    if target.starts_with('/') {
        return Some(target.to_string());
    }

    let (scheme, rest) = target.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return None;
    }
    match rest.find(['/', '?']) {
        Some(i) if rest[i..].starts_with('/') => Some(rest[i..].to_string()),
        Some(i) => Some(format!("/{}", &rest[i..])),
        None => Some("/".to_string()),
    }
}

/// End of the request head in `buf`, searching from `from`.
///
/// The head ends at the first empty line. Lines may end in `\r\n` or a
/// bare `\n`.
fn find_head_end(buf: &[u8], from: usize) -> Option<usize> {
    (from..buf.len()).find_map(|i| {
        if buf[i] != b'\n' {
            return None;
        }
        match &buf[i + 1..] {
            [b'\n', ..] => Some(i + 2),
            [b'\r', b'\n', ..] => Some(i + 3),
            _ => None,
        }
    })
}

/// Read from `reader` until the end of the request head (an empty line).
///
/// Returns the head including the terminator. Bytes past the terminator are
/// discarded. Fails with [`RequestError::HeaderTooLarge`] once more than
/// `limit` bytes arrive without a terminator, and with
/// [`RequestError::Incomplete`] if the peer closes first.
pub async fn read_request_head<R>(reader: &mut R, limit: usize) -> Result<Vec<u8>, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(READ_CHUNK.min(limit));
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(RequestError::Incomplete);
        }

        // The terminator may straddle the previous read.
        let search_from = buf.len().saturating_sub(TERMINATOR_LOOKBACK);
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_head_end(&buf, search_from) {
            if end > limit {
                return Err(RequestError::HeaderTooLarge { limit });
            }
            buf.truncate(end);
            return Ok(buf);
        }

        if buf.len() >= limit {
            return Err(RequestError::HeaderTooLarge { limit });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        let head = RequestHead::parse(b"GET /image?123 HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
        assert_eq!(head.method(), "GET");
        assert_eq!(head.target(), "/image?123");
        assert_eq!(head.path(), "/image");
        assert_eq!(head.version(), "HTTP/1.1");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        for line in [
            &b"GET\r\n\r\n"[..],
            b"GET /\r\n\r\n",
            b"GET / HTTP/1.1 extra\r\n\r\n",
            b"GET / SMTP\r\n\r\n",
            b"GET image HTTP/1.1\r\n\r\n",
            b"GET ftp://host/image HTTP/1.1\r\n\r\n",
            b"\xff\xfe / HTTP/1.1\r\n\r\n",
            b"\r\n\r\n",
        ] {
            assert!(
                matches!(
                    RequestHead::parse(line),
                    Err(RequestError::MalformedRequestLine { .. })
                ),
                "accepted {:?}",
                String::from_utf8_lossy(line)
            );
        }
    }

    #[test]
    fn test_parse_bare_lf_request_line() {
        let head = RequestHead::parse(b"GET /image HTTP/1.0\nHost: x\n\n").unwrap();
        assert_eq!(head.path(), "/image");
        assert_eq!(head.version(), "HTTP/1.0");
    }

    #[test]
    fn test_parse_absolute_form_target() {
        let cases = [
            ("http://host:8080/image?7", "/image?7", "/image"),
            ("HTTP://host/", "/", "/"),
            ("http://host", "/", "/"),
            ("https://host?x=1", "/?x=1", "/"),
        ];
        for (sent, target, path) in cases {
            let line = format!("GET {sent} HTTP/1.1\r\n\r\n");
            let head = RequestHead::parse(line.as_bytes()).unwrap();
            assert_eq!(head.target(), target, "for {sent}");
            assert_eq!(head.path(), path, "for {sent}");
        }
    }

    #[test]
    fn test_find_head_end() {
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n\r\n", 0), Some(18));
        assert_eq!(find_head_end(b"GET / HTTP/1.0\n\n", 0), Some(16));
        assert_eq!(find_head_end(b"GET / HTTP/1.0\nA: b\n\nrest", 0), Some(21));
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\nA: b\r\n", 0), None);
        assert_eq!(find_head_end(b"\n\r", 0), None);
    }

    #[tokio::test]
    async fn test_read_head_bare_lf() {
        let mut reader = chunked_reader(&[&b"GET / HTTP/1.0\n"[..], b"\nignored"]);
        let head = read_request_head(&mut reader, 8192).await.unwrap();
        assert_eq!(head, b"GET / HTTP/1.0\n\n");
    }

    #[tokio::test]
    async fn test_read_head_across_partial_reads() {
        let mut reader =
            chunked_reader(&[&b"GET / HTTP/1.1\r"[..], b"\nHost: a\r\n\r", b"\nBODY"]);
        let head = read_request_head(&mut reader, 8192).await.unwrap();
        assert_eq!(head, b"GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    }

    #[tokio::test]
    async fn test_read_head_incomplete() {
        let mut reader = chunked_reader(&[&b"GET / HTTP/1.1\r\n"[..]]);
        assert!(matches!(
            read_request_head(&mut reader, 8192).await,
            Err(RequestError::Incomplete)
        ));
    }

    #[tokio::test]
    async fn test_read_head_too_large() {
        let long = vec![b'a'; 600];
        let mut reader =
            chunked_reader(&[&b"GET / HTTP/1.1\r\nX: "[..], &long[..], b"\r\n\r\n"]);
        assert!(matches!(
            read_request_head(&mut reader, 256).await,
            Err(RequestError::HeaderTooLarge { limit: 256 })
        ));
    }

    #[tokio::test]
    async fn test_read_head_exactly_at_limit() {
        let request: &[u8] = b"GET / HTTP/1.1\r\n\r\n";
        let mut reader = chunked_reader(&[request]);
        let head = read_request_head(&mut reader, request.len()).await.unwrap();
        assert_eq!(head, request);
    }

    /// A reader fed from another task, one chunk per write.
    fn chunked_reader(chunks: &[&[u8]]) -> impl AsyncRead + Unpin + use<> {
        let (client, mut server) = tokio::io::duplex(64 * 1024);
        let chunks: Vec<Vec<u8>> = chunks.iter().map(|c| c.to_vec()).collect();
        tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            for chunk in chunks {
                if server.write_all(&chunk).await.is_err() {
                    return;
                }
                tokio::task::yield_now().await;
            }
        });
        client
    }
}
