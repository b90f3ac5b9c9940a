use std::fmt::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::frame::Frame;

/// The three responses the server ever sends. Every one closes the connection.
#[derive(Debug, Clone)]
pub enum Response {
    /// `200 OK` with the latest frame as `image/jpeg`.
    Image(Frame),
    /// `404 Not Found` with an empty body; no frame has been published yet.
    NoFrame,
    /// `200 OK` with the control page.
    Page(Arc<str>),
}

impl Response {
    pub fn status(&self) -> u16 {
        match self {
            Response::Image(_) | Response::Page(_) => 200,
            Response::NoFrame => 404,
        }
    }

    pub fn body(&self) -> &[u8] {
        match self {
            Response::Image(frame) => frame.as_bytes(),
            Response::NoFrame => &[],
            Response::Page(html) => html.as_bytes(),
        }
    }

    /// Status line and headers, including the blank line that ends them.
    pub fn head(&self) -> String {
        let mut head = String::with_capacity(160);
        let _ = match self {
            Response::Image(frame) => write!(
                head,
                "HTTP/1.1 200 OK\r\n\
                 Content-Type: image/jpeg\r\n\
                 Content-Length: {}\r\n\
                 Cache-Control: no-cache\r\n",
                frame.len()
            ),
            Response::NoFrame => write!(
                head,
                "HTTP/1.1 404 Not Found\r\n\
                 Content-Length: 0\r\n\
                 Cache-Control: no-cache\r\n"
            ),
            Response::Page(html) => write!(
                head,
                "HTTP/1.1 200 OK\r\n\
                 Content-Type: text/html; charset=utf-8\r\n\
                 Content-Length: {}\r\n",
                html.len()
            ),
        };
        head.push_str("Connection: close\r\n\r\n");
        head
    }

    /// Write the full response and flush.
    pub async fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(self.head().as_bytes()).await?;
        writer.write_all(self.body()).await?;
        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_head() {
        let response = Response::Image(Frame::new(vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9], 1, 1));
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.head(),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: image/jpeg\r\n\
             Content-Length: 5\r\n\
             Cache-Control: no-cache\r\n\
             Connection: close\r\n\r\n"
        );
        assert_eq!(response.body().len(), 5);
    }

    #[test]
    fn test_no_frame_is_empty_404() {
        let response = Response::NoFrame;
        assert_eq!(response.status(), 404);
        assert!(response.head().starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.head().contains("Content-Length: 0\r\n"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_page_head_counts_utf8_bytes() {
        let response = Response::Page(Arc::from("<p>é</p>"));
        assert!(response.head().contains("Content-Type: text/html; charset=utf-8\r\n"));
        assert!(response.head().contains("Content-Length: 9\r\n"));
        assert!(response.head().ends_with("Connection: close\r\n\r\n"));
    }

    #[tokio::test]
    async fn test_write_to() {
        let mut out = Vec::new();
        Response::Page(Arc::from("hi")).write_to(&mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\r\n\r\nhi"));
    }
}
