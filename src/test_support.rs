use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

pub(crate) struct CapturedRequest {
    /// Request line and headers, CRLF-terminated as received.
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("posted body should be JSON")
    }
}

/// Binds a local listener that answers exactly one request with `status_line`
/// and `body`, returning the endpoint URL and the captured request.
pub(crate) fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    serve_raw_once(format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
}

/// Like `serve_once`, but writes `response` to the socket byte for byte.
pub(crate) fn serve_raw_once(response: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("address should be available");
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept should succeed");
        let mut reader = BufReader::new(stream.try_clone().expect("clone should succeed"));

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read should succeed");
            let lower = line.to_ascii_lowercase();
            if let Some(value) = lower.strip_prefix("content-length:") {
                content_length = value.trim().parse().expect("content-length should parse");
            }
            let end_of_head = line == "\r\n" || line.is_empty();
            head.push_str(&line);
            if end_of_head {
                break;
            }
        }

        let mut posted = vec![0u8; content_length];
        reader
            .read_exact(&mut posted)
            .expect("body should be readable");

        stream
            .write_all(response.as_bytes())
            .expect("write should succeed");

        CapturedRequest { head, body: posted }
    });

    (format!("http://{addr}/v1/chat/completions"), handle)
}
