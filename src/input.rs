//! Request decoding and framing.
//!
//! Requests arrive either as RESP arrays of bulk strings
//! (`*<count>\r\n$<len>\r\n<value>\r\n...`) or as a plain whitespace
//! separated line, which is accepted for manual clients such as telnet.
//!
//! Decoding is lenient: malformed length headers or missing elements never
//! produce an error. The decoder keeps whatever tokens it could read and the
//! dispatcher then reports arity problems the usual way.

use bytes::{Buf, BytesMut};

/// Largest bulk element accepted while framing, 512 MiB. A larger length
/// header is treated as malformed.
pub const MAX_BULK_LENGTH: usize = 512 * 1024 * 1024;

/// A decoded request: an uppercased command name and its raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub name: String,
    pub arguments: Vec<String>,
}

impl Request {
    /// Decodes one request frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use redis_store::input::Request;
    ///
    /// let request = Request::decode(b"*2\r\n$4\r\necho\r\n$3\r\nhey\r\n");
    /// assert_eq!(request.name, "ECHO");
    /// assert_eq!(request.arguments, vec!["hey".to_string()]);
    ///
    /// let request = Request::decode(b"set fruit mango\r\n");
    /// assert_eq!(request.name, "SET");
    /// assert_eq!(request.arguments, vec!["fruit".to_string(), "mango".to_string()]);
    /// ```
    pub fn decode(raw: &[u8]) -> Self {
        let message = String::from_utf8_lossy(raw);

        let mut tokens = if message.starts_with('*') {
            parse_array_tokens(&message)
        } else {
            message
                .trim_end_matches(['\r', '\n'])
                .split_whitespace()
                .map(str::to_string)
                .collect()
        };

        let name = if tokens.is_empty() {
            String::new()
        } else {
            tokens.remove(0).to_uppercase()
        };

        Request {
            name,
            arguments: tokens,
        }
    }

    /// True for a frame that carried nothing at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.arguments.is_empty()
    }
}

/// Reads `*<count>` followed by up to `count` bulk strings, stopping at the
/// first element that is not framed as `$<len>`.
fn parse_array_tokens(message: &str) -> Vec<String> {
    let mut cursor = LineCursor::new(message);

    let count = cursor
        .next_line()
        .and_then(|line| line.strip_prefix('*'))
        .and_then(|count| count.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut tokens = Vec::with_capacity(count.min(64));

    for _ in 0..count {
        let Some(header) = cursor.next_line() else {
            break;
        };

        let Some(length) = header.strip_prefix('$') else {
            break;
        };

        let value = match length.trim().parse::<usize>() {
            Ok(length) => cursor.take_bulk(length),
            Err(_) => cursor.next_line(),
        };

        match value {
            Some(value) => tokens.push(value.to_string()),
            None => break,
        }
    }

    tokens
}

struct LineCursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns the next line without its terminator. The last line may be
    /// unterminated.
    fn next_line(&mut self) -> Option<&'a str> {
        let rest = self.rest();

        if rest.is_empty() {
            return None;
        }

        match rest.find('\n') {
            Some(end) => {
                self.position += end + 1;
                Some(rest[..end].trim_end_matches('\r'))
            }
            None => {
                self.position = self.input.len();
                Some(rest)
            }
        }
    }

    /// Takes exactly `length` bytes when they are followed by CRLF or the end
    /// of input, otherwise falls back to the next line.
    fn take_bulk(&mut self, length: usize) -> Option<&'a str> {
        let rest = self.rest();

        if rest.len() >= length && rest.is_char_boundary(length) {
            let tail = &rest[length..];

            if tail.is_empty() {
                self.position = self.input.len();
                return Some(rest);
            }

            if tail.starts_with("\r\n") {
                self.position += length + 2;
                return Some(&rest[..length]);
            }
        }

        self.next_line()
    }
}

/// Splits one complete request frame off the front of `buffer`.
///
/// Returns `None` while the buffered bytes do not yet hold a complete frame;
/// the caller keeps them and reads more. Blank lines between requests are
/// discarded.
pub fn take_frame(buffer: &mut BytesMut) -> Option<BytesMut> {
    while buffer.first().is_some_and(|byte| *byte == b'\r' || *byte == b'\n') {
        buffer.advance(1);
    }

    if buffer.is_empty() {
        return None;
    }

    let frame_length = if buffer[0] == b'*' {
        array_frame_length(buffer)?
    } else {
        find_line_end(buffer, 0)?
    };

    Some(buffer.split_to(frame_length))
}

/// Length of the array frame at the start of `buffer`, or `None` if more bytes
/// are needed. Malformed element headers end the frame early.
fn array_frame_length(buffer: &[u8]) -> Option<usize> {
    let header_end = find_line_end(buffer, 0)?;

    let Some(count) = parse_length(&buffer[1..header_end]) else {
        return Some(header_end);
    };

    let mut position = header_end;

    for _ in 0..count {
        let line_end = find_line_end(buffer, position)?;

        if buffer[position] != b'$' {
            return Some(position);
        }

        position = match parse_length(&buffer[position + 1..line_end]) {
            Some(length) => {
                let Some(element_end) = bulk_end(line_end, length) else {
                    return Some(position);
                };

                if buffer.len() < element_end {
                    return None;
                }

                element_end
            }
            None => find_line_end(buffer, line_end)?,
        };
    }

    Some(position)
}

/// Index just past the CRLF that closes a bulk element of `length` bytes
/// starting at `start`. `None` for lengths above [`MAX_BULK_LENGTH`].
fn bulk_end(start: usize, length: usize) -> Option<usize> {
    if length > MAX_BULK_LENGTH {
        return None;
    }

    start.checked_add(length)?.checked_add(2)
}

/// Index just past the next `\n` at or after `from`.
fn find_line_end(buffer: &[u8], from: usize) -> Option<usize> {
    buffer[from..]
        .iter()
        .position(|byte| *byte == b'\n')
        .map(|offset| from + offset + 1)
}

fn parse_length(header: &[u8]) -> Option<usize> {
    std::str::from_utf8(header).ok()?.trim_end().parse::<usize>().ok()
}
