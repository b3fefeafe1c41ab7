//! Reply values and their Redis Serialization Protocol (RESP) encoding.

/// A reply value that can be written back to a client.
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(String),
    Error(String),
    Integer(i64),
    BulkString(String),
    /// The null bulk string, `$-1\r\n`.
    Null,
    Array(Vec<RespValue>),
}

impl RespValue {
    /// Encodes the value into its exact wire form.
    ///
    /// # Examples
    ///
    /// ```
    /// use redis_store::resp::RespValue;
    ///
    /// assert_eq!(RespValue::SimpleString("OK".to_string()).encode(), "+OK\r\n");
    /// assert_eq!(RespValue::BulkString("".to_string()).encode(), "$0\r\n\r\n");
    /// assert_eq!(RespValue::Null.encode(), "$-1\r\n");
    /// ```
    pub fn encode(&self) -> String {
        match self {
            RespValue::SimpleString(s) => format!("+{}\r\n", s),
            RespValue::Error(msg) => format!("-{}\r\n", msg),
            RespValue::Integer(n) => format!(":{}\r\n", n),
            RespValue::BulkString(s) => format!("${}\r\n{}\r\n", s.len(), s),
            RespValue::Null => "$-1\r\n".to_string(),
            RespValue::Array(elements) => {
                let mut encoded = format!("*{}\r\n", elements.len());

                for element in elements {
                    encoded.push_str(&element.encode());
                }

                encoded
            }
        }
    }

    /// Builds an array of bulk strings, the most common multi-value reply.
    pub fn bulk_string_array<I, S>(values: I) -> RespValue
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RespValue::Array(
            values
                .into_iter()
                .map(|value| RespValue::BulkString(value.into()))
                .collect(),
        )
    }

    /// Encodes a request the way a client would send it: an array of bulk strings.
    pub fn encode_request(command: &str, arguments: &[&str]) -> String {
        RespValue::bulk_string_array(std::iter::once(command).chain(arguments.iter().copied()))
            .encode()
    }
}
