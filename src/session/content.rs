/*
 * Copyright 2019-2020 Wren Powell
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::fmt::{self, Debug, Formatter};
use std::io::{self, Cursor, Read};

/// The MIME type to use for content of unknown type.
pub const BINARY_MIME_TYPE: &str = "application/octet-stream";

/// The largest buffer `ContentStream::into_bytes` allocates up front.
const MAX_PREALLOCATION: usize = 1024 * 1024;

/// The content of a document.
///
/// This is a readable stream along with the metadata the repository needs to store it. Reading
/// from a `ContentStream` reads the content itself.
pub struct ContentStream {
    mime_type: String,
    length: Option<u64>,
    file_name: Option<String>,
    reader: Box<dyn Read + Send>,
}

impl ContentStream {
    /// Create a `ContentStream` which reads from `reader`.
    ///
    /// The `length` is a hint for the repository and may be `None` if it is not known up front.
    pub fn new(reader: impl Read + Send + 'static, length: Option<u64>) -> Self {
        ContentStream {
            mime_type: String::from(BINARY_MIME_TYPE),
            length,
            file_name: None,
            reader: Box::new(reader),
        }
    }

    /// Create a `ContentStream` which reads from the given `bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let length = bytes.len() as u64;
        Self::new(Cursor::new(bytes), Some(length))
    }

    /// Return this stream with the given `mime_type`.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Return this stream with the given `file_name`.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// The MIME type of the content.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The length of the content in bytes, if it is known.
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    /// The file name of the content, if the repository provided one.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Read the whole stream into a buffer.
    ///
    /// The length hint is not trusted beyond `MAX_PREALLOCATION` bytes.
    ///
    /// # Errors
    /// - `io::Error`: Reading from the underlying reader failed.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let capacity = self
            .length
            .and_then(|length| usize::try_from(length).ok())
            .map_or(0, |length| length.min(MAX_PREALLOCATION));
        let mut buffer = Vec::with_capacity(capacity);
        self.reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    /// Return the underlying reader, discarding the metadata.
    pub fn into_reader(self) -> Box<dyn Read + Send> {
        self.reader
    }
}

impl Read for ContentStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Debug for ContentStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStream")
            .field("mime_type", &self.mime_type)
            .field("length", &self.length)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bogus_length_hint_is_ignored() {
        let stream = ContentStream::new(Cursor::new(vec![1, 2, 3]), Some(u64::MAX));

        assert_eq!(stream.into_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn short_length_hint_reads_everything() {
        let stream = ContentStream::new(Cursor::new(vec![1, 2, 3, 4]), Some(1));

        assert_eq!(stream.into_bytes().unwrap(), vec![1, 2, 3, 4]);
    }
}
