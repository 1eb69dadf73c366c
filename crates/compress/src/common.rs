use std::io::{self, IoSlice, Write};

/// Writer adapter that counts the bytes accepted by the wrapped sink.
#[derive(Debug)]
pub(crate) struct CountingWriter<W> {
    inner: W,
    bytes: u64,
}

impl<W> CountingWriter<W> {
    pub(crate) const fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    pub(crate) const fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl<W> Write for CountingWriter<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(written as u64);
        Ok(written)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let written = self.inner.write_vectored(bufs)?;
        self.bytes = self.bytes.saturating_add(written as u64);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_forwarded_bytes() {
        let mut sink = Vec::new();
        let mut writer = CountingWriter::new(&mut sink);
        writer.write_all(b"hello").unwrap();
        writer
            .write_vectored(&[IoSlice::new(b" "), IoSlice::new(b"world")])
            .unwrap();
        writer.flush().unwrap();
        let bytes = writer.bytes();
        assert_eq!(bytes, sink.len() as u64);
        assert_eq!(sink, b"hello world");
    }

    #[test]
    fn failed_writes_are_not_counted() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("broken pipe"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut writer = CountingWriter::new(Broken);
        assert!(writer.write(b"data").is_err());
        assert_eq!(writer.bytes(), 0);
    }
}
