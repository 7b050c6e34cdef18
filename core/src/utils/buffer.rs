use byteorder::{ByteOrder, LittleEndian};

/**
 * Append only byte accumulator used when building `Shortcut` data
 * All numbers are written as little endian
 */
#[derive(Debug, Default)]
pub(crate) struct LinkBuffer {
    data: Vec<u8>,
}

impl LinkBuffer {
    pub(crate) fn new() -> LinkBuffer {
        LinkBuffer { data: Vec::new() }
    }

    pub(crate) fn with_capacity(size: usize) -> LinkBuffer {
        LinkBuffer {
            data: Vec::with_capacity(size),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn push_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub(crate) fn push_u16(&mut self, value: u16) {
        let mut bytes = [0; 2];
        LittleEndian::write_u16(&mut bytes, value);
        self.data.extend_from_slice(&bytes);
    }

    pub(crate) fn push_u32(&mut self, value: u32) {
        let mut bytes = [0; 4];
        LittleEndian::write_u32(&mut bytes, value);
        self.data.extend_from_slice(&bytes);
    }

    pub(crate) fn push_i32(&mut self, value: i32) {
        let mut bytes = [0; 4];
        LittleEndian::write_i32(&mut bytes, value);
        self.data.extend_from_slice(&bytes);
    }

    pub(crate) fn push_u64(&mut self, value: u64) {
        let mut bytes = [0; 8];
        LittleEndian::write_u64(&mut bytes, value);
        self.data.extend_from_slice(&bytes);
    }

    pub(crate) fn push_bytes(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
    }

    /// Write bytes followed by a NUL terminator
    pub(crate) fn push_cstring(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
        self.data.push(0);
    }

    /// Write UTF16 code units without a count or terminator
    pub(crate) fn push_utf16(&mut self, value: &[u16]) {
        for unit in value {
            self.push_u16(*unit);
        }
    }

    /// Overwrite a previously written u16. Offsets past the end are ignored
    pub(crate) fn set_u16(&mut self, offset: usize, value: u16) {
        if let Some(slot) = self.data.get_mut(offset..offset + 2) {
            LittleEndian::write_u16(slot, value);
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::LinkBuffer;

    #[test]
    fn test_link_buffer() {
        let mut buffer = LinkBuffer::new();
        buffer.push_u32(76);
        buffer.push_u16(0x14);
        buffer.push_u8(0x1f);
        buffer.push_i32(-1);
        buffer.push_u64(0x1c91515f2eee9d0);

        assert_eq!(buffer.len(), 19);
        assert_eq!(
            buffer.as_slice(),
            [
                76, 0, 0, 0, 20, 0, 31, 255, 255, 255, 255, 208, 233, 238, 242, 21, 21, 201, 1
            ]
        );
    }

    #[test]
    fn test_push_strings() {
        let mut buffer = LinkBuffer::with_capacity(16);
        buffer.push_cstring(b"C:\\");
        buffer.push_utf16(&[0x61, 0x2e]);
        buffer.push_bytes(&[0x18, 0]);
        assert_eq!(buffer.into_bytes(), [67, 58, 92, 0, 97, 0, 46, 0, 24, 0]);
    }

    #[test]
    fn test_set_u16() {
        let mut buffer = LinkBuffer::new();
        buffer.push_u16(0);
        buffer.push_u8(0x2f);
        buffer.set_u16(0, 0x19);
        buffer.set_u16(10, 0x19);
        assert_eq!(buffer.as_slice(), [25, 0, 47]);
    }
}
