//! Bounds-checked reads over a datagram body.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Reads fixed-width values at absolute offsets. Every read returns `None`
/// when the body is too short, so callers can turn truncation into a
/// decode error in one place.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    endian: Endian,
}

macro_rules! read_fixed {
    ($name:ident, $ty:ty) => {
        #[must_use]
        pub fn $name(&self, offset: usize) -> Option<$ty> {
            let raw: [u8; std::mem::size_of::<$ty>()] = self
                .bytes
                .get(offset..offset + std::mem::size_of::<$ty>())?
                .try_into()
                .ok()?;
            Some(match self.endian {
                Endian::Little => <$ty>::from_le_bytes(raw),
                Endian::Big => <$ty>::from_be_bytes(raw),
            })
        }
    };
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8], endian: Endian) -> Self {
        Self { bytes, endian }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn u8(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    read_fixed!(u16, u16);
    read_fixed!(i16, i16);
    read_fixed!(u32, u32);
    read_fixed!(i32, i32);
    read_fixed!(f32, f32);
    read_fixed!(f64, f64);

    /// Returns `len` bytes starting at `offset`.
    #[must_use]
    pub fn slice(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        self.bytes.get(offset..offset.checked_add(len)?)
    }

    /// Returns everything from `offset` to the end of the body.
    #[must_use]
    pub fn tail(&self, offset: usize) -> Option<&'a [u8]> {
        self.bytes.get(offset..)
    }
}

/// Decodes text stored in a datagram, stopping at the first NUL or ETX byte.
#[must_use]
pub fn terminated_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&b| b == 0x00 || b == 0x03)
        .unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim().to_string()
}
