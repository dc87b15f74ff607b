//! Types for working with raw little-endian data.
//!
//! Every multi-byte integer in a PSF file is little-endian.

/// A trait for little-endian font scalars.
///
/// This is an internal trait for decoding and encoding the raw bytes of a
/// header field.
pub trait ScalarLE: Sized + Copy {
    /// The raw byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// The size of the raw type. Essentially an alias for `std::mem::size_of`.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Create an instance of this type from raw little-endian bytes
    fn from_raw_le(raw: Self::Raw) -> Self;

    /// Encode this type as raw little-endian bytes
    fn to_raw_le(self) -> Self::Raw;

    /// Attempt to read a scalar from a slice.
    ///
    /// This will always succeed if `slice.len() == Self::RAW_BYTE_LEN`, and will
    /// always return `None` otherwise.
    fn read_le(slice: &[u8]) -> Option<Self> {
        Self::Raw::try_from(slice).ok().map(Self::from_raw_le)
    }
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl ScalarLE for $ty {
            type Raw = $raw;

            #[inline(always)]
            fn to_raw_le(self) -> $raw {
                self.to_le_bytes()
            }

            #[inline(always)]
            fn from_raw_le(raw: $raw) -> $ty {
                Self::from_le_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);
