use crate::parser::errors::OpResult;
use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{BufReader, Cursor};

/// Largest script or serialized transaction the decoder buffers.
/// Longer records are stepped over without being interpreted.
pub const MAX_RECORD_SIZE: u64 = 16384;

pub trait BlockchainRead: std::io::Read {
    /// Wire-format variable-length integer: a single byte below 0xfd is
    /// the value itself; 0xfd, 0xfe, 0xff mark a following little-endian
    /// u16, u32 or u64.
    fn read_varint(&mut self) -> OpResult<u64> {
        Ok(match self.read_u8()? {
            0xff => self.read_u64()?,
            0xfe => u64::from(self.read_u32()?),
            0xfd => u64::from(self.read_u16()?),
            n => u64::from(n),
        })
    }

    #[inline]
    fn read_u8(&mut self) -> OpResult<u8> {
        let mut slice = [0u8; 1];
        self.read_exact(&mut slice)?;
        Ok(slice[0])
    }

    #[inline]
    fn read_u16(&mut self) -> OpResult<u16> {
        let u = ReadBytesExt::read_u16::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_u32(&mut self) -> OpResult<u32> {
        let u = ReadBytesExt::read_u32::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_i32(&mut self) -> OpResult<i32> {
        let u = ReadBytesExt::read_i32::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_u64(&mut self) -> OpResult<u64> {
        let u = ReadBytesExt::read_u64::<LittleEndian>(self)?;
        Ok(u)
    }

    #[inline]
    fn read_u256(&mut self) -> OpResult<[u8; 32]> {
        let mut arr = [0u8; 32];
        self.read_exact(&mut arr)?;
        Ok(arr)
    }

    #[inline]
    fn read_u8_vec(&mut self, count: u64) -> OpResult<Vec<u8>> {
        let mut arr = vec![0u8; count as usize];
        self.read_exact(&mut arr)?;
        Ok(arr)
    }
}

impl BlockchainRead for Cursor<&[u8]> {}
impl BlockchainRead for Cursor<Vec<u8>> {}
impl BlockchainRead for BufReader<File> {}
