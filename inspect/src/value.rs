//! Self-describing values: types that marshal themselves and need no
//! structural traversal.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ValueError;

/// A value that knows its own text and binary representations.
///
/// Text backends carry the text form as a single string token; the binary
/// backend carries the binary form as a length-prefixed byte payload.
pub trait RawValue {
    fn marshal_text(&self) -> Result<String, ValueError>;
    fn unmarshal_text(&mut self, text: &str) -> Result<(), ValueError>;
    fn marshal_binary(&self) -> Result<Vec<u8>, ValueError>;
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), ValueError>;
}

impl RawValue for IpAddr {
    fn marshal_text(&self) -> Result<String, ValueError> {
        Ok(self.to_string())
    }

    fn unmarshal_text(&mut self, text: &str) -> Result<(), ValueError> {
        *self = text.parse()?;
        Ok(())
    }

    fn marshal_binary(&self) -> Result<Vec<u8>, ValueError> {
        Ok(match self {
            IpAddr::V4(addr) => addr.octets().to_vec(),
            IpAddr::V6(addr) => addr.octets().to_vec(),
        })
    }

    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), ValueError> {
        *self = match data.len() {
            4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(data);
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(data);
                IpAddr::V6(Ipv6Addr::from(octets))
            }
            n => return Err(format!("invalid IP address length: {}", n).into()),
        };
        Ok(())
    }
}
