//! Inquiries
//!
//! Only the version inquiry is implemented: it is the liveness probe. Any
//! reply datagram within the probe window counts as proof of life; the
//! response body is never decoded.

use crate::command::{Inquiry, ADDRESS, TERMINATOR};

/// `CAM_VersionInq`: model and firmware version inquiry.
///
/// ## Payload format
///
/// `81 09 00 02 FF`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionInquiry;

impl Inquiry for VersionInquiry {
    fn to_payload(&self) -> Vec<u8> {
        vec![ADDRESS, 0x09, 0x00, 0x02, TERMINATOR]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;

    #[test]
    fn version() -> Result<()> {
        assert_eq!(hex::decode("81090002ff")?, VersionInquiry.to_payload());
        Ok(())
    }
}
