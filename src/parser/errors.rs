use std::convert::From;
use std::error::Error;
use std::fmt;
use std::io;

pub type OpResult<T> = Result<T, OpError>;

/// Crate-wide error carrying an optional context message.
#[derive(Debug)]
pub struct OpError {
    pub kind: OpErrorKind,
    pub message: String,
}

impl OpError {
    pub fn new(kind: OpErrorKind) -> Self {
        OpError {
            kind,
            message: String::new(),
        }
    }

    /// Attach a context message to this error.
    pub fn join_msg(mut self, msg: &str) -> Self {
        self.message.push_str(msg);
        self
    }
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.message, self.kind)
        }
    }
}

impl Error for OpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.kind.source()
    }
}

#[derive(Debug)]
pub enum OpErrorKind {
    None,
    IoError(io::Error),
    HexError(bitcoin_hashes::hex::Error),
    Secp256k1Error(secp256k1::Error),
    RuntimeError,
}

impl fmt::Display for OpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OpErrorKind::IoError(ref e) => write!(f, "I/O Error: {}", e),
            OpErrorKind::HexError(ref e) => write!(f, "Hex Error: {}", e),
            OpErrorKind::Secp256k1Error(ref e) => write!(f, "Secp256k1 Error: {}", e),
            OpErrorKind::RuntimeError => write!(f, "Runtime Error"),
            OpErrorKind::None => write!(f, ""),
        }
    }
}

impl Error for OpErrorKind {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OpErrorKind::IoError(ref e) => Some(e),
            OpErrorKind::HexError(ref e) => Some(e),
            OpErrorKind::Secp256k1Error(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OpError {
    fn from(err: io::Error) -> Self {
        OpError::new(OpErrorKind::IoError(err))
    }
}

impl From<bitcoin_hashes::hex::Error> for OpError {
    fn from(err: bitcoin_hashes::hex::Error) -> Self {
        OpError::new(OpErrorKind::HexError(err))
    }
}

impl From<secp256k1::Error> for OpError {
    fn from(err: secp256k1::Error) -> Self {
        OpError::new(OpErrorKind::Secp256k1Error(err))
    }
}

impl From<&str> for OpError {
    fn from(err: &str) -> Self {
        OpError::new(OpErrorKind::None).join_msg(err)
    }
}

impl From<String> for OpError {
    fn from(err: String) -> Self {
        OpError::new(OpErrorKind::None).join_msg(&err)
    }
}
