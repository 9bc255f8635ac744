use types::Slot;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// An item could not be serialized or de-serialized.
    SerdeError(String),
    /// The chain head points at a block that is not in the store.
    MissingHeadBlock(Slot),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::SerdeError(e.to_string())
    }
}
