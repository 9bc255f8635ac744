use safe_arith::ArithError;
use std::fmt;
use types::{BeaconStateError, PublicKeyBytes};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A public key did not have the expected number of bytes.
    MalformedPublicKey { expected: usize, found: usize },
    /// The public key is neither in the store nor in the head state.
    ValidatorNotFound(PublicKeyBytes),
    /// The store has no head state to answer from.
    NoHeadState,
    /// The caller cancelled an activation subscription.
    ContextClosed,
    /// The canonical-state event channel was shut down.
    EventChannelClosed,
    StoreError(store::Error),
    BeaconStateError(BeaconStateError),
    ArithError(ArithError),
}

impl From<store::Error> for Error {
    fn from(e: store::Error) -> Self {
        Error::StoreError(e)
    }
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Self {
        Error::BeaconStateError(e)
    }
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Self {
        Error::ArithError(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedPublicKey { expected, found } => write!(
                f,
                "expected public key to have length {}, received {}",
                expected, found
            ),
            Error::ValidatorNotFound(pubkey) => write!(f, "validator {:#x} does not exist", pubkey),
            Error::NoHeadState => write!(f, "no head state in the store"),
            Error::ContextClosed => write!(f, "context closed"),
            Error::EventChannelClosed => write!(f, "canonical state channel closed"),
            Error::StoreError(e) => write!(f, "store error: {:?}", e),
            Error::BeaconStateError(e) => write!(f, "beacon state error: {:?}", e),
            Error::ArithError(e) => write!(f, "arithmetic error: {:?}", e),
        }
    }
}
