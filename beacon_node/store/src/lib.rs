//! Storage functionality for the validator service.
//!
//! Provides the following stores:
//!
//! - `MemoryStore`: an in-memory store backed by a hash-map.
//!
//! Items are serialized with `serde_json` and keyed within a `DBColumn`. `BeaconStore` wraps any
//! `Store` with the typed accessors used by the validator service.
mod beacon_store;
mod errors;
mod impls;
mod memory_store;

pub use self::beacon_store::{BeaconStore, DepositRecord};
pub use self::memory_store::MemoryStore;
pub use errors::Error;
pub use types::*;

/// An object capable of storing and retrieving objects implementing `StoreItem`.
///
/// A `Store` is fundamentally backed by a key-value database, however it provides support for
/// columns. A simple column implementation might involve prefixing a key with some bytes unique to
/// each column.
pub trait Store: Sync + Send + Sized + 'static {
    /// Retrieve some bytes in `column` with `key`.
    fn get_bytes(&self, column: &str, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    /// Store some `value` in `column`, indexed with `key`.
    fn put_bytes(&self, column: &str, key: &[u8], value: &[u8]) -> Result<(), Error>;

    /// Return `true` if `key` exists in `column`.
    fn key_exists(&self, column: &str, key: &[u8]) -> Result<bool, Error>;

    /// Removes `key` from `column`.
    fn key_delete(&self, column: &str, key: &[u8]) -> Result<(), Error>;

    /// Store an item in `Self`.
    fn put<I: StoreItem>(&self, key: &[u8], item: &I) -> Result<(), Error> {
        self.put_bytes(I::db_column().into(), key, &item.as_store_bytes()?)
    }

    /// Retrieve an item from `Self`.
    fn get<I: StoreItem>(&self, key: &[u8]) -> Result<Option<I>, Error> {
        match self.get_bytes(I::db_column().into(), key)? {
            Some(bytes) => Ok(Some(I::from_store_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Returns `true` if the given key represents an item in `Self`.
    fn exists<I: StoreItem>(&self, key: &[u8]) -> Result<bool, Error> {
        self.key_exists(I::db_column().into(), key)
    }

    /// Remove an item from `Self`.
    fn delete<I: StoreItem>(&self, key: &[u8]) -> Result<(), Error> {
        self.key_delete(I::db_column().into(), key)
    }
}

/// A unique column identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DBColumn {
    /// Pointers such as the current chain head.
    BeaconMeta,
    BeaconBlock,
    BeaconState,
    /// Validator indices, keyed by public key.
    ValidatorIndex,
    /// Eth1 deposits, keyed by public key.
    Eth1Deposit,
}

impl From<DBColumn> for &'static str {
    /// Returns a `&str` that can be used for keying a key-value data base.
    fn from(col: DBColumn) -> &'static str {
        match col {
            DBColumn::BeaconMeta => "bma",
            DBColumn::BeaconBlock => "blk",
            DBColumn::BeaconState => "ste",
            DBColumn::ValidatorIndex => "vix",
            DBColumn::Eth1Deposit => "dep",
        }
    }
}

/// An item that may be stored in a `Store`.
pub trait StoreItem: Sized {
    /// Identifies which column this item should be placed in.
    fn db_column() -> DBColumn;

    /// Serialize `self` as bytes.
    fn as_store_bytes(&self) -> Result<Vec<u8>, Error>;

    /// De-serialize `self` from bytes.
    fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error>;
}
