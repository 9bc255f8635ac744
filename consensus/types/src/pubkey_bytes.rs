use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The byte-length of a BLS public key when serialized in compressed form.
pub const PUBLIC_KEY_BYTES_LEN: usize = 48;

/// Defines a fixed-length, opaque byte container that prints and (de)serializes as `0x`-prefixed
/// hex.
///
/// The bytes are never checked for being a valid curve point; that is the job of whichever
/// signature scheme consumes them.
#[macro_export]
macro_rules! fixed_bytes_struct {
    ($name: ident, $len: expr, $byte_size_name: expr) => {
        #[derive(Clone, Copy)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Wraps `bytes`, failing if the length is not exactly
            #[doc = $byte_size_name]
            /// bytes.
            pub fn deserialize(bytes: &[u8]) -> Result<Self, String> {
                if bytes.len() != $len {
                    return Err(format!(
                        "expected {} to have length {}",
                        stringify!($name),
                        $len
                    ));
                }
                let mut array = [0; $len];
                array.copy_from_slice(bytes);
                Ok(Self(array))
            }

            pub fn from_array(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn empty() -> Self {
                Self([0; $len])
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn as_hex_string(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0[..] == other.0[..]
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0[..].hash(state)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.as_hex_string())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.as_hex_string())
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    write!(f, "0x")?;
                }
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let stripped = s
                    .strip_prefix("0x")
                    .ok_or_else(|| format!("{} must be 0x-prefixed", stringify!($name)))?;
                let bytes =
                    hex::decode(stripped).map_err(|e| format!("invalid hex: {:?}", e))?;
                Self::deserialize(&bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.as_hex_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_str(&s).map_err(D::Error::custom)
            }
        }
    };
}

fixed_bytes_struct!(PublicKeyBytes, PUBLIC_KEY_BYTES_LEN, "48");
