//! Integer identifiers for the five entity collections.
//!
//! Each collection hands out its own monotonically increasing sequence
//! starting at 1, so identifiers from different collections are kept apart
//! by distinct newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw identifier value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a registered user.
    UserId
}

define_entity_id! {
    /// Identifier of a posted ride.
    RideId
}

define_entity_id! {
    /// Identifier of a seat request against a ride.
    RideRequestId
}

define_entity_id! {
    /// Identifier of a direct message.
    MessageId
}

define_entity_id! {
    /// Identifier of a review.
    ReviewId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_plain_numbers() {
        let json = serde_json::to_string(&RideId::new(42)).expect("serialise id");
        assert_eq!(json, "42");
        let back: RideId = serde_json::from_str(&json).expect("deserialise id");
        assert_eq!(back.get(), 42);
    }

    #[rstest]
    fn display_prints_raw_value() {
        assert_eq!(UserId::new(7).to_string(), "7");
    }
}
