//! Reservation-method bitmask encoding.
//!
//! The console collects three independent facets (owner attribute, reserve
//! by set, reserve by file system) and the backend stores them as one
//! integer mask. Encoding is bitwise-OR composable; decoding is strict so a
//! foreign bit never round-trips silently.

use serde::{Deserialize, Serialize};

use crate::catalog::MessageCatalog;
use crate::error::{PolicyError, PolicyResult};
use crate::model::{Choice, FieldId, OwnerAttribute};

/// Named mask bits for the reservation method.
pub mod bits {
    /// Reserve volumes per archive set.
    pub const SET: u32 = 0x01;
    /// Reserve volumes per file system.
    pub const FILE_SYSTEM: u32 = 0x02;
    /// Reserve volumes per file owner.
    pub const OWNER_USER: u32 = 0x04;
    /// Reserve volumes per owning group.
    pub const OWNER_GROUP: u32 = 0x08;
    /// Reserve volumes per directory.
    pub const OWNER_DIRECTORY: u32 = 0x10;

    /// Every bit the engine knows how to decode.
    pub const ALL: u32 = SET | FILE_SYSTEM | OWNER_USER | OWNER_GROUP | OWNER_DIRECTORY;
}

impl OwnerAttribute {
    /// Mask bit contributed by this owner attribute.
    #[must_use]
    pub const fn reservation_bit(self) -> u32 {
        match self {
            Self::User => bits::OWNER_USER,
            Self::Group => bits::OWNER_GROUP,
            Self::Directory => bits::OWNER_DIRECTORY,
        }
    }
}

/// Decoded reservation facets for one archive copy.
///
/// Never applicable to disk media; the assembly step skips encoding
/// entirely for disk copies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationPolicy {
    /// Owner facet, when one was selected.
    pub owner: Option<OwnerAttribute>,
    /// Reserve volumes per archive set.
    pub by_set: bool,
    /// Reserve volumes per file system.
    pub by_file_system: bool,
}

impl ReservationPolicy {
    /// Build the policy from raw form facets. An unselected owner
    /// contributes no attribute bits; that is not an error.
    #[must_use]
    pub const fn from_form(
        owner: Choice<OwnerAttribute>,
        by_set: bool,
        by_file_system: bool,
    ) -> Self {
        Self {
            owner: match owner {
                Choice::Selected(value) => Some(value),
                Choice::Unselected => None,
            },
            by_set,
            by_file_system,
        }
    }

    /// Encode the facets into the backend mask.
    #[must_use]
    pub const fn mask(self) -> u32 {
        let mut mask = match self.owner {
            Some(owner) => owner.reservation_bit(),
            None => 0,
        };
        if self.by_set {
            mask |= bits::SET;
        }
        if self.by_file_system {
            mask |= bits::FILE_SYSTEM;
        }
        mask
    }

    /// Whether no facet is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.mask() == 0
    }

    /// Decode a backend mask into facets.
    ///
    /// # Errors
    ///
    /// `Parse` on the reservation field when the mask carries unknown bits
    /// or more than one owner bit.
    pub fn decode(mask: u32) -> PolicyResult<Self> {
        if mask & !bits::ALL != 0 {
            return Err(PolicyError::parse(
                FieldId::ReservationAttributes,
                mask.to_string(),
                "carries unknown reservation bits",
            ));
        }

        let owner = match mask & (bits::OWNER_USER | bits::OWNER_GROUP | bits::OWNER_DIRECTORY) {
            0 => None,
            bit if bit == bits::OWNER_USER => Some(OwnerAttribute::User),
            bit if bit == bits::OWNER_GROUP => Some(OwnerAttribute::Group),
            bit if bit == bits::OWNER_DIRECTORY => Some(OwnerAttribute::Directory),
            _ => {
                return Err(PolicyError::parse(
                    FieldId::ReservationAttributes,
                    mask.to_string(),
                    "carries more than one owner bit",
                ));
            }
        };

        Ok(Self {
            owner,
            by_set: mask & bits::SET != 0,
            by_file_system: mask & bits::FILE_SYSTEM != 0,
        })
    }

    /// Human-readable facet list, comma-joined in form order. Empty when no
    /// facet is selected.
    ///
    /// # Errors
    ///
    /// `ExternalLookup` when the message catalog cannot resolve a facet
    /// label.
    pub fn describe(self, catalog: &dyn MessageCatalog) -> PolicyResult<String> {
        let mut parts = Vec::new();
        if let Some(owner) = self.owner {
            parts.push(resolve(catalog, owner.label_key())?);
        }
        if self.by_set {
            parts.push(resolve(catalog, "reservation.by_set")?);
        }
        if self.by_file_system {
            parts.push(resolve(catalog, "reservation.by_file_system")?);
        }
        Ok(parts.join(", "))
    }
}

fn resolve(catalog: &dyn MessageCatalog, key: &str) -> PolicyResult<String> {
    catalog
        .resolve(key, &[])
        .map_err(|failure| PolicyError::external("catalog", failure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LookupFailure;

    struct FacetCatalog;

    impl MessageCatalog for FacetCatalog {
        fn resolve(&self, key: &str, _args: &[&str]) -> Result<String, LookupFailure> {
            Ok(match key {
                "reservation.by_set" => "Set".to_string(),
                "reservation.by_file_system" => "File system".to_string(),
                "reservation.owner.user" => "Owner: user".to_string(),
                "reservation.owner.group" => "Owner: group".to_string(),
                "reservation.owner.directory" => "Owner: directory".to_string(),
                other => return Err(LookupFailure::new(-1, other.to_string())),
            })
        }
    }

    const OWNERS: [Option<OwnerAttribute>; 4] = [
        None,
        Some(OwnerAttribute::User),
        Some(OwnerAttribute::Group),
        Some(OwnerAttribute::Directory),
    ];

    #[test]
    fn masks_compose_bitwise_for_every_facet_combination() {
        for owner in OWNERS {
            for by_set in [false, true] {
                for by_file_system in [false, true] {
                    let combined = ReservationPolicy {
                        owner,
                        by_set,
                        by_file_system,
                    };
                    let separate = ReservationPolicy {
                        owner,
                        ..ReservationPolicy::default()
                    }
                    .mask()
                        | ReservationPolicy {
                            by_set,
                            ..ReservationPolicy::default()
                        }
                        .mask()
                        | ReservationPolicy {
                            by_file_system,
                            ..ReservationPolicy::default()
                        }
                        .mask();
                    assert_eq!(combined.mask(), separate);
                }
            }
        }
    }

    #[test]
    fn decode_inverts_encode_for_every_facet_combination() {
        for owner in OWNERS {
            for by_set in [false, true] {
                for by_file_system in [false, true] {
                    let policy = ReservationPolicy {
                        owner,
                        by_set,
                        by_file_system,
                    };
                    assert_eq!(ReservationPolicy::decode(policy.mask()).unwrap(), policy);
                }
            }
        }
    }

    #[test]
    fn decode_rejects_unknown_and_conflicting_bits() {
        let err = ReservationPolicy::decode(0x20).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::Parse {
                field: FieldId::ReservationAttributes,
                ..
            }
        ));

        let err = ReservationPolicy::decode(bits::OWNER_USER | bits::OWNER_GROUP).unwrap_err();
        assert!(matches!(err, PolicyError::Parse { .. }));
    }

    #[test]
    fn unselected_owner_contributes_no_bits() {
        let policy = ReservationPolicy::from_form(Choice::Unselected, true, false);
        assert_eq!(policy.mask(), bits::SET);
        assert!(!policy.is_empty());

        let empty = ReservationPolicy::from_form(Choice::Unselected, false, false);
        assert!(empty.is_empty());
    }

    #[test]
    fn describe_lists_selected_facets_in_form_order() {
        let policy = ReservationPolicy {
            owner: Some(OwnerAttribute::Group),
            by_set: true,
            by_file_system: true,
        };
        assert_eq!(
            policy.describe(&FacetCatalog).unwrap(),
            "Owner: group, Set, File system"
        );
        assert_eq!(
            ReservationPolicy::default().describe(&FacetCatalog).unwrap(),
            ""
        );
    }
}
