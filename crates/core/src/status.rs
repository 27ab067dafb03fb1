//! Closed enumerations used by entity inputs and records.
//!
//! Every enum serializes as its PascalCase variant name. Parsing is lenient
//! about spelling: `InMaintenance`, `IN_MAINTENANCE`, `in-maintenance` and
//! `inmaintenance` all resolve to the same variant. Some variants accept
//! legacy aliases (e.g. `Disposed` for [`AssetStatus::Retired`]).

/// A closed set of named values.
pub trait ClosedSet: Copy + Sized + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Canonical wire name.
    fn as_str(self) -> &'static str;

    /// Resolve a spelling of a member name, or an accepted alias.
    fn parse(input: &str) -> Option<Self>;

    /// Comma-separated canonical names, for error messages.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Returned by `FromStr` when a value is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {set} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    pub set: &'static str,
    pub value: String,
    pub expected: String,
}

/// Lowercase and drop separators so spelling variants compare equal.
pub(crate) fn normalize_key(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! define_closed_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::status::ClosedSet for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }

            fn parse(input: &str) -> Option<Self> {
                let key = $crate::status::normalize_key(input);
                $(
                    if key == $crate::status::normalize_key(stringify!($variant))
                        $( || key == $crate::status::normalize_key($alias) )*
                    {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::status::ClosedSet::as_str(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::status::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                use $crate::status::ClosedSet;
                <$name>::parse(s).ok_or_else(|| $crate::status::UnknownVariant {
                    set: stringify!($name),
                    value: s.to_string(),
                    expected: <$name>::expected(),
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::status::ClosedSet::as_str(*self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use define_closed_set;

define_closed_set! {
    /// Asset lifecycle state.
    AssetStatus {
        Available,
        Assigned,
        InMaintenance | "UnderMaintenance",
        /// Terminal.
        Retired | "Disposed",
        Lost,
    }
}

define_closed_set! {
    /// Holder role.
    Role {
        Admin,
        Manager,
        Employee,
        Technician,
    }
}

define_closed_set! {
    /// Assignment lifecycle state.
    AssignmentStatus {
        Active,
        Returned,
        Overdue | "Expired",
    }
}

define_closed_set! {
    /// Shipment delivery state.
    DeliveryStatus {
        Pending,
        InTransit,
        Delivered,
        Failed,
        Returned,
    }
}

define_closed_set! {
    /// Return request workflow state. No ordering is enforced between states.
    ReturnStatus {
        Pending,
        Approved,
        Rejected,
        Completed,
        Cancelled | "Canceled",
    }
}

define_closed_set! {
    /// Third-party integration health.
    IntegrationStatus {
        Active,
        Inactive,
        Error,
        Pending,
    }
}

define_closed_set! {
    /// Catalogue product state.
    ProductStatus {
        Active,
        Inactive,
        Discontinued,
        OutOfStock,
    }
}

define_closed_set! {
    /// Customer order state.
    OrderStatus {
        Pending,
        Processing,
        Shipped,
        Delivered,
        Cancelled | "Canceled",
    }
}

define_closed_set! {
    /// Procurement request approval state.
    RequestStatus {
        Pending,
        Approved,
        Rejected,
        Completed,
    }
}

define_closed_set! {
    /// What a procurement request is for.
    RequestType {
        Asset,
        BufferStock,
        Service,
    }
}

define_closed_set! {
    /// Kind of work a repair service performs.
    ServiceType {
        Repair,
        Maintenance,
        Inspection,
        Upgrade,
        Calibration,
    }
}

define_closed_set! {
    /// Repair service progress.
    ServiceStatus {
        Scheduled,
        InProgress,
        Completed,
    }
}

define_closed_set! {
    /// Buffer stock consumption approval state.
    ConsumptionStatus {
        Pending,
        Approved,
        Completed,
    }
}

define_closed_set! {
    /// List ordering.
    SortOrder {
        Asc | "ascending",
        Desc | "descending",
    }
}
