//! Architectural tiers.
//!
//! A [`Tier`] decides which row a component is stacked into. The variant
//! declaration order is the top-to-bottom row order and `Ord` follows it.

use std::fmt;

/// One of the six fixed architectural layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// People and external actors. Placed above the system, outside the boundary.
    User,
    /// Web and mobile clients.
    Frontend,
    /// API gateways and edge proxies.
    Gateway,
    /// Application services. The default tier.
    Service,
    /// Queues, buses and stream platforms.
    MessageBus,
    /// Databases, stores and caches.
    Database,
}

impl Tier {
    /// All tiers in stacking order.
    pub const ALL: [Tier; 6] = [
        Tier::User,
        Tier::Frontend,
        Tier::Gateway,
        Tier::Service,
        Tier::MessageBus,
        Tier::Database,
    ];

    /// The bracketed marker that pins a component to this tier when it
    /// appears anywhere in the component label.
    pub fn tag(self) -> &'static str {
        match self {
            Tier::User => "[tier:user]",
            Tier::Frontend => "[tier:frontend]",
            Tier::Gateway => "[tier:gateway]",
            Tier::Service => "[tier:service]",
            Tier::MessageBus => "[tier:messagebus]",
            Tier::Database => "[tier:database]",
        }
    }

    /// Position of this tier in the stacking order, starting at zero.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true if components of this tier sit inside the system boundary.
    pub fn is_internal(self) -> bool {
        !matches!(self, Tier::User)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::User => "User",
            Tier::Frontend => "Frontend",
            Tier::Gateway => "Gateway",
            Tier::Service => "Service",
            Tier::MessageBus => "MessageBus",
            Tier::Database => "Database",
        };
        f.write_str(name)
    }
}
