//! Typed records produced by the decoders.
//!
//! Everything here is plain data: built fresh by one decode call, never
//! mutated afterwards, never shared between calls. All types derive serde
//! so front ends can print them as JSON without another mapping layer.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClassName
// ---------------------------------------------------------------------------

/// The identifier of a playable class, e.g. `Carnotaurus`.
///
/// This is an *open* newtype: any string is a valid `ClassName`, including
/// classes added to the game after this crate was written. The list of
/// classes known today lives in the `isle-rcon` crate's catalog.
///
/// The inner `Cow<'static, str>` lets the catalog declare its entries as
/// `const` values (borrowed, no allocation) while decoded names are owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(Cow<'static, str>);

impl ClassName {
    /// Creates a class name from a string literal. Usable in `const`.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the identifier as sent by the server.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A human-readable name for the class.
    ///
    /// For every class the server currently reports, its identifier is
    /// already readable, so this is the identifier itself.
    pub fn name(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_string()))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// One entry of the player roster: identity only.
///
/// The roster includes players still on the class selection screen, which
/// is why it carries no location or stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Steam or EOS ID.
    pub id: String,
    pub name: String,
}

/// A position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude.
    pub x: f64,
    /// Longitude.
    pub y: f64,
    /// Altitude.
    pub z: f64,
}

/// A full snapshot of a spawned player.
///
/// The five stat fields are percentages. The server sends fractions
/// (`0.75`), the decoder multiplies by 100 and truncates toward zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Steam or EOS ID.
    pub id: String,
    pub name: String,
    pub location: Location,
    pub class: ClassName,
    /// 75 means fully grown in the current game version.
    pub growth: i8,
    pub health: i8,
    pub stamina: i8,
    pub hunger: i8,
    pub thirst: i8,
}

// ---------------------------------------------------------------------------
// ServerDetails
// ---------------------------------------------------------------------------

/// Server configuration and live counters.
///
/// Fields missing from a reply keep their `Default` value (empty string,
/// zero, `false`), so a partial reply still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerDetails {
    pub name: String,
    pub password: String,
    pub map: String,
    pub max_players: i32,
    pub current_players: i32,
    pub enable_mutations: bool,
    pub enable_humans: bool,
    /// Whether joining requires a password.
    pub has_password: bool,
    pub queue_enabled: bool,
    pub whitelist: bool,
    pub spawn_ai: bool,
    pub allow_recording_replay: bool,
    pub use_region_spawning: bool,
    pub use_region_spawn_cooldown: bool,
    pub region_spawn_cooldown_secs: i32,
    pub day_length_minutes: i32,
    pub night_length_minutes: i32,
    pub enable_global_chat: bool,
}
