//! Playable and AI classes known at the time of writing.
//!
//! [`ClassName`] is open: the server may report classes that are not listed
//! here, and they decode just fine. These constants exist so callers can
//! build [`Client::update_playables`](crate::Client::update_playables)
//! lists without typing identifiers by hand.

use std::fmt;
use std::str::FromStr;

use isle_rcon_protocol::ClassName;
use serde::{Deserialize, Serialize};

pub const BEIPIAOSAURUS: ClassName = ClassName::from_static("Beipiaosaurus");
pub const CARNOTAURUS: ClassName = ClassName::from_static("Carnotaurus");
pub const CERATOSAURUS: ClassName = ClassName::from_static("Ceratosaurus");
pub const DEINOSUCHUS: ClassName = ClassName::from_static("Deinosuchus");
pub const DIABLOCERATOPS: ClassName = ClassName::from_static("Diabloceratops");
pub const DILOPHOSAURUS: ClassName = ClassName::from_static("Dilophosaurus");
pub const DRYOSAURUS: ClassName = ClassName::from_static("Dryosaurus");
pub const GALLIMIMUS: ClassName = ClassName::from_static("Gallimimus");
pub const HERRERASAURUS: ClassName = ClassName::from_static("Herrerasaurus");
pub const HYPSILOPHODON: ClassName = ClassName::from_static("Hypsilophodon");
pub const MAIASAURA: ClassName = ClassName::from_static("Maiasaura");
pub const OMNIRAPTOR: ClassName = ClassName::from_static("Omniraptor");
pub const PACHYCEPHALOSAURUS: ClassName = ClassName::from_static("Pachycephalosaurus");
pub const PTERANODON: ClassName = ClassName::from_static("Pteranodon");
pub const STEGOSAURUS: ClassName = ClassName::from_static("Stegosaurus");
pub const TENONTOSAURUS: ClassName = ClassName::from_static("Tenontosaurus");
pub const TROODON: ClassName = ClassName::from_static("Troodon");

/// Every playable class, alphabetically.
pub const ALL_CLASSES: [ClassName; 17] = [
    BEIPIAOSAURUS,
    CARNOTAURUS,
    CERATOSAURUS,
    DEINOSUCHUS,
    DIABLOCERATOPS,
    DILOPHOSAURUS,
    DRYOSAURUS,
    GALLIMIMUS,
    HERRERASAURUS,
    HYPSILOPHODON,
    MAIASAURA,
    OMNIRAPTOR,
    PACHYCEPHALOSAURUS,
    PTERANODON,
    STEGOSAURUS,
    TENONTOSAURUS,
    TROODON,
];

/// Returns `true` if `name` is one of [`ALL_CLASSES`]. Case-sensitive.
pub fn is_known_class(name: &str) -> bool {
    ALL_CLASSES.iter().any(|class| class.as_str() == name)
}

/// Creatures the server spawns on its own.
///
/// Unlike [`ClassName`] this set is closed: the only command that takes AI
/// classes is [`Client::disable_ai_classes`](crate::Client::disable_ai_classes),
/// and the server ignores names it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiClass {
    Boar,
    Compsognathus,
    Deer,
    Goat,
    Pterodactylus,
    Seaturtle,
}

/// Every AI class, alphabetically.
pub const ALL_AI_CLASSES: [AiClass; 6] = [
    AiClass::Boar,
    AiClass::Compsognathus,
    AiClass::Deer,
    AiClass::Goat,
    AiClass::Pterodactylus,
    AiClass::Seaturtle,
];

impl AiClass {
    /// The identifier the server expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boar => "Boar",
            Self::Compsognathus => "Compsognathus",
            Self::Deer => "Deer",
            Self::Goat => "Goat",
            Self::Pterodactylus => "Pterodactylus",
            Self::Seaturtle => "Seaturtle",
        }
    }
}

impl fmt::Display for AiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`AiClass::from_str`] for a name outside [`ALL_AI_CLASSES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown AI class {0:?}")]
pub struct UnknownAiClass(pub String);

impl FromStr for AiClass {
    type Err = UnknownAiClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_AI_CLASSES
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| UnknownAiClass(s.to_string()))
    }
}

/// Returns `true` if `name` is one of [`ALL_AI_CLASSES`]. Case-sensitive.
pub fn is_known_ai_class(name: &str) -> bool {
    name.parse::<AiClass>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_classes() {
        assert_eq!(ALL_CLASSES.len(), 17);
        assert!(is_known_class("Carnotaurus"));
        assert!(is_known_class("Troodon"));
        assert!(!is_known_class("carnotaurus"));
        assert!(!is_known_class("Tyrannosaurus"));
    }

    #[test]
    fn test_catalog_constant_equals_decoded_name() {
        assert_eq!(CARNOTAURUS, ClassName::from("Carnotaurus"));
        assert_eq!(CARNOTAURUS.name(), "Carnotaurus");
    }

    #[test]
    fn test_ai_class_parse_and_display() {
        for class in ALL_AI_CLASSES {
            assert_eq!(class.to_string().parse::<AiClass>(), Ok(class));
        }
        assert!(is_known_ai_class("Seaturtle"));
        assert!(!is_known_ai_class("Raptor"));
        assert_eq!(
            "Raptor".parse::<AiClass>(),
            Err(UnknownAiClass("Raptor".into()))
        );
    }

    #[test]
    fn test_ai_class_serializes_as_identifier() {
        let json = serde_json::to_string(&AiClass::Pterodactylus).unwrap();
        assert_eq!(json, r#""Pterodactylus""#);
    }
}
