//! Core domain types: identities, game modes and the two persisted documents.
//!
//! These values cross every boundary in Lobbyforge. The repository stores
//! them, the read-cache holds them encoded, and the transport layer hands
//! them back as response payloads.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A player's unique identifier.
///
/// Assigned by the registering client, so the only rule enforced here is
/// that it is non-empty. `#[serde(transparent)]` keeps it a plain JSON
/// string rather than `{ "0": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Parses a raw request value into a `PlayerId`.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] for an empty id.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::InvalidMessage("player id must not be empty".into()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A room's identifier.
///
/// Generated by the membership engine as [`RoomId::LEN`] alphanumeric
/// characters. Parsing from a request does not enforce the length: an id
/// of the wrong shape simply never matches a stored room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Length of generated room ids.
    pub const LEN: usize = 7;

    /// Parses a raw request value into a `RoomId`.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] for an empty id.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::InvalidMessage("room id must not be empty".into()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps an already generated id without validation.
    pub fn from_generated(id: String) -> Self {
        Self(id)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A three-letter region code such as `USA`.
///
/// Stored upper-cased so that `"usa"` and `"USA"` land in the same trend
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Number of characters in a region code.
    pub const LEN: usize = 3;

    /// Parses and normalises a region code.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] unless the trimmed input
    /// is exactly [`Region::LEN`] ASCII letters.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let trimmed = raw.trim();
        if trimmed.len() != Self::LEN || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ProtocolError::InvalidMessage(format!(
                "region must be {} ASCII letters, got {raw:?}",
                Self::LEN
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The game variant a room is bound to.
///
/// A closed set plus the [`Mode::Unknown`] sentinel, which is what any
/// unrecognised input parses to. Callers check [`Mode::is_known`] rather
/// than handling a parse error, so "is this mode valid?" can be asked at
/// whatever point in an operation the rules require.
///
/// Serialized as its canonical lowercase name (`"gunsmith"`, `"1 v 1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    TeamDeathmatch,
    BattleRoyale,
    GunSmith,
    OneVsOne,
    Mayhem,
    Unknown,
}

impl Mode {
    /// Every playable mode, in declaration order. `Unknown` is excluded.
    pub const ALL: [Mode; 5] = [
        Mode::TeamDeathmatch,
        Mode::BattleRoyale,
        Mode::GunSmith,
        Mode::OneVsOne,
        Mode::Mayhem,
    ];

    /// Parses a mode name, case-insensitively. Unrecognised input yields
    /// [`Mode::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "team deathmatch" => Self::TeamDeathmatch,
            "battle royale" => Self::BattleRoyale,
            "gunsmith" => Self::GunSmith,
            "1 v 1" => Self::OneVsOne,
            "mayhem" => Self::Mayhem,
            _ => Self::Unknown,
        }
    }

    /// The canonical (serialized) name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamDeathmatch => "team deathmatch",
            Self::BattleRoyale => "battle royale",
            Self::GunSmith => "gunsmith",
            Self::OneVsOne => "1 v 1",
            Self::Mayhem => "mayhem",
            Self::Unknown => "unknown",
        }
    }

    /// Maximum number of players a room of this mode may hold.
    ///
    /// `Unknown` has capacity 0, so a room carrying it is always full.
    pub fn capacity(&self) -> usize {
        match self {
            Self::TeamDeathmatch => 10,
            Self::BattleRoyale => 20,
            Self::GunSmith => 8,
            Self::OneVsOne => 2,
            Self::Mayhem => 5,
            Self::Unknown => 0,
        }
    }

    /// Returns `true` for every mode except the `Unknown` sentinel.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Mode {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_owned()
    }
}

// ---------------------------------------------------------------------------
// MembershipState
// ---------------------------------------------------------------------------

/// Where a player stands with respect to room membership.
///
/// ```text
///        create_room / join_room
///   Idle ───────────────────────→ InRoom
///     ↑                              │
///     └─────────── leave_room ───────┘
/// ```
///
/// There are no other transitions: creating or joining while `InRoom`,
/// or leaving while `Idle`, is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipState {
    Idle,
    InRoom,
}

impl MembershipState {
    /// Returns `true` if moving from `self` to `target` is a legal
    /// transition.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::InRoom) | (Self::InRoom, Self::Idle)
        )
    }
}

impl fmt::Display for MembershipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::InRoom => write!(f, "InRoom"),
        }
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub region: Region,
    /// The room this player is in. `None` means idle.
    #[serde(default)]
    pub room: Option<RoomId>,
}

impl Player {
    /// Creates an idle player.
    pub fn new(id: PlayerId, region: Region) -> Self {
        Self { id, region, room: None }
    }

    pub fn membership(&self) -> MembershipState {
        match self.room {
            Some(_) => MembershipState::InRoom,
            None => MembershipState::Idle,
        }
    }
}

/// A room: a set of players bound to one mode.
///
/// `player_ids` is a `BTreeSet` so the roster has no duplicates and
/// iterates in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub mode: Mode,
    pub player_ids: BTreeSet<PlayerId>,
}

impl Room {
    /// Creates a room whose only member is `founder`.
    pub fn new(id: RoomId, mode: Mode, founder: PlayerId) -> Self {
        Self {
            id,
            mode,
            player_ids: BTreeSet::from([founder]),
        }
    }

    pub fn player_count(&self) -> usize {
        self.player_ids.len()
    }

    /// Returns `true` once the roster has reached the mode's capacity.
    pub fn is_full(&self) -> bool {
        self.player_ids.len() >= self.mode.capacity()
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.player_ids.contains(player_id)
    }
}

/// One line of a regional trend report: how many players in rooms of
/// `mode` were counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTrend {
    pub mode: Mode,
    pub count: usize,
}

// =========================================================================
// Tests
// =========================================================================
