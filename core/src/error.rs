use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(SnapshotIssue),
    #[error("Invalid card index")]
    InvalidCard,
    #[error("No round in progress")]
    NoActiveRound,
    #[error("Could not encode snapshot: {0}")]
    Encode(String),
    #[error("Blob store rejected write: {0}")]
    Storage(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("grid needs at least one row and one column")]
    EmptyGrid,
    #[error("grid of {0} cells cannot be split into pairs")]
    OddCellCount(u32),
    #[error("pair count must be positive")]
    NoPairs,
    #[error("{requested} pairs requested but only {available} faces known")]
    NotEnoughFaces { requested: u32, available: usize },
    #[error("face key {0:?} is listed more than once")]
    DuplicateFace(String),
    #[error("{slots} slots for {cards} cards")]
    SlotCountMismatch { slots: usize, cards: usize },
    #[error("slot {0} is assigned twice")]
    DuplicateSlot(usize),
    #[error("rule {0} must be a finite, non-negative number")]
    InvalidRule(&'static str),
    #[error("could not parse rules: {0}")]
    Unparsable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotIssue {
    #[error("could not decode: {0}")]
    Malformed(String),
    #[error("invalid grid {rows}x{columns}")]
    InvalidGrid { rows: u32, columns: u32 },
    #[error("expected {expected} cards, found {found}")]
    CardCount { expected: usize, found: usize },
    #[error("unknown face key {0:?}")]
    UnknownFace(String),
    #[error("card id {0} is out of range")]
    IdOutOfRange(u32),
    #[error("card id {0} does not appear exactly twice")]
    UnpairedId(u32),
    #[error("face key {0:?} belongs to more than one pair")]
    InconsistentFace(String),
    #[error("invalid time left {0}")]
    InvalidTime(f32),
    #[error("score {score} exceeds {pairs} pairs")]
    ScoreOutOfRange { score: u32, pairs: u32 },
    #[error("only one card of pair {0} is matched")]
    HalfResolvedPair(u32),
    #[error("score {score} does not match {matched} matched pairs")]
    ScoreMismatch { score: u32, matched: u32 },
    #[error("every pair is already matched")]
    RoundFinished,
}

pub type Result<T> = core::result::Result<T, GameError>;
