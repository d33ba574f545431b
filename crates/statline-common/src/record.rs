//! Fixed-width game record and record pointer types.

/// Size of a serialized record in bytes.
pub const RECORD_SIZE: usize = 44;

/// Multiplier used to pack a RecordPointer into a single i32 for index
/// leaf slots. Valid because a block never holds 10_000 slots.
const POINTER_BASE: i32 = 10_000;

// The on-disk format fixes the record at exactly 44 bytes.
const _: () = assert!(RECORD_SIZE == 44);

/// One home-team game row, stored fixed-width.
///
/// Layout (44 bytes, little-endian):
/// - game_date: 11 bytes (10 chars + NUL)
/// - reserved: 1 byte
/// - team_id: 4 bytes
/// - points: 4 bytes
/// - fg_pct: 4 bytes (float)
/// - ft_pct: 4 bytes (float, the index key)
/// - fg3_pct: 4 bytes (float)
/// - assists: 4 bytes
/// - rebounds: 4 bytes
/// - home_win: 4 bytes
///
/// The all-zero record is the deleted/empty slot sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameRecord {
    /// Game date, NUL-terminated (DD/MM/YYYY).
    pub game_date: [u8; 11],
    /// Home team identifier.
    pub team_id: i32,
    /// Points scored by the home team.
    pub points: i32,
    /// Field-goal percentage.
    pub fg_pct: f32,
    /// Free-throw percentage. This is the indexed attribute.
    pub ft_pct: f32,
    /// Three-point percentage.
    pub fg3_pct: f32,
    /// Home team assists.
    pub assists: i32,
    /// Home team rebounds.
    pub rebounds: i32,
    /// Win indicator (1 = win, 0 = loss).
    pub home_win: i32,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            game_date: [0; 11],
            team_id: 0,
            points: 0,
            fg_pct: 0.0,
            ft_pct: 0.0,
            fg3_pct: 0.0,
            assists: 0,
            rebounds: 0,
            home_win: 0,
        }
    }
}

#[allow(clippy::too_many_arguments)]
impl GameRecord {
    /// Creates a record from parsed fields. The date is truncated to ten
    /// characters and NUL-terminated.
    pub fn new(
        date: &str,
        team_id: i32,
        points: i32,
        fg_pct: f32,
        ft_pct: f32,
        fg3_pct: f32,
        assists: i32,
        rebounds: i32,
        home_win: i32,
    ) -> Self {
        let mut game_date = [0u8; 11];
        let bytes = date.as_bytes();
        let len = bytes.len().min(10);
        game_date[..len].copy_from_slice(&bytes[..len]);

        Self {
            game_date,
            team_id,
            points,
            fg_pct,
            ft_pct,
            fg3_pct,
            assists,
            rebounds,
            home_win,
        }
    }

    /// Returns the game date as a string slice (up to the NUL).
    pub fn date(&self) -> &str {
        let end = self
            .game_date
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.game_date.len());
        std::str::from_utf8(&self.game_date[..end]).unwrap_or("")
    }

    /// Returns true if this record is the deleted/empty slot sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serializes the record to its 44-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[0..11].copy_from_slice(&self.game_date);
        // byte 11 is reserved (already zeroed)
        buf[12..16].copy_from_slice(&self.team_id.to_le_bytes());
        buf[16..20].copy_from_slice(&self.points.to_le_bytes());
        buf[20..24].copy_from_slice(&self.fg_pct.to_le_bytes());
        buf[24..28].copy_from_slice(&self.ft_pct.to_le_bytes());
        buf[28..32].copy_from_slice(&self.fg3_pct.to_le_bytes());
        buf[32..36].copy_from_slice(&self.assists.to_le_bytes());
        buf[36..40].copy_from_slice(&self.rebounds.to_le_bytes());
        buf[40..44].copy_from_slice(&self.home_win.to_le_bytes());
        buf
    }

    /// Deserializes a record from its 44-byte on-disk form.
    pub fn from_bytes(buf: &[u8; RECORD_SIZE]) -> Self {
        let mut game_date = [0u8; 11];
        game_date.copy_from_slice(&buf[0..11]);
        Self {
            game_date,
            team_id: i32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            points: i32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
            fg_pct: f32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]),
            ft_pct: f32::from_le_bytes([buf[24], buf[25], buf[26], buf[27]]),
            fg3_pct: f32::from_le_bytes([buf[28], buf[29], buf[30], buf[31]]),
            assists: i32::from_le_bytes([buf[32], buf[33], buf[34], buf[35]]),
            rebounds: i32::from_le_bytes([buf[36], buf[37], buf[38], buf[39]]),
            home_win: i32::from_le_bytes([buf[40], buf[41], buf[42], buf[43]]),
        }
    }
}

/// Physical address of a record: block id plus slot index within the block.
///
/// Ordering is by block first, then slot, so sorting pointer lists groups
/// records of the same block together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordPointer {
    /// Block containing the record.
    pub block_id: i32,
    /// Slot index within the block.
    pub record_index: i32,
}

impl RecordPointer {
    /// Creates a new record pointer.
    pub fn new(block_id: i32, record_index: i32) -> Self {
        Self {
            block_id,
            record_index,
        }
    }

    /// Packs the pointer into a single i32 for index leaf slots.
    pub fn encode(&self) -> i32 {
        self.block_id * POINTER_BASE + self.record_index
    }

    /// Unpacks a pointer from its encoded leaf-slot form.
    pub fn decode(encoded: i32) -> Self {
        Self {
            block_id: encoded / POINTER_BASE,
            record_index: encoded % POINTER_BASE,
        }
    }
}

impl Default for RecordPointer {
    fn default() -> Self {
        Self {
            block_id: -1,
            record_index: -1,
        }
    }
}

impl std::fmt::Display for RecordPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.block_id, self.record_index)
    }
}
