use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 3;

/// A `1`, `-1` or `0` code as the server writes it. Boards built from float
/// arrays arrive as `1.0`, so both number forms are read.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireCode {
    Int(i64),
    Float(f64),
}

impl TryFrom<WireCode> for i8 {
    type Error = String;

    fn try_from(code: WireCode) -> Result<Self, Self::Error> {
        match code {
            WireCode::Int(value @ -1..=1) => Ok(value as i8),
            WireCode::Float(value) if value == 1.0 => Ok(1),
            WireCode::Float(value) if value == -1.0 => Ok(-1),
            WireCode::Float(value) if value == 0.0 => Ok(0),
            WireCode::Int(value) => Err(format!("invalid code {value}")),
            WireCode::Float(value) => Err(format!("invalid code {value}")),
        }
    }
}

/// A player's mark. The server encodes O as `1` and X as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireCode", into = "i8")]
pub enum Mark {
    O,
    X,
}

impl Mark {
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::O => "O",
            Mark::X => "X",
        }
    }
}

impl TryFrom<i8> for Mark {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Mark::O),
            -1 => Ok(Mark::X),
            other => Err(format!("invalid player value {other}")),
        }
    }
}

impl TryFrom<WireCode> for Mark {
    type Error = String;

    fn try_from(code: WireCode) -> Result<Self, Self::Error> {
        Mark::try_from(i8::try_from(code)?)
    }
}

impl From<Mark> for i8 {
    fn from(mark: Mark) -> i8 {
        match mark {
            Mark::O => 1,
            Mark::X => -1,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One board square: `1`, `-1` or `0` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "WireCode", into = "i8")]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl TryFrom<i8> for Cell {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            other => Mark::try_from(other)
                .map(Cell::Marked)
                .map_err(|_| format!("invalid cell value {other}")),
        }
    }
}

impl TryFrom<WireCode> for Cell {
    type Error = String;

    fn try_from(code: WireCode) -> Result<Self, Self::Error> {
        Cell::try_from(i8::try_from(code)?)
    }
}

impl From<Cell> for i8 {
    fn from(cell: Cell) -> i8 {
        match cell {
            Cell::Empty => 0,
            Cell::Marked(mark) => mark.into(),
        }
    }
}

pub type Board = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Cell the backend's agent played in reply, sent as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct AiMove {
    pub row: usize,
    pub col: usize,
}

impl From<[usize; 2]> for AiMove {
    fn from([row, col]: [usize; 2]) -> Self {
        AiMove { row, col }
    }
}

impl From<AiMove> for [usize; 2] {
    fn from(ai_move: AiMove) -> Self {
        [ai_move.row, ai_move.col]
    }
}

/// Snapshot of a game as reported by the server after every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Mark,
    pub done: bool,
    /// `None` while the game runs and for a tie.
    #[serde(default, deserialize_with = "deserialize_winner")]
    pub winner: Option<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_move: Option<AiMove>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GameMode>,
}

impl GameState {
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.board.get(row).and_then(|r| r.get(col)).copied()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WinnerRepr {
    Code(WireCode),
    Name(String),
}

// Winners arrive either as a player code or as "Player 1"/"Player 2".
fn deserialize_winner<'de, D>(deserializer: D) -> Result<Option<Mark>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<WinnerRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WinnerRepr::Code(code)) => match i8::try_from(code).map_err(D::Error::custom)? {
            0 => Ok(None),
            code => Mark::try_from(code).map(Some).map_err(D::Error::custom),
        },
        Some(WinnerRepr::Name(name)) => match name.as_str() {
            "Player 1" => Ok(Some(Mark::O)),
            "Player 2" => Ok(Some(Mark::X)),
            "" => Ok(None),
            other => Err(D::Error::custom(format!("invalid winner {other:?}"))),
        },
    }
}

/// Game type identifier. Only the backend interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameMode(String);

impl GameMode {
    pub fn new(mode: impl Into<String>) -> Self {
        GameMode(mode.into())
    }

    pub fn human_vs_ai() -> Self {
        GameMode::new("human-ai")
    }

    pub fn human_vs_human() -> Self {
        GameMode::new("human-human")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub mode: GameMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainStats {
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub ties: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub exists: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
