use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::game::{Board, Player, Position, WinningLine};

/// Status tag of a replayed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Before the first move.
    Waiting,
    /// Game still running.
    Pending,
    Win,
    Draw,
}

impl StepStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Win | StepStatus::Draw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Waiting => "waiting",
            StepStatus::Pending => "pending",
            StepStatus::Win => "win",
            StepStatus::Draw => "draw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinnerInfo {
    #[serde(serialize_with = "serialize_label")]
    pub who: Player,
    pub positions: WinningLine,
}

fn serialize_label<S: Serializer>(player: &Player, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(player.label())
}

/// Snapshot of a replayed game after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub player_1: Vec<Position>,
    pub player_2: Vec<Position>,
    #[serde(rename = "board_state")]
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<WinnerInfo>,
}

impl StepRecord {
    /// The pre-game snapshot.
    pub fn waiting() -> Self {
        StepRecord {
            player_1: Vec::new(),
            player_2: Vec::new(),
            status: StepStatus::Waiting,
            winner: None,
        }
    }

    /// Positions held by `player` at this step.
    pub fn pieces(&self, player: Player) -> &[Position] {
        match player {
            Player::Player1 => &self.player_1,
            Player::Player2 => &self.player_2,
        }
    }

    /// Rebuild the board this step describes.
    pub fn to_board(&self, rows: usize, cols: usize) -> Board {
        let mut board = Board::empty(rows, cols);
        for player in [Player::Player1, Player::Player2] {
            for pos in self.pieces(player) {
                board.place(pos.row, pos.col, player);
            }
        }
        board
    }
}

/// Label for step `index`: `step_0`, `step_1`, ...
pub fn step_label(index: usize) -> String {
    format!("step_{index}")
}

/// The full replayed history: one record per step, `step_0` through `step_N`
/// for N moves. Serializes as a JSON object keyed by step label, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutput {
    steps: Vec<StepRecord>,
}

impl ValidationOutput {
    pub(crate) fn new(steps: Vec<StepRecord>) -> Self {
        debug_assert!(!steps.is_empty(), "step_0 is always present");
        ValidationOutput { steps }
    }

    /// Number of records, including `step_0`.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: `step_0` is present even for an empty move list.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    /// Look a record up by its label, e.g. `"step_3"`.
    pub fn get(&self, label: &str) -> Option<&StepRecord> {
        let index: usize = label.strip_prefix("step_")?.parse().ok()?;
        if step_label(index) != label {
            return None;
        }
        self.step(index)
    }

    /// The record after the last move.
    pub fn last(&self) -> &StepRecord {
        &self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Records paired with their labels, in step order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &StepRecord)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, record)| (step_label(i), record))
    }
}

impl Serialize for ValidationOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len()))?;
        for (label, record) in self.iter() {
            map.serialize_entry(&label, record)?;
        }
        map.end()
    }
}
