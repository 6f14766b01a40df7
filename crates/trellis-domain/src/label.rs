use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::BoardId;

pub type LabelId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub board_id: BoardId,
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(board_id: BoardId, name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            name,
            color,
        }
    }

    /// Colors are `#RRGGBB` hex, e.g. `#ef4444`.
    pub fn validate_color(color: &str) -> bool {
        let Some(hex) = color.strip_prefix('#') else {
            return false;
        };
        hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_six_digit_hex() {
        assert!(Label::validate_color("#ef4444"));
        assert!(Label::validate_color("#F59E0B"));
        assert!(Label::validate_color("#10b981"));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(!Label::validate_color(""));
        assert!(!Label::validate_color("ef4444"));
        assert!(!Label::validate_color("#fff"));
        assert!(!Label::validate_color("#ef444"));
        assert!(!Label::validate_color("#ef44445"));
        assert!(!Label::validate_color("#ef444g"));
    }
}
