use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::Control;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub header: Rect,
    pub controls: Rect,
    pub output: Rect,
    pub status_line: Rect,
    pub hint_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    UiAreas {
        header: vertical[0],
        controls: vertical[1],
        output: vertical[2],
        status_line: vertical[3],
        hint_line: vertical[4],
    }
}

/// Split the controls row into one cell per control
pub fn control_cells(area: Rect) -> Vec<(Control, Rect)> {
    let constraints: Vec<Constraint> = Control::ALL
        .iter()
        .map(|control| match control {
            Control::AddressInput => Constraint::Min(24),
            other => Constraint::Length(other.title().chars().count() as u16 + 8),
        })
        .collect();

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    Control::ALL.iter().copied().zip(cells.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_cells_cover_all_controls_in_order() {
        let cells = control_cells(Rect::new(0, 2, 200, 3));
        let order: Vec<Control> = cells.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Control::ALL.to_vec());
        for pair in cells.windows(2) {
            assert!(pair[0].1.x < pair[1].1.x);
        }
    }
}
