pub mod renderer;

pub use renderer::Renderer;

use crate::game::CellKind;

/// Display glyph for a cell
pub fn symbol(kind: CellKind) -> char {
    match kind {
        CellKind::Empty => ' ',
        CellKind::Occupied => 'O',
        CellKind::Food => '*',
        CellKind::Wall => '#',
    }
}

/// One text line per board row
pub fn board_lines(snapshot: &crate::snapshot::Snapshot) -> Vec<String> {
    snapshot
        .cells
        .chunks(snapshot.cols.max(1))
        .map(|row| row.iter().map(|kind| symbol(*kind)).collect())
        .collect()
}
