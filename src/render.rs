// Plain-text board rendering for debug logs
//
// Top row is y = height - 1. Cells: '.' empty, 'F' food, 'H' head, 'B' body.
// A body segment stacked on its own head is drawn as 'H'.

use crate::types::{Board, Coord};

pub fn render_board(board: &Board) -> String {
    let width = board.width.max(0) as usize;
    let height = board.height.max(0) as usize;
    let mut grid = vec![vec!['.'; width]; height];

    let mut put = |c: &Coord, ch: char| {
        if c.x >= 0 && c.y >= 0 && (c.x as usize) < width && (c.y as usize) < height {
            grid[c.y as usize][c.x as usize] = ch;
        }
    };

    for food in &board.food {
        put(food, 'F');
    }

    for snake in &board.snakes {
        let Some(head) = snake.body.first() else {
            continue;
        };
        for segment in snake.body.iter().skip(1) {
            put(segment, if segment == head { 'H' } else { 'B' });
        }
        put(head, 'H');
    }

    let mut out = String::with_capacity((width * 3 + 1) * height);
    for row in grid.iter().rev() {
        for cell in row {
            out.push(' ');
            out.push(*cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
