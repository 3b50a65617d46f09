use crate::board::{tile_value, Board, Rank};
use crate::GRID_SIZE;

// (background, foreground) 256-color pairs indexed by rank, the last entry repeats
const ORIGINAL: [(u8, u8); 16] = [
    (8, 15), (1, 15), (2, 15), (3, 15), (4, 15), (5, 15), (6, 15), (7, 15),
    (9, 0), (10, 0), (11, 0), (12, 0), (13, 0), (14, 0), (15, 0), (15, 0),
];
const BLACK_WHITE: [(u8, u8); 16] = [
    (234, 15), (235, 15), (236, 15), (237, 15), (238, 15), (239, 15), (240, 15), (241, 15),
    (242, 15), (243, 15), (244, 15), (245, 0), (246, 0), (247, 0), (248, 0), (249, 0),
];
const BLUE_RED: [(u8, u8); 16] = [
    (235, 15), (63, 15), (57, 15), (93, 15), (129, 15), (165, 15), (201, 15), (200, 15),
    (199, 15), (198, 15), (197, 15), (196, 15), (196, 15), (196, 15), (196, 15), (196, 15),
];

const RESET: &str = "\x1b[m";
const TILE_WIDTH: usize = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorScheme {
    #[default]
    Original,
    #[value(name = "blackwhite")]
    BlackWhite,
    #[value(name = "bluered")]
    BlueRed,
}

impl ColorScheme {
    fn pairs(self) -> &'static [(u8, u8); 16] {
        match self {
            ColorScheme::Original => &ORIGINAL,
            ColorScheme::BlackWhite => &BLACK_WHITE,
            ColorScheme::BlueRed => &BLUE_RED,
        }
    }

    /// Escape sequence selecting the colors of a tile.
    pub fn color(self, rank: Rank) -> String {
        let pairs = self.pairs();
        let (background, foreground) = pairs[(rank as usize).min(pairs.len() - 1)];
        format!("\x1b[38;5;{};48;5;{}m", foreground, background)
    }
}

/// The whole frame: header with the score, the board and the key hint.
/// Lines end in `\r\n` so the frame draws correctly in raw mode.
pub fn render(board: &Board, score: u32, scheme: ColorScheme) -> String {
    let mut data: Vec<String> = vec![format!("2048.rs {:>17} pts", score), String::new()];

    for y in 0..GRID_SIZE {
        let mut line = create_block(board.get(0, y), scheme);
        for x in 1..GRID_SIZE {
            line = hlink(line, create_block(board.get(x, y), scheme));
        }
        data.extend(line);
    }

    data.push(String::new());
    data.push("        ←,↑,→,↓ or q        ".to_string());

    // home the cursor and redraw over the previous frame
    let mut frame = String::from("\x1b[H");
    for line in data {
        frame.push_str(&line);
        frame.push_str("\r\n");
    }
    frame
}

fn create_block(rank: Rank, scheme: ColorScheme) -> Vec<String> {
    let color = scheme.color(rank);
    let blank = format!("{}{}{}", color, " ".repeat(TILE_WIDTH), RESET);
    if rank == 0 {
        return vec![blank.clone(), blank.clone(), blank];
    }
    let number = tile_value(rank).to_string();
    let pad = TILE_WIDTH.saturating_sub(number.len());
    let middle = format!(
        "{}{}{}{}{}",
        color,
        " ".repeat(pad - pad / 2),
        number,
        " ".repeat(pad / 2),
        RESET
    );
    vec![blank.clone(), middle, blank]
}

fn hlink(a: Vec<String>, b: Vec<String>) -> Vec<String> {
    a.into_iter().zip(b).map(|(a, b)| a + &b).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_escapes(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // skip to the final byte of the sequence
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn header_and_tiles() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        board.set(3, 3, 11);
        let frame = strip_escapes(&render(&board, 1234, ColorScheme::Original));
        let lines: Vec<&str> = frame.split("\r\n").collect();
        assert_eq!(lines[0], format!("2048.rs {:>17} pts", 1234));
        // three lines per row, value on the middle one
        assert_eq!(lines[3], format!("   2   {}", " ".repeat(21)));
        assert_eq!(lines[12], format!("{}  2048 ", " ".repeat(21)));
        assert!(lines[15].contains("or q"));
    }

    #[test]
    fn colors_follow_rank_and_clamp() {
        assert_eq!(ColorScheme::Original.color(0), "\x1b[38;5;15;48;5;8m");
        assert_eq!(ColorScheme::Original.color(8), "\x1b[38;5;0;48;5;9m");
        assert_eq!(ColorScheme::BlueRed.color(17), ColorScheme::BlueRed.color(15));
        assert_eq!(ColorScheme::BlackWhite.color(1), "\x1b[38;5;15;48;5;235m");
    }

    #[test]
    fn every_line_of_the_board_has_the_same_width() {
        let board = Board::from_cells([[1, 5, 10, 17], [0, 2, 0, 14], [3, 0, 9, 0], [0, 7, 0, 12]]);
        let frame = strip_escapes(&render(&board, 0, ColorScheme::BlueRed));
        for line in frame.split("\r\n").skip(2).take(3 * GRID_SIZE) {
            assert_eq!(line.chars().count(), TILE_WIDTH * GRID_SIZE, "{:?}", line);
        }
    }
}
