//! Letter-grid generation for the board-game variant.
//!
//! Each question gets a fresh square grid with the cleaned answer hidden
//! along one of the eight compass directions; every other cell is a
//! uniformly random letter. Generation takes the random source as an
//! argument so callers can pin a seed.

use rand::Rng;
use rand::seq::SliceRandom;

/// Grid side length used when the caller does not override it.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// The eight unit direction vectors as (row delta, column delta).
const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Where the answer was embedded in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Cell index of the first letter.
    pub start: usize,
    /// (row delta, column delta) stepped once per letter.
    pub delta: (i32, i32),
}

/// A fully populated square letter grid.
///
/// `placement` is `None` for degenerate grids where the answer could not
/// be embedded (empty after cleaning, or too long for any straight run).
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<char>,
    placement: Option<Placement>,
}

impl Board {
    /// Build a grid embedding `answer` (cleaned to A-Z) in a random
    /// direction at a random feasible start.
    ///
    /// Directions are tried in Fisher-Yates-shuffled order and the first
    /// one with any feasible start wins, so the choice is biased over
    /// (direction, start) pairs rather than uniform over placements.
    pub fn generate<R: Rng>(answer: &str, size: usize, rng: &mut R) -> Self {
        let word: Vec<char> = clean_answer(answer).chars().collect();
        let area = size * size;
        let mut cells: Vec<Option<char>> = vec![None; area];
        let mut placement = None;

        if !word.is_empty() && word.len() <= area {
            let mut directions = DIRECTIONS;
            directions.shuffle(rng);

            for &delta in &directions {
                let starts = feasible_starts(size, word.len(), delta);
                if let Some(&start) = starts.choose(rng) {
                    place_word(&mut cells, size, start, delta, &word);
                    placement = Some(Placement { start, delta });
                    break;
                }
            }

            // Safety net: the guard above should make this unreachable,
            // but fall back to the first row when the word fits in one.
            if placement.is_none() && word.len() <= size {
                let delta = (0, 1);
                place_word(&mut cells, size, 0, delta, &word);
                placement = Some(Placement { start: 0, delta });
            }
        }

        let cells = cells
            .into_iter()
            .map(|cell| match cell {
                Some(letter) => letter,
                None => random_letter(rng),
            })
            .collect();

        Self {
            size,
            cells,
            placement,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Letter at a cell index. Indices are `row * size + column`.
    pub fn letter(&self, index: usize) -> char {
        self.cells[index]
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Read `len` letters starting at `start`, stepping by `delta`.
    /// Returns `None` if the run leaves the grid.
    pub fn read_run(&self, start: usize, delta: (i32, i32), len: usize) -> Option<String> {
        let size = self.size as i32;
        let mut row = (start / self.size) as i32;
        let mut col = (start % self.size) as i32;
        let mut out = String::with_capacity(len);

        for _ in 0..len {
            if !(0..size).contains(&row) || !(0..size).contains(&col) {
                return None;
            }
            out.push(self.cells[(row * size + col) as usize]);
            row += delta.0;
            col += delta.1;
        }
        Some(out)
    }
}

/// Uppercase letters only; digits, punctuation and whitespace are dropped.
pub fn clean_answer(answer: &str) -> String {
    answer
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// All cell indices from which a run of `len` cells in direction `delta`
/// stays inside the grid.
fn feasible_starts(size: usize, len: usize, delta: (i32, i32)) -> Vec<usize> {
    let span = (len - 1) as i32;
    let bound = size as i32;
    let mut starts = Vec::new();

    for row in 0..bound {
        for col in 0..bound {
            let end_row = row + delta.0 * span;
            let end_col = col + delta.1 * span;
            if (0..bound).contains(&end_row) && (0..bound).contains(&end_col) {
                starts.push((row * bound + col) as usize);
            }
        }
    }
    starts
}

fn place_word(cells: &mut [Option<char>], size: usize, start: usize, delta: (i32, i32), word: &[char]) {
    let mut row = (start / size) as i32;
    let mut col = (start % size) as i32;

    for &letter in word {
        cells[row as usize * size + col as usize] = Some(letter);
        row += delta.0;
        col += delta.1;
    }
}

fn random_letter<R: Rng>(rng: &mut R) -> char {
    (b'A' + rng.gen_range(0..26)) as char
}
