use std::collections::HashMap;

use once_cell::sync::Lazy;

const FONT_HEIGHT: usize = 5;
const FONT_WIDTH: usize = 5;
const SHADOW_OFFSET: usize = 1;
const LETTER_SPACING: usize = 2;
const FILL_CHAR: char = '█';
const SHADOW_CHAR: char = '░';

type Glyph = [&'static str; FONT_HEIGHT];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('A', [" 111 ", "1   1", "11111", "1   1", "1   1"]),
        ('C', [" 1111", "1    ", "1    ", "1    ", " 1111"]),
        ('K', ["1   1", "1  1 ", "111  ", "1  1 ", "1   1"]),
        ('N', ["1   1", "11  1", "1 1 1", "1  11", "1   1"]),
        ('O', [" 111 ", "1   1", "1   1", "1   1", " 111 "]),
        ('R', ["1111 ", "1   1", "1111 ", "1  1 ", "1   1"]),
        ('S', [" 1111", "1    ", " 111 ", "    1", "1111 "]),
        ('T', ["11111", "  1  ", "  1  ", "  1  ", "  1  "]),
        ('W', ["1   1", "1   1", "1 1 1", "11 11", "1   1"]),
        ('Y', ["1   1", " 1 1 ", "  1  ", "  1  ", "  1  "]),
        (' ', ["     ", "     ", "     ", "     ", "     "]),
        ('?', [" 111 ", "1   1", "  11 ", "     ", "  1  "]),
    ])
});

/// Render each word as its own block of rows, separated by a blank row.
pub fn render_words(words: &[&str]) -> Vec<String> {
    let mut rows = Vec::new();
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            rows.push(String::new());
        }
        rows.extend(render(word));
    }
    rows
}

/// Render a line of text with a drop shadow. Unknown characters draw as `?`.
pub fn render(text: &str) -> Vec<String> {
    let letters: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    let height = FONT_HEIGHT + SHADOW_OFFSET;
    if letters.is_empty() {
        return vec![String::new(); height];
    }

    let cell_width = FONT_WIDTH * 2;
    let width = letters.len() * (cell_width + LETTER_SPACING) + SHADOW_OFFSET * 2;
    let mut canvas = vec![vec![' '; width]; height];
    for (index, letter) in letters.iter().enumerate() {
        let Some(glyph) = GLYPHS.get(letter).or_else(|| GLYPHS.get(&'?')) else {
            continue;
        };
        paint(&mut canvas, glyph, index * (cell_width + LETTER_SPACING));
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

fn paint(canvas: &mut [Vec<char>], glyph: &Glyph, x_offset: usize) {
    for (y, row) in glyph.iter().enumerate() {
        for (col, _) in row.chars().enumerate().filter(|(_, symbol)| *symbol == '1') {
            let x = x_offset + col * 2;
            for dx in 0..2 {
                put(canvas, y + SHADOW_OFFSET, x + SHADOW_OFFSET * 2 + dx, SHADOW_CHAR);
                put(canvas, y, x + dx, FILL_CHAR);
            }
        }
    }
}

fn put(canvas: &mut [Vec<char>], y: usize, x: usize, ch: char) {
    let Some(cell) = canvas.get_mut(y).and_then(|row| row.get_mut(x)) else {
        return;
    };
    if *cell == ' ' || (*cell == SHADOW_CHAR && ch == FILL_CHAR) {
        *cell = ch;
    }
}
