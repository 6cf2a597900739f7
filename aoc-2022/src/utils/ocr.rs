//! Recognition of the 4x6 block letters drawn by some puzzles

/// Glyph height in rows
pub const GLYPH_HEIGHT: usize = 6;
/// Glyph width in columns, excluding the blank separator column. `Y` is one
/// column wider and fills its separator.
pub const GLYPH_WIDTH: usize = 4;

const GLYPHS: &[(char, [&str; GLYPH_HEIGHT])] = &[
    ('A', [".##.", "#..#", "#..#", "####", "#..#", "#..#"]),
    ('B', ["###.", "#..#", "###.", "#..#", "#..#", "###."]),
    ('C', [".##.", "#..#", "#...", "#...", "#..#", ".##."]),
    ('E', ["####", "#...", "###.", "#...", "#...", "####"]),
    ('F', ["####", "#...", "###.", "#...", "#...", "#..."]),
    ('G', [".##.", "#..#", "#...", "#.##", "#..#", ".###"]),
    ('H', ["#..#", "#..#", "####", "#..#", "#..#", "#..#"]),
    ('I', [".###", "..#.", "..#.", "..#.", "..#.", ".###"]),
    ('J', ["..##", "...#", "...#", "...#", "#..#", ".##."]),
    ('K', ["#..#", "#.#.", "##..", "#.#.", "#.#.", "#..#"]),
    ('L', ["#...", "#...", "#...", "#...", "#...", "####"]),
    ('O', [".##.", "#..#", "#..#", "#..#", "#..#", ".##."]),
    ('P', ["###.", "#..#", "#..#", "###.", "#...", "#..."]),
    ('R', ["###.", "#..#", "#..#", "###.", "#.#.", "#..#"]),
    ('S', [".###", "#...", "#...", ".##.", "...#", "###."]),
    ('U', ["#..#", "#..#", "#..#", "#..#", "#..#", ".##."]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#.."]),
    ('Z', ["####", "...#", "..#.", ".#..", "#...", "####"]),
];

/// Read the letters drawn on `rows` of `#`/`.` pixels
///
/// Letters sit at a stride of `GLYPH_WIDTH + 1` columns. Returns `None` if the
/// image is not exactly six rows or any cell matches no known glyph.
pub fn read_letters<S: AsRef<str>>(rows: &[S]) -> Option<String> {
    if rows.len() != GLYPH_HEIGHT {
        return None;
    }
    let rows: Vec<&[u8]> = rows.iter().map(|r| r.as_ref().as_bytes()).collect();
    let width = rows[0].len();
    if width == 0 || rows.iter().any(|r| r.len() != width) {
        return None;
    }

    let stride = GLYPH_WIDTH + 1;
    (0..width.div_ceil(stride))
        .map(|cell| {
            let start = cell * stride;
            GLYPHS
                .iter()
                .find(|(_, glyph)| {
                    glyph
                        .iter()
                        .zip(&rows)
                        .all(|(g, row)| row.get(start..start + g.len()) == Some(g.as_bytes()))
                })
                .map(|(c, _)| *c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(text: &str) -> Vec<String> {
        (0..GLYPH_HEIGHT)
            .map(|r| {
                text.chars()
                    .map(|c| {
                        let (_, glyph) = GLYPHS.iter().find(|(g, _)| *g == c).unwrap();
                        if glyph[r].len() > GLYPH_WIDTH {
                            glyph[r].to_string()
                        } else {
                            format!("{}.", glyph[r])
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn reads_drawn_text() {
        assert_eq!(read_letters(&draw("RZHFGJCB")).as_deref(), Some("RZHFGJCB"));
        assert_eq!(read_letters(&draw("PLEFULPB")).as_deref(), Some("PLEFULPB"));
    }

    #[test]
    fn wide_y_reads_next_to_other_letters() {
        assert_eq!(read_letters(&draw("YAY")).as_deref(), Some("YAY"));
        assert_eq!(read_letters(&draw("EYZ")).as_deref(), Some("EYZ"));
    }

    #[test]
    fn unknown_pattern_is_none() {
        let mut rows = draw("AB");
        rows[0] = "#########.".to_string();
        assert_eq!(read_letters(&rows), None);
        assert_eq!(read_letters(&rows[..5]), None);
    }
}
