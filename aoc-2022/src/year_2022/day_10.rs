use crate::utils::ocr::{GLYPH_HEIGHT, read_letters};
use crate::utils::parsing::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["2022", "simulation", "ocr"])]
pub struct Solver;

pub const SCREEN_WIDTH: usize = 40;
pub const SCREEN_HEIGHT: usize = GLYPH_HEIGHT;

/// Value of the X register during each cycle, first cycle at index 0
#[derive(Debug)]
pub struct Trace {
    x: Vec<i64>,
}

impl Trace {
    /// X during the 1-based `cycle`; the register holds its last value once
    /// the program has finished
    fn x_during(&self, cycle: usize) -> i64 {
        self.x
            .get(cycle - 1)
            .or(self.x.last())
            .copied()
            .unwrap_or(1)
    }
}

/// Draw the CRT: pixel `i` is lit when the sprite centred on X covers its column
pub fn render_screen(trace: &Trace) -> Vec<String> {
    (0..SCREEN_HEIGHT)
        .map(|row| {
            (0..SCREEN_WIDTH)
                .map(|col| {
                    let x = trace.x_during(row * SCREEN_WIDTH + col + 1);
                    if (x - col as i64).abs() <= 1 { '#' } else { '.' }
                })
                .collect()
        })
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Trace;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let instructions = parse_lines(input, |line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some("noop"), None, None) => Ok(None),
                (Some("addx"), Some(v), None) => Ok(Some(v.parse::<i64>()?)),
                _ => Err(anyhow!("unknown instruction {line:?}")),
            }
        })?;

        let mut x = 1;
        let mut trace = Vec::with_capacity(instructions.len() * 2);
        for instruction in instructions {
            trace.push(x);
            if let Some(v) = instruction {
                trace.push(x);
                x += v;
            }
        }
        trace.push(x);
        Ok(Trace { x: trace })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let strength: i64 = (20..=220)
            .step_by(40)
            .map(|cycle| cycle as i64 * shared.x_during(cycle))
            .sum();
        Ok(strength.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let screen = render_screen(shared);
        Ok(read_letters(&screen).unwrap_or_else(|| screen.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        addx 15
        addx -11
        addx 6
        addx -3
        addx 5
        addx -1
        addx -8
        addx 13
        addx 4
        noop
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx 5
        addx -1
        addx -35
        addx 1
        addx 24
        addx -19
        addx 1
        addx 16
        addx -11
        noop
        noop
        addx 21
        addx -15
        noop
        noop
        addx -3
        addx 9
        addx 1
        addx -3
        addx 8
        addx 1
        addx 5
        noop
        noop
        noop
        noop
        noop
        addx -36
        noop
        addx 1
        addx 7
        noop
        noop
        noop
        addx 2
        addx 6
        noop
        noop
        noop
        noop
        noop
        addx 1
        noop
        noop
        addx 7
        addx 1
        noop
        addx -13
        addx 13
        addx 7
        noop
        addx 1
        addx -33
        noop
        noop
        noop
        addx 2
        noop
        noop
        noop
        addx 8
        noop
        addx -1
        addx 2
        addx 1
        noop
        addx 17
        addx -9
        addx 1
        addx 1
        addx -3
        addx 11
        noop
        noop
        addx 1
        noop
        addx 1
        noop
        noop
        addx -13
        addx -19
        addx 1
        addx 3
        addx 26
        addx -30
        addx 12
        addx -1
        addx 3
        addx 1
        noop
        noop
        noop
        addx -9
        addx 18
        addx 1
        addx 2
        noop
        noop
        addx 9
        noop
        noop
        noop
        addx -1
        addx 2
        addx -37
        addx 1
        addx 3
        noop
        addx 15
        addx -21
        addx 22
        addx -6
        addx 1
        noop
        addx 2
        addx 1
        noop
        addx -10
        noop
        noop
        addx 20
        addx 1
        addx 2
        addx 2
        addx -6
        addx -11
        noop
        noop
        noop
    "};

    const EXAMPLE_SCREEN: &str = indoc! {"
        ##..##..##..##..##..##..##..##..##..##..
        ###...###...###...###...###...###...###.
        ####....####....####....####....####....
        #####.....#####.....#####.....#####.....
        ######......######......######......####
        #######.......#######.......#######.....
    "};

    #[test]
    fn part1_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "13140");
    }

    #[test]
    fn part2_example_falls_back_to_image() {
        assert_eq!(solve::<Solver>(EXAMPLE, 2), EXAMPLE_SCREEN.trim_end());
    }

    #[test]
    fn register_timeline() {
        let trace = Solver::parse("noop\naddx 3\naddx -5\n").unwrap();
        assert_eq!(trace.x, vec![1, 1, 1, 4, 4, -1]);
        assert_eq!(trace.x_during(100), -1);
    }

    #[test]
    fn part2_reads_letters() {
        let rows = [
            "###...##..###..#..#.###..####..##..###..",
            "#..#.#..#.#..#.#..#.#..#.#....#..#.#..#.",
            "#..#.#....#..#.####.###..###..#..#.###..",
            "###..#.##.###..#..#.#..#.#....####.#..#.",
            "#....#..#.#....#..#.#..#.#....#..#.#..#.",
            "#.....###.#....#..#.###..####.#..#.###..",
        ];
        // park the sprite on lit pixels and well away from dark ones
        let x = rows
            .iter()
            .flat_map(|row| row.chars().enumerate())
            .map(|(col, pixel)| col as i64 + if pixel == '#' { 0 } else { 10 })
            .collect();
        let mut trace = Trace { x };
        assert_eq!(render_screen(&trace), rows);
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut trace).unwrap(), "PGPHBEAB");
    }
}
