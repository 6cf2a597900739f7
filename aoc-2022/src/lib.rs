//! Advent of Code 2022 puzzle solutions with automatic registration
//!
//! Each day lives in its own module and registers itself through the
//! `AutoRegisterSolver` derive, so linking this crate is enough for the
//! runner to discover every solver.

pub mod utils;
pub mod year_2022;

#[cfg(test)]
mod tests {
    use aoc_solver::SolverRegistryBuilder;

    #[test]
    fn all_days_are_registered() {
        let registry = SolverRegistryBuilder::new()
            .register_solver_plugins(|plugin| plugin.tags.contains(&"2022"))
            .unwrap()
            .build();

        let days: Vec<u8> = registry
            .iter_info()
            .filter(|info| info.year == 2022)
            .map(|info| info.day)
            .collect();
        assert_eq!(days, (1..=25).collect::<Vec<_>>());

        for info in registry.iter_info() {
            let expected = if info.day == 25 { 1 } else { 2 };
            assert_eq!(info.parts, expected, "day {}", info.day);
        }
    }

    #[test]
    fn solves_through_registry() {
        let registry = SolverRegistryBuilder::new()
            .register_all_plugins()
            .unwrap()
            .build();

        let input = "1000\n2000\n3000\n\n4000\n\n5000\n6000\n\n7000\n8000\n9000\n\n10000\n";
        let mut solver = registry.create_solver(2022, 1, input).unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "24000");
        assert_eq!(solver.solve(2).unwrap().answer, "45000");
    }
}
