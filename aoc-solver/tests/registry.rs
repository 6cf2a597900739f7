use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, FactoryInfo, ParseError, PartSolver,
    RegistrationError, SolveError, SolverError, SolverRegistryBuilder, register_solver,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2030, day = 7, tags = ["test", "numbers"])]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|l| {
                l.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("expected integer, got {l:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2030, day = 8, tags = ["test"])]
struct Echo;

impl AocParser for Echo {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Echo {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.trim().to_string())
    }
}

#[test]
fn manual_registration_solves_parts() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, SumProduct, 2022, 1);
    let registry = builder.build();

    let mut solver = registry.create_solver(2022, 1, "2\n3\n4").unwrap();
    assert_eq!(solver.year(), 2022);
    assert_eq!(solver.day(), 1);
    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "9");
    assert_eq!(solver.solve(2).unwrap().answer, "24");
    assert!(solver.parse_end() >= solver.parse_start());
}

#[test]
fn solving_out_of_range_part_through_instance_fails() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, Echo, 2022, 2);
    let registry = builder.build();

    let mut solver = registry.create_solver(2022, 2, "hi").unwrap();
    assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
}

#[test]
fn registration_with_runtime_year_and_day() {
    let mut builder = SolverRegistryBuilder::new();
    let year = 2021;
    for day in 1..=5 {
        register_solver!(builder, Echo, year, day);
    }
    let registry = builder.build();

    assert_eq!(registry.len(), 5);
    for day in 1..=5 {
        let solver = registry.create_solver(year, day, "x").unwrap();
        assert_eq!((solver.year(), solver.day()), (year, day));
    }
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, Echo, 2022, 3);

    let result = builder.register(2022, 3, 1, |input: &str| {
        Ok(Box::new(aoc_solver::SolverInstance::<Echo>::new(2022, 3, input)?))
    });
    assert!(matches!(
        result,
        Err(RegistrationError::DuplicateSolver(2022, 3))
    ));
}

#[test]
fn out_of_range_registration_is_rejected() {
    for (year, day) in [(2014, 1), (2035, 1), (2022, 0), (2022, 26)] {
        let result = SolverRegistryBuilder::new().register(year, day, 1, |input: &str| {
            Ok(Box::new(aoc_solver::SolverInstance::<Echo>::new(2022, 1, input)?))
        });
        assert!(matches!(
            result,
            Err(RegistrationError::InvalidYearDay(y, d)) if y == year && d == day
        ));
    }
}

#[test]
fn lookup_errors() {
    let registry = SolverRegistryBuilder::new().build();
    assert!(registry.is_empty());
    assert!(matches!(
        registry.create_solver(2022, 5, ""),
        Err(SolverError::NotFound(2022, 5))
    ));
    assert!(matches!(
        registry.create_solver(1999, 5, ""),
        Err(SolverError::InvalidYearDay(1999, 5))
    ));
}

#[test]
fn parse_failure_surfaces_as_solver_error() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, SumProduct, 2022, 4);
    let registry = builder.build();

    let result = registry.create_solver(2022, 4, "1\nnope");
    assert!(matches!(
        result,
        Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
    ));
}

#[test]
fn info_is_ordered_by_year_then_day() {
    let mut builder = SolverRegistryBuilder::new();
    register_solver!(builder, Echo, 2023, 1);
    register_solver!(builder, SumProduct, 2022, 25);
    register_solver!(builder, Echo, 2022, 2);
    let registry = builder.build();

    let info: Vec<FactoryInfo> = registry.iter_info().collect();
    let keys: Vec<(u16, u8, u8)> = info.iter().map(|i| (i.year, i.day, i.parts)).collect();
    assert_eq!(keys, vec![(2022, 2, 1), (2022, 25, 2), (2023, 1, 1)]);
    assert_eq!(registry.len(), 3);
    assert!(registry.contains(2022, 25));
    assert!(!registry.contains(2022, 24));
    assert_eq!(registry.get_info(2022, 25).map(|i| i.parts), Some(2));
}

#[test]
fn plugins_register_through_inventory() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2030, 7, "5\n6\n7").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "18");
    assert_eq!(solver.solve(2).unwrap().answer, "210");

    let mut echo = registry.create_solver(2030, 8, "  hello \n").unwrap();
    assert_eq!(echo.solve(1).unwrap().answer, "hello");
}

#[test]
fn plugins_filtered_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"numbers"))
        .unwrap()
        .build();

    assert!(registry.contains(2030, 7));
    assert!(!registry.contains(2030, 8));
}

#[test]
fn registering_plugins_twice_reports_duplicates() {
    let result = SolverRegistryBuilder::new()
        .register_all_plugins()
        .and_then(|b| b.register_all_plugins());
    assert!(matches!(
        result,
        Err(RegistrationError::DuplicateSolver(2030, _))
    ));
}
