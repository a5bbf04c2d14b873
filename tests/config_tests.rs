mod common;

use common::NaughtsAndCrosses;
use mcts_engine::{MCTSConfig, MCTSError, SearchBudget, MCTS};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_iteration_limit(5000)
        .with_seed(99);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.iteration_limit, Some(5000));
    assert_eq!(config.time_limit, None);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.budget(), Ok(SearchBudget::Iterations(5000)));

    let timed = MCTSConfig::default().with_time_limit_ms(250);
    assert_eq!(timed.time_limit, Some(Duration::from_millis(250)));
    assert_eq!(timed.budget(), Ok(SearchBudget::Time(Duration::from_millis(250))));
}

#[test]
fn test_config_default_values() {
    let config = MCTSConfig::default();

    assert_eq!(config.exploration_constant, std::f64::consts::SQRT_2);
    assert_eq!(config.iteration_limit, None);
    assert_eq!(config.time_limit, None);
    assert_eq!(config.seed, None);
}

#[test]
fn test_both_limits_rejected() {
    let config = MCTSConfig::default()
        .with_time_limit(Duration::from_millis(100))
        .with_iteration_limit(100);

    assert!(matches!(
        config.budget(),
        Err(MCTSError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        MCTS::<NaughtsAndCrosses>::new(config),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_missing_limit_rejected() {
    let result = MCTS::<NaughtsAndCrosses>::new(MCTSConfig::default());

    match result {
        Err(e) => assert!(
            format!("{}", e).contains("either a time limit or an iteration limit"),
            "unexpected message: {}",
            e
        ),
        Ok(_) => panic!("A configuration without a budget must be rejected"),
    }
}

#[test]
fn test_non_positive_limits_rejected() {
    let zero_iterations = MCTSConfig::default().with_iteration_limit(0);
    assert!(matches!(
        zero_iterations.budget(),
        Err(MCTSError::InvalidConfiguration(_))
    ));

    let zero_time = MCTSConfig::default().with_time_limit_ms(0);
    assert!(matches!(
        zero_time.budget(),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_bad_exploration_constant_rejected() {
    for constant in [f64::NAN, f64::INFINITY, -1.0] {
        let config = MCTSConfig::default()
            .with_iteration_limit(10)
            .with_exploration_constant(constant);
        assert!(
            matches!(config.budget(), Err(MCTSError::InvalidConfiguration(_))),
            "constant {} should be rejected",
            constant
        );
    }
}

#[test]
fn test_engine_exposes_validated_settings() {
    let config = MCTSConfig::default()
        .with_iteration_limit(7)
        .with_exploration_constant(0.5);
    let mcts = MCTS::<NaughtsAndCrosses>::new(config).unwrap();

    assert_eq!(mcts.budget(), SearchBudget::Iterations(7));
    assert_eq!(mcts.exploration_constant(), 0.5);
    assert!(mcts.tree().is_none());
}
