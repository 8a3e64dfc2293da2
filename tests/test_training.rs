mod common;

use ferrous_mlp::{Network, NetworkError};
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{fixed_network, two_clusters, Labeled};

#[test]
fn trailing_short_batch_is_trained() {
    let samples = two_clusters(12);
    let mut net = fixed_network();
    let history = net.sgd(&samples, 1, 4, 1.0, &mut StdRng::seed_from_u64(1)).unwrap();

    let stats = &history[0];
    assert_eq!(stats.trained, 10);
    assert_eq!(stats.batches, 3); // 4 + 4 + 2
    assert_eq!(stats.evaluated, 2);
}

#[test]
fn exact_multiple_has_no_short_batch() {
    let samples = two_clusters(12);
    let mut net = fixed_network();
    let history = net.sgd(&samples, 1, 5, 1.0, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(history[0].batches, 2);
}

#[test]
fn short_batch_is_averaged_over_its_own_length() {
    let s = Labeled::new(vec![0.3, -0.7], 0, 2);

    let mut once = fixed_network();
    once.train_batch(&[s.clone()], 1.0).unwrap();

    let mut twice = fixed_network();
    twice.train_batch(&[s.clone(), s], 1.0).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn held_out_split_is_one_sixth() {
    let samples = two_clusters(5);
    let mut net = fixed_network();
    let history = net.sgd(&samples, 2, 3, 1.0, &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!(history.len(), 2);
    for (i, stats) in history.iter().enumerate() {
        assert_eq!(stats.epoch, i + 1);
        assert_eq!(stats.total_epochs, 2);
        assert_eq!((stats.trained, stats.evaluated), (4, 1));
        assert!(stats.correct <= stats.evaluated);
    }
}

#[test]
fn same_seed_same_run() {
    let samples = two_clusters(30);

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut net = Network::random(&[2, 3, 2], &mut rng).unwrap();
        let history = net.sgd(&samples, 3, 4, 2.0, &mut rng).unwrap();
        let accuracies: Vec<f64> = history.iter().map(|s| s.accuracy).collect();
        let costs: Vec<f64> = history.iter().map(|s| s.train_cost).collect();
        (net, accuracies, costs)
    };

    let (a, acc_a, cost_a) = run(99);
    let (b, acc_b, cost_b) = run(99);
    assert_eq!(a, b);
    assert_eq!(acc_a, acc_b);
    assert_eq!(cost_a, cost_b);

    let (c, _, _) = run(100);
    assert_ne!(a, c);
}

#[test]
fn learns_separable_clusters() {
    let samples = two_clusters(60);
    let mut rng = StdRng::seed_from_u64(7);
    let mut net = Network::random(&[2, 4, 2], &mut rng).unwrap();

    let before = net.validate(&samples).unwrap();
    let history = net.sgd(&samples, 40, 5, 3.0, &mut rng).unwrap();
    let after = net.validate(&samples).unwrap();

    assert!(after.mean_cost() < before.mean_cost());
    assert!(history.last().unwrap().train_cost < history[0].train_cost);
    assert!(after.accuracy() >= 0.95, "accuracy {after}");
}

#[test]
fn invalid_hyperparameters_are_rejected() {
    let samples = two_clusters(6);
    let mut net = fixed_network();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        net.sgd(&samples, 1, 0, 1.0, &mut rng),
        Err(NetworkError::InvalidHyperparameter(_))
    ));
    assert!(matches!(
        net.sgd(&samples, 1, 2, 0.0, &mut rng),
        Err(NetworkError::InvalidHyperparameter(_))
    ));
    assert_eq!(net, fixed_network());
}

#[test]
fn zero_epochs_changes_nothing() {
    let samples = two_clusters(6);
    let mut net = fixed_network();
    let history = net.sgd(&samples, 0, 2, 1.0, &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(history.is_empty());
    assert_eq!(net, fixed_network());
}
