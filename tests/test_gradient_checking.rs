// Analytic gradients from backprop against central finite differences of the
// quadratic cost, for every weight and bias independently.

mod common;

use ferrous_mlp::{Matrix, Network, Sample};

use common::{fixed_network, Labeled};

const EPS: f32 = 1e-2;
const TOLERANCE: f64 = 1e-3;

fn cost(net: &Network, sample: &Labeled) -> f64 {
    let out = net.feed(&sample.to_input().unwrap()).unwrap();
    let target = sample.to_target().unwrap();
    out.as_slice()
        .iter()
        .zip(target.as_slice())
        .map(|(&a, &y)| 0.5 * (f64::from(a) - f64::from(y)).powi(2))
        .sum()
}

fn perturbed(net: &Network, weight: bool, layer: usize, index: (usize, usize), delta: f32) -> Network {
    let mut weights: Vec<Matrix<f32>> = net.weights().to_vec();
    let mut biases: Vec<Matrix<f32>> = net.biases().to_vec();
    let target = if weight { &mut weights[layer] } else { &mut biases[layer] };
    target[index] += delta;
    Network::from_parameters(net.layer_sizes().to_vec(), weights, biases).unwrap()
}

fn numeric(net: &Network, sample: &Labeled, weight: bool, layer: usize, index: (usize, usize)) -> f64 {
    let plus = cost(&perturbed(net, weight, layer, index, EPS), sample);
    let minus = cost(&perturbed(net, weight, layer, index, -EPS), sample);
    (plus - minus) / (2.0 * f64::from(EPS))
}

fn check_all(net: &Network, sample: &Labeled) {
    let grads = net.backprop(sample).unwrap();
    assert_eq!(grads.weights.len(), net.weights().len());

    for layer in 0..net.weights().len() {
        let w = &grads.weights[layer];
        for r in 0..w.rows() {
            for c in 0..w.cols() {
                let analytic = f64::from(w[(r, c)]);
                let approx = numeric(net, sample, true, layer, (r, c));
                assert!(
                    (analytic - approx).abs() < TOLERANCE,
                    "dC/dW[{layer}][{r},{c}]: analytic {analytic}, numeric {approx}"
                );
            }
        }

        let b = &grads.biases[layer];
        for r in 0..b.rows() {
            let analytic = f64::from(b[(r, 0)]);
            let approx = numeric(net, sample, false, layer, (r, 0));
            assert!(
                (analytic - approx).abs() < TOLERANCE,
                "dC/db[{layer}][{r}]: analytic {analytic}, numeric {approx}"
            );
        }
    }
}

#[test]
fn gradients_match_finite_differences_one_hidden_layer() {
    check_all(&fixed_network(), &Labeled::new(vec![0.3, -0.7], 0, 2));
    check_all(&fixed_network(), &Labeled::new(vec![-1.2, 0.4], 1, 2));
}

#[test]
fn gradients_match_finite_differences_two_hidden_layers() {
    // Deep enough that a wrong weight index in the backward pass changes shapes
    // or values somewhere.
    let net = Network::from_parameters(
        vec![3, 4, 3, 2],
        vec![
            Matrix::from_data(vec![
                vec![0.1, -0.3, 0.5],
                vec![0.4, 0.2, -0.6],
                vec![-0.7, 0.1, 0.3],
                vec![0.2, 0.8, -0.1],
            ])
            .unwrap(),
            Matrix::from_data(vec![
                vec![0.3, -0.5, 0.2, 0.6],
                vec![-0.4, 0.1, 0.7, -0.2],
                vec![0.5, 0.3, -0.3, 0.1],
            ])
            .unwrap(),
            Matrix::from_data(vec![vec![0.9, -0.6, 0.4], vec![-0.2, 0.5, -0.8]]).unwrap(),
        ],
        vec![
            Matrix::column(vec![0.05, -0.1, 0.2, 0.0]),
            Matrix::column(vec![-0.3, 0.1, 0.25]),
            Matrix::column(vec![0.1, -0.05]),
        ],
    )
    .unwrap();

    check_all(&net, &Labeled::new(vec![0.5, -0.2, 0.9], 1, 2));
}

#[test]
fn batch_step_is_the_averaged_gradient() {
    let samples = vec![
        Labeled::new(vec![0.3, -0.7], 0, 2),
        Labeled::new(vec![-1.2, 0.4], 1, 2),
        Labeled::new(vec![0.8, 0.8], 1, 2),
    ];
    let eta = 0.5f32;

    let start = fixed_network();
    let per_sample: Vec<_> = samples.iter().map(|s| start.backprop(s).unwrap()).collect();

    let mut trained = start.clone();
    trained.train_batch(&samples, eta).unwrap();

    for layer in 0..start.weights().len() {
        for (i, &w0) in start.weights()[layer].as_slice().iter().enumerate() {
            let g: f32 = per_sample.iter().map(|p| p.weights[layer].as_slice()[i]).sum();
            let expected = w0 - eta / 3.0 * g;
            let got = trained.weights()[layer].as_slice()[i];
            assert!((got - expected).abs() < 1e-6, "weight {layer}/{i}: {got} vs {expected}");
        }
        for (i, &b0) in start.biases()[layer].as_slice().iter().enumerate() {
            let g: f32 = per_sample.iter().map(|p| p.biases[layer].as_slice()[i]).sum();
            let expected = b0 - eta / 3.0 * g;
            let got = trained.biases()[layer].as_slice()[i];
            assert!((got - expected).abs() < 1e-6, "bias {layer}/{i}: {got} vs {expected}");
        }
    }
}
