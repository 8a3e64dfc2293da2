#![allow(dead_code)]

use ferrous_mlp::{Matrix, MatrixError, Network, Sample};

/// In-memory sample with an explicit one-hot target.
#[derive(Debug, Clone)]
pub struct Labeled {
    pub input: Vec<f32>,
    pub label: usize,
    pub classes: usize,
}

impl Labeled {
    pub fn new(input: Vec<f32>, label: usize, classes: usize) -> Labeled {
        Labeled { input, label, classes }
    }
}

impl Sample for Labeled {
    fn to_input(&self) -> Result<Matrix<f32>, MatrixError> {
        Ok(Matrix::column(self.input.clone()))
    }

    fn to_target(&self) -> Result<Matrix<f32>, MatrixError> {
        let mut target = Matrix::zeros(self.classes, 1)?;
        target.set(self.label, 0, 1.0)?;
        Ok(target)
    }

    fn label(&self) -> usize {
        self.label
    }
}

/// 2 -> 3 -> 2 network with fixed parameters.
pub fn fixed_network() -> Network {
    Network::from_parameters(
        vec![2, 3, 2],
        vec![
            Matrix::from_data(vec![vec![0.2, -0.4], vec![0.7, 0.1], vec![-0.5, 0.3]]).unwrap(),
            Matrix::from_data(vec![vec![0.6, -0.2, 0.4], vec![-0.3, 0.8, 0.1]]).unwrap(),
        ],
        vec![
            Matrix::column(vec![0.1, -0.2, 0.05]),
            Matrix::column(vec![0.0, 0.3]),
        ],
    )
    .unwrap()
}

/// Two linearly separable clusters: label 0 near (0, 0), label 1 near (1, 1).
pub fn two_clusters(n: usize) -> Vec<Labeled> {
    (0..n)
        .map(|i| {
            let jitter = (i % 7) as f32 * 0.02;
            if i % 2 == 0 {
                Labeled::new(vec![0.1 + jitter, 0.15 - jitter], 0, 2)
            } else {
                Labeled::new(vec![0.9 - jitter, 0.85 + jitter], 1, 2)
            }
        })
        .collect()
}
