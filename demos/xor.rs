use ferrous_mlp::{Matrix, MatrixError, Network, Sample};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Xor {
    a: f32,
    b: f32,
}

impl Sample for Xor {
    fn to_input(&self) -> Result<Matrix<f32>, MatrixError> {
        Ok(Matrix::column(vec![self.a, self.b]))
    }

    fn to_target(&self) -> Result<Matrix<f32>, MatrixError> {
        let hot = self.label();
        Ok(Matrix::column(vec![(hot == 0) as u8 as f32, (hot == 1) as u8 as f32]))
    }

    fn label(&self) -> usize {
        (self.a != self.b) as usize
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::random(&[2, 4, 2], &mut rng)?;

    let samples = [
        Xor { a: 1.0, b: 0.0 },
        Xor { a: 1.0, b: 1.0 },
        Xor { a: 0.0, b: 1.0 },
        Xor { a: 0.0, b: 0.0 },
    ];

    for epoch in 0..5000 {
        let cost = network.train_batch(&samples, 2.0)?;
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: cost = {cost:.6}");
        }
    }

    for s in &samples {
        let output = network.feed(&s.to_input()?)?;
        println!("Input: [{}, {}] -> {:?}", s.a, s.b, output.as_slice());
    }
    println!("{}", network.validate(&samples)?);
    Ok(())
}
