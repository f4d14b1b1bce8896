#![allow(dead_code)]
use rand::prelude::*;
use rand_distr::Normal;

use minilinear::prelude::*;


/// Draws `n_per_class` points around each center
/// with isotropic gaussian noise of standard deviation `sd`.
pub fn blobs(centers: &[(&str, [f64; 2])], n_per_class: usize, sd: f64, seed: u64)
    -> InstanceSet
{
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, sd).unwrap();

    let mut labels = Vec::new();
    let mut features = Vec::new();
    for _ in 0..n_per_class {
        for (name, [cx, cy]) in centers {
            let x = cx + noise.sample(&mut rng);
            let y = cy + noise.sample(&mut rng);
            labels.push(name.to_string());
            features.push(FeatureVector::valued(vec![(0, x), (1, y)]).unwrap());
        }
    }
    InstanceSet::new(labels, features, FeatureKind::Valued).unwrap()
}


/// Two well separated blobs.
pub fn separable(seed: u64) -> InstanceSet {
    blobs(&[("+1", [4.0, 4.0]), ("-1", [-4.0, -4.0])], 50, 0.5, seed)
}


/// Two overlapping blobs.
pub fn overlapping(seed: u64) -> InstanceSet {
    blobs(&[("+1", [1.0, 0.5]), ("-1", [-1.0, -0.5])], 60, 1.0, seed)
}


/// Three blobs on a triangle.
pub fn three_classes(seed: u64) -> InstanceSet {
    blobs(
        &[("A", [5.0, 0.0]), ("B", [-2.5, 4.3]), ("C", [-2.5, -4.3])],
        40, 1.0, seed,
    )
}
