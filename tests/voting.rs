mod common;

use rand::prelude::*;

use minilinear::prelude::*;
use minilinear::bootstrap;


#[cfg(test)]
pub mod voting_tests {
    use super::*;
    use super::common::three_classes;


    #[test]
    fn bootstrap_keeps_class_counts() {
        let positives = (0..7).collect::<Vec<_>>();
        let negatives = (7..20).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let rows = bootstrap(&positives, &negatives, &mut rng);
            assert_eq!(rows.len(), 20);
            let n_pos = rows.iter().filter(|&&r| r < 7).count();
            assert_eq!(n_pos, 7);
        }
    }


    #[test]
    fn vote_model_shape() {
        let set = three_classes(21);
        let solver = DualCoordinateDescent::new(LossType::L1).c(1.0).bias(1.0);
        let model = VoteTrainer::new(solver)
            .n_votes(5)
            .seed(3)
            .run(&set, 2)
            .unwrap();

        assert_eq!(model.n_votes(), 5);
        assert_eq!(model.n_labels(), 3);
        assert!(model.votes().iter().all(|v| v.n_labels() == 3));
        let accuracy = model.accuracy(&set);
        assert!(accuracy > 0.9, "accuracy {accuracy}");
    }


    #[test]
    fn seeds_change_the_votes() {
        let set = three_classes(22);
        let solver = DualCoordinateDescent::new(LossType::L1).c(1.0);
        let trainer = VoteTrainer::new(solver).n_votes(2);

        let a = trainer.clone().seed(1).run(&set, 2).unwrap();
        let b = trainer.clone().seed(1).run(&set, 2).unwrap();
        let c = trainer.seed(2).run(&set, 2).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.votes(), c.votes());
    }


    #[test]
    fn aggregations() {
        let set = three_classes(23);
        let solver = DualCoordinateDescent::new(LossType::L2).c(1.0).bias(1.0);
        let model = VoteTrainer::new(solver)
            .n_votes(4)
            .run(&set, 2)
            .unwrap();
        let x = set.features(0);

        for label in 0..set.n_labels() {
            let votes = model.vote_scores(label, x);
            assert_eq!(votes.len(), 4);
            let sum = votes.iter().sum::<f64>();
            let positive = votes.iter().filter(|&&s| s > 0.0).count() as f64;

            let model = model.clone().aggregation(Aggregation::Sum);
            assert!((model.score(label, x) - sum).abs() < 1e-12);
            let model = model.aggregation(Aggregation::Mean);
            assert!((model.score(label, x) - sum / 4.0).abs() < 1e-12);
            let model = model.aggregation(Aggregation::Majority);
            assert_eq!(model.score(label, x), positive);
        }
    }
}
