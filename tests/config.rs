mod common;

use tempfile::tempdir;

use std::fs;

use minilinear::prelude::*;


#[cfg(test)]
pub mod config_tests {
    use super::*;
    use super::common::three_classes;


    #[test]
    fn train_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{
            "loss": "l2",
            "c": 1.0,
            "bias": 1.0,
            "n_threads": 3,
            "ensemble": { "type": "vote", "n_votes": 3, "seed": 11 }
        }"#).unwrap();

        let config = TrainConfig::from_json_file(&path).unwrap();
        assert_eq!(config.loss, LossType::L2);
        assert_eq!(config.eps, 0.1);

        let set = three_classes(50);
        let model = config.train(&set).unwrap();
        let Model::Vote(ref vote) = model else {
            panic!("expected a voted model");
        };
        assert_eq!(vote.n_votes(), 3);
        assert!(model.accuracy(&set) > 0.9);

        let model_path = dir.path().join("model.txt");
        model.save(&model_path).unwrap();
        assert_eq!(Model::load(&model_path).unwrap(), model);
    }


    #[test]
    fn each_ensemble_trains() {
        let set = three_classes(51);
        let ensembles = [
            Ensemble::None,
            Ensemble::AdaBoost { max_rounds: 5 },
            Ensemble::Vote { n_votes: 2, seed: 0 },
        ];
        for ensemble in ensembles {
            let config = TrainConfig {
                bias: Some(1.0),
                ensemble,
                ..TrainConfig::default()
            };
            let model = config.train(&set).unwrap();
            assert_eq!(model.n_labels(), 3);
            assert_eq!(model.n_features(), 2);
            assert_eq!(matches!(model, Model::Vote(_)), matches!(ensemble, Ensemble::Vote { .. }));
        }
    }


    #[test]
    fn invalid_config_fails_before_training() {
        let set = three_classes(52);
        let config = TrainConfig { bias: Some(-1.0), ..TrainConfig::default() };
        assert!(config.train(&set).is_err());

        let config = TrainConfig::from_json_str(r#"{"ensemble": {"type": "bagging"}}"#);
        assert!(config.is_err());
    }
}
