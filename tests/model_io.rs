mod common;

use tempfile::tempdir;

use std::fs;

use minilinear::prelude::*;
use minilinear::Error;


#[cfg(test)]
pub mod model_io_tests {
    use super::*;
    use super::common::three_classes;


    fn small_model() -> LinearModel {
        let labels = LabelSet::new(["cat", "dog"]);
        let columns = vec![
            LinearSeparator::new(vec![0.5, -0.3, 0.1], 0.0),
            LinearSeparator::new(vec![-1.0 / 3.0, 2e-17, 7.25], -0.125),
        ];
        LinearModel::from_separators(labels, 3, &columns).unwrap()
    }


    #[test]
    fn plain_model_round_trip() {
        let dir = tempdir().unwrap();
        let model = small_model();

        for name in ["model.txt", "model.txt.gz"] {
            let path = dir.path().join(name);
            model.save(&path).unwrap();
            let loaded = LinearModel::load(&path).unwrap();
            assert_eq!(loaded, model);

            let x = FeatureVector::binary(vec![0, 2]).unwrap();
            let cat = loaded.label_index("cat").unwrap();
            assert_eq!(loaded.score(cat, &x), 0.5 + 0.1);
        }

        let raw = fs::read(dir.path().join("model.txt.gz")).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
        let text = fs::read_to_string(dir.path().join("model.txt")).unwrap();
        assert!(text.starts_with("2\n3\nlabels cat dog\n"));
    }


    #[test]
    fn gzip_is_detected_from_the_content() {
        let dir = tempdir().unwrap();
        let gz = dir.path().join("model.gz");
        small_model().save(&gz).unwrap();

        let renamed = dir.path().join("model.bin");
        fs::rename(&gz, &renamed).unwrap();
        assert_eq!(LinearModel::load(&renamed).unwrap(), small_model());
    }


    #[test]
    fn trained_models_round_trip() {
        let dir = tempdir().unwrap();
        let set = three_classes(40);
        let solver = DualCoordinateDescent::new(LossType::L1).c(1.0).bias(1.0);

        let model: Model = LinearTrainer::new(solver.clone())
            .run(&set, 2)
            .unwrap()
            .into();
        let path = dir.path().join("plain.txt");
        model.save(&path).unwrap();
        assert_eq!(Model::load(&path).unwrap(), model);

        let model: Model = VoteTrainer::new(solver)
            .n_votes(3)
            .run(&set, 2)
            .unwrap()
            .into();
        let path = dir.path().join("vote.txt.gz");
        model.save(&path).unwrap();
        let loaded = Model::load(&path).unwrap();
        assert_eq!(loaded, model);
        assert!(matches!(loaded, Model::Vote(ref m) if m.n_votes() == 3));

        for i in 0..set.len() {
            assert_eq!(loaded.predict(set.features(i)), model.predict(set.features(i)));
        }
        assert!(LinearModel::load(&path).is_err());
    }


    #[test]
    fn malformed_files() {
        let dir = tempdir().unwrap();
        let cases = [
            ("x\n", 1),
            ("2\n3\nlabels cat\n", 3),
            ("2\n1\nlabels cat dog\nbias 0 0\n1 2 3\n", 5),
            ("2\n1\nlabels cat dog\nbias 0 nan?\n1 2\n", 4),
            ("2\n1\nlabels cat dog\nbias 0 0\n1 2\nextra\n", 6),
            ("0\n0\nlabels\nbias\n", 1),
            ("2\n18446744073709551615\nlabels cat dog\nbias 0 0\n1\n", 2),
            ("1\n1\nlabels cat\nvotes 18446744073709551615\n", 5),
            ("1\n1\nlabels cat\nvotesX 1\n", 4),
        ];
        for (k, (text, expected)) in cases.into_iter().enumerate() {
            let path = dir.path().join(format!("bad{k}.txt"));
            fs::write(&path, text).unwrap();
            match Model::load(&path) {
                Err(Error::ModelFormat { line, .. }) => {
                    assert_eq!(line, expected, "case {k}");
                },
                other => panic!("case {k}: unexpected {other:?}"),
            }
        }
    }


    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("model.txt");
        assert!(small_model().save(&path).is_err());
        assert!(!path.exists());
    }


    #[test]
    fn save_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.txt");
        fs::write(&path, "old content").unwrap();

        small_model().save(&path).unwrap();
        assert_eq!(LinearModel::load(&path).unwrap(), small_model());
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
