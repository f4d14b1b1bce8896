use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use minilinear::prelude::*;


fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("MINILINEAR_LOG", "info"))
        .init();

    let matches = Command::new("minilinear")
        .version(clap::crate_version!())
        .about("Linear SVMs trained by dual coordinate descent")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train a one-vs-all model from an instance file")
                .arg(instances_arg())
                .arg(model_arg("Path the trained model is written to (*.gz for gzip)"))
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON training configuration. \
                               The options below override its fields.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("loss")
                        .long("loss")
                        .help("Loss function")
                        .value_parser(["l1", "l2"]),
                )
                .arg(
                    Arg::new("cost")
                        .long("cost")
                        .help("Regularization parameter C")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("eps")
                        .long("eps")
                        .help("Stopping tolerance")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("bias")
                        .long("bias")
                        .help("Value of the constant bias feature")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help("Number of worker threads (0 = all cores)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("boost")
                        .long("boost")
                        .help("Boost every label for at most this many rounds")
                        .value_parser(clap::value_parser!(usize))
                        .conflicts_with("votes"),
                )
                .arg(
                    Arg::new("votes")
                        .long("votes")
                        .help("Train this many bootstrap votes per label")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed of the bootstrap resampling")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(valued_arg())
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .help("Print the training progress")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("evaluate")
                .about("Print the accuracy of a model on an instance file")
                .arg(instances_arg())
                .arg(model_arg("Path to the trained model"))
                .arg(valued_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("evaluate", sub_m)) => handle_evaluate(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}


fn instances_arg() -> Arg {
    Arg::new("instances")
        .short('i')
        .long("instances")
        .help("Path to the instance file, one `<label> <index>[:<value>] ...` per line")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}


fn model_arg(help: &'static str) -> Arg {
    Arg::new("model")
        .short('m')
        .long("model")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}


fn valued_arg() -> Arg {
    Arg::new("valued")
        .long("valued")
        .help("Features carry explicit `index:value` pairs")
        .action(ArgAction::SetTrue)
}


fn read_instances(matches: &ArgMatches) -> Result<InstanceSet> {
    let path: &PathBuf = matches.get_one("instances")
        .context("missing instance file")?;
    let kind = if matches.get_flag("valued") {
        FeatureKind::Valued
    } else {
        FeatureKind::Binary
    };

    InstanceReader::default()
        .file(path)
        .kind(kind)
        .read()
        .with_context(|| format!("failed to read instances from {path:?}"))
}


fn train_config(matches: &ArgMatches) -> Result<TrainConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => TrainConfig::from_json_file(path)
            .with_context(|| format!("failed to read the configuration {path:?}"))?,
        None => TrainConfig::default(),
    };

    if let Some(loss) = matches.get_one::<String>("loss") {
        config.loss = loss.parse()?;
    }
    if let Some(&c) = matches.get_one::<f64>("cost") {
        config.c = c;
    }
    if let Some(&eps) = matches.get_one::<f64>("eps") {
        config.eps = eps;
    }
    if let Some(&bias) = matches.get_one::<f64>("bias") {
        config.bias = Some(bias);
    }
    if let Some(&n_threads) = matches.get_one::<usize>("threads") {
        config.n_threads = n_threads;
    }

    let seed = matches.get_one::<u64>("seed").copied();
    if let Some(&max_rounds) = matches.get_one::<usize>("boost") {
        config.ensemble = Ensemble::AdaBoost { max_rounds };
    } else if let Some(&n_votes) = matches.get_one::<usize>("votes") {
        config.ensemble = Ensemble::Vote { n_votes, seed: seed.unwrap_or_default() };
    } else if let (Some(s), Ensemble::Vote { seed, .. }) = (seed, &mut config.ensemble) {
        *seed = s;
    }

    if matches.get_flag("verbose") {
        config.verbose = true;
    }
    Ok(config)
}


fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config = train_config(matches)?;
    let instances = read_instances(matches)?;
    log::info!("training with {}", serde_json::to_string(&config)?);

    let model = match config.train(&instances) {
        Ok(model) => model,
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    };

    let path: &PathBuf = matches.get_one("model")
        .context("missing model path")?;
    model.save(path)
        .with_context(|| format!("failed to save the model to {path:?}"))?;

    let accuracy = model.accuracy(&instances);
    println!("training accuracy: {:.4}", accuracy);
    Ok(())
}


fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let path: &PathBuf = matches.get_one("model")
        .context("missing model path")?;
    let model = Model::load(path)
        .with_context(|| format!("failed to load the model from {path:?}"))?;
    let instances = read_instances(matches)?;

    let accuracy = model.accuracy(&instances);
    println!(
        "accuracy: {:.4} ({} instances, {} labels)",
        accuracy, instances.len(), model.n_labels(),
    );
    Ok(())
}
