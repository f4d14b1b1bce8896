//! Console progress of the trainers.
use colored::Colorize;

use crate::sample::InstanceSet;
use crate::trainer::Trainer;

const WIDTH: usize = 8;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// Print the trainer's settings and the shape of the instance set.
pub(crate) fn print_stats<T>(trainer: &T, set: &InstanceSet, n_threads: usize)
    where T: Trainer + ?Sized
{
    let header = format!(
        "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
        "", "STATS".bold(), "",
    );
    println!(
        "\n{header}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
        "Trainer".bold(),
        trainer.name().bold().green(),
    );

    if let Some(info) = trainer.info() {
        let line = info.into_iter()
            .map(|(key, val)| {
                format!(
                    "    + {:<STAT_WIDTH$}\t{:>width$}",
                    key,
                    val.bold().yellow(),
                    width = STAT_WIDTH - 8
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        println!("{line}");
    }

    let threads = if n_threads == 0 {
        "auto".to_string()
    } else {
        n_threads.to_string()
    };
    println!(
        "\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        {:=^FULL_WIDTH$}\n\
        ",
        "Instances".bold(),
        set.len().to_string().bold().green(),
        "Labels".bold(),
        set.n_labels().to_string().bold().green(),
        "Features".bold(),
        set.n_features().to_string().bold().green(),
        "Threads".bold(),
        threads.bold().green(),
        "".bold(),
    );
}


/// Print one line for a finished label.
pub(crate) fn print_label(name: &str, fields: &[(&str, String)]) {
    let fields = fields.iter()
        .map(|(key, val)| format!("[{key} {:>WIDTH$}]", val).bold().to_string())
        .collect::<Vec<_>>()
        .join("    ");
    println!(
        "{} {}    {}",
        "[FIN]".bold().bright_green(),
        format!("{:>WIDTH$}", name).bold().red(),
        fields.yellow(),
    );
}


/// Print the closing line of a run.
pub(crate) fn print_finished(n_labels: usize, millisec: u128) {
    println!(
        "\n{} {}\t{}\n",
        "[END]".bold().bright_green(),
        format!("{n_labels} labels").bold().red(),
        time_format(millisec).bold().cyan(),
    );
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}
