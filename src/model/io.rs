//! The model file format.
//!
//! ```text
//! <L>
//! <D>
//! labels <l_0> ... <l_{L-1}>
//! bias <b_0> ... <b_{L-1}>
//! <w_0> ... <w_{D*L-1}>
//! ```
//! A voted model replaces the last two lines by
//! `votes <V>` followed by `V` blocks of
//! `vote <k>`, a `bias` line, and a weight line.
//! The weight of feature `f` for label `l` is `w_{f*L + l}`.
use serde::{Serialize, Deserialize};

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use super::classifier::Classifier;
use super::linear::LinearModel;
use super::matrix::WeightMatrix;
use super::vote::VoteModel;

use crate::common::fileio;
use crate::sample::{FeatureVector, LabelSet};
use crate::{Error, Result};


/// A trained model of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Model {
    /// A plain (or boosted) one-vs-all model.
    Linear(LinearModel),
    /// A bootstrap-voting model.
    Vote(VoteModel),
}


impl Model {
    /// Writes this model to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        match self {
            Self::Linear(model) => model.save(path),
            Self::Vote(model) => model.save(path),
        }
    }


    /// Reads a model from `path`.
    /// The kind of the model is read from the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = fileio::open_reader(path)?;
        read_model(reader)
    }


    /// Returns the feature dimension.
    pub fn n_features(&self) -> usize {
        match self {
            Self::Linear(model) => model.n_features(),
            Self::Vote(model) => model.n_features(),
        }
    }
}


impl Classifier for Model {
    fn labels(&self) -> &LabelSet {
        match self {
            Self::Linear(model) => model.labels(),
            Self::Vote(model) => model.labels(),
        }
    }


    fn score(&self, label: usize, x: &FeatureVector) -> f64 {
        match self {
            Self::Linear(model) => model.score(label, x),
            Self::Vote(model) => model.score(label, x),
        }
    }
}


impl From<LinearModel> for Model {
    fn from(model: LinearModel) -> Self {
        Self::Linear(model)
    }
}


impl From<VoteModel> for Model {
    fn from(model: VoteModel) -> Self {
        Self::Vote(model)
    }
}


pub(super) fn save<P, F>(path: P, write: F) -> Result<()>
    where P: AsRef<Path>,
          F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    fileio::write_atomic(path, write)?;
    log::info!("saved the model to {}", path.display());
    Ok(())
}


pub(super) fn write_linear(w: &mut dyn Write, model: &LinearModel) -> Result<()> {
    write_header(w, model.labels(), model.n_features())?;
    write_matrix(w, model.matrix())
}


pub(super) fn write_vote(w: &mut dyn Write, model: &VoteModel) -> Result<()> {
    write_header(w, model.labels(), model.n_features())?;
    writeln!(w, "votes {}", model.n_votes())?;
    for (k, matrix) in model.votes().iter().enumerate() {
        writeln!(w, "vote {k}")?;
        write_matrix(w, matrix)?;
    }
    Ok(())
}


fn write_header(w: &mut dyn Write, labels: &LabelSet, n_features: usize) -> Result<()> {
    writeln!(w, "{}", labels.len())?;
    writeln!(w, "{n_features}")?;
    write!(w, "labels")?;
    for name in labels.iter() {
        write!(w, " {name}")?;
    }
    writeln!(w)?;
    Ok(())
}


// `Display` of `f64` is the shortest string that parses back
// to the same value.
fn write_matrix(w: &mut dyn Write, matrix: &WeightMatrix) -> Result<()> {
    write!(w, "bias")?;
    for b in matrix.intercepts() {
        write!(w, " {b}")?;
    }
    writeln!(w)?;

    let mut weights = matrix.weights().iter();
    if let Some(first) = weights.next() {
        write!(w, "{first}")?;
        for x in weights {
            write!(w, " {x}")?;
        }
    }
    writeln!(w)?;
    Ok(())
}


/// Line-numbered access to the non-blank lines of a model file.
struct ModelLines<R> {
    lines: std::io::Lines<R>,
    lineno: usize,
    peeked: Option<String>,
}


impl<R: BufRead> ModelLines<R> {
    fn new(reader: R) -> Self {
        Self { lines: reader.lines(), lineno: 0, peeked: None }
    }


    /// Hands `line` out again on the next call of `next_line`.
    fn unread(&mut self, line: String) {
        self.peeked = Some(line);
    }


    fn next_line(&mut self, expected: &str) -> Result<String> {
        if let Some(line) = self.peeked.take() {
            return Ok(line);
        }
        loop {
            let Some(line) = self.lines.next() else {
                return Err(Error::model_format(
                    self.lineno + 1,
                    format!("unexpected end of file, expected {expected}")
                ));
            };
            self.lineno += 1;
            let line = line?;
            if !line.trim().is_empty() {
                return Ok(line);
            }
        }
    }


    /// Reads a line of the form `<keyword> <value> ...`
    /// and returns the values.
    fn keyword_line(&mut self, keyword: &str) -> Result<Vec<String>> {
        let line = self.next_line(&format!("`{keyword}`"))?;
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(keyword) {
            return Err(self.error(format!("expected a `{keyword}` line")));
        }
        Ok(tokens.map(String::from).collect())
    }


    fn count(&mut self, what: &str) -> Result<usize> {
        let line = self.next_line(what)?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| self.error(format!("invalid {what} `{}`", line.trim())))
    }


    fn numbers<S: AsRef<str>>(&self, tokens: &[S], n: usize, what: &str)
        -> Result<Vec<f64>>
    {
        if tokens.len() != n {
            return Err(self.error(format!(
                "expected {n} {what}, found {}", tokens.len()
            )));
        }
        tokens.iter()
            .map(|token| {
                let token = token.as_ref();
                f64::from_str(token)
                    .map_err(|_| self.error(format!("invalid number `{token}`")))
            })
            .collect()
    }


    fn matrix(&mut self, n_labels: usize, n_features: usize) -> Result<WeightMatrix> {
        let bias = self.keyword_line("bias")?;
        let intercepts = self.numbers(&bias, n_labels, "intercepts")?;

        let n_weights = n_labels.checked_mul(n_features)
            .ok_or_else(|| self.error("the weight matrix is too large"))?;
        let weights = if n_weights == 0 {
            Vec::new()
        } else {
            let line = self.next_line("the weights")?;
            let tokens = line.split_whitespace().collect::<Vec<_>>();
            self.numbers(&tokens, n_weights, "weights")?
        };

        WeightMatrix::from_raw(n_labels, n_features, weights, intercepts)
            .map_err(|e| self.error(e.to_string()))
    }


    fn finish(&mut self) -> Result<()> {
        while let Some(line) = self.lines.next() {
            self.lineno += 1;
            if !line?.trim().is_empty() {
                return Err(self.error("trailing data after the model"));
            }
        }
        Ok(())
    }


    fn error<S: Into<String>>(&self, message: S) -> Error {
        Error::model_format(self.lineno, message)
    }
}


pub(super) fn read_model<R: BufRead>(reader: R) -> Result<Model> {
    let mut lines = ModelLines::new(reader);

    let n_labels = lines.count("label count")?;
    if n_labels == 0 {
        return Err(lines.error("a model needs at least one label"));
    }
    let n_features = lines.count("feature count")?;
    if n_labels.checked_mul(n_features).is_none() {
        return Err(lines.error(format!(
            "{n_labels} labels x {n_features} features overflow the weight matrix"
        )));
    }

    let names = lines.keyword_line("labels")?;
    if names.len() != n_labels {
        return Err(lines.error(format!(
            "expected {n_labels} labels, found {}", names.len()
        )));
    }
    let labels = LabelSet::from_ordered(names);
    if labels.len() != labels.iter().collect::<std::collections::HashSet<_>>().len() {
        return Err(lines.error("duplicated label"));
    }

    let kind = lines.next_line("`bias` or `votes`")?;
    let mut tokens = kind.split_whitespace();
    let model = if tokens.next() == Some("votes") {
        let n_votes = match (tokens.next(), tokens.next()) {
            (Some(v), None) => v.parse::<usize>().ok(),
            _ => None,
        };
        let n_votes = n_votes.ok_or_else(|| lines.error("invalid vote count"))?;

        // The count is untrusted, so the votes grow as they are read.
        let mut votes = Vec::new();
        for k in 0..n_votes {
            let header = lines.keyword_line("vote")?;
            if header.len() != 1 || header[0] != k.to_string() {
                return Err(lines.error(format!("expected `vote {k}`")));
            }
            votes.push(lines.matrix(n_labels, n_features)?);
        }
        let model = VoteModel::new(labels, votes)
            .map_err(|e| lines.error(e.to_string()))?;
        Model::Vote(model)
    } else {
        lines.unread(kind);
        let matrix = lines.matrix(n_labels, n_features)?;
        let model = LinearModel::new(labels, matrix)
            .map_err(|e| lines.error(e.to_string()))?;
        Model::Linear(model)
    };

    lines.finish()?;
    Ok(model)
}
