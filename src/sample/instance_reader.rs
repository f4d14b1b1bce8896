use std::io::BufRead;
use std::path::Path;

use super::feature_vector::{FeatureKind, FeatureVector};
use super::instance_set::InstanceSet;

use crate::common::fileio;
use crate::{Error, Result};


/// A struct that returns [`InstanceSet`].
/// Using this struct, one can read an instance file to [`InstanceSet`].
/// Each line of the file is
/// `<label> <index>[:<value>] <index>[:<value>] ...`,
/// where the indices are 0-based and strictly ascending.
/// Gzip-compressed files are read transparently.
/// # Example
/// ```no_run
/// use minilinear::prelude::*;
///
/// let instances = InstanceReader::default()
///     .file("/path/to/instances.txt")
///     .kind(FeatureKind::Valued)
///     .read()?;
/// # Ok::<(), minilinear::Error>(())
/// ```
pub struct InstanceReader<P> {
    file: Option<P>,
    kind: FeatureKind,
}


impl<P> Default for InstanceReader<P> {
    fn default() -> Self {
        Self {
            file: None,
            kind: FeatureKind::Binary,
        }
    }
}


impl<P> InstanceReader<P> {
    /// Set whether the features carry explicit values.
    /// Default is [`FeatureKind::Binary`].
    pub fn kind(mut self, kind: FeatureKind) -> Self {
        self.kind = kind;
        self
    }


    /// Reads instances from `reader`.
    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<InstanceSet> {
        let mut labels = Vec::new();
        let mut features = Vec::new();

        for (k, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = k + 1;
            let mut tokens = line.split_whitespace();

            let Some(label) = tokens.next() else { continue; };

            let x = match self.kind {
                FeatureKind::Binary => parse_binary(tokens, lineno)?,
                FeatureKind::Valued => parse_valued(tokens, lineno)?,
            };
            labels.push(label.to_string());
            features.push(x);
        }

        let set = InstanceSet::new(labels, features, self.kind)?;
        log::info!(
            "read {} instances, {} labels, {} features ({})",
            set.len(), set.n_labels(), set.n_features(), self.kind,
        );
        Ok(set)
    }
}


impl<P> InstanceReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    pub fn read(self) -> Result<InstanceSet> {
        let Some(file) = self.file.as_ref() else {
            return Err(Error::invalid(
                "file",
                "the instance file is not set. use `InstanceReader::file`."
            ));
        };
        let reader = fileio::open_reader(file)?;
        self.read_from(reader)
    }
}


// The largest index leaves room for the dimension `index + 1`.
fn parse_index(token: &str, lineno: usize) -> Result<usize> {
    let index = token.parse::<usize>()
        .map_err(|_| Error::parse(lineno, format!("invalid feature index `{token}`")))?;
    if index == usize::MAX {
        return Err(Error::parse(lineno, format!("feature index `{token}` is too large")));
    }
    Ok(index)
}


fn parse_binary<'a, I>(tokens: I, lineno: usize) -> Result<FeatureVector>
    where I: Iterator<Item = &'a str>
{
    let indices = tokens
        .map(|token| {
            if token.contains(':') {
                return Err(Error::parse(
                    lineno,
                    format!("`{token}` has a value, but the features are binary")
                ));
            }
            parse_index(token, lineno)
        })
        .collect::<Result<Vec<_>>>()?;

    FeatureVector::binary(indices)
        .map_err(|e| Error::parse(lineno, e.to_string()))
}


fn parse_valued<'a, I>(tokens: I, lineno: usize) -> Result<FeatureVector>
    where I: Iterator<Item = &'a str>
{
    let pairs = tokens
        .map(|token| {
            let (index, value) = match token.split_once(':') {
                Some((i, v)) => {
                    let v = v.parse::<f64>()
                        .map_err(|_| Error::parse(
                            lineno, format!("invalid feature value in `{token}`")
                        ))?;
                    (i, v)
                },
                None => (token, 1.0),
            };
            Ok((parse_index(index, lineno)?, value))
        })
        .collect::<Result<Vec<_>>>()?;

    FeatureVector::valued(pairs)
        .map_err(|e| Error::parse(lineno, e.to_string()))
}
