//! Struct `InstanceSet` represents a batch of training instances.

// Provides the sparse feature vector.
pub(crate) mod feature_vector;
// Provides the canonical label ordering.
pub(crate) mod label_set;
// Provides the instance set.
pub(crate) mod instance_set;

// Provides a struct that reads an instance file.
pub(crate) mod instance_reader;


pub use feature_vector::{FeatureKind, FeatureVector};
pub use label_set::LabelSet;
pub use instance_set::InstanceSet;
pub use instance_reader::InstanceReader;
