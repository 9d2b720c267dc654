//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = TraghettoError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum TraghettoError {
    EmptySample(EmptySampleError),
    EmptyFeatureSet(EmptyFeatureSetError),
    InvalidModel(InvalidModelError),
    InvalidArgument(InvalidArgumentError),
    JsonError(serde_json::Error),
    IoError(std::io::Error),
}

impl TraghettoError {
    pub(crate) fn empty_sample() -> Self {
        Self::EmptySample(EmptySampleError {})
    }

    pub(crate) fn empty_feature_set() -> Self {
        Self::EmptyFeatureSet(EmptyFeatureSetError {})
    }

    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for TraghettoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptySample(e) => e.fmt(f),
            Self::EmptyFeatureSet(e) => e.fmt(f),
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::JsonError(e) => e.fmt(f),
            Self::IoError(e) => e.fmt(f),
        }
    }
}

impl Error for TraghettoError {}

/// Error used when a classifier is trained against a sample with no events.
#[derive(Debug)]
pub struct EmptySampleError {}

impl fmt::Display for EmptySampleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EmptySampleError: the sample contains no events")
    }
}

impl Error for EmptySampleError {}

/// Error used when a classifier is trained against an empty feature set.
#[derive(Debug)]
pub struct EmptyFeatureSetError {}

impl fmt::Display for EmptyFeatureSetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EmptyFeatureSetError: the feature set contains no features")
    }
}

impl Error for EmptyFeatureSetError {}

/// Error used when a persisted model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when an argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<serde_json::Error> for TraghettoError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error)
    }
}

impl From<std::io::Error> for TraghettoError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}
