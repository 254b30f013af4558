// Copyright 2026 the Svgtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::AId;

/// List of all errors.
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// The attribute name is not recognised.
    UnknownAttribute(String),

    /// The value is not a valid `<length>` or `<length-percentage>`.
    InvalidLength {
        /// Attribute that was being set.
        attribute: AId,
        /// Rejected value.
        value: String,
    },

    /// The value is not a valid `<angle>`.
    InvalidAngle {
        /// Attribute that was being set.
        attribute: AId,
        /// Rejected value.
        value: String,
    },

    /// The value is not one of the attribute keywords.
    InvalidKeyword {
        /// Attribute that was being set.
        attribute: AId,
        /// Rejected value.
        value: String,
    },

    /// The value cannot be parsed as a color, transform, number or font family list.
    InvalidValue {
        /// Attribute that was being set.
        attribute: AId,
        /// Rejected value.
        value: String,
    },

    /// The attribute does not accept negative values.
    NegativeValue {
        /// Attribute that was being set.
        attribute: AId,
        /// Rejected value.
        value: String,
    },

    /// A list of values was passed to an attribute that holds a single value.
    NotAList(AId),

    /// The font database has no face that can be used for the requested families.
    FontNotFound(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::UnknownAttribute(ref name) => {
                write!(f, "unknown attribute '{}'", name)
            }
            Error::InvalidLength {
                attribute,
                ref value,
            } => {
                write!(f, "'{}' is not a valid length for '{}'", value, attribute)
            }
            Error::InvalidAngle {
                attribute,
                ref value,
            } => {
                write!(f, "'{}' is not a valid angle for '{}'", value, attribute)
            }
            Error::InvalidKeyword {
                attribute,
                ref value,
            } => {
                write!(f, "'{}' is not a valid keyword for '{}'", value, attribute)
            }
            Error::InvalidValue {
                attribute,
                ref value,
            } => {
                write!(f, "'{}' is not a valid value for '{}'", value, attribute)
            }
            Error::NegativeValue {
                attribute,
                ref value,
            } => {
                write!(f, "'{}' cannot be negative, got '{}'", attribute, value)
            }
            Error::NotAList(attribute) => {
                write!(f, "'{}' does not accept a list of values", attribute)
            }
            Error::FontNotFound(ref families) => {
                write!(f, "no font face matches '{}'", families)
            }
        }
    }
}

impl std::error::Error for Error {}
