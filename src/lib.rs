//! Selective cloning of XML Schema complex type definitions.
//!
//! See [`xmlschemas`] for the data model and the cloning functions.

#![warn(unused_mut)]
#![warn(unused_imports)]
#![warn(unused_variables)]

pub mod xmlschemas;
