//! Core data types for the postboard pipeline.
//!
//! This crate holds the types every stage shares: fetched tabular results,
//! the typed [`Post`] record with its derived [`LikeRate`], the
//! [`PresentationUnit`] a surface displays, and the [`DropReport`] that
//! accounts for rows the pipeline could not use.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod post;
mod presentation;
mod report;
mod table;

pub use media::MediaType;
pub use post::{LikeRate, Post, PostBuilder, PostBuilderError};
pub use presentation::{MediaDescriptor, MetricValue, NOT_AVAILABLE, PresentationUnit};
pub use report::{DROP_SAMPLE_LIMIT, DropReport, DroppedRow};
pub use table::{Column, ColumnType, Row, TabularResult};
