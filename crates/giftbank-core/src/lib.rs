//! giftbank-core — GIFT question bank model, parser, writer, and validation.
//!
//! This crate defines the data model for exams and questions, the
//! bidirectional GIFT text parser/serializer, and the validation rules the
//! rest of giftbank builds on.

pub mod classify;
pub mod error;
pub mod model;
pub mod parser;
pub mod validate;
pub mod writer;
