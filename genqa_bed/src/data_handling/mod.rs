pub mod exons;
pub mod hgnc;
pub mod panels;
pub mod transcripts;
