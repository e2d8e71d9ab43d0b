pub mod bedtools_integration;
