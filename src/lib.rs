// ==============================================================================
// lib.rs - Genetics Plots Library
// ==============================================================================
// Description: Library interface for the ancestry and tandem-repeat pipelines
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================

pub mod ancestry;
pub mod charts;
pub mod config;
pub mod labels;
pub mod models;
pub mod output;
pub mod parsers;
pub mod population;
pub mod processor;
pub mod tandem_repeat;
pub mod validator;
