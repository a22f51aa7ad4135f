/// Table export to CSV and JSON.
pub mod export;
