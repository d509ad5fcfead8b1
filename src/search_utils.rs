pub mod csv_dump;
pub mod query_params;
