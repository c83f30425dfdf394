pub mod employee_reader;
pub mod record_writer;
