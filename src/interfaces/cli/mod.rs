pub mod callback_reader;
pub mod response_writer;
