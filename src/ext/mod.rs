mod read_text_file;

pub use read_text_file::read_text_file;
