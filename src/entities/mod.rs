pub mod extraction_record;
pub mod movie;
