pub mod did;
