pub mod grade;
pub mod init;
pub mod rules;
pub mod validate;
