pub mod check;
pub mod config;
pub mod init;
pub mod pages;
pub mod principal;
pub mod serve;
pub mod token;
pub mod validate;
